use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type ItemId = i64;

/// A user's stated preference for an item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preference {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub value: f64,
}

/// Rating event. A rating without a value retracts an earlier one (unrate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl Rating {
    pub fn new(user_id: UserId, item_id: ItemId, value: f64) -> Self {
        Self {
            user_id,
            item_id,
            value: Some(value),
            timestamp: None,
        }
    }

    pub fn unrate(user_id: UserId, item_id: ItemId) -> Self {
        Self {
            user_id,
            item_id,
            value: None,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn preference(&self) -> Option<Preference> {
        self.value.map(|value| Preference {
            user_id: self.user_id,
            item_id: self.item_id,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrate_has_no_preference() {
        assert!(Rating::unrate(1, 2).preference().is_none());

        let pref = Rating::new(1, 2, 3.5).preference().unwrap();
        assert_eq!(pref.item_id, 2);
        assert_eq!(pref.value, 3.5);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"[{"user_id": 1, "item_id": 10, "value": 4.0},
                       {"user_id": 1, "item_id": 11, "timestamp": "2014-03-01T12:00:00"}]"#;
        let ratings: Vec<Rating> = serde_json::from_str(json).unwrap();

        assert_eq!(ratings[0], Rating::new(1, 10, 4.0));
        assert!(ratings[1].value.is_none());
        assert!(ratings[1].timestamp.is_some());
    }
}
