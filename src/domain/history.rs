use super::models::{Rating, UserId};
use crate::vectors::SparseVector;

/// All rating events of a single user
#[derive(Debug, Clone, PartialEq)]
pub struct UserHistory {
    user_id: UserId,
    events: Vec<Rating>,
}

impl UserHistory {
    pub fn new(user_id: UserId, events: Vec<Rating>) -> Self {
        Self { user_id, events }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rating> {
        self.events.iter()
    }

    /// Build the user's current item -> rating vector.
    ///
    /// Events are replayed in timestamp order (events without a timestamp
    /// first, in stream order). A later rating replaces an earlier one and
    /// an unrate event removes the item.
    pub fn rating_vector(&self) -> SparseVector {
        let mut ordered: Vec<&Rating> = self.events.iter().collect();
        ordered.sort_by_key(|rating| rating.timestamp);

        let mut vector = SparseVector::new();
        for rating in ordered {
            match rating.value {
                Some(value) => {
                    vector.set(rating.item_id, value);
                }
                None => {
                    vector.remove(rating.item_id);
                }
            }
        }
        vector
    }
}
