use chrono::NaiveDateTime;

use crate::domain::{ItemId, Rating, UserId};

#[derive(Debug, Clone)]
pub struct DbRating {
    pub id: i64,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub value: Option<f64>,
    pub timestamp: Option<NaiveDateTime>,
}

impl From<DbRating> for Rating {
    fn from(row: DbRating) -> Self {
        Rating {
            user_id: row.user_id,
            item_id: row.item_id,
            value: row.value,
            timestamp: row.timestamp,
        }
    }
}
