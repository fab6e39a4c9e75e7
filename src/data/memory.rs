use anyhow::Result;

use super::{EventSource, RatingCursor, UserHistorySource};
use crate::domain::{Rating, UserHistory, UserId};

/// Rating events held in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryRatingStore {
    ratings: Vec<Rating>,
}

impl MemoryRatingStore {
    pub fn new(ratings: Vec<Rating>) -> Self {
        Self { ratings }
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

pub struct MemoryCursor {
    ratings: std::vec::IntoIter<Rating>,
}

impl Iterator for MemoryCursor {
    type Item = Result<Rating>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ratings.next().map(Ok)
    }
}

impl RatingCursor for MemoryCursor {
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl EventSource for MemoryRatingStore {
    type Cursor = MemoryCursor;

    fn stream_ratings(&self) -> Result<MemoryCursor> {
        Ok(MemoryCursor {
            ratings: self.ratings.clone().into_iter(),
        })
    }
}

impl UserHistorySource for MemoryRatingStore {
    fn history_for_user(&self, user_id: UserId) -> Result<Option<UserHistory>> {
        let events: Vec<Rating> = self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();

        if events.is_empty() {
            return Ok(None);
        }
        Ok(Some(UserHistory::new(user_id, events)))
    }
}
