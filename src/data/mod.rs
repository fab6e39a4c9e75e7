mod cursor;
pub mod memory;

use anyhow::Result;

use crate::domain::{Rating, UserHistory, UserId};

pub use cursor::CursorGuard;
pub use memory::MemoryRatingStore;

/// Single-pass stream of rating events holding an open resource
pub trait RatingCursor: Iterator<Item = Result<Rating>> {
    /// Release the underlying resource. Called once per cursor.
    fn close(&mut self) -> Result<()>;
}

/// Source of the full rating event stream
pub trait EventSource {
    type Cursor: RatingCursor;

    fn stream_ratings(&self) -> Result<Self::Cursor>;
}

/// Per-user rating lookup. `Ok(None)` means the user has no events.
pub trait UserHistorySource {
    fn history_for_user(&self, user_id: UserId) -> Result<Option<UserHistory>>;
}

impl<T: EventSource + ?Sized> EventSource for &T {
    type Cursor = T::Cursor;

    fn stream_ratings(&self) -> Result<Self::Cursor> {
        (**self).stream_ratings()
    }
}

impl<T: UserHistorySource + ?Sized> UserHistorySource for &T {
    fn history_for_user(&self, user_id: UserId) -> Result<Option<UserHistory>> {
        (**self).history_for_user(user_id)
    }
}
