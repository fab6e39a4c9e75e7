use anyhow::Result;
use log::warn;

use super::RatingCursor;
use crate::domain::Rating;

/// Scope guard closing a [`RatingCursor`] exactly once.
///
/// `close` reports the close result to the caller. If the guard is dropped
/// without it (early return, `?`, panic) the cursor is closed in `Drop` and a
/// failure can only be logged.
pub struct CursorGuard<C: RatingCursor> {
    cursor: Option<C>,
}

impl<C: RatingCursor> CursorGuard<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor: Some(cursor),
        }
    }

    pub fn close(mut self) -> Result<()> {
        match self.cursor.take() {
            Some(mut cursor) => cursor.close(),
            None => Ok(()),
        }
    }
}

impl<C: RatingCursor> Iterator for CursorGuard<C> {
    type Item = Result<Rating>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.as_mut()?.next()
    }
}

impl<C: RatingCursor> Drop for CursorGuard<C> {
    fn drop(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            if let Err(e) = cursor.close() {
                warn!("Failed to close rating cursor: {e:#}");
            }
        }
    }
}
