use std::collections::VecDeque;

use anyhow::{Result, ensure};
use log::debug;

use super::connection::{DbConn, DbPool, get_connection};
use super::ratings;
use crate::data::{EventSource, RatingCursor, UserHistorySource};
use crate::domain::{ItemId, Rating, UserHistory, UserId};

/// SQLite-backed rating store
#[derive(Clone)]
pub struct SqliteRatingStore {
    pool: DbPool,
    batch_size: usize,
}

impl SqliteRatingStore {
    pub fn new(pool: DbPool, batch_size: usize) -> Result<Self> {
        ensure!(batch_size > 0, "Stream batch size must be positive");
        Ok(Self { pool, batch_size })
    }

    pub fn insert_ratings(&self, new_ratings: &[Rating]) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        ratings::insert_ratings(&mut conn, new_ratings)
    }

    pub fn item_ids(&self) -> Result<Vec<ItemId>> {
        let mut conn = get_connection(&self.pool)?;
        ratings::list_item_ids(&mut conn)
    }

    pub fn count(&self) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        ratings::count(&mut conn)
    }
}

/// Streams the ratings table in id order, one page per query.
///
/// Holds a pooled connection until closed.
pub struct SqliteRatingCursor {
    conn: Option<DbConn>,
    batch_size: usize,
    last_id: i64,
    buffer: VecDeque<Rating>,
    exhausted: bool,
}

impl SqliteRatingCursor {
    fn fetch_page(&mut self) -> Result<()> {
        let Some(conn) = self.conn.as_mut() else {
            self.exhausted = true;
            return Ok(());
        };

        let page = ratings::list_page(conn, self.last_id, self.batch_size)?;
        if page.len() < self.batch_size {
            self.exhausted = true;
        }
        if let Some(last) = page.last() {
            self.last_id = last.id;
        }
        self.buffer.extend(page.into_iter().map(Rating::from));
        Ok(())
    }
}

impl Iterator for SqliteRatingCursor {
    type Item = Result<Rating>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            if let Err(e) = self.fetch_page() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }
        self.buffer.pop_front().map(Ok)
    }
}

impl RatingCursor for SqliteRatingCursor {
    fn close(&mut self) -> Result<()> {
        if self.conn.take().is_some() {
            debug!("Released rating stream connection at id {}", self.last_id);
        }
        self.buffer.clear();
        self.exhausted = true;
        Ok(())
    }
}

impl EventSource for SqliteRatingStore {
    type Cursor = SqliteRatingCursor;

    fn stream_ratings(&self) -> Result<SqliteRatingCursor> {
        Ok(SqliteRatingCursor {
            conn: Some(get_connection(&self.pool)?),
            batch_size: self.batch_size,
            last_id: 0,
            buffer: VecDeque::new(),
            exhausted: false,
        })
    }
}

impl UserHistorySource for SqliteRatingStore {
    fn history_for_user(&self, user_id: UserId) -> Result<Option<UserHistory>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = ratings::list_by_user(&mut conn, user_id)?;

        if rows.is_empty() {
            return Ok(None);
        }
        let events = rows.into_iter().map(Rating::from).collect();
        Ok(Some(UserHistory::new(user_id, events)))
    }
}
