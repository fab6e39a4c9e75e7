use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::DbRating;
use crate::domain::{ItemId, Rating, UserId};

const SELECT_COLUMNS: &str = "SELECT id, user_id, item_id, value, timestamp FROM ratings";

/// Insert all ratings in a single transaction, returning the number written
pub fn insert_ratings(conn: &mut DbConn, ratings: &[Rating]) -> Result<usize> {
    let tx = conn.transaction().context("Failed to begin rating import")?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO ratings (user_id, item_id, value, timestamp) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for rating in ratings {
            stmt.execute(params![
                rating.user_id,
                rating.item_id,
                rating.value,
                rating.timestamp
            ])
            .with_context(|| {
                format!(
                    "Failed to insert rating of user {} for item {}",
                    rating.user_id, rating.item_id
                )
            })?;
        }
    }

    tx.commit().context("Failed to commit rating import")?;
    Ok(ratings.len())
}

fn parse_rating_row(row: &rusqlite::Row) -> rusqlite::Result<DbRating> {
    Ok(DbRating {
        id: row.get(0)?,
        user_id: row.get(1)?,
        item_id: row.get(2)?,
        value: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

/// Next `limit` ratings with an id above `after_id`, in id order
pub fn list_page(conn: &mut DbConn, after_id: i64, limit: usize) -> Result<Vec<DbRating>> {
    let sql = format!("{SELECT_COLUMNS} WHERE id > ?1 ORDER BY id LIMIT ?2");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![after_id, limit as i64], parse_rating_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_user(conn: &mut DbConn, user_id: UserId) -> Result<Vec<DbRating>> {
    let sql = format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY timestamp, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![user_id], parse_rating_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_item_ids(conn: &mut DbConn) -> Result<Vec<ItemId>> {
    let mut stmt = conn.prepare("SELECT DISTINCT item_id FROM ratings ORDER BY item_id")?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count(conn: &mut DbConn) -> Result<usize> {
    let total: i64 = conn
        .query_row("SELECT COUNT(*) FROM ratings", [], |row| row.get(0))
        .context("Failed to count ratings")?;
    Ok(total as usize)
}
