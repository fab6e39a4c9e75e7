use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::database::{self, SqliteRatingStore};
use crate::domain::Rating;
use crate::errors::with_parse_context;

/// Loads a JSON ratings file into a freshly reset store
pub struct ImportService {
    config: AppConfig,
}

impl ImportService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, path: &Path) -> Result<usize> {
        info!("=== Starting Rating Import ===");

        let ratings = self.read_ratings(path)?;
        info!("  → Read {} rating events from {}", ratings.len(), path.display());

        let store = self.reset_store()?;
        let written = store.insert_ratings(&ratings)?;
        info!("  → Stored {} ratings in {}", written, self.config.storage.database_path);

        info!("=== Import Complete ===");
        Ok(written)
    }

    fn read_ratings(&self, path: &Path) -> Result<Vec<Rating>> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ratings file {}", path.display()))?;
        with_parse_context(serde_json::from_str(&json), "ratings file")
    }

    fn reset_store(&self) -> Result<SqliteRatingStore> {
        let storage = &self.config.storage;
        let pool = database::create_pool(&storage.database_path)?;

        let mut conn = database::get_connection(&pool)?;
        database::setup::reset_database(&mut conn)?;
        drop(conn);

        SqliteRatingStore::new(pool, storage.stream_batch_size)
    }
}
