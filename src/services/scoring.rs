use std::cmp::Ordering;
use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::bias::{BiasModel, BiasModelBuilder, ItemScorer, UserItemBiasItemScorer};
use crate::config::AppConfig;
use crate::database::{self, SqliteRatingStore};
use crate::domain::{ItemId, UserId};
use crate::vectors::SparseVector;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub item_id: ItemId,
    pub score: f64,
}

/// Builds the bias model from the store and ranks items for a user
pub struct ScoringService {
    store: SqliteRatingStore,
    model: Arc<BiasModel>,
}

impl ScoringService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let storage = &config.storage;
        let pool = database::create_pool(&storage.database_path)?;
        let store = SqliteRatingStore::new(pool, storage.stream_batch_size)?;

        info!("Building bias model from {}", storage.database_path);
        let model = BiasModelBuilder::new(&store, &config.model).build()?;

        Ok(Self {
            store,
            model: Arc::new(model),
        })
    }

    pub fn model(&self) -> Arc<BiasModel> {
        Arc::clone(&self.model)
    }

    /// Score `items` (every known item when empty) for `user_id`, best first.
    pub fn rank(&self, user_id: UserId, items: &[ItemId], top: Option<usize>) -> Result<Vec<ScoredItem>> {
        let candidates = if items.is_empty() {
            self.store.item_ids()?
        } else {
            items.to_vec()
        };

        let scorer = UserItemBiasItemScorer::new(self.model(), &self.store);
        let scores = scorer.score_items(user_id, &candidates)?;
        info!("Scored {} items for user {}", scores.len(), user_id);

        Ok(rank_scores(&scores, top))
    }
}

fn rank_scores(scores: &SparseVector, top: Option<usize>) -> Vec<ScoredItem> {
    let mut ranked: Vec<ScoredItem> = scores
        .iter()
        .map(|(item_id, score)| ScoredItem { item_id, score })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.item_id.cmp(&b.item_id))
    });

    if let Some(limit) = top {
        ranked.truncate(limit);
    }
    ranked
}
