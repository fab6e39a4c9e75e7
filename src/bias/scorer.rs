use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;

use super::model::BiasModel;
use crate::data::UserHistorySource;
use crate::domain::{ItemId, UserId};
use crate::vectors::SparseVector;

/// Scores items for a user
pub trait ItemScorer {
    /// Score every key of `scores` for `user_id`, writing the results in place.
    fn score(&self, user_id: UserId, scores: &mut SparseVector) -> Result<()>;

    fn score_items(&self, user_id: UserId, items: &[ItemId]) -> Result<SparseVector> {
        let mut scores = SparseVector::with_domain(items.iter().copied());
        self.score(user_id, &mut scores)?;
        Ok(scores)
    }

    fn score_item(&self, user_id: UserId, item_id: ItemId) -> Result<Option<f64>> {
        Ok(self.score_items(user_id, &[item_id])?.get(item_id))
    }
}

/// Personalized mean scorer: global mean + item bias + user bias
pub struct UserItemBiasItemScorer<H> {
    model: Arc<BiasModel>,
    history: H,
}

impl<H: UserHistorySource> UserItemBiasItemScorer<H> {
    pub fn new(model: Arc<BiasModel>, history: H) -> Self {
        Self { model, history }
    }

    pub fn model(&self) -> &BiasModel {
        &self.model
    }

    /// Mean residual of the user's ratings after removing the global mean
    /// and item biases. `None` when the user has no ratings.
    pub fn user_bias(&self, user_id: UserId) -> Result<Option<f64>> {
        let history = self
            .history
            .history_for_user(user_id)
            .with_context(|| format!("Failed to load rating history for user {}", user_id))?;

        let Some(history) = history else {
            debug!("No rating history for user {}", user_id);
            return Ok(None);
        };

        let mut residuals = history.rating_vector();
        residuals.add_scalar(-self.model.global_mean());
        residuals.add_scaled(self.model.item_biases(), -1.0);

        Ok(residuals.mean())
    }
}

impl<H: UserHistorySource> ItemScorer for UserItemBiasItemScorer<H> {
    fn score(&self, user_id: UserId, scores: &mut SparseVector) -> Result<()> {
        scores.fill(self.model.global_mean());
        // items without a bias stay at the global mean
        scores.add(self.model.item_biases());

        if let Some(user_bias) = self.user_bias(user_id)? {
            scores.add_scalar(user_bias);
        }
        Ok(())
    }
}
