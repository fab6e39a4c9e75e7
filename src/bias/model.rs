use crate::domain::ItemId;
use crate::vectors::SparseVector;

/// Precomputed global mean and per-item biases.
///
/// Immutable once built; share it between scorers with `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasModel {
    global_mean: f64,
    item_biases: SparseVector,
}

impl BiasModel {
    pub fn new(global_mean: f64, item_biases: SparseVector) -> Self {
        Self {
            global_mean,
            item_biases,
        }
    }

    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    /// Difference between each item's damped mean rating and the global mean
    pub fn item_biases(&self) -> &SparseVector {
        &self.item_biases
    }

    /// Bias of one item, 0.0 for items without ratings
    pub fn item_bias(&self, item_id: ItemId) -> f64 {
        self.item_biases.get(item_id).unwrap_or(0.0)
    }
}
