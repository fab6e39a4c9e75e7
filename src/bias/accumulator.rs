use std::collections::HashMap;

use crate::domain::ItemId;
use crate::vectors::SparseVector;

#[derive(Debug, Clone, Copy, Default)]
struct IdTotal {
    sum: f64,
    count: usize,
}

/// Running sums for a global mean and per-id means.
///
/// Every `put` counts, repeated values for the same id included.
#[derive(Debug, Default)]
pub struct IdMeanAccumulator {
    total: f64,
    count: usize,
    ids: HashMap<ItemId, IdTotal>,
}

impl IdMeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, id: ItemId, value: f64) {
        self.total += value;
        self.count += 1;

        let entry = self.ids.entry(id).or_default();
        entry.sum += value;
        entry.count += 1;
    }

    /// Number of values accumulated
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of distinct ids seen
    pub fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Mean of every value put, 0.0 when nothing was put
    pub fn global_mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total / self.count as f64
    }

    /// Per-id offsets from the global mean, damped toward zero:
    /// `(sum - count * mean) / (count + damping)`.
    pub fn id_mean_offsets(&self, damping: f64) -> SparseVector {
        let mean = self.global_mean();
        self.ids
            .iter()
            .map(|(&id, totals)| {
                let n = totals.count as f64;
                (id, (totals.sum - n * mean) / (n + damping))
            })
            .collect()
    }
}
