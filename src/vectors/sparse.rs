use std::collections::BTreeMap;

use crate::domain::ItemId;

/// Numeric vector keyed by item id.
///
/// Entries iterate in key order, so sums over the same vector are always
/// computed in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: BTreeMap<ItemId, f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Create a vector whose key domain is `keys`, every entry set to zero
    pub fn with_domain<I: IntoIterator<Item = ItemId>>(keys: I) -> Self {
        keys.into_iter().map(|key| (key, 0.0)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: ItemId) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn get(&self, key: ItemId) -> Option<f64> {
        self.entries.get(&key).copied()
    }

    pub fn set(&mut self, key: ItemId, value: f64) -> Option<f64> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: ItemId) -> Option<f64> {
        self.entries.remove(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.entries.iter().map(|(&key, &value)| (key, value))
    }

    /// Set every entry to `value`
    pub fn fill(&mut self, value: f64) {
        for entry in self.entries.values_mut() {
            *entry = value;
        }
    }

    /// Add `other` elementwise. Keys missing from `other` are left as is,
    /// keys missing from `self` are ignored.
    pub fn add(&mut self, other: &SparseVector) {
        self.add_scaled(other, 1.0);
    }

    /// Add `value` to every entry
    pub fn add_scalar(&mut self, value: f64) {
        for entry in self.entries.values_mut() {
            *entry += value;
        }
    }

    /// Add `other * scale` elementwise, with the same key rules as [`SparseVector::add`]
    pub fn add_scaled(&mut self, other: &SparseVector, scale: f64) {
        for (key, entry) in self.entries.iter_mut() {
            if let Some(value) = other.entries.get(key) {
                *entry += value * scale;
            }
        }
    }

    pub fn sum(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Mean of the stored values, `None` for an empty vector
    pub fn mean(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.sum() / self.entries.len() as f64)
    }
}

impl FromIterator<(ItemId, f64)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (ItemId, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
