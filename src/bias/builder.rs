use anyhow::{Context, Result, ensure};
use log::{debug, info};

use super::accumulator::IdMeanAccumulator;
use super::model::BiasModel;
use crate::config::ModelSettings;
use crate::data::{CursorGuard, EventSource};
use crate::errors::build_context;

/// Computes a [`BiasModel`] from the full rating stream.
///
/// The source is only needed while building; the model keeps no reference to it.
pub struct BiasModelBuilder<S> {
    source: S,
    damping: f64,
}

impl<S: EventSource> BiasModelBuilder<S> {
    pub fn new(source: S, settings: &ModelSettings) -> Self {
        Self {
            source,
            damping: settings.damping,
        }
    }

    pub fn build(&self) -> Result<BiasModel> {
        ensure!(
            self.damping.is_finite() && self.damping >= 0.0,
            "Damping must be a non-negative number, got {}",
            self.damping
        );

        let accum = self.accumulate()?;
        let model = BiasModel::new(accum.global_mean(), accum.id_mean_offsets(self.damping));

        info!(
            "Built bias model from {} ratings: {} items, global mean {:.4}",
            accum.count(),
            accum.id_count(),
            model.global_mean()
        );
        Ok(model)
    }

    fn accumulate(&self) -> Result<IdMeanAccumulator> {
        let mut accum = IdMeanAccumulator::new();
        let mut skipped = 0usize;

        let cursor = self
            .source
            .stream_ratings()
            .with_context(|| build_context("opening rating stream"))?;
        let mut ratings = CursorGuard::new(cursor);

        // Duplicate (user, item) ratings are each counted.
        for rating in &mut ratings {
            let rating = rating.with_context(|| build_context("reading rating stream"))?;
            match rating.preference() {
                Some(pref) => accum.put(pref.item_id, pref.value),
                None => skipped += 1,
            }
        }

        ratings
            .close()
            .with_context(|| build_context("closing rating stream"))?;

        if skipped > 0 {
            debug!("Skipped {} rating events without a value", skipped);
        }
        Ok(accum)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;

    use super::*;
    use crate::data::{MemoryRatingStore, RatingCursor};
    use crate::domain::Rating;

    const EPSILON: f64 = 1e-9;

    fn settings() -> ModelSettings {
        ModelSettings::default()
    }

    fn scenario_ratings() -> Vec<Rating> {
        vec![
            Rating::new(1, 1, 5.0),
            Rating::new(1, 2, 3.0),
            Rating::new(2, 1, 4.0),
        ]
    }

    /// Event source whose cursor can fail mid-stream or on close
    struct FlakySource {
        ratings: Vec<Rating>,
        fail_at: Option<usize>,
        fail_close: bool,
        closes: Arc<AtomicUsize>,
    }

    impl FlakySource {
        fn new(ratings: Vec<Rating>) -> Self {
            Self {
                ratings,
                fail_at: None,
                fail_close: false,
                closes: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn closes(&self) -> usize {
            self.closes.load(Ordering::SeqCst)
        }
    }

    struct FlakyCursor {
        ratings: std::vec::IntoIter<Rating>,
        position: usize,
        fail_at: Option<usize>,
        fail_close: bool,
        closes: Arc<AtomicUsize>,
    }

    impl Iterator for FlakyCursor {
        type Item = Result<Rating>;

        fn next(&mut self) -> Option<Self::Item> {
            let position = self.position;
            self.position += 1;
            if self.fail_at == Some(position) {
                return Some(Err(anyhow!("read failed at {position}")));
            }
            self.ratings.next().map(Ok)
        }
    }

    impl RatingCursor for FlakyCursor {
        fn close(&mut self) -> Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            if self.fail_close {
                return Err(anyhow!("close failed"));
            }
            Ok(())
        }
    }

    impl EventSource for FlakySource {
        type Cursor = FlakyCursor;

        fn stream_ratings(&self) -> Result<FlakyCursor> {
            Ok(FlakyCursor {
                ratings: self.ratings.clone().into_iter(),
                position: 0,
                fail_at: self.fail_at,
                fail_close: self.fail_close,
                closes: Arc::clone(&self.closes),
            })
        }
    }

    #[test]
    fn builds_scenario_model() {
        let store = MemoryRatingStore::new(scenario_ratings());
        let model = BiasModelBuilder::new(&store, &settings()).build().unwrap();

        assert!((model.global_mean() - 4.0).abs() < EPSILON);
        assert_eq!(model.item_biases().len(), 2);
        assert!((model.item_bias(1) - 1.0 / 7.0).abs() < EPSILON);
        assert!((model.item_bias(2) + 1.0 / 6.0).abs() < EPSILON);
    }

    #[test]
    fn empty_stream_gives_zero_mean() {
        let store = MemoryRatingStore::default();
        let model = BiasModelBuilder::new(&store, &settings()).build().unwrap();

        assert_eq!(model.global_mean(), 0.0);
        assert!(model.item_biases().is_empty());
    }

    #[test]
    fn unrate_events_are_skipped() {
        let mut ratings = scenario_ratings();
        ratings.push(Rating::unrate(3, 4));
        let store = MemoryRatingStore::new(ratings);

        let model = BiasModelBuilder::new(&store, &settings()).build().unwrap();
        assert!((model.global_mean() - 4.0).abs() < EPSILON);
        assert!(!model.item_biases().contains_key(4));
    }

    #[test]
    fn duplicate_ratings_are_counted_twice() {
        let store = MemoryRatingStore::new(vec![
            Rating::new(1, 1, 5.0),
            Rating::new(1, 1, 5.0),
            Rating::new(2, 2, 2.0),
        ]);
        let model = BiasModelBuilder::new(&store, &settings()).build().unwrap();

        assert!((model.global_mean() - 4.0).abs() < EPSILON);
        assert!((model.item_bias(1) - 2.0 / 7.0).abs() < EPSILON);
    }

    #[test]
    fn rejects_negative_damping() {
        let store = MemoryRatingStore::new(scenario_ratings());
        let settings = ModelSettings { damping: -1.0 };
        assert!(BiasModelBuilder::new(&store, &settings).build().is_err());
    }

    #[test]
    fn closes_cursor_once_on_success() {
        let source = FlakySource::new(scenario_ratings());
        BiasModelBuilder::new(&source, &settings()).build().unwrap();
        assert_eq!(source.closes(), 1);
    }

    #[test]
    fn closes_cursor_once_on_read_failure() {
        let mut source = FlakySource::new(scenario_ratings());
        source.fail_at = Some(1);

        let err = BiasModelBuilder::new(&source, &settings()).build().unwrap_err();
        assert!(format!("{err:#}").contains("read failed"));
        assert_eq!(source.closes(), 1);
    }

    #[test]
    fn close_failure_fails_the_build() {
        let mut source = FlakySource::new(scenario_ratings());
        source.fail_close = true;

        let err = BiasModelBuilder::new(&source, &settings()).build().unwrap_err();
        assert!(format!("{err:#}").contains("close failed"));
        assert_eq!(source.closes(), 1);
    }
}
