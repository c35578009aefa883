//! Pull progress tracking.
//!
//! A model pull downloads several content-addressed layers in parallel. The
//! server reports byte progress per layer; `ProgressAggregator` folds those
//! reports into a single overall percentage.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Byte progress of one layer of a model being pulled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerProgress {
    pub digest: String,
    pub completed: u64,
    pub total: u64,
}

impl LayerProgress {
    pub fn new(digest: impl Into<String>, completed: u64, total: u64) -> Self {
        Self {
            digest: digest.into(),
            completed,
            total,
        }
    }

    /// Percentage of this layer alone, 0 when its size is not known yet.
    pub fn percent(&self) -> u64 {
        percent_of(self.completed, self.total)
    }
}

/// Overall progress of a single pull.
///
/// Layers are keyed by digest and kept in first-seen order. The percentage is
/// recomputed on every event, so it always matches the last per-layer state.
///
/// `completed` is trusted as reported; it is not clamped to `total`, so the
/// percentage can exceed 100 if the server over-reports.
#[derive(Debug, Clone, Default)]
pub struct ProgressAggregator {
    /// INVARIANT: one entry per digest, never removed until `reset`.
    layers: IndexMap<String, LayerProgress>,
    percent: u64,
}

impl ProgressAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a layer event and return the recomputed overall percentage.
    pub fn record(&mut self, progress: LayerProgress) -> u64 {
        match self.layers.get_mut(&progress.digest) {
            Some(existing) => {
                existing.completed = progress.completed;
                existing.total = progress.total;
            }
            None => {
                self.layers.insert(progress.digest.clone(), progress);
            }
        }

        let (completed, total) = self.totals();
        self.percent = percent_of(completed, total);
        self.percent
    }

    /// Clear all layers; called when a pull starts and when it ends.
    pub fn reset(&mut self) {
        self.layers.clear();
        self.percent = 0;
    }

    pub const fn percent(&self) -> u64 {
        self.percent
    }

    /// Sum of completed and total bytes across all known layers.
    pub fn totals(&self) -> (u64, u64) {
        self.layers.values().fold((0, 0), |(c, t), layer| {
            (c.saturating_add(layer.completed), t.saturating_add(layer.total))
        })
    }

    pub fn layers(&self) -> impl Iterator<Item = &LayerProgress> {
        self.layers.values()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

fn percent_of(completed: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let pct = u128::from(completed) * 100 / u128::from(total);
    u64::try_from(pct).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_follows_each_event() {
        let mut agg = ProgressAggregator::new();
        let seq: Vec<u64> = [
            LayerProgress::new("a", 50, 100),
            LayerProgress::new("b", 0, 100),
            LayerProgress::new("a", 100, 100),
        ]
        .into_iter()
        .map(|p| agg.record(p))
        .collect();

        // The second report for "a" replaces the first rather than adding to it.
        assert_eq!(seq, vec![50, 25, 50]);
        assert_eq!(agg.percent(), 50);
        assert_eq!(agg.layer_count(), 2);

        assert_eq!(agg.record(LayerProgress::new("b", 50, 100)), 75);
    }

    #[test]
    fn test_no_events_is_zero() {
        let agg = ProgressAggregator::new();
        assert_eq!(agg.percent(), 0);
        assert_eq!(agg.totals(), (0, 0));
    }

    #[test]
    fn test_zero_total_layer_does_not_divide_by_zero() {
        let mut agg = ProgressAggregator::new();
        assert_eq!(agg.record(LayerProgress::new("manifest", 0, 0)), 0);
    }

    #[test]
    fn test_percentage_floors() {
        let mut agg = ProgressAggregator::new();
        assert_eq!(agg.record(LayerProgress::new("a", 2, 3)), 66);
    }

    #[test]
    fn test_layers_keep_first_seen_order() {
        let mut agg = ProgressAggregator::new();
        agg.record(LayerProgress::new("b", 1, 10));
        agg.record(LayerProgress::new("a", 1, 10));
        agg.record(LayerProgress::new("b", 5, 10));

        let digests: Vec<&str> = agg.layers().map(|l| l.digest.as_str()).collect();
        assert_eq!(digests, vec!["b", "a"]);
        assert_eq!(agg.layers().next().unwrap().completed, 5);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut agg = ProgressAggregator::new();
        agg.record(LayerProgress::new("a", 10, 10));
        agg.reset();

        assert_eq!(agg.percent(), 0);
        assert_eq!(agg.layer_count(), 0);
        assert_eq!(agg.record(LayerProgress::new("c", 1, 4)), 25);
    }

    #[test]
    fn test_over_reported_layer_is_not_clamped() {
        let mut agg = ProgressAggregator::new();
        assert_eq!(agg.record(LayerProgress::new("a", 150, 100)), 150);
    }

    #[test]
    fn test_huge_layers_do_not_overflow() {
        let mut agg = ProgressAggregator::new();
        assert_eq!(agg.record(LayerProgress::new("a", u64::MAX / 2, u64::MAX)), 49);
    }

    #[test]
    fn test_layer_percent() {
        assert_eq!(LayerProgress::new("a", 1, 4).percent(), 25);
        assert_eq!(LayerProgress::new("a", 1, 0).percent(), 0);
    }
}
