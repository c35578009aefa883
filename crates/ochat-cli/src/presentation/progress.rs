//! Pull progress bar driven by [`ProgressAggregator`].

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};
use ochat_core::{LayerProgress, ProgressAggregator};

/// Single overall bar for a model pull.
///
/// Layer events are folded by the aggregator; the bar only shows the
/// resulting percentage. Hidden when stderr is not a terminal.
pub struct PullProgress {
    bar: ProgressBar,
    aggregator: ProgressAggregator,
    model: String,
}

impl PullProgress {
    pub fn new(model: &str) -> Self {
        let bar = if io::stderr().is_terminal() {
            ProgressBar::new(100)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(format!("pulling {model}"));
        Self {
            bar,
            aggregator: ProgressAggregator::new(),
            model: model.to_string(),
        }
    }

    /// Progress that draws nothing.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            aggregator: ProgressAggregator::new(),
            model: String::new(),
        }
    }

    /// Fold one layer event and redraw. Returns the overall percentage.
    pub fn record(&mut self, progress: LayerProgress) -> u64 {
        let percent = self.aggregator.record(progress);
        // Servers can over-report a layer; the bar itself stops at full.
        self.bar.set_position(percent.min(100));
        self.bar.set_message(self.layer_summary());
        percent
    }

    pub const fn percent(&self) -> u64 {
        self.aggregator.percent()
    }

    /// "pulling llama3 (2/5 layers)"
    fn layer_summary(&self) -> String {
        let done = self
            .aggregator
            .layers()
            .filter(|layer| layer.percent() >= 100)
            .count();
        format!(
            "pulling {} ({done}/{} layers)",
            self.model,
            self.aggregator.layer_count()
        )
    }

    pub fn finish(&mut self, message: &str) {
        self.bar.finish_with_message(message.to_string());
        self.aggregator.reset();
    }

    pub fn abandon(&mut self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
        self.aggregator.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_aggregate_percentage() {
        let mut progress = PullProgress::hidden();

        assert_eq!(progress.record(LayerProgress::new("sha256:a", 50, 100)), 50);
        assert_eq!(progress.record(LayerProgress::new("sha256:b", 0, 100)), 25);
        assert_eq!(progress.record(LayerProgress::new("sha256:b", 50, 100)), 50);
        assert_eq!(progress.record(LayerProgress::new("sha256:a", 100, 100)), 75);
        assert_eq!(progress.percent(), 75);
    }

    #[test]
    fn test_summary_counts_finished_layers() {
        let mut progress = PullProgress::hidden();
        progress.model = "llama3".to_string();

        progress.record(LayerProgress::new("sha256:a", 100, 100));
        progress.record(LayerProgress::new("sha256:b", 10, 100));
        progress.record(LayerProgress::new("sha256:c", 0, 0));
        assert_eq!(progress.layer_summary(), "pulling llama3 (1/3 layers)");
    }

    #[test]
    fn test_finish_clears_layers() {
        let mut progress = PullProgress::hidden();
        progress.record(LayerProgress::new("sha256:a", 40, 100));

        progress.finish("done");
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.record(LayerProgress::new("sha256:z", 1, 2)), 50);
    }

    #[test]
    fn test_over_report_not_clamped_in_percent() {
        let mut progress = PullProgress::hidden();
        assert_eq!(progress.record(LayerProgress::new("sha256:a", 150, 100)), 150);
        assert_eq!(progress.bar.position(), 100);
    }
}
