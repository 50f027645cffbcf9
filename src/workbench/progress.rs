// file: src/workbench/progress.rs
// description: progress tracking and statistics for provider fan-out
// reference: uses indicatif for progress bars and tracks query metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct ComparisonStats {
    pub queries_completed: usize,
    pub queries_failed: usize,
    pub entities_extracted: usize,
    pub duration_secs: u64,
}

impl ComparisonStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.queries_completed + self.queries_failed;
        if total == 0 {
            return 0.0;
        }
        (self.queries_completed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
    completed: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
    entities: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_queries: usize) -> Self {
        Self::with_color(total_queries, true)
    }

    pub fn with_color(total_queries: usize, colored: bool) -> Self {
        let bar = ProgressBar::new(total_queries as u64);
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
        } else {
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );

        Self {
            bar,
            completed: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            entities: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
        self.update_message();
    }

    pub fn inc_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
        self.update_message();
    }

    pub fn add_entities(&self, count: usize) {
        self.entities.fetch_add(count, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> ComparisonStats {
        ComparisonStats {
            queries_completed: self.completed.load(Ordering::SeqCst),
            queries_failed: self.failed.load(Ordering::SeqCst),
            entities_extracted: self.entities.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_message(&self) {
        let failed = self.failed.load(Ordering::SeqCst);
        let entities = self.entities.load(Ordering::SeqCst);
        self.bar
            .set_message(format!("Entities: {} | Failed: {}", entities, failed));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_success_rate() {
        let mut stats = ComparisonStats::new();
        stats.queries_completed = 9;
        stats.queries_failed = 1;
        assert!((stats.success_rate() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_empty() {
        let stats = ComparisonStats::new();
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_tracker_counts() {
        let tracker = ProgressTracker::with_color(4, false);
        tracker.inc_completed();
        tracker.inc_failed();
        tracker.add_entities(7);

        let stats = tracker.get_stats();
        assert_eq!(stats.queries_completed, 1);
        assert_eq!(stats.queries_failed, 1);
        assert_eq!(stats.entities_extracted, 7);
    }
}
