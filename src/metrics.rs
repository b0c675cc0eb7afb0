// Run metrics module
//
// Lightweight counters describing what one command did

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Per-run metrics
///
/// Uses atomic operations so the counters can be shared by reference with
/// anything that does work on behalf of a command. Logged once at the end of
/// each command when verbose logging is on.
#[derive(Debug)]
pub struct RunMetrics {
    /// Number of class sources (HTML roots, stylesheet lists, source trees) collected
    pub sources_collected: AtomicUsize,

    /// Total classes extracted across all sources, before deduplication between them
    pub classes_extracted: AtomicUsize,

    /// Number of patterns learned or compiled
    pub patterns_compiled: AtomicUsize,

    /// Number of target classes classified
    pub tokens_classified: AtomicUsize,

    /// Time spent extracting classes from files, in milliseconds
    pub extraction_time_ms: AtomicU64,

    /// Command start time
    start_time: Instant,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            sources_collected: AtomicUsize::new(0),
            classes_extracted: AtomicUsize::new(0),
            patterns_compiled: AtomicUsize::new(0),
            tokens_classified: AtomicUsize::new(0),
            extraction_time_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record one collected source and the classes it produced
    pub fn record_source(&self, classes: usize, elapsed: Duration) {
        self.sources_collected.fetch_add(1, Ordering::Relaxed);
        self.classes_extracted.fetch_add(classes, Ordering::Relaxed);
        self.extraction_time_ms
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_patterns(&self, count: usize) {
        self.patterns_compiled.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_classified(&self, count: usize) {
        self.tokens_classified.fetch_add(count, Ordering::Relaxed);
    }

    /// Time since the command started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::debug!("=== Run Summary ===");
        tracing::debug!("Elapsed: {:.3}s", self.elapsed().as_secs_f64());
        tracing::debug!(
            "Sources: {} collected, {} classes extracted in {}ms",
            self.sources_collected.load(Ordering::Relaxed),
            self.classes_extracted.load(Ordering::Relaxed),
            self.extraction_time_ms.load(Ordering::Relaxed)
        );
        tracing::debug!(
            "Patterns: {}, classes classified: {}",
            self.patterns_compiled.load(Ordering::Relaxed),
            self.tokens_classified.load(Ordering::Relaxed)
        );
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
