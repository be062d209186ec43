//! Loader metrics and observability.
//!
//! Counts calls, module requests and failures for one loader instance. The
//! counters are atomics so concurrent `get_translation` calls can share them.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-loader counters.
#[derive(Debug, Default)]
pub struct LoaderMetrics {
    /// Number of `get_translation` calls
    translation_calls: AtomicUsize,

    /// Number of module requests issued
    requests: AtomicUsize,

    /// Number of modules replaced with an empty object
    module_failures: AtomicUsize,

    /// Number of calls that failed in the merge step
    merge_failures: AtomicUsize,
}

impl LoaderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `get_translation` call.
    pub fn record_translation_call(&self) {
        self.translation_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one module request.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a module that failed to load or parse.
    pub fn record_module_failure(&self) {
        self.module_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed merge step.
    pub fn record_merge_failure(&self) {
        self.merge_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the number of `get_translation` calls.
    pub fn translation_calls(&self) -> usize {
        self.translation_calls.load(Ordering::Relaxed)
    }

    /// Get the number of module requests.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Get the number of failed modules.
    pub fn module_failures(&self) -> usize {
        self.module_failures.load(Ordering::Relaxed)
    }

    /// Get the number of failed merges.
    pub fn merge_failures(&self) -> usize {
        self.merge_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let failures = self.module_failures();
        let request_success_rate = if requests > 0 {
            (requests.saturating_sub(failures) as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            translation_calls: self.translation_calls(),
            requests,
            module_failures: failures,
            request_success_rate,
            merge_failures: self.merge_failures(),
        }
    }
}

/// Snapshot of a loader's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub translation_calls: usize,
    pub requests: usize,
    pub module_failures: usize,

    /// Share of module requests that loaded, as a percentage (0-100)
    pub request_success_rate: f64,

    pub merge_failures: usize,
}
