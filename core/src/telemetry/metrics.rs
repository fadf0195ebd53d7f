use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<IngestCounters>,
}

/// Ingest outcomes since the engine started; not cleared by statistics resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestCounters {
    pub processed: u64,
    pub aggregated: u64,
    pub degenerate: u64,
    pub missing_reference: u64,
    pub missing_readings: u64,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(IngestCounters::default()),
        }
    }

    pub fn record_aggregated(&self, missing_readings: usize) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.processed += 1;
            counters.aggregated += 1;
            counters.missing_readings += missing_readings as u64;
        }
    }

    /// Reference check passed but no measurement port had a usable reading.
    pub fn record_empty(&self, missing_readings: usize) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.processed += 1;
            counters.missing_readings += missing_readings as u64;
        }
    }

    pub fn record_degenerate(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.processed += 1;
            counters.degenerate += 1;
        }
    }

    pub fn record_missing_reference(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.processed += 1;
            counters.missing_reference += 1;
        }
    }

    pub fn snapshot(&self) -> IngestCounters {
        self.inner
            .lock()
            .map(|counters| *counters)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
