// Shared test doubles

use crate::telemetry::{EmissionsSample, SampleSource};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic source that counts how often it was asked for a reading.
/// The n-th sample (1-based) carries `timestamp = n`.
#[derive(Default)]
pub struct CountingSource {
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SampleSource for CountingSource {
    fn next_sample(&self) -> EmissionsSample {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        EmissionsSample {
            timestamp: n as i64,
            energy: 75.0,
            transport: 60.0,
            waste: 35.0,
        }
    }
}
