use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Energy band in CO2e. Dashboard alert thresholds are tuned to these bands.
pub const ENERGY_RANGE: Range<f64> = 50.0..100.0;

/// Transport band in CO2e
pub const TRANSPORT_RANGE: Range<f64> = 40.0..80.0;

/// Waste band in CO2e
pub const WASTE_RANGE: Range<f64> = 20.0..50.0;

/// One simulated sensor reading, fanned out to every live connection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionsSample {
    /// Unix epoch milliseconds at generation time
    pub timestamp: i64,
    pub energy: f64,
    pub transport: f64,
    pub waste: f64,
}

/// Produce a sample with each reading drawn independently from its band.
pub fn generate_sample() -> EmissionsSample {
    let mut rng = rand::thread_rng();

    EmissionsSample {
        timestamp: Utc::now().timestamp_millis(),
        energy: rng.gen_range(ENERGY_RANGE),
        transport: rng.gen_range(TRANSPORT_RANGE),
        waste: rng.gen_range(WASTE_RANGE),
    }
}

/// Source of readings for the session manager and broadcast scheduler.
pub trait SampleSource: Send + Sync {
    fn next_sample(&self) -> EmissionsSample;
}

/// Production source backed by the thread-local RNG and the wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSampleSource;

impl SampleSource for RandomSampleSource {
    fn next_sample(&self) -> EmissionsSample {
        generate_sample()
    }
}
