// Synthetic emissions readings

mod generator;

pub use generator::{
    generate_sample, EmissionsSample, RandomSampleSource, SampleSource, ENERGY_RANGE,
    TRANSPORT_RANGE, WASTE_RANGE,
};
