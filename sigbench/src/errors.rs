use sigbench_core::errors::SignalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Interval size {interval_size} exceeds chromosome max index {max_index}")]
    IntervalTooLarge { interval_size: u32, max_index: u32 },

    #[error("Number of tests must be at least 1")]
    NoTestCases,

    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error(transparent)]
    Provider(#[from] SignalError),
}
