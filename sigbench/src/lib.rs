//! Comparative benchmarking harness for interval-aggregate statistics
//! backends.
//!
//! Given a backend under test and a reference backend (both implementing
//! [`StatProvider`](sigbench_core::StatProvider)), the harness generates one
//! reproducible set of randomized query intervals, times each backend on
//! whole-batch statistic queries over that set, and scores the tested
//! backend's answers against the reference with a mean percent error metric.
//!
//! # Example
//!
//! ```no_run
//! use sigbench::{BenchConfig, Benchmark};
//! use sigbench_core::models::ChromSizes;
//! use sigbench_core::DenseSignal;
//!
//! let sizes = ChromSizes::try_from("hg38.chrom.sizes").unwrap();
//! let reference = DenseSignal::from_bedgraph("signal.bedGraph", &sizes).unwrap();
//! let mut tested = reference.clone();
//! tested.load_bins("chr1", 64).unwrap();
//!
//! let bench = Benchmark::new(&tested, &reference, &sizes);
//! let report = bench.run(&BenchConfig {
//!     num_tests: 1000,
//!     interval_size: 500,
//!     chrom_name: "chr1".to_string(),
//!     bin_size: 64,
//!     stats: vec!["mean".to_string(), "approx_mean".to_string()],
//!     only_runtime: false,
//!     bench_reference: true,
//!     reference_is_ground_truth: true,
//! }).unwrap();
//! ```

pub mod consts;
pub mod errors;
pub mod generator;
pub mod metrics;
pub mod report;
pub mod runner;

// re-exports
pub use report::{Report, StatRecord};
pub use runner::{BenchConfig, Benchmark};
