//! Core models and backend contracts for sigbench.
//!
//! This crate provides the pieces shared by the benchmarking harness and any
//! statistics backend it drives:
//!
//! - Chromosome domains loaded from chrom.sizes files
//! - Fixed-width query interval sets
//! - Statistic identifiers and their mean-family aliasing
//! - The [`StatProvider`] capability contract every backend implements
//! - [`DenseSignal`], an in-memory bedGraph-backed backend offering both
//!   exact and binned-approximate query modes

pub mod errors;
pub mod models;
pub mod provider;
pub mod signal;
pub mod utils;

// re-exports
pub use provider::StatProvider;
pub use signal::DenseSignal;
