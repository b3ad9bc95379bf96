/// Default generator seed. Fixed (not re-randomized per run) so that runtime
/// and error figures stay comparable across repeated or parameterized runs.
pub const DEFAULT_SEED: u64 = 1;

/// Report-key prefix for the reference backend's own timing records.
pub const REFERENCE_PREFIX: &str = "reference_";
