use crate::errors::SignalError;

/// Capability contract for a statistics backend, whether it is the backend
/// under test or the reference backend.
///
/// Implementations are expected to be stateless with respect to prior calls:
/// the harness reuses one query set across many statistics and assumes each
/// batch sees identical inputs producing identical answers.
pub trait StatProvider {
    /// Compute one statistic over a whole batch of intervals.
    ///
    /// Returns one result per input interval, in input order. `None` marks an
    /// interval the backend has no data for; it is a first-class outcome, not
    /// a failure, and callers must never conflate it with a numeric zero
    /// (only the error metric coerces it, downstream).
    ///
    /// `exact = false` permits an approximate, typically faster computation.
    /// Backends without an approximate mode may ignore the flag.
    fn batch_query(
        &self,
        chrom_name: &str,
        starts: &[u32],
        ends: &[u32],
        stat: &str,
        exact: bool,
    ) -> Result<Vec<Option<f64>>, SignalError>;
}
