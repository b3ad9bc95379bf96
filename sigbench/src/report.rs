//! Assembled benchmark results.

use std::collections::BTreeMap;

use serde::Serialize;

/// Timing and accuracy figures for one statistic key.
///
/// Under-test statistics carry `run_time`; reference-qualified keys carry
/// `approx_run_time` and `exact_run_time` instead. `error` appears once the
/// prediction has been scored against the ground truth, and stays absent in
/// runtime-only mode or when the metric had nothing to report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatRecord {
    /// Wall-clock seconds for one whole-batch call by the backend under test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time: Option<f64>,
    /// Wall-clock seconds for the reference backend's approximate-mode batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approx_run_time: Option<f64>,
    /// Wall-clock seconds for the reference backend's exact-mode batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_run_time: Option<f64>,
    /// Mean percent error against the ground-truth sequence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
}

/// Mapping from statistic key (including `reference_`-qualified keys) to its
/// measurement record. Pure assembly; no figures are computed here.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    records: BTreeMap<String, StatRecord>,
}

impl Report {
    /// Fetch or create the record for `key`.
    pub(crate) fn entry(&mut self, key: &str) -> &mut StatRecord {
        self.records.entry(key.to_string()).or_default()
    }

    pub fn get(&self, key: &str) -> Option<&StatRecord> {
        self.records.get(key)
    }

    /// Records in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StatRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_entry_merges_fields_for_one_key() {
        let mut report = Report::default();
        report.entry("reference_mean").approx_run_time = Some(0.5);
        report.entry("reference_mean").exact_run_time = Some(1.5);

        let record = report.get("reference_mean").unwrap();
        assert_eq!(record.approx_run_time, Some(0.5));
        assert_eq!(record.exact_run_time, Some(1.5));
        assert_eq!(record.run_time, None);
        assert_eq!(report.len(), 1);
    }

    #[rstest]
    fn test_iteration_is_key_sorted() {
        let mut report = Report::default();
        report.entry("std");
        report.entry("mean");
        report.entry("coverage");

        let keys: Vec<&String> = report.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["coverage", "mean", "std"]);
    }
}
