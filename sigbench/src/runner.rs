//! Measurement protocol: drives both backends over one shared query set and
//! assembles the report.

use std::collections::HashMap;
use std::time::Instant;

use sigbench_core::StatProvider;
use sigbench_core::models::stat::{ALL_STATS, base_stat_name};
use sigbench_core::models::{ChromSizes, QuerySet};

use crate::consts::{DEFAULT_SEED, REFERENCE_PREFIX};
use crate::errors::BenchError;
use crate::generator;
use crate::metrics;
use crate::report::Report;

/// Parameters for one benchmark invocation.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of query intervals to generate.
    pub num_tests: usize,
    /// Width of every query interval.
    pub interval_size: u32,
    /// Chromosome to query.
    pub chrom_name: String,
    /// Backend tuning parameter, opaque to the harness; echoed in the run
    /// header so reports from parameter sweeps stay attributable.
    pub bin_size: u32,
    /// Statistics to measure; empty means all of
    /// [`ALL_STATS`](sigbench_core::models::stat::ALL_STATS).
    pub stats: Vec<String>,
    /// Skip all ground-truth fetching and error computation. Ground truth can
    /// cost far more than the measurement itself, so latency-only runs must
    /// be able to avoid it.
    pub only_runtime: bool,
    /// Also time the reference backend, in both approximate and exact mode.
    pub bench_reference: bool,
    /// Whether the reference backend (true) or the backend under test (false)
    /// supplies the ground-truth values errors are computed against.
    pub reference_is_ground_truth: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            num_tests: 1000,
            interval_size: 500,
            chrom_name: String::new(),
            bin_size: 64,
            stats: Vec::new(),
            only_runtime: false,
            bench_reference: true,
            reference_is_ground_truth: true,
        }
    }
}

/// A benchmark over one backend under test and one reference backend.
///
/// Both backends are driven strictly sequentially, one whole timed batch at a
/// time, never interleaved; overlapping calls would invalidate the latency
/// comparison. Ground truth is memoized per base statistic for the duration
/// of a single [`run`](Benchmark::run) call and never reused across calls.
pub struct Benchmark<'a> {
    tested: &'a dyn StatProvider,
    reference: &'a dyn StatProvider,
    chrom_sizes: &'a ChromSizes,
    seed: u64,
}

impl<'a> Benchmark<'a> {
    pub fn new(
        tested: &'a dyn StatProvider,
        reference: &'a dyn StatProvider,
        chrom_sizes: &'a ChromSizes,
    ) -> Self {
        Benchmark {
            tested,
            reference,
            chrom_sizes,
            seed: DEFAULT_SEED,
        }
    }

    /// Replace the fixed default seed, e.g. for varied-but-reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run the full measurement protocol and return the assembled report.
    ///
    /// Per statistic: resolve its base identifier, make sure ground truth for
    /// that base exists (unless `only_runtime`), optionally time the
    /// reference backend in both modes, then time one under-test batch. All
    /// statistics share the query set generated at the top of the call.
    pub fn run(&self, config: &BenchConfig) -> Result<Report, BenchError> {
        let chrom = self
            .chrom_sizes
            .get(&config.chrom_name)
            .ok_or_else(|| BenchError::UnknownChromosome(config.chrom_name.clone()))?;

        let stats: Vec<&str> = if config.stats.is_empty() {
            ALL_STATS.to_vec()
        } else {
            config.stats.iter().map(String::as_str).collect()
        };

        println!(
            "Benchmarking:\n\
             Number of tests: {}\n\
             Interval size: {}\n\
             Chromosome name: {}\n\
             Bin size: {}\n\
             Stats to bench: {:?}\n\
             Only bench run time: {}\n\
             Bench reference: {}\n\
             Baseline is reference: {}",
            config.num_tests,
            config.interval_size,
            chrom.name,
            config.bin_size,
            stats,
            config.only_runtime,
            config.bench_reference,
            config.reference_is_ground_truth,
        );

        let cases = generator::generate(
            self.seed,
            config.num_tests,
            config.interval_size,
            chrom.max_index,
        )?;

        let mut report = Report::default();
        // ground truth per base statistic, fetched at most once per run
        let mut truth: HashMap<String, Vec<Option<f64>>> = HashMap::new();
        let mut predictions: Vec<(String, Vec<Option<f64>>)> = Vec::new();
        let want_errors = !config.only_runtime;

        for stat in &stats {
            let base = base_stat_name(stat);
            let reference_key = format!("{REFERENCE_PREFIX}{base}");

            // ground truth from the backend under test, when it is the
            // designated baseline
            if want_errors && !config.reference_is_ground_truth && !truth.contains_key(base) {
                let values =
                    self.tested
                        .batch_query(&chrom.name, cases.starts(), cases.ends(), base, true)?;
                truth.insert(base.to_string(), values);
            }

            if config.bench_reference {
                // the approximate-mode batch (and its values) is fetched at
                // most once per base identifier
                if !predictions.iter().any(|(key, _)| key == &reference_key) {
                    println!("Finding benchmark for the reference's approximate {base}...");
                    let (elapsed, values) = self.timed_reference(&chrom.name, &cases, base, false)?;
                    report.entry(&reference_key).approx_run_time = Some(elapsed);
                    predictions.push((reference_key.clone(), values));
                }

                println!("Finding benchmark for the reference's exact {base}...");
                let (elapsed, values) = self.timed_reference(&chrom.name, &cases, base, true)?;
                report.entry(&reference_key).exact_run_time = Some(elapsed);

                // ground truth comes free with the exact batch
                if want_errors && config.reference_is_ground_truth && !truth.contains_key(base) {
                    truth.insert(base.to_string(), values);
                }
            } else if want_errors
                && config.reference_is_ground_truth
                && !truth.contains_key(base)
            {
                // reference benchmarking is off but its exact answers are
                // still the ground truth; one timed exact batch covers both
                let (elapsed, values) = self.timed_reference(&chrom.name, &cases, base, true)?;
                report.entry(&reference_key).exact_run_time = Some(elapsed);
                truth.insert(base.to_string(), values);
            }

            // one timed batch for the backend under test; any approximation
            // is encoded in the statistic identifier itself
            let start = Instant::now();
            let values =
                self.tested
                    .batch_query(&chrom.name, cases.starts(), cases.ends(), stat, true)?;
            let elapsed = start.elapsed().as_secs_f64();
            println!(
                "Time for {stat}: {elapsed} seconds for {} trials",
                cases.len()
            );
            report.entry(stat).run_time = Some(elapsed);
            predictions.push((stat.to_string(), values));
        }

        if config.only_runtime {
            return Ok(report);
        }

        // score every collected prediction, reference approximations included,
        // against the memoized truth for its base statistic
        for (key, predicted) in &predictions {
            let base = key
                .strip_prefix(REFERENCE_PREFIX)
                .unwrap_or_else(|| base_stat_name(key));
            let Some(reference) = truth.get(base) else {
                continue;
            };
            match metrics::mean_percent_error(predicted, reference) {
                Ok(error) => report.entry(key).error = error,
                Err(e) => eprintln!("Skipping error for {key}: {e}"),
            }
        }

        Ok(report)
    }

    fn timed_reference(
        &self,
        chrom_name: &str,
        cases: &QuerySet,
        stat: &str,
        exact: bool,
    ) -> Result<(f64, Vec<Option<f64>>), BenchError> {
        let start = Instant::now();
        let values =
            self.reference
                .batch_query(chrom_name, cases.starts(), cases.ends(), stat, exact)?;
        Ok((start.elapsed().as_secs_f64(), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use sigbench_core::errors::SignalError;
    use sigbench_core::models::Chromosome;
    use std::cell::RefCell;

    /// Backend that answers every query with one fixed sequence and records
    /// the calls it receives.
    struct Scripted {
        values: Vec<Option<f64>>,
        calls: RefCell<Vec<(String, bool)>>,
        fail: bool,
    }

    impl Scripted {
        fn new(values: &[f64]) -> Self {
            Scripted {
                values: values.iter().copied().map(Some).collect(),
                calls: RefCell::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Scripted {
                values: Vec::new(),
                calls: RefCell::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<(String, bool)> {
            self.calls.borrow().clone()
        }
    }

    impl StatProvider for Scripted {
        fn batch_query(
            &self,
            _chrom_name: &str,
            _starts: &[u32],
            _ends: &[u32],
            stat: &str,
            exact: bool,
        ) -> Result<Vec<Option<f64>>, SignalError> {
            self.calls.borrow_mut().push((stat.to_string(), exact));
            if self.fail {
                return Err(SignalError::UnknownStatistic(stat.to_string()));
            }
            Ok(self.values.clone())
        }
    }

    fn sizes() -> ChromSizes {
        ChromSizes::from(vec![Chromosome {
            name: "chr1".to_string(),
            max_index: 1000,
        }])
    }

    fn config(stats: &[&str]) -> BenchConfig {
        BenchConfig {
            num_tests: 3,
            interval_size: 500,
            chrom_name: "chr1".to_string(),
            bin_size: 21,
            stats: stats.iter().map(|s| s.to_string()).collect(),
            only_runtime: false,
            bench_reference: false,
            reference_is_ground_truth: true,
        }
    }

    #[rstest]
    fn test_end_to_end_known_error() {
        let tested = Scripted::new(&[10.0, 19.0, 5.0]);
        let reference = Scripted::new(&[10.0, 20.0, 5.0]);
        let sizes = sizes();

        let report = Benchmark::new(&tested, &reference, &sizes)
            .run(&config(&["mean"]))
            .unwrap();

        let record = report.get("mean").unwrap();
        assert!(record.run_time.is_some());
        let error = record.error.unwrap();
        assert!((error - 0.05 / 3.0).abs() < 1e-9);

        // ground truth came from one timed exact reference batch
        let reference_record = report.get("reference_mean").unwrap();
        assert!(reference_record.exact_run_time.is_some());
        assert_eq!(reference_record.approx_run_time, None);
    }

    #[rstest]
    fn test_mean_family_shares_one_ground_truth_fetch() {
        let tested = Scripted::new(&[1.0, 2.0, 3.0]);
        let reference = Scripted::new(&[1.0, 2.0, 3.0]);
        let sizes = sizes();

        let report = Benchmark::new(&tested, &reference, &sizes)
            .run(&config(&["mean", "approx_mean"]))
            .unwrap();

        assert_eq!(reference.calls(), vec![("mean".to_string(), true)]);
        assert_eq!(
            tested.calls(),
            vec![
                ("mean".to_string(), true),
                ("approx_mean".to_string(), true)
            ]
        );
        assert_eq!(report.get("mean").unwrap().error, Some(0.0));
        assert_eq!(report.get("approx_mean").unwrap().error, Some(0.0));
    }

    #[rstest]
    fn test_only_runtime_skips_ground_truth_entirely() {
        let tested = Scripted::new(&[1.0, 2.0, 3.0]);
        let reference = Scripted::new(&[1.0, 2.0, 3.0]);
        let sizes = sizes();

        let mut config = config(&["mean", "max"]);
        config.only_runtime = true;
        let report = Benchmark::new(&tested, &reference, &sizes)
            .run(&config)
            .unwrap();

        assert!(reference.calls().is_empty());
        assert!(report.get("reference_mean").is_none());
        for key in ["mean", "max"] {
            let record = report.get(key).unwrap();
            assert!(record.run_time.is_some());
            assert_eq!(record.error, None);
        }
    }

    #[rstest]
    fn test_bench_reference_times_both_modes_once_per_base() {
        let tested = Scripted::new(&[1.0, 2.0, 3.0]);
        let reference = Scripted::new(&[1.0, 2.0, 3.0]);
        let sizes = sizes();

        let mut config = config(&["mean", "approx_mean"]);
        config.bench_reference = true;
        let report = Benchmark::new(&tested, &reference, &sizes)
            .run(&config)
            .unwrap();

        // one approx batch for the family, one exact batch per statistic,
        // and no extra ground-truth fetch: the exact values are reused
        assert_eq!(
            reference.calls(),
            vec![
                ("mean".to_string(), false),
                ("mean".to_string(), true),
                ("mean".to_string(), true),
            ]
        );

        let record = report.get("reference_mean").unwrap();
        assert!(record.approx_run_time.is_some());
        assert!(record.exact_run_time.is_some());
        // the reference's approximate answers are scored too
        assert_eq!(record.error, Some(0.0));
    }

    #[rstest]
    fn test_tested_backend_as_ground_truth() {
        let tested = Scripted::new(&[4.0, 4.0, 4.0]);
        let reference = Scripted::new(&[5.0, 5.0, 5.0]);
        let sizes = sizes();

        let mut config = config(&["mean"]);
        config.reference_is_ground_truth = false;
        let report = Benchmark::new(&tested, &reference, &sizes)
            .run(&config)
            .unwrap();

        assert!(reference.calls().is_empty());
        // one untimed truth fetch plus one timed batch
        assert_eq!(tested.calls().len(), 2);
        assert_eq!(report.get("mean").unwrap().error, Some(0.0));
    }

    #[rstest]
    fn test_provider_failure_aborts_the_run() {
        let tested = Scripted::failing();
        let reference = Scripted::new(&[1.0]);
        let sizes = sizes();

        let mut config = config(&["mean"]);
        config.num_tests = 1;
        let result = Benchmark::new(&tested, &reference, &sizes).run(&config);
        assert!(matches!(result, Err(BenchError::Provider(_))));
    }

    #[rstest]
    fn test_length_mismatch_leaves_error_absent() {
        // scripted backend always answers with 2 values against 3 queries
        let tested = Scripted::new(&[1.0, 2.0]);
        let reference = Scripted::new(&[1.0, 2.0, 3.0]);
        let sizes = sizes();

        let report = Benchmark::new(&tested, &reference, &sizes)
            .run(&config(&["mean"]))
            .unwrap();

        let record = report.get("mean").unwrap();
        assert!(record.run_time.is_some());
        assert_eq!(record.error, None);
    }

    #[rstest]
    fn test_unknown_chromosome_fails_before_any_batch() {
        let tested = Scripted::new(&[1.0]);
        let reference = Scripted::new(&[1.0]);
        let sizes = sizes();

        let mut config = config(&["mean"]);
        config.chrom_name = "chr9".to_string();
        let result = Benchmark::new(&tested, &reference, &sizes).run(&config);

        assert!(matches!(result, Err(BenchError::UnknownChromosome(_))));
        assert!(tested.calls().is_empty());
        assert!(reference.calls().is_empty());
    }

    #[rstest]
    fn test_seeded_runs_share_query_sets() {
        // not strictly observable through the mock, but the seed plumbing is:
        // the same benchmark run twice produces identical reports
        let tested = Scripted::new(&[2.0, 4.0, 6.0]);
        let reference = Scripted::new(&[2.0, 4.0, 8.0]);
        let sizes = sizes();

        let bench = Benchmark::new(&tested, &reference, &sizes).with_seed(7);
        let a = bench.run(&config(&["mean"])).unwrap();
        let b = bench.run(&config(&["mean"])).unwrap();
        assert_eq!(a.get("mean").unwrap().error, b.get("mean").unwrap().error);
    }
}
