//! In-memory bedGraph-backed signal and its [`StatProvider`] implementation.
//!
//! `DenseSignal` expands a bedGraph file into one per-base value array per
//! chromosome, which makes exact interval statistics a single slice scan.
//! Loading fixed-size bins on top of the raw values adds an approximate mode
//! for the mean family, the classic speed/accuracy trade the benchmark
//! harness exists to measure.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::errors::SignalError;
use crate::models::ChromSizes;
use crate::provider::StatProvider;
use crate::utils::{get_dynamic_reader, parse_bedgraph_line};

/// Per-base signal for one chromosome. Uncovered bases hold NaN so that
/// "no data" stays distinguishable from a recorded zero.
#[derive(Debug, Clone)]
struct ChromSignal {
    values: Vec<f64>,
    /// Bin size and per-bin mean over covered bases, once bins are loaded.
    /// Bins with no covered bases hold NaN.
    bins: Option<(u32, Vec<f64>)>,
}

/// An in-memory signal backend over one or more chromosomes.
#[derive(Debug, Clone, Default)]
pub struct DenseSignal {
    chroms: HashMap<String, ChromSignal>,
}

/// Typed statistic handlers; an identifier string resolves to one of these
/// once per batch call, never per interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatKind {
    Mean,
    ApproxMean,
    ModApproxMean,
    Max,
    Min,
    Coverage,
    Std,
}

impl StatKind {
    fn from_name(stat: &str) -> Result<Self, SignalError> {
        match stat {
            "mean" => Ok(StatKind::Mean),
            "approx_mean" => Ok(StatKind::ApproxMean),
            "mod_approx_mean" => Ok(StatKind::ModApproxMean),
            "max" => Ok(StatKind::Max),
            "min" => Ok(StatKind::Min),
            "coverage" => Ok(StatKind::Coverage),
            "std" => Ok(StatKind::Std),
            _ => Err(SignalError::UnknownStatistic(stat.to_string())),
        }
    }
}

impl DenseSignal {
    /// Load a bedGraph file (plain or gzip'd) into dense per-base arrays.
    ///
    /// Only chromosomes present in `chrom_sizes` are materialized; intervals
    /// on other chromosomes are skipped. Interval ends are clamped to the
    /// chromosome's max index.
    pub fn from_bedgraph<P: AsRef<Path>>(
        path: P,
        chrom_sizes: &ChromSizes,
    ) -> Result<Self, SignalError> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)
            .map_err(|e| SignalError::FileReadError(format!("{}: {}", path.display(), e)))?;

        let mut chroms: HashMap<String, ChromSignal> = chrom_sizes
            .iter()
            .map(|c| {
                (
                    c.name.clone(),
                    ChromSignal {
                        values: vec![f64::NAN; c.max_index as usize],
                        bins: None,
                    },
                )
            })
            .collect();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                SignalError::BedGraphParseError(format!("line {}: {}", line_num + 1, e))
            })?;

            let Some((chrom, start, end, value)) = parse_bedgraph_line(&line) else {
                continue;
            };
            let Some(signal) = chroms.get_mut(&chrom) else {
                continue;
            };

            let end = (end as usize).min(signal.values.len());
            let start = (start as usize).min(end);
            for v in &mut signal.values[start..end] {
                *v = value;
            }
        }

        Ok(DenseSignal { chroms })
    }

    /// Build a signal directly from per-base values, NaN marking uncovered
    /// bases. Mostly useful for tests and synthetic benchmarks.
    pub fn from_values(chrom_name: &str, values: Vec<f64>) -> Self {
        let mut chroms = HashMap::new();
        chroms.insert(chrom_name.to_string(), ChromSignal { values, bins: None });
        DenseSignal { chroms }
    }

    /// Precompute per-bin means for one chromosome, enabling the approximate
    /// mean family. `bin_size` is the backend's tuning knob: bigger bins are
    /// faster to aggregate and less accurate.
    pub fn load_bins(&mut self, chrom_name: &str, bin_size: u32) -> Result<(), SignalError> {
        let signal = self
            .chroms
            .get_mut(chrom_name)
            .ok_or_else(|| SignalError::UnknownChromosome(chrom_name.to_string()))?;

        let n_bins = signal.values.len().div_ceil(bin_size as usize);
        let mut bins = Vec::with_capacity(n_bins);
        for chunk in signal.values.chunks(bin_size as usize) {
            let mut sum = 0.0;
            let mut covered = 0usize;
            for v in chunk {
                if !v.is_nan() {
                    sum += v;
                    covered += 1;
                }
            }
            bins.push(if covered == 0 { f64::NAN } else { sum / covered as f64 });
        }

        signal.bins = Some((bin_size, bins));
        Ok(())
    }

    fn chrom(&self, chrom_name: &str) -> Result<&ChromSignal, SignalError> {
        self.chroms
            .get(chrom_name)
            .ok_or_else(|| SignalError::UnknownChromosome(chrom_name.to_string()))
    }
}

impl StatProvider for DenseSignal {
    fn batch_query(
        &self,
        chrom_name: &str,
        starts: &[u32],
        ends: &[u32],
        stat: &str,
        exact: bool,
    ) -> Result<Vec<Option<f64>>, SignalError> {
        let signal = self.chrom(chrom_name)?;

        let mut kind = StatKind::from_name(stat)?;
        // The non-exact mode falls back on bins for the base mean when they
        // are available, mirroring backends that keep zoom-level summaries.
        if !exact && kind == StatKind::Mean && signal.bins.is_some() {
            kind = StatKind::ApproxMean;
        }

        if matches!(kind, StatKind::ApproxMean | StatKind::ModApproxMean) && signal.bins.is_none()
        {
            return Err(SignalError::BinsNotLoaded(chrom_name.to_string()));
        }

        let mut results = Vec::with_capacity(starts.len());
        for (&start, &end) in starts.iter().zip(ends.iter()) {
            let start = start as usize;
            let end = (end as usize).min(signal.values.len());
            let interval = &signal.values[start.min(end)..end];

            let value = match kind {
                StatKind::Mean => exact_mean(interval),
                StatKind::Max => fold_covered(interval, f64::max),
                StatKind::Min => fold_covered(interval, f64::min),
                StatKind::Coverage => Some(coverage(interval)),
                StatKind::Std => exact_std(interval),
                StatKind::ApproxMean => {
                    let (bin_size, bins) = signal.bins.as_ref().unwrap();
                    approx_mean(bins, *bin_size, start, end, true)
                }
                StatKind::ModApproxMean => {
                    let (bin_size, bins) = signal.bins.as_ref().unwrap();
                    approx_mean(bins, *bin_size, start, end, false)
                }
            };
            results.push(value);
        }

        Ok(results)
    }
}

/// Mean over covered bases; None when nothing in the interval is covered.
fn exact_mean(interval: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut covered = 0usize;
    for v in interval {
        if !v.is_nan() {
            sum += v;
            covered += 1;
        }
    }
    if covered == 0 {
        None
    } else {
        Some(sum / covered as f64)
    }
}

fn fold_covered(interval: &[f64], f: fn(f64, f64) -> f64) -> Option<f64> {
    interval
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f)
}

/// Fraction of bases in the interval that carry a value. Defined as 0.0 for
/// a fully uncovered interval, never absent.
fn coverage(interval: &[f64]) -> f64 {
    if interval.is_empty() {
        return 0.0;
    }
    let covered = interval.iter().filter(|v| !v.is_nan()).count();
    covered as f64 / interval.len() as f64
}

/// Population standard deviation over covered bases.
fn exact_std(interval: &[f64]) -> Option<f64> {
    let mean = exact_mean(interval)?;
    let mut sum_sq = 0.0;
    let mut covered = 0usize;
    for v in interval {
        if !v.is_nan() {
            sum_sq += (v - mean) * (v - mean);
            covered += 1;
        }
    }
    Some((sum_sq / covered as f64).sqrt())
}

/// Approximate mean from precomputed bin means.
///
/// `weighted` selects between the two approximation flavors: the weighted
/// form scales each touched bin's mean by its overlap with the interval,
/// while the modified form averages all touched bins equally (cheaper, and
/// coarser near the interval edges). Bins without data are ignored; None
/// when every touched bin is empty.
fn approx_mean(
    bins: &[f64],
    bin_size: u32,
    start: usize,
    end: usize,
    weighted: bool,
) -> Option<f64> {
    if start >= end {
        return None;
    }
    let bin_size = bin_size as usize;
    let first_bin = start / bin_size;
    let last_bin = (end - 1) / bin_size;

    let mut sum = 0.0;
    let mut weight = 0.0;
    for (bin_index, &bin_mean) in bins
        .iter()
        .enumerate()
        .take(last_bin + 1)
        .skip(first_bin)
    {
        if bin_mean.is_nan() {
            continue;
        }
        let bin_start = bin_index * bin_size;
        let bin_end = bin_start + bin_size;
        let overlap = if weighted {
            (end.min(bin_end) - start.max(bin_start)) as f64
        } else {
            1.0
        };
        sum += bin_mean * overlap;
        weight += overlap;
    }

    if weight == 0.0 {
        None
    } else {
        Some(sum / weight)
    }
}
