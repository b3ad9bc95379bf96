//! Accuracy metric: mean percent error of predicted values against a
//! reference sequence.

use thiserror::Error;

/// Legacy sentinel some backends emit in place of an explicit absent value.
/// Coerced to zero here, and only here.
pub const ABSENT_SENTINEL: f64 = -1.0;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Length of predicted values: {predicted}, does not equal length of actual values: {reference}")]
    LengthMismatch { predicted: usize, reference: usize },
}

/// Mean percent error of `predicted` against `reference`.
///
/// Per-element rules:
/// - an absent reference value counts as 0
/// - an absent predicted value, or the [`ABSENT_SENTINEL`], counts as 0
/// - reference 0 with a nonzero prediction is excluded from the aggregate
///   (no ratio against zero exists; note this leaves nonzero predictions in
///   empty regions invisible to the metric, a known one-sided limitation)
/// - a zero prediction contributes 0
/// - otherwise the element contributes `|reference - predicted| / reference`
///
/// Returns `Ok(None)` when no element contributed, rather than an empty-set
/// mean. A length mismatch is reported as an error the caller is expected to
/// treat as a diagnostic, not a fatal failure.
pub fn mean_percent_error(
    predicted: &[Option<f64>],
    reference: &[Option<f64>],
) -> Result<Option<f64>, MetricsError> {
    if predicted.len() != reference.len() {
        return Err(MetricsError::LengthMismatch {
            predicted: predicted.len(),
            reference: reference.len(),
        });
    }

    let mut sum = 0.0;
    let mut contributed = 0usize;
    for (p, r) in predicted.iter().zip(reference.iter()) {
        let reference = r.unwrap_or(0.0);
        let predicted = match p {
            None => 0.0,
            Some(v) if *v == ABSENT_SENTINEL => 0.0,
            Some(v) => *v,
        };

        if reference == 0.0 && predicted != 0.0 {
            continue;
        }
        if predicted == 0.0 {
            contributed += 1;
            continue;
        }
        sum += (reference - predicted).abs() / reference;
        contributed += 1;
    }

    if contributed == 0 {
        return Ok(None);
    }
    Ok(Some(sum / contributed as f64))
}
