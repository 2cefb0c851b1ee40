//! Coverage-at-Q over probability vectors.
//!
//! C@Q counts the categories whose probability is at least `q`. The comparison
//! is inclusive, unlike the strict one of coverage-at-k: a uniform vector over
//! C categories is fully covered at `q = 1/C` and uncovered just above it.

use crate::config::MetricConfig;
use crate::data::ProbabilityVector;
use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};

/// Number of categories with probability ≥ `q`.
///
/// Declared categories without an entry have probability 0 and are covered
/// only at `q = 0`.
///
/// # Errors
/// `InvalidArgument` when `q` is outside [0, 1] or NaN.
pub fn coverage_at_q(probs: &ProbabilityVector, q: f64) -> Result<usize> {
    coverage_at_q_with_config(probs, q, &MetricConfig::default())
}

/// [`coverage_at_q`] with an explicit boundary epsilon: a probability within
/// `config.boundary_epsilon` below `q` still counts as reaching it.
pub fn coverage_at_q_with_config(
    probs: &ProbabilityVector,
    q: f64,
    config: &MetricConfig,
) -> Result<usize> {
    check_threshold(q)?;
    let threshold = q - config.boundary_epsilon;

    let explicit = probs.iter().filter(|&(_, p)| p >= threshold).count();
    let implicit_zeros = probs.n_categories() - probs.n_entries();
    let implicit = if 0.0 >= threshold { implicit_zeros } else { 0 };

    Ok(explicit + implicit)
}

/// [`coverage_at_q`] divided by the declared category count.
pub fn coverage_at_q_normalized(probs: &ProbabilityVector, q: f64) -> Result<f64> {
    let covered = coverage_at_q(probs, q)?;
    Ok(covered as f64 / probs.n_categories() as f64)
}

fn check_threshold(q: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&q) {
        return Err(MetricError::InvalidArgument(format!(
            "threshold q must be in [0, 1], got {}",
            q
        )));
    }
    Ok(())
}

/// A vertex of the coverage-at-q step curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepPoint {
    pub q: f64,
    /// Normalized coverage (count / C).
    pub coverage: f64,
}

/// Vertices of the normalized coverage-at-q step function, ready to be drawn
/// as a polyline.
///
/// Each breakpoint contributes its own value followed by the value held on the
/// interval to its right, so consecutive vertices at the same `q` form the
/// vertical drop of the step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCurve {
    pub vertices: Vec<StepPoint>,
}

/// Build the step curve over the breakpoints 0, every distinct probability,
/// and 1.
pub fn coverage_curve_q(probs: &ProbabilityVector) -> Result<StepCurve> {
    let mut breakpoints: Vec<f64> = Vec::with_capacity(probs.n_categories() + 2);
    breakpoints.push(0.0);
    breakpoints.extend(probs.sorted_values().into_iter().map(|p| p.min(1.0)));
    breakpoints.push(1.0);
    breakpoints.dedup();

    let coverage: Vec<f64> = breakpoints
        .iter()
        .map(|&q| coverage_at_q_normalized(probs, q))
        .collect::<Result<_>>()?;

    let mut vertices = Vec::with_capacity(breakpoints.len() * 2);
    for (i, &q) in breakpoints.iter().enumerate() {
        vertices.push(StepPoint { q, coverage: coverage[i] });
        if let Some(&next) = coverage.get(i + 1) {
            vertices.push(StepPoint { q, coverage: next });
        }
    }

    Ok(StepCurve { vertices })
}
