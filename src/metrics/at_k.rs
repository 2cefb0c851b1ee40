//! Coverage-at-K over unnormalized counts, and its aggregate AUC-C.
//!
//! C@K is the fraction of declared categories whose count is strictly greater
//! than `k`. At `k = 0` this is classical coverage (the share of categories
//! seen at least once). Sweeping `k` gives a non-increasing step curve. AUC-C
//! reads that curve at the uniform point `total / total_categories`, where a
//! perfectly uniform vector still covers every category.

use crate::data::CountVector;
use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};

/// Fraction of `total_categories` categories with a count strictly above `k`.
///
/// Categories absent from `counts` count as 0, so a declared category space
/// larger than the observed keys lowers the result.
///
/// # Errors
/// `InvalidArgument` when `total_categories` is 0 or smaller than the number
/// of keys in `counts`.
pub fn coverage_at_k(counts: &CountVector, k: u64, total_categories: usize) -> Result<f64> {
    counts.check_total_categories(total_categories)?;
    let above = counts.values().filter(|&count| count > k).count();
    Ok(above as f64 / total_categories as f64)
}

/// [`coverage_at_k`] measured only among the categories present in `counts`.
pub fn coverage_at_k_observed(counts: &CountVector, k: u64) -> Result<f64> {
    coverage_at_k(counts, k, counts.n_categories())
}

/// floor(total / number of nonzero categories).
///
/// # Errors
/// `InvalidArgument` when every count is zero or the total overflows.
pub fn even_point(counts: &CountVector) -> Result<u64> {
    let total = nonzero_total(counts, "even point")?;
    Ok(total / counts.n_observed() as u64)
}

/// The real-valued uniform point `total / total_categories`.
///
/// # Errors
/// `InvalidArgument` for an invalid `total_categories`, a zero total or an
/// overflowing total.
pub fn uniform_point(counts: &CountVector, total_categories: usize) -> Result<f64> {
    counts.check_total_categories(total_categories)?;
    let total = nonzero_total(counts, "uniform point")?;
    Ok(total as f64 / total_categories as f64)
}

/// AUC-C: share of the declared categories whose count reaches the uniform
/// point `total / total_categories` (inclusive).
///
/// A vector uniform over all `total_categories` keeps every category at the
/// uniform point, so it scores 1.0 exactly, and it is the only vector that
/// does: any category below the mean forces another above it. The largest
/// count always reaches the mean, so the score is at least
/// `1 / total_categories`. The comparison `count · C ≥ total` is done on
/// integers, which makes the score independent of category labels and
/// unchanged when every count is multiplied by the same factor.
///
/// On the 100-item, 4-category vectors (25,25,25,25), (35,30,25,10),
/// (50,30,15,5) and (90,3,3,4) it gives 1.0, 0.75, 0.5 and 0.25.
///
/// # Errors
/// `InvalidArgument` for an invalid `total_categories`, a zero total or an
/// overflowing total.
pub fn auc_coverage(counts: &CountVector, total_categories: usize) -> Result<f64> {
    counts.check_total_categories(total_categories)?;
    let total = u128::from(nonzero_total(counts, "AUC-C")?);
    let declared = total_categories as u128;

    let reaching = counts
        .values()
        .filter(|&count| u128::from(count) * declared >= total)
        .count();

    Ok(reaching as f64 / total_categories as f64)
}

/// [`auc_coverage`] measured only among the categories present in `counts`.
pub fn auc_coverage_observed(counts: &CountVector) -> Result<f64> {
    auc_coverage(counts, counts.n_categories())
}

/// Mean C@K over the even-point plateau `k ∈ [0, E)`, with `E` the
/// [`even_point`].
///
/// A vector uniform over all `total_categories` holds every count at exactly
/// `E`, so its C@K is 1 on the plateau and drops to 0 at `k = E`. The sum is
/// evaluated through `Σ_{k<E} |{c : n_c > k}| = Σ_c min(n_c, E)`, so the cost
/// is linear in the number of categories rather than in `E`.
///
/// Unlike [`auc_coverage`], `E` is floored, so scaling every count can move
/// the score, and vectors such as (2, 1) whose smaller counts already fill the
/// plateau score 1.0.
///
/// # Errors
/// `InvalidArgument` for an invalid `total_categories` or a zero total.
pub fn plateau_auc(counts: &CountVector, total_categories: usize) -> Result<f64> {
    counts.check_total_categories(total_categories)?;
    // A zero even point needs more nonzero categories than items, which u64
    // counts cannot produce; the max keeps the single point k = 0 regardless.
    let span = even_point(counts)?.max(1);

    let observed_area: u128 = counts
        .values()
        .map(|count| u128::from(count.min(span)))
        .sum();
    let ideal_area = u128::from(span) * total_categories as u128;

    Ok(observed_area as f64 / ideal_area as f64)
}

fn nonzero_total(counts: &CountVector, what: &str) -> Result<u64> {
    match counts.total()? {
        0 => Err(MetricError::InvalidArgument(format!(
            "{} is undefined for a count vector with zero total",
            what
        ))),
        total => Ok(total),
    }
}

/// One point of a coverage-at-k curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub k: u64,
    pub coverage: f64,
}

/// The (k, C@k) sequence for k = 0..=max_k.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageCurve {
    /// Denominator used for every point.
    pub total_categories: usize,
    pub points: Vec<CurvePoint>,
}

impl CoverageCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coverage at `k`, if the curve reaches that far.
    pub fn at(&self, k: u64) -> Option<f64> {
        usize::try_from(k)
            .ok()
            .and_then(|idx| self.points.get(idx))
            .map(|point| point.coverage)
    }

    /// Sum of the coverage values (unit-width area).
    pub fn area(&self) -> f64 {
        self.points.iter().map(|point| point.coverage).sum()
    }
}

/// Build the coverage-at-k curve from `k = 0` up to `max_k` inclusive.
///
/// `max_k` defaults to the largest count, the first `k` at which the curve is
/// guaranteed to be 0.
pub fn coverage_curve_k(
    counts: &CountVector,
    total_categories: usize,
    max_k: Option<u64>,
) -> Result<CoverageCurve> {
    counts.check_total_categories(total_categories)?;
    let max_k = max_k.unwrap_or_else(|| counts.max_count());

    let mut sorted: Vec<u64> = counts.values().collect();
    sorted.sort_unstable();
    let n = sorted.len();

    let points = (0..=max_k)
        .map(|k| {
            let above = n - sorted.partition_point(|&count| count <= k);
            CurvePoint {
                k,
                coverage: above as f64 / total_categories as f64,
            }
        })
        .collect();

    Ok(CoverageCurve {
        total_categories,
        points,
    })
}
