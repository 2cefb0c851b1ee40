//! Deviation from uniform (DfU).
//!
//! With C declared categories, u = 1/C and f(q) = C@Q(q) / C, the raw area is
//!
//! ```text
//! area(p) = ∫₀^u (1 − f(q)) dq + ∫_u^1 f(q) dq
//! ```
//!
//! i.e. the area between the coverage-at-q curve of `p` and that of the
//! uniform distribution, which is 1 up to u and 0 after. f is a step function
//! that only changes at the probabilities present in `p`, so the integral is a
//! finite sum over the sorted breakpoints {0, u, 1} ∪ {p_i}.
//!
//! A point mass maximizes the area at 2(C − 1)/C², a value that shrinks
//! towards 0 as C grows. DfU divides by it, which pins the point mass to 1 for
//! every C ≥ 2 and keeps the score in [0, 1].

use crate::config::MetricConfig;
use crate::data::ProbabilityVector;
use crate::error::Result;

/// Normalized deviation of `probs` from the uniform distribution, in [0, 1].
///
/// 0 exactly for the uniform distribution, 1 exactly for a point mass. A
/// single-category vector is both, and scores 0.
pub fn deviation_from_uniform(probs: &ProbabilityVector) -> Result<f64> {
    deviation_from_uniform_with_config(probs, &MetricConfig::default())
}

/// [`deviation_from_uniform`] with an explicit boundary epsilon. Probabilities
/// within `config.boundary_epsilon` of 1/C are treated as exactly 1/C.
pub fn deviation_from_uniform_with_config(
    probs: &ProbabilityVector,
    config: &MetricConfig,
) -> Result<f64> {
    config.validate()?;
    let n_categories = probs.n_categories();
    if n_categories < 2 {
        return Ok(0.0);
    }
    let c = n_categories as f64;
    let u = 1.0 / c;

    // Ascending, clamped to the integration domain, snapped onto u.
    let values: Vec<f64> = probs
        .sorted_values()
        .into_iter()
        .map(|p| {
            let p = p.min(1.0);
            if (p - u).abs() <= config.boundary_epsilon {
                u
            } else {
                p
            }
        })
        .collect();

    let mut breakpoints = Vec::with_capacity(values.len() + 3);
    breakpoints.extend([0.0, u, 1.0]);
    breakpoints.extend(values.iter().copied());
    breakpoints.sort_by(f64::total_cmp);
    breakpoints.dedup();

    let mut area = 0.0;
    for window in breakpoints.windows(2) {
        let (a, b) = (window[0], window[1]);
        // No probability lies strictly inside (a, b), so C@Q is constant there
        // and equal to its value at b.
        let covered = values.len() - values.partition_point(|&p| p < b);
        area += interval_area(a, b, covered, c, u);
    }

    Ok((area / point_mass_area(c, u)).clamp(0.0, 1.0))
}

/// Uniform coverage score: 1 − DfU, so 1 means perfectly even.
pub fn uniform_coverage_score(probs: &ProbabilityVector) -> Result<f64> {
    Ok(1.0 - deviation_from_uniform(probs)?)
}

/// Area contributed by the interval (a, b] with `covered` categories reaching it.
fn interval_area(a: f64, b: f64, covered: usize, c: f64, u: f64) -> f64 {
    let fraction = covered as f64 / c;
    if b <= u {
        (b - a) * (1.0 - fraction)
    } else {
        (b - a) * fraction
    }
}

/// Area of a point mass, accumulated the same way the breakpoint walk does.
fn point_mass_area(c: f64, u: f64) -> f64 {
    let mut area = 0.0;
    area += interval_area(0.0, u, 1, c, u);
    area += interval_area(u, 1.0, 1, c, u);
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CountVector;

    /// Total-variation form of the same quantity: C/(C−1) · Σ max(p_i − 1/C, 0).
    fn total_variation_form(values: &[f64]) -> f64 {
        let c = values.len() as f64;
        let excess: f64 = values.iter().map(|&p| (p - 1.0 / c).max(0.0)).sum();
        c / (c - 1.0) * excess
    }

    #[test]
    fn test_uniform_is_exactly_zero() {
        for n in 1..=20 {
            let probs = ProbabilityVector::uniform(n).unwrap();
            assert_eq!(deviation_from_uniform(&probs).unwrap(), 0.0, "C = {}", n);
        }
        let from_counts = CountVector::from_dense(&[3, 3, 3, 3, 3, 3, 3])
            .to_probabilities(7)
            .unwrap();
        assert_eq!(deviation_from_uniform(&from_counts).unwrap(), 0.0);
    }

    #[test]
    fn test_point_mass_is_exactly_one() {
        for n in 2..=50 {
            let probs = ProbabilityVector::point_mass("only", n).unwrap();
            assert_eq!(deviation_from_uniform(&probs).unwrap(), 1.0, "C = {}", n);
        }
        let dense = ProbabilityVector::from_dense(&[0.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(deviation_from_uniform(&dense).unwrap(), 1.0);
    }

    #[test]
    fn test_single_category_scores_zero() {
        let probs = ProbabilityVector::point_mass("a", 1).unwrap();
        assert_eq!(deviation_from_uniform(&probs).unwrap(), 0.0);
    }

    #[test]
    fn test_uniform_over_subset() {
        // Mass spread evenly over m of C categories scores (C − m)/(C − 1).
        let probs = ProbabilityVector::with_categories([("a", 0.5), ("b", 0.5)], 4).unwrap();
        let dfu = deviation_from_uniform(&probs).unwrap();
        assert!((dfu - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_total_variation_form() {
        let cases: Vec<Vec<f64>> = vec![
            vec![0.5, 0.3, 0.2, 0.0],
            vec![0.9, 0.03, 0.03, 0.04],
            vec![0.35, 0.3, 0.25, 0.1],
            vec![0.1, 0.1, 0.2, 0.2, 0.4],
            vec![0.25, 0.25, 0.3, 0.2],
        ];
        for values in cases {
            let probs = ProbabilityVector::from_dense(&values).unwrap();
            let dfu = deviation_from_uniform(&probs).unwrap();
            let expected = total_variation_form(&values);
            assert!((dfu - expected).abs() < 1e-12, "{:?}: {} vs {}", values, dfu, expected);
            assert!((0.0..=1.0).contains(&dfu));
        }
        let probs = ProbabilityVector::from_dense(&[0.5, 0.3, 0.2, 0.0]).unwrap();
        let dfu = deviation_from_uniform(&probs).unwrap();
        assert!((dfu - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_orders_reference_distributions() {
        let scores: Vec<f64> = [
            [0.25, 0.25, 0.25, 0.25],
            [0.35, 0.30, 0.25, 0.10],
            [0.50, 0.30, 0.15, 0.05],
            [0.90, 0.03, 0.03, 0.04],
            [1.0, 0.0, 0.0, 0.0],
        ]
        .iter()
        .map(|values| {
            let probs = ProbabilityVector::from_dense(values).unwrap();
            deviation_from_uniform(&probs).unwrap()
        })
        .collect();
        for pair in scores.windows(2) {
            assert!(pair[0] < pair[1], "{:?}", scores);
        }
    }

    #[test]
    fn test_boundary_snapping_uses_config() {
        // 0.25 + 1e-10 is not within the default epsilon of 1/4 but is within a
        // looser one.
        let values = [0.25 + 1e-10, 0.25 - 1e-10, 0.25, 0.25];
        let probs = ProbabilityVector::from_dense(&values).unwrap();
        let strict = deviation_from_uniform(&probs).unwrap();
        assert!(strict > 0.0);
        assert!(strict < 1e-8);
        let loose = MetricConfig::new().with_boundary_epsilon(1e-9);
        assert_eq!(deviation_from_uniform_with_config(&probs, &loose).unwrap(), 0.0);
    }

    #[test]
    fn test_uniform_coverage_score() {
        let uniform = ProbabilityVector::uniform(4).unwrap();
        assert_eq!(uniform_coverage_score(&uniform).unwrap(), 1.0);
        let point = ProbabilityVector::point_mass("a", 4).unwrap();
        assert_eq!(uniform_coverage_score(&point).unwrap(), 0.0);
    }
}
