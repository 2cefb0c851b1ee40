//! Normalized Shannon entropy, the classical evenness baseline the coverage
//! metrics are compared against.

use crate::data::ProbabilityVector;

/// H(p) / ln C over the declared categories, in [0, 1].
///
/// Zero-probability categories contribute nothing to H but still count in C.
/// A single-category vector is trivially even and scores 1.
pub fn normalized_entropy(probs: &ProbabilityVector) -> f64 {
    let n_categories = probs.n_categories();
    if n_categories < 2 {
        return 1.0;
    }
    let h: f64 = probs
        .iter()
        .filter(|&(_, p)| p > 0.0)
        .map(|(_, p)| -p * p.ln())
        .sum();
    (h / (n_categories as f64).ln()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_one() {
        for n in 2..=10 {
            let h = normalized_entropy(&ProbabilityVector::uniform(n).unwrap());
            assert!((h - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_point_mass_is_zero() {
        let probs = ProbabilityVector::point_mass("a", 10).unwrap();
        assert_eq!(normalized_entropy(&probs), 0.0);
    }

    #[test]
    fn test_two_of_four() {
        let probs = ProbabilityVector::with_categories([("a", 0.5), ("b", 0.5)], 4).unwrap();
        assert!((normalized_entropy(&probs) - 0.5).abs() < 1e-12);
    }
}
