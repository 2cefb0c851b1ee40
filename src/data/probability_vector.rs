//! Validated per-category probability mass.

use crate::config::MetricConfig;
use crate::error::{MetricError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Probabilities keyed by category identifier.
///
/// Construction checks that every value is finite and non-negative and that
/// the values sum to 1 within the configured tolerance, so an existing
/// `ProbabilityVector` is always valid.
///
/// The declared category count may exceed the number of entries; declared
/// categories without an entry have probability 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityVector {
    probs: BTreeMap<String, f64>,
    n_categories: usize,
}

impl ProbabilityVector {
    /// Build from (category, probability) pairs, declaring exactly the given
    /// categories. Uses the default tolerance.
    pub fn new<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let probs = collect_entries(entries)?;
        let n_categories = probs.len();
        Self::validated(probs, n_categories, &MetricConfig::default())
    }

    /// Build from pairs while declaring `n_categories` categories in total.
    pub fn with_categories<I, K>(entries: I, n_categories: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self::with_config(entries, n_categories, &MetricConfig::default())
    }

    /// Build with an explicit declared category count and configuration.
    pub fn with_config<I, K>(entries: I, n_categories: usize, config: &MetricConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        config.validate()?;
        let probs = collect_entries(entries)?;
        Self::validated(probs, n_categories, config)
    }

    /// Build from a dense slice, labelling categories by position ("0", "1", ...).
    pub fn from_dense(probs: &[f64]) -> Result<Self> {
        Self::new(probs.iter().enumerate().map(|(i, &p)| (i.to_string(), p)))
    }

    /// The uniform distribution over `n_categories` positional categories.
    pub fn uniform(n_categories: usize) -> Result<Self> {
        if n_categories == 0 {
            return Err(MetricError::InvalidArgument(
                "uniform distribution needs at least one category".to_string(),
            ));
        }
        let p = 1.0 / n_categories as f64;
        Self::from_dense(&vec![p; n_categories])
    }

    /// A point mass on one category, declared over `n_categories` categories.
    pub fn point_mass(category: impl Into<String>, n_categories: usize) -> Result<Self> {
        Self::with_categories([(category.into(), 1.0)], n_categories)
    }

    fn validated(
        probs: BTreeMap<String, f64>,
        n_categories: usize,
        config: &MetricConfig,
    ) -> Result<Self> {
        if probs.is_empty() {
            return Err(MetricError::EmptyData(
                "probability vector has no entries".to_string(),
            ));
        }
        if n_categories < probs.len() {
            return Err(MetricError::InvalidArgument(format!(
                "declared categories ({}) fewer than entries ({})",
                n_categories,
                probs.len()
            )));
        }
        for (category, &p) in &probs {
            if !p.is_finite() || p < 0.0 {
                return Err(MetricError::Normalization(format!(
                    "probability for '{}' must be finite and non-negative, got {}",
                    category, p
                )));
            }
        }
        let sum: f64 = probs.values().sum();
        if (sum - 1.0).abs() > config.normalization_tolerance {
            return Err(MetricError::Normalization(format!(
                "probabilities sum to {}, expected 1 within {}",
                sum, config.normalization_tolerance
            )));
        }
        Ok(Self { probs, n_categories })
    }

    /// Probability of a category; undeclared or absent categories give 0.
    #[inline]
    pub fn get(&self, category: &str) -> f64 {
        self.probs.get(category).copied().unwrap_or(0.0)
    }

    /// Declared number of categories C.
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.n_categories
    }

    /// Number of explicit entries.
    #[inline]
    pub fn n_entries(&self) -> usize {
        self.probs.len()
    }

    /// Iterate over explicit (category, probability) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.probs.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// All C probabilities in ascending order, implicit zeros included.
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut values = vec![0.0; self.n_categories - self.probs.len()];
        values.extend(self.probs.values().copied());
        values.sort_by(f64::total_cmp);
        values
    }
}

fn collect_entries<I, K>(entries: I) -> Result<BTreeMap<String, f64>>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    let mut probs = BTreeMap::new();
    for (category, p) in entries {
        let category = category.into();
        if probs.insert(category.clone(), p).is_some() {
            return Err(MetricError::InvalidArgument(format!(
                "duplicate category '{}' in probability vector",
                category
            )));
        }
    }
    Ok(probs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_vector() {
        let probs = ProbabilityVector::new([("a", 0.5), ("b", 0.3), ("c", 0.2)]).unwrap();
        assert_eq!(probs.n_categories(), 3);
        assert_eq!(probs.get("b"), 0.3);
        assert_eq!(probs.get("z"), 0.0);
    }

    #[test]
    fn test_rejects_bad_sum() {
        let err = ProbabilityVector::new([("a", 0.5), ("b", 0.4)]).unwrap_err();
        assert!(matches!(err, MetricError::Normalization(_)));
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        assert!(matches!(
            ProbabilityVector::new([("a", 1.2), ("b", -0.2)]),
            Err(MetricError::Normalization(_))
        ));
        assert!(matches!(
            ProbabilityVector::new([("a", f64::NAN), ("b", 1.0)]),
            Err(MetricError::Normalization(_))
        ));
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let entries = [("a", 0.5), ("b", 0.499)];
        assert!(ProbabilityVector::new(entries).is_err());
        let loose = MetricConfig::new().with_normalization_tolerance(0.01);
        assert!(ProbabilityVector::with_config(entries, 2, &loose).is_ok());
    }

    #[test]
    fn test_declared_categories() {
        let probs = ProbabilityVector::point_mass("a", 4).unwrap();
        assert_eq!(probs.n_categories(), 4);
        assert_eq!(probs.n_entries(), 1);
        assert_eq!(probs.sorted_values(), vec![0.0, 0.0, 0.0, 1.0]);
        assert!(ProbabilityVector::with_categories([("a", 0.5), ("b", 0.5)], 1).is_err());
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        let empty: Vec<(String, f64)> = Vec::new();
        assert!(matches!(ProbabilityVector::new(empty), Err(MetricError::EmptyData(_))));
        assert!(ProbabilityVector::new([("a", 0.5), ("a", 0.5)]).is_err());
        assert!(ProbabilityVector::uniform(0).is_err());
    }
}
