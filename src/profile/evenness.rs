//! Evenness profiling for count vectors.

use crate::config::MetricConfig;
use crate::data::CountVector;
use crate::error::Result;
use crate::metrics::{
    auc_coverage, coverage_at_k, deviation_from_uniform_with_config, even_point,
    normalized_entropy, plateau_auc,
};
use serde::{Deserialize, Serialize};

/// Every evenness metric of one count vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvennessProfile {
    /// Declared number of categories (denominator of every coverage).
    pub total_categories: usize,
    /// Number of categories with a nonzero count.
    pub n_observed: usize,
    /// Total number of items.
    pub total: u64,
    /// floor(total / n_observed).
    pub even_point: u64,
    /// Classical coverage, C@0.
    pub coverage: f64,
    /// Share of categories reaching the uniform point total / total_categories.
    pub auc_coverage: f64,
    /// Mean C@K over the even-point plateau.
    pub plateau_auc: f64,
    /// Deviation of the normalized counts from uniform.
    pub deviation_from_uniform: f64,
    /// 1 − deviation_from_uniform.
    pub uniform_coverage_score: f64,
    /// Shannon entropy over ln(total_categories).
    pub normalized_entropy: f64,
}

impl EvennessProfile {
    /// Check if every declared category was observed.
    pub fn is_fully_covered(&self) -> bool {
        self.n_observed == self.total_categories
    }

    /// Check if the counts are perfectly uniform over the declared categories.
    pub fn is_uniform(&self) -> bool {
        self.auc_coverage == 1.0 && self.deviation_from_uniform == 0.0
    }
}

impl std::fmt::Display for EvennessProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Evenness Profile")?;
        writeln!(f, "  Categories:        {}", self.total_categories)?;
        writeln!(f, "  Observed:          {}", self.n_observed)?;
        writeln!(f, "  Total items:       {}", self.total)?;
        writeln!(f, "  Even point:        {}", self.even_point)?;
        writeln!(f, "  C(0) coverage:     {:.3}", self.coverage)?;
        writeln!(f, "  AUC-C(K):          {:.3}", self.auc_coverage)?;
        writeln!(f, "  Plateau AUC:       {:.3}", self.plateau_auc)?;
        writeln!(f, "  DfU:               {:.3}", self.deviation_from_uniform)?;
        writeln!(f, "  UCS:               {:.3}", self.uniform_coverage_score)?;
        writeln!(f, "  Normalized entropy: {:.3}", self.normalized_entropy)?;
        Ok(())
    }
}

/// Profile a count vector over `total_categories` declared categories.
pub fn profile_evenness(counts: &CountVector, total_categories: usize) -> Result<EvennessProfile> {
    profile_evenness_with_config(counts, total_categories, &MetricConfig::default())
}

/// [`profile_evenness`] with explicit tolerances.
pub fn profile_evenness_with_config(
    counts: &CountVector,
    total_categories: usize,
    config: &MetricConfig,
) -> Result<EvennessProfile> {
    let auc = auc_coverage(counts, total_categories)?;
    let probs = counts.to_probabilities(total_categories)?;
    let dfu = deviation_from_uniform_with_config(&probs, config)?;

    Ok(EvennessProfile {
        total_categories,
        n_observed: counts.n_observed(),
        total: counts.total()?,
        even_point: even_point(counts)?,
        coverage: coverage_at_k(counts, 0, total_categories)?,
        auc_coverage: auc,
        plateau_auc: plateau_auc(counts, total_categories)?,
        deviation_from_uniform: dfu,
        uniform_coverage_score: 1.0 - dfu,
        normalized_entropy: normalized_entropy(&probs),
    })
}
