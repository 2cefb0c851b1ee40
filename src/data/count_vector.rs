//! Per-category item tallies.

use crate::data::ProbabilityVector;
use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Unnormalized counts keyed by category identifier.
///
/// Zero-count categories are kept: they are known to exist and take part in
/// coverage denominators. Counts are unsigned, so a negative tally cannot be
/// represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountVector {
    counts: BTreeMap<String, u64>,
}

impl CountVector {
    /// Create an empty count vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (category, count) pairs. Repeated categories are summed.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        let mut vector = Self::new();
        for (category, count) in pairs {
            vector.add(category, count);
        }
        vector
    }

    /// Build from a dense slice, labelling categories by position ("0", "1", ...).
    pub fn from_dense(counts: &[u64]) -> Self {
        Self::from_pairs(counts.iter().enumerate().map(|(i, &c)| (i.to_string(), c)))
    }

    /// Set the count of a category, returning the previous value.
    pub fn insert(&mut self, category: impl Into<String>, count: u64) -> Option<u64> {
        self.counts.insert(category.into(), count)
    }

    /// Add to the count of a category, creating it if absent. The count
    /// saturates at `u64::MAX`; use [`CountVector::try_add`] to reject that.
    pub fn add(&mut self, category: impl Into<String>, count: u64) {
        let entry = self.counts.entry(category.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Add to the count of a category, failing if the count would overflow.
    pub fn try_add(&mut self, category: impl Into<String>, count: u64) -> Result<()> {
        let category = category.into();
        let entry = self.counts.entry(category.clone()).or_insert(0);
        *entry = entry.checked_add(count).ok_or_else(|| {
            MetricError::InvalidArgument(format!("count for '{}' overflows u64", category))
        })?;
        Ok(())
    }

    /// Count for a category; absent categories count 0.
    #[inline]
    pub fn get(&self, category: &str) -> u64 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Number of known categories (zero counts included).
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.counts.len()
    }

    /// Number of categories with a nonzero count.
    pub fn n_observed(&self) -> usize {
        self.counts.values().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts.
    ///
    /// # Errors
    /// `InvalidArgument` when the sum does not fit in a `u64`.
    pub fn total(&self) -> Result<u64> {
        self.counts
            .values()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
            .ok_or_else(|| MetricError::InvalidArgument("total count overflows u64".to_string()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (category, count) in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Iterate over counts in category order.
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }

    /// Largest count, 0 when empty.
    pub fn max_count(&self) -> u64 {
        self.values().max().unwrap_or(0)
    }

    /// Check a declared category count against this vector.
    ///
    /// The declared count must be at least 1 and cover every known key.
    pub fn check_total_categories(&self, total_categories: usize) -> Result<()> {
        if total_categories < 1 {
            return Err(MetricError::InvalidArgument(
                "total_categories must be at least 1".to_string(),
            ));
        }
        if total_categories < self.n_categories() {
            return Err(MetricError::InvalidArgument(format!(
                "total_categories ({}) is smaller than the number of observed categories ({})",
                total_categories,
                self.n_categories()
            )));
        }
        Ok(())
    }

    /// Normalize to proportions over `total_categories` declared categories.
    pub fn to_probabilities(&self, total_categories: usize) -> Result<ProbabilityVector> {
        self.check_total_categories(total_categories)?;
        let total = self.total()?;
        if total == 0 {
            return Err(MetricError::InvalidArgument(
                "cannot normalize a count vector with zero total".to_string(),
            ));
        }
        let total = total as f64;
        let entries = self.iter().map(|(k, c)| (k.to_string(), c as f64 / total));
        ProbabilityVector::with_categories(entries, total_categories)
    }

    /// Load a count vector from a two-column TSV file.
    ///
    /// Expected format:
    /// - First row: header (ignored)
    /// - Subsequent rows: category identifier, tab, non-negative integer count
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        lines
            .next()
            .ok_or_else(|| MetricError::EmptyData("Empty TSV file".to_string()))??;

        let mut vector = Self::new();
        for (row_idx, line_result) in lines.enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 {
                return Err(MetricError::DimensionMismatch {
                    expected: 2,
                    actual: fields.len(),
                });
            }
            let count: u64 = fields[1].trim().parse().map_err(|_| MetricError::InvalidCount {
                value: fields[1].to_string(),
                row: row_idx,
                col: 1,
            })?;
            vector.try_add(fields[0], count)?;
        }

        if vector.is_empty() {
            return Err(MetricError::EmptyData("No categories in TSV".to_string()));
        }
        let total = vector.total()?;
        tracing::debug!(
            path = %path.display(),
            categories = vector.n_categories(),
            total,
            "loaded count vector"
        );
        Ok(vector)
    }

    /// Write the count vector to a two-column TSV file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "category\tcount")?;
        for (category, count) in self.iter() {
            writeln!(writer, "{}\t{}", category, count)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for CountVector {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl From<BTreeMap<String, u64>> for CountVector {
    fn from(counts: BTreeMap<String, u64>) -> Self {
        Self { counts }
    }
}
