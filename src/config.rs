//! Numerical tolerances shared by the metric functions.
//!
//! Every metric has a plain form that uses [`MetricConfig::default`] and a
//! `*_with_config` form taking an explicit configuration. Configurations can be
//! stored as YAML or JSON next to the data they were used on.

use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum allowed |Σp − 1| for a probability vector.
pub const DEFAULT_NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// Width of the band around a threshold inside which a probability is treated
/// as equal to it. Applies to the `≥ q` test of coverage-at-q and to the
/// snapping of probabilities onto the uniform point 1/C in deviation-from-uniform.
pub const DEFAULT_BOUNDARY_EPSILON: f64 = 1e-12;

/// Tolerances used when validating and integrating probability vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    /// Maximum allowed deviation of a probability vector's sum from 1.
    pub normalization_tolerance: f64,
    /// Threshold comparison band (see [`DEFAULT_BOUNDARY_EPSILON`]).
    pub boundary_epsilon: f64,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            normalization_tolerance: DEFAULT_NORMALIZATION_TOLERANCE,
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
        }
    }
}

impl MetricConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normalization tolerance.
    pub fn with_normalization_tolerance(mut self, tolerance: f64) -> Self {
        self.normalization_tolerance = tolerance;
        self
    }

    /// Set the boundary epsilon.
    pub fn with_boundary_epsilon(mut self, epsilon: f64) -> Self {
        self.boundary_epsilon = epsilon;
        self
    }

    /// Check that both tolerances are finite and non-negative, and that the
    /// normalization tolerance is below 1.
    pub fn validate(&self) -> Result<()> {
        if !self.normalization_tolerance.is_finite()
            || self.normalization_tolerance < 0.0
            || self.normalization_tolerance >= 1.0
        {
            return Err(MetricError::InvalidArgument(format!(
                "normalization_tolerance must be in [0, 1), got {}",
                self.normalization_tolerance
            )));
        }
        if !self.boundary_epsilon.is_finite() || self.boundary_epsilon < 0.0 {
            return Err(MetricError::InvalidArgument(format!(
                "boundary_epsilon must be finite and non-negative, got {}",
                self.boundary_epsilon
            )));
        }
        Ok(())
    }

    /// Parse and validate a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration file, choosing the format from the extension
    /// (`.json` is JSON, anything else is read as YAML).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading metric config");
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}
