//! Coverage-based evenness metrics for categorical frequency data.
//!
//! Two families of scores measure how evenly items spread over categories:
//!
//! - **Coverage-at-K** and its aggregate **AUC-C**, on integer counts
//! - **Coverage-at-Q** and the integral **deviation from uniform** (DfU), on
//!   probability vectors
//!
//! # Overview
//!
//! - **data**: Input structures (CountVector, ProbabilityVector)
//! - **metrics**: The metric functions themselves
//! - **profile**: All metrics of one count vector
//! - **benchmark**: Seeded random-distribution study of the metrics
//! - **config**: Numerical tolerances
//! - **error**: Error taxonomy
//!
//! # Example
//!
//! ```
//! use coverage_metrics::prelude::*;
//!
//! let counts = CountVector::from_pairs([("a", 35), ("b", 30), ("c", 25), ("d", 10)]);
//! assert_eq!(coverage_at_k(&counts, 10, 4).unwrap(), 0.75);
//!
//! // three of the four categories reach the uniform point 100 / 4
//! assert_eq!(auc_coverage(&counts, 4).unwrap(), 0.75);
//!
//! let probs = counts.to_probabilities(4).unwrap();
//! assert_eq!(coverage_at_q(&probs, 0.25).unwrap(), 3);
//! let dfu = deviation_from_uniform(&probs).unwrap();
//! assert!((dfu - 0.2).abs() < 1e-12);
//! ```

pub mod benchmark;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod profile;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::benchmark::{
        run_simulation, MetricSample, MetricSummary, SimulationConfig, SimulationResult,
        SimulationSummary,
    };
    pub use crate::config::{
        MetricConfig, DEFAULT_BOUNDARY_EPSILON, DEFAULT_NORMALIZATION_TOLERANCE,
    };
    pub use crate::data::{CountVector, ProbabilityVector};
    pub use crate::error::{MetricError, Result};
    pub use crate::metrics::{
        auc_coverage, auc_coverage_observed, coverage_at_k, coverage_at_k_observed,
        coverage_at_q, coverage_at_q_normalized, coverage_at_q_with_config,
        coverage_curve_k, coverage_curve_q, deviation_from_uniform,
        deviation_from_uniform_with_config, even_point, normalized_entropy, plateau_auc,
        uniform_coverage_score, uniform_point, CoverageCurve, CurvePoint, StepCurve, StepPoint,
    };
    pub use crate::profile::{profile_evenness, profile_evenness_with_config, EvennessProfile};
}
