//! Evenness metrics for categorical frequency data.
//!
//! - **at_k**: coverage-at-k, AUC-C and the even-point plateau score over
//!   integer counts
//! - **at_q**: coverage-at-q over probability vectors
//! - **dfu**: deviation from uniform and the uniform coverage score
//! - **entropy**: normalized Shannon entropy

mod at_k;
mod at_q;
mod dfu;
mod entropy;

pub use at_k::{
    auc_coverage, auc_coverage_observed, coverage_at_k, coverage_at_k_observed,
    coverage_curve_k, even_point, plateau_auc, uniform_point, CoverageCurve, CurvePoint,
};
pub use at_q::{
    coverage_at_q, coverage_at_q_normalized, coverage_at_q_with_config, coverage_curve_q,
    StepCurve, StepPoint,
};
pub use dfu::{deviation_from_uniform, deviation_from_uniform_with_config, uniform_coverage_score};
pub use entropy::normalized_entropy;
