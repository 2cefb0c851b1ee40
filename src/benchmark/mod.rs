//! Seeded random-distribution studies of the evenness metrics.

mod simulate;

pub use simulate::{
    pearson, run_simulation, MetricSample, MetricSummary, SimulationConfig, SimulationResult,
    SimulationSummary,
};
