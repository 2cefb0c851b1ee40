//! Evenness profiling of count vectors.

mod evenness;

pub use evenness::{profile_evenness, profile_evenness_with_config, EvennessProfile};
