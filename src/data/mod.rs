//! Input data structures: count vectors and probability vectors.

mod count_vector;
mod probability_vector;

pub use count_vector::CountVector;
pub use probability_vector::ProbabilityVector;
