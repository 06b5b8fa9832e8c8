pub mod feedback;
pub mod fitness;

pub use feedback::compute;
pub use fitness::{Fitness, FitnessEvaluator};
