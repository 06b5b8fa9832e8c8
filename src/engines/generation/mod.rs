pub mod cancellation;
pub mod genetic_solver;
pub mod operators;
pub mod progress;

pub use cancellation::CancellationToken;
pub use genetic_solver::{GeneticSolver, Individual, ProgressCallback, SearchStats};
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressMessage};
