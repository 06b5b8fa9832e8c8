pub mod traits;
pub mod game;
pub mod solver;
pub mod genetic;
pub mod constraint;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use game::GameConfig;
pub use solver::{SolverConfig, Strategy};
pub use genetic::{GeneticConfig, SelectionMethod};
pub use constraint::{CandidateSelection, ConstraintConfig};
pub use traits::ConfigSection;
