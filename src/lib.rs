pub mod config;
pub mod engines;
pub mod error;
pub mod game;
pub mod session;
pub mod types;

pub use error::{CodebreakerError, Result};
pub use session::SolverSession;
pub use types::{Alphabet, Code, Feedback, Guess, GuessHistory, ScoredCode, Symbol};
