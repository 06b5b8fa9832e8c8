use crate::types::ScoredCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodebreakerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid code: {0}")]
    InvalidCode(String),

    #[error("Invalid feedback: {0}")]
    InvalidFeedback(String),

    /// Feedback history is internally inconsistent; no code can satisfy it.
    #[error("Candidate set is empty after {guesses} guesses; feedback history is inconsistent")]
    EmptyCandidateSet { guesses: usize },

    #[error("No eligible candidate found after {generations} generations")]
    NoSolutionFound {
        generations: usize,
        best: Option<ScoredCode>,
    },

    #[error("Search cancelled at generation {generation}")]
    Cancelled { generation: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CodebreakerError>;
