use super::traits::ConfigSection;
use crate::error::CodebreakerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSelection {
    /// Uniform pick among the consistent codes.
    Random,
    /// Consistent code that minimizes the worst-case number of survivors.
    Minimax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintConfig {
    pub selection: CandidateSelection,
    /// Largest `colors^length` index space the solver agrees to enumerate.
    pub max_universe: u64,
    /// Above this many candidates, minimax falls back to a random pick.
    pub minimax_limit: usize,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            selection: CandidateSelection::Random,
            max_universe: 10_000_000,
            minimax_limit: 1_500,
        }
    }
}

impl ConfigSection for ConstraintConfig {
    fn section_name() -> &'static str {
        "constraint"
    }

    fn validate(&self) -> Result<(), CodebreakerError> {
        if self.max_universe == 0 {
            return Err(CodebreakerError::InvalidConfiguration(
                "Max universe must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
