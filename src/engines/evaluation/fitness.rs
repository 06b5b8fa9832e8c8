use super::feedback;
use crate::config::GeneticConfig;
use crate::types::{Code, GuessHistory};

/// Result of scoring one candidate against the whole history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fitness {
    /// Weighted distance from the recorded feedback; lower is better.
    pub score: f64,
    /// The candidate reproduces every recorded feedback exactly.
    pub eligible: bool,
}

/// Treats a candidate as the secret and measures how far the feedback it would
/// have produced for each past guess is from the feedback actually observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessEvaluator {
    weight_exact: f64,
    weight_wrong: f64,
}

impl Default for FitnessEvaluator {
    fn default() -> Self {
        Self::new(2.0, 3.0)
    }
}

impl FitnessEvaluator {
    pub fn new(weight_exact: f64, weight_wrong: f64) -> Self {
        Self {
            weight_exact,
            weight_wrong,
        }
    }

    pub fn from_config(config: &GeneticConfig) -> Self {
        Self::new(config.weight_exact, config.weight_wrong)
    }

    pub fn evaluate(&self, candidate: &Code, history: &GuessHistory) -> Fitness {
        let mut exact_diff = 0usize;
        let mut wrong_diff = 0usize;

        for guess in history {
            let hypothetical = feedback::compute(candidate, &guess.code);
            exact_diff += hypothetical.exact.abs_diff(guess.feedback.exact);
            wrong_diff += hypothetical.wrong.abs_diff(guess.feedback.wrong);
        }

        // Eligibility comes from the integer sums, never from the weighted score.
        Fitness {
            score: self.weight_exact * exact_diff as f64 + self.weight_wrong * wrong_diff as f64,
            eligible: exact_diff == 0 && wrong_diff == 0,
        }
    }
}
