use super::traits::{check_probability, ConfigSection};
use crate::error::CodebreakerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub stall_limit: usize,
    pub crossover_prob: f64,
    pub mutation_prob: f64,
    pub permutation_prob: f64,
    pub inversion_prob: f64,
    pub weight_exact: f64,
    pub weight_wrong: f64,
    pub selection: SelectionMethod,
    pub tournament_size: usize,
    /// Keep mutation, permutation and inversion away from the final position.
    pub skip_last_position: bool,
    /// Deadline for a single `next_guess` call, checked between generations.
    pub time_limit_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    Uniform,
    Tournament,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            max_generations: 1000,
            stall_limit: 25,
            crossover_prob: 0.5,
            mutation_prob: 0.05,
            permutation_prob: 0.05,
            inversion_prob: 0.02,
            weight_exact: 2.0,
            weight_wrong: 3.0,
            selection: SelectionMethod::Uniform,
            tournament_size: 3,
            skip_last_position: false,
            time_limit_ms: None,
        }
    }
}

impl ConfigSection for GeneticConfig {
    fn section_name() -> &'static str {
        "genetic"
    }

    fn validate(&self) -> Result<(), CodebreakerError> {
        let section = Self::section_name();
        if self.population_size == 0 {
            return Err(CodebreakerError::InvalidConfiguration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.max_generations == 0 {
            return Err(CodebreakerError::InvalidConfiguration(
                "Max generations must be at least 1".to_string(),
            ));
        }
        check_probability(section, "crossover_prob", self.crossover_prob)?;
        check_probability(section, "mutation_prob", self.mutation_prob)?;
        check_probability(section, "permutation_prob", self.permutation_prob)?;
        check_probability(section, "inversion_prob", self.inversion_prob)?;
        for (name, weight) in [
            ("weight_exact", self.weight_exact),
            ("weight_wrong", self.weight_wrong),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CodebreakerError::InvalidConfiguration(format!(
                    "{}.{} must be a non-negative number, got {}",
                    section, name, weight
                )));
            }
        }
        if self.selection == SelectionMethod::Tournament && self.tournament_size == 0 {
            return Err(CodebreakerError::InvalidConfiguration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
