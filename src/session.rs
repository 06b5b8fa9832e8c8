use crate::config::{AppConfig, Strategy};
use crate::engines::constraint::ConstraintSolver;
use crate::engines::generation::{CancellationToken, GeneticSolver, SearchStats};
use crate::error::{CodebreakerError, Result};
use crate::types::{Alphabet, Code, Feedback, GuessHistory};
use log::debug;

enum Engine {
    Constraint(ConstraintSolver),
    Genetic(GeneticSolver),
}

/// One game's worth of solver state: configuration, history and the chosen strategy.
pub struct SolverSession {
    config: AppConfig,
    alphabet: Alphabet,
    history: GuessHistory,
    engine: Engine,
}

impl SolverSession {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let alphabet = config.game.alphabet()?;
        let engine = match config.solver.strategy {
            Strategy::Constraint => Engine::Constraint(ConstraintSolver::new(
                &config.game,
                config.constraint.clone(),
                config.solver.seed,
            )?),
            Strategy::Genetic => Engine::Genetic(GeneticSolver::new(
                &config.game,
                config.genetic.clone(),
                config.solver.seed,
            )),
        };

        Ok(Self {
            config,
            alphabet,
            history: GuessHistory::new(),
            engine,
        })
    }

    /// Proposes the next code to play. The genetic strategy plays the
    /// lowest-scoring eligible candidate.
    pub fn next_guess(&mut self) -> Result<Code> {
        match &mut self.engine {
            Engine::Constraint(solver) => solver.next_guess(&self.history),
            Engine::Genetic(solver) => {
                let candidates = solver.next_guess(&self.history)?;
                debug!("Genetic search returned {} eligible codes", candidates.len());
                candidates
                    .into_iter()
                    .next()
                    .map(|scored| scored.code)
                    .ok_or(CodebreakerError::NoSolutionFound {
                        generations: solver.stats().generations,
                        best: None,
                    })
            }
        }
    }

    pub fn record_feedback(&mut self, guess: Code, feedback: Feedback) -> Result<()> {
        let length = self.config.game.code_length;
        if guess.len() != length {
            return Err(CodebreakerError::InvalidCode(format!(
                "Expected {} symbols, got {}",
                length,
                guess.len()
            )));
        }
        // Duplicates in a guess are legal even when the secret forbids them.
        if let Some(symbol) = guess
            .symbols()
            .iter()
            .find(|s| s.index() >= self.alphabet.len())
        {
            return Err(CodebreakerError::InvalidCode(format!(
                "Symbol {} is outside the {}-symbol alphabet",
                symbol.0,
                self.alphabet.len()
            )));
        }
        if feedback.exact + feedback.wrong > length {
            return Err(CodebreakerError::InvalidFeedback(format!(
                "{} exact + {} wrong exceeds code length {}",
                feedback.exact, feedback.wrong, length
            )));
        }

        self.history.push(guess, feedback);
        Ok(())
    }

    pub fn is_solved(&self) -> bool {
        self.history
            .last()
            .map_or(false, |g| g.feedback.is_win(self.config.game.code_length))
    }

    /// Cancels the genetic search cooperatively; ignored by the constraint strategy.
    pub fn set_cancellation(&mut self, token: CancellationToken) {
        if let Engine::Genetic(solver) = &mut self.engine {
            solver.set_cancellation(token);
        }
    }

    pub fn remaining_candidate_count(&self) -> Option<u128> {
        match &self.engine {
            Engine::Constraint(solver) => Some(solver.remaining_candidate_count()),
            Engine::Genetic(_) => None,
        }
    }

    pub fn search_stats(&self) -> Option<SearchStats> {
        match &self.engine {
            Engine::Genetic(solver) => Some(solver.stats()),
            Engine::Constraint(_) => None,
        }
    }

    pub fn history(&self) -> &GuessHistory {
        &self.history
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
