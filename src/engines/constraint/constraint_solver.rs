use super::candidate_space::CandidateSpace;
use super::minimax;
use crate::config::{CandidateSelection, ConstraintConfig, GameConfig};
use crate::engines::evaluation::feedback;
use crate::error::{CodebreakerError, Result};
use crate::types::{Code, Guess, GuessHistory};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

/// Keeps the codes still consistent with every recorded feedback and guesses among them.
pub struct ConstraintSolver {
    config: ConstraintConfig,
    space: CandidateSpace,
    /// `None` until the first guess has been applied; the universe is never stored whole.
    candidates: Option<Vec<Code>>,
    /// Number of history entries already folded into `candidates`.
    applied: usize,
    rng: StdRng,
}

impl ConstraintSolver {
    pub fn new(game: &GameConfig, config: ConstraintConfig, seed: Option<u64>) -> Result<Self> {
        let space = CandidateSpace::new(game);
        match space.index_space() {
            Some(size) if size <= config.max_universe => {}
            _ => {
                return Err(CodebreakerError::InvalidConfiguration(format!(
                    "{} colors over {} positions exceeds the constraint solver limit of {} codes",
                    space.colors(),
                    space.code_length(),
                    config.max_universe
                )))
            }
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            space,
            candidates: None,
            applied: 0,
            rng,
        })
    }

    /// Narrows the candidate set with every guess not yet applied. In normal play
    /// that is only the newest one.
    pub fn filter_last_guess(&mut self, history: &GuessHistory) -> Result<()> {
        if history.len() < self.applied {
            return Err(CodebreakerError::InvalidFeedback(format!(
                "History has {} guesses but {} were already applied",
                history.len(),
                self.applied
            )));
        }

        let pending = &history.as_slice()[self.applied..];
        if pending.is_empty() {
            return Ok(());
        }

        let survivors = match self.candidates.take() {
            Some(current) => current
                .into_par_iter()
                .filter(|code| consistent(code, pending))
                .collect::<Vec<_>>(),
            None => {
                // Guarded by the universe limit in `new`.
                let space = self.space.index_space().unwrap_or(0);
                self.space.collect_matching(space, |code| consistent(code, pending))
            }
        };

        debug!(
            "Filtered candidates with {} new guess(es): {} remain",
            pending.len(),
            survivors.len()
        );

        self.applied = history.len();
        let empty = survivors.is_empty();
        self.candidates = Some(survivors);

        if empty {
            return Err(CodebreakerError::EmptyCandidateSet {
                guesses: history.len(),
            });
        }
        Ok(())
    }

    pub fn next_guess(&mut self, history: &GuessHistory) -> Result<Code> {
        self.filter_last_guess(history)?;

        let candidates = match &self.candidates {
            Some(candidates) => candidates,
            None => return Ok(self.space.random_code(&mut self.rng)),
        };

        if self.config.selection == CandidateSelection::Minimax {
            if candidates.len() <= self.config.minimax_limit {
                if let Some(code) = minimax::select(candidates) {
                    return Ok(code.clone());
                }
            } else {
                debug!(
                    "{} candidates exceed minimax limit {}, picking at random",
                    candidates.len(),
                    self.config.minimax_limit
                );
            }
        }

        candidates
            .choose(&mut self.rng)
            .cloned()
            .ok_or(CodebreakerError::EmptyCandidateSet {
                guesses: history.len(),
            })
    }

    /// Codes still consistent with the history; the whole universe before any guess.
    pub fn remaining_candidate_count(&self) -> u128 {
        match &self.candidates {
            Some(candidates) => candidates.len() as u128,
            None => self.space.size(),
        }
    }

    pub fn contains(&self, code: &Code) -> bool {
        match &self.candidates {
            Some(candidates) => candidates.contains(code),
            None => self.space.allows(code),
        }
    }

    pub fn candidates(&self) -> Option<&[Code]> {
        self.candidates.as_deref()
    }
}

fn consistent(code: &Code, guesses: &[Guess]) -> bool {
    guesses
        .iter()
        .all(|g| feedback::compute(&g.code, code) == g.feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Feedback;

    fn solver(game: GameConfig) -> ConstraintSolver {
        ConstraintSolver::new(&game, ConstraintConfig::default(), Some(11)).unwrap()
    }

    #[test]
    fn test_first_guess_without_materializing() {
        let mut solver = solver(GameConfig::new(4, 6, true));
        let guess = solver.next_guess(&GuessHistory::new()).unwrap();
        assert_eq!(guess.len(), 4);
        assert!(solver.candidates().is_none());
        assert_eq!(solver.remaining_candidate_count(), 1296);
    }

    #[test]
    fn test_incremental_filter() {
        let secret = Code::from_indices(&[0, 1, 2, 3]);
        let mut solver = solver(GameConfig::new(4, 6, true));
        let mut history = GuessHistory::new();
        let mut previous = solver.remaining_candidate_count();

        for guess in [[0u8, 0, 1, 1], [2, 3, 4, 5], [1, 0, 3, 2]] {
            let code = Code::from_indices(&guess);
            let fb = feedback::compute(&code, &secret);
            history.push(code, fb);
            solver.filter_last_guess(&history).unwrap();

            let remaining = solver.remaining_candidate_count();
            assert!(remaining <= previous);
            assert!(solver.contains(&secret));
            previous = remaining;
        }
    }

    #[test]
    fn test_catches_up_on_unapplied_history() {
        let secret = Code::from_indices(&[3, 3, 1, 0]);
        let mut history = GuessHistory::new();
        for guess in [[0u8, 1, 2, 3], [3, 0, 0, 0]] {
            let code = Code::from_indices(&guess);
            let fb = feedback::compute(&code, &secret);
            history.push(code, fb);
        }

        let mut solver = solver(GameConfig::new(4, 4, true));
        solver.filter_last_guess(&history).unwrap();
        let candidates = solver.candidates().unwrap();
        assert!(candidates.contains(&secret));
        assert!(candidates.iter().all(|c| consistent(c, history.as_slice())));
    }

    #[test]
    fn test_inconsistent_history_is_fatal() {
        let mut history = GuessHistory::new();
        history.push(Code::from_indices(&[0, 0, 0, 0]), Feedback::new(4, 0));
        history.push(Code::from_indices(&[1, 1, 1, 1]), Feedback::new(4, 0));

        let mut solver = solver(GameConfig::new(4, 4, true));
        let result = solver.next_guess(&history);
        assert!(matches!(
            result,
            Err(CodebreakerError::EmptyCandidateSet { guesses: 2 })
        ));
        // Stays failed rather than recovering on the next call.
        assert!(solver.next_guess(&history).is_err());
    }

    #[test]
    fn test_universe_limit_enforced() {
        let config = ConstraintConfig {
            max_universe: 1000,
            ..ConstraintConfig::default()
        };
        let result = ConstraintSolver::new(&GameConfig::new(4, 6, true), config, None);
        assert!(matches!(
            result,
            Err(CodebreakerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_minimax_guess_is_consistent() {
        let secret = Code::from_indices(&[5, 1, 1, 4]);
        let config = ConstraintConfig {
            selection: CandidateSelection::Minimax,
            ..ConstraintConfig::default()
        };
        let mut solver =
            ConstraintSolver::new(&GameConfig::new(4, 6, true), config, Some(5)).unwrap();
        let mut history = GuessHistory::new();
        let first = Code::from_indices(&[0, 0, 1, 1]);
        let fb = feedback::compute(&first, &secret);
        history.push(first, fb);

        let guess = solver.next_guess(&history).unwrap();
        assert!(consistent(&guess, history.as_slice()));

        let candidates = solver.candidates().unwrap();
        let best = candidates
            .iter()
            .map(|c| minimax::worst_case(c, candidates))
            .min()
            .unwrap();
        assert_eq!(minimax::worst_case(&guess, candidates), best);
    }
}
