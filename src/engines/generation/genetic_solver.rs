use crate::config::{GameConfig, GeneticConfig, SelectionMethod};
use crate::engines::constraint::CandidateSpace;
use crate::engines::evaluation::fitness::{Fitness, FitnessEvaluator};
use crate::engines::generation::{
    cancellation::CancellationToken,
    operators::{
        crossover, invert, mutate, operator_span, permute, tournament_selection,
        uniform_selection,
    },
    progress::LogProgressCallback,
};
use crate::error::{CodebreakerError, Result};
use crate::types::{Code, GuessHistory, ScoredCode};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Offspring attempts allowed per population slot before a generation is
/// topped up with random immigrants.
const FILL_ATTEMPTS_PER_SLOT: usize = 20;

/// A population member and its fitness against the current history.
#[derive(Debug, Clone)]
pub struct Individual {
    pub code: Code,
    pub fitness: Fitness,
}

/// Counters for the most recent `next_guess` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub generations: usize,
    pub repopulations: usize,
    pub evaluations: usize,
    pub immigrants: usize,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_score: f64, eligible: usize);
    fn on_repopulation(&mut self, generation: usize, stalled: usize);
}

/// Evolves candidate codes until some reproduce every recorded feedback.
pub struct GeneticSolver {
    config: GeneticConfig,
    space: CandidateSpace,
    evaluator: FitnessEvaluator,
    population: Vec<Individual>,
    cancellation: CancellationToken,
    stats: SearchStats,
    rng: StdRng,
}

impl GeneticSolver {
    pub fn new(game: &GameConfig, config: GeneticConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            evaluator: FitnessEvaluator::from_config(&config),
            space: CandidateSpace::new(game),
            config,
            population: Vec::new(),
            cancellation: CancellationToken::new(),
            stats: SearchStats::default(),
            rng,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn set_cancellation(&mut self, token: CancellationToken) {
        self.cancellation = token;
    }

    pub fn next_guess(&mut self, history: &GuessHistory) -> Result<Vec<ScoredCode>> {
        self.run(history, &mut LogProgressCallback)
    }

    /// Runs one search against `history`.
    ///
    /// Returns every eligible code found, lowest score first. Fails with
    /// `NoSolutionFound` (carrying the best code seen) when the generation budget
    /// runs out, and with `Cancelled` when the token fires or the time limit passes.
    pub fn run<C: ProgressCallback>(
        &mut self,
        history: &GuessHistory,
        callback: &mut C,
    ) -> Result<Vec<ScoredCode>> {
        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));
        self.stats = SearchStats::default();

        if self.cancellation.is_cancelled() {
            return Err(CodebreakerError::Cancelled { generation: 0 });
        }

        let target = self.effective_population_size();
        let mut eligible = EligibleSet::default();
        let mut best: Option<ScoredCode> = None;

        // Seed
        let seed = self.random_population(target);
        self.population = self.evaluate(seed, history);
        eligible.collect(&self.population);
        if !eligible.is_empty() {
            return Ok(eligible.into_sorted());
        }
        track_best(&mut best, &self.population);

        let mut stalled = 0;
        for generation in 0..self.config.max_generations {
            let expired = deadline.map_or(false, |d| Instant::now() >= d);
            if self.cancellation.is_cancelled() || expired {
                debug!("Search stopped at generation {}", generation);
                return Err(CodebreakerError::Cancelled { generation });
            }

            callback.on_generation_start(generation);

            if stalled > self.config.stall_limit {
                callback.on_repopulation(generation, stalled);
                let fresh = self.random_population(target);
                self.population = self.evaluate(fresh, history);
                eligible.collect(&self.population);
                self.stats.repopulations += 1;
                stalled = 0;
            }

            let offspring = self.breed(target);
            let generation_members = self.evaluate(offspring, history);
            self.stats.generations += 1;

            eligible.collect(&generation_members);
            track_best(&mut best, &generation_members);

            callback.on_generation_complete(
                generation,
                best.as_ref().map_or(f64::INFINITY, |b| b.score),
                eligible.len(),
            );

            self.population = generation_members;

            if !eligible.is_empty() {
                return Ok(eligible.into_sorted());
            }
            stalled += 1;
        }

        Err(CodebreakerError::NoSolutionFound {
            generations: self.config.max_generations,
            best,
        })
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// A generation cannot hold more distinct codes than the universe has.
    fn effective_population_size(&self) -> usize {
        let universe = self.space.size();
        if (self.config.population_size as u128) > universe {
            debug!(
                "Population size {} capped to universe size {}",
                self.config.population_size, universe
            );
            universe as usize
        } else {
            self.config.population_size
        }
    }

    fn random_population(&mut self, target: usize) -> Vec<Code> {
        let mut members = Offspring::with_capacity(target);
        while members.len() < target {
            members.try_add(self.space.random_code(&mut self.rng));
        }
        members.into_codes()
    }

    fn evaluate(&mut self, codes: Vec<Code>, history: &GuessHistory) -> Vec<Individual> {
        self.stats.evaluations += codes.len();
        let evaluator = self.evaluator;

        // Each member is scored independently against the read-only history.
        codes
            .into_par_iter()
            .map(|code| {
                let fitness = evaluator.evaluate(&code, history);
                Individual { code, fitness }
            })
            .collect()
    }

    fn select_parent(&mut self) -> &Individual {
        match self.config.selection {
            SelectionMethod::Uniform => uniform_selection(&self.population, &mut self.rng),
            SelectionMethod::Tournament => {
                tournament_selection(&self.population, self.config.tournament_size, &mut self.rng)
            }
        }
    }

    fn breed(&mut self, target: usize) -> Vec<Code> {
        let colors = self.space.colors();
        let span = operator_span(self.space.code_length(), self.config.skip_last_position);
        let mut next_generation = Offspring::with_capacity(target);
        let budget = target * FILL_ATTEMPTS_PER_SLOT;
        let mut attempts = 0;

        while next_generation.len() < target && attempts < budget {
            attempts += 1;

            if self.rng.gen::<f64>() < self.config.crossover_prob {
                let parent1 = self.select_parent().code.clone();
                let parent2 = self.select_parent().code.clone();
                let (child1, child2) =
                    crossover(parent1.symbols(), parent2.symbols(), &mut self.rng);

                for mut child in [child1, child2] {
                    if next_generation.len() >= target {
                        break;
                    }
                    if self.rng.gen::<f64>() < self.config.mutation_prob {
                        mutate(&mut child, colors, span, &mut self.rng);
                    }
                    if self.rng.gen::<f64>() < self.config.permutation_prob {
                        permute(&mut child, span, &mut self.rng);
                    }
                    if self.rng.gen::<f64>() < self.config.inversion_prob {
                        invert(&mut child, span, &mut self.rng);
                    }

                    let code = Code::new(child);
                    if self.space.allows(&code) {
                        next_generation.try_add(code);
                    }
                }
            } else {
                // Reproduction (copy)
                let parent = self.select_parent().code.clone();
                next_generation.try_add(parent);
            }
        }

        if next_generation.len() < target {
            let missing = target - next_generation.len();
            debug!(
                "Generation filled {} of {} slots in {} attempts, adding {} immigrants",
                next_generation.len(),
                target,
                attempts,
                missing
            );
            self.stats.immigrants += missing;
            while next_generation.len() < target {
                next_generation.try_add(self.space.random_code(&mut self.rng));
            }
        }

        next_generation.into_codes()
    }
}

/// Generation under construction; rejects structural duplicates.
struct Offspring {
    codes: Vec<Code>,
    seen: HashSet<Code>,
}

impl Offspring {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            codes: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    fn try_add(&mut self, code: Code) -> bool {
        if self.seen.contains(&code) {
            return false;
        }
        self.seen.insert(code.clone());
        self.codes.push(code);
        true
    }

    fn len(&self) -> usize {
        self.codes.len()
    }

    fn into_codes(self) -> Vec<Code> {
        self.codes
    }
}

/// Eligible codes found during one call, in discovery order.
#[derive(Default)]
struct EligibleSet {
    members: Vec<ScoredCode>,
    seen: HashSet<Code>,
}

impl EligibleSet {
    fn collect(&mut self, population: &[Individual]) {
        for individual in population.iter().filter(|i| i.fitness.eligible) {
            if self.seen.insert(individual.code.clone()) {
                self.members.push(ScoredCode {
                    code: individual.code.clone(),
                    score: individual.fitness.score,
                });
            }
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn into_sorted(mut self) -> Vec<ScoredCode> {
        self.members.sort_by(|a, b| {
            a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal)
        });
        self.members
    }
}

fn track_best(best: &mut Option<ScoredCode>, population: &[Individual]) {
    let candidate = population.iter().min_by(|a, b| {
        a.fitness
            .score
            .partial_cmp(&b.fitness.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(individual) = candidate {
        let improves = best
            .as_ref()
            .map_or(true, |b| individual.fitness.score < b.score);
        if improves {
            *best = Some(ScoredCode {
                code: individual.code.clone(),
                score: individual.fitness.score,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::evaluation::feedback;
    use crate::engines::generation::progress::{ChannelProgressCallback, ProgressMessage};
    use crate::types::Feedback;

    fn small_config() -> GeneticConfig {
        GeneticConfig {
            population_size: 50,
            max_generations: 50,
            ..GeneticConfig::default()
        }
    }

    fn inconsistent_history() -> GuessHistory {
        let mut history = GuessHistory::new();
        history.push(Code::from_indices(&[0, 0, 0, 0]), Feedback::new(4, 0));
        history.push(Code::from_indices(&[1, 1, 1, 1]), Feedback::new(4, 0));
        history
    }

    #[test]
    fn test_returned_codes_are_eligible() {
        let secret = Code::from_indices(&[0, 1, 2, 3]);
        let mut history = GuessHistory::new();
        for guess in [[0u8, 0, 2, 3], [4, 5, 0, 1]] {
            let code = Code::from_indices(&guess);
            let fb = feedback::compute(&code, &secret);
            history.push(code, fb);
        }

        let game = GameConfig::new(4, 6, true);
        let config = GeneticConfig {
            population_size: 100,
            max_generations: 100,
            ..GeneticConfig::default()
        };
        let mut solver = GeneticSolver::new(&game, config, Some(21));
        let found = solver.next_guess(&history).unwrap();

        assert!(!found.is_empty());
        let evaluator = FitnessEvaluator::default();
        for scored in &found {
            let fitness = evaluator.evaluate(&scored.code, &history);
            assert!(fitness.eligible);
            assert_eq!(fitness.score, 0.0);
            assert_eq!(scored.score, 0.0);
        }
        let distinct: HashSet<_> = found.iter().map(|s| &s.code).collect();
        assert_eq!(distinct.len(), found.len());
    }

    #[test]
    fn test_empty_history_returns_seed() {
        let game = GameConfig::new(4, 6, true);
        let mut solver = GeneticSolver::new(&game, small_config(), Some(2));
        let found = solver.next_guess(&GuessHistory::new()).unwrap();
        assert_eq!(found.len(), 50);
        assert_eq!(solver.stats().generations, 0);
    }

    #[test]
    fn test_budget_exhaustion_reports_best() {
        let game = GameConfig::new(4, 4, true);
        let config = GeneticConfig {
            population_size: 20,
            max_generations: 3,
            ..GeneticConfig::default()
        };
        let mut solver = GeneticSolver::new(&game, config, Some(8));
        match solver.next_guess(&inconsistent_history()) {
            Err(CodebreakerError::NoSolutionFound { generations, best }) => {
                assert_eq!(generations, 3);
                assert!(best.map_or(false, |b| b.score > 0.0));
            }
            other => panic!("expected NoSolutionFound, got {:?}", other),
        }
        assert_eq!(solver.stats().generations, 3);
    }

    #[test]
    fn test_stall_triggers_repopulation() {
        let game = GameConfig::new(4, 4, true);
        let config = GeneticConfig {
            population_size: 20,
            max_generations: 5,
            stall_limit: 0,
            ..GeneticConfig::default()
        };
        let mut solver = GeneticSolver::new(&game, config, Some(8));
        let (tx, rx) = std::sync::mpsc::channel();
        let mut callback = ChannelProgressCallback::new(tx);

        assert!(solver.run(&inconsistent_history(), &mut callback).is_err());
        assert_eq!(solver.stats().repopulations, 4);

        let repopulated = rx
            .try_iter()
            .filter(|m| matches!(m, ProgressMessage::Repopulated { .. }))
            .count();
        assert_eq!(repopulated, 4);
    }

    #[test]
    fn test_cancelled_before_search() {
        let game = GameConfig::new(4, 6, true);
        let token = CancellationToken::new();
        token.cancel();
        let mut solver =
            GeneticSolver::new(&game, small_config(), Some(1)).with_cancellation(token.clone());

        assert!(matches!(
            solver.next_guess(&GuessHistory::new()),
            Err(CodebreakerError::Cancelled { generation: 0 })
        ));

        token.reset();
        assert!(solver.next_guess(&GuessHistory::new()).is_ok());
    }

    #[test]
    fn test_zero_time_limit_cancels() {
        let game = GameConfig::new(4, 4, true);
        let config = GeneticConfig {
            population_size: 20,
            time_limit_ms: Some(0),
            ..GeneticConfig::default()
        };
        let mut solver = GeneticSolver::new(&game, config, Some(4));
        assert!(matches!(
            solver.next_guess(&inconsistent_history()),
            Err(CodebreakerError::Cancelled { .. })
        ));
    }

    #[test]
    fn test_population_capped_to_universe() {
        let game = GameConfig::new(4, 4, false);
        let mut solver = GeneticSolver::new(&game, GeneticConfig::default(), Some(3));
        let secret = Code::from_indices(&[2, 0, 3, 1]);
        let mut history = GuessHistory::new();
        let guess = Code::from_indices(&[0, 1, 2, 3]);
        let fb = feedback::compute(&guess, &secret);
        history.push(guess, fb);

        let found = solver.next_guess(&history).unwrap();
        assert_eq!(solver.population().len(), 24);
        assert!(found.iter().any(|s| s.code == secret));
        assert!(found.iter().all(|s| !s.code.has_duplicates()));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let secret = Code::from_indices(&[3, 1, 4, 1]);
        let mut history = GuessHistory::new();
        let guess = Code::from_indices(&[0, 1, 2, 3]);
        let fb = feedback::compute(&guess, &secret);
        history.push(guess, fb);

        let game = GameConfig::new(4, 6, true);
        let first = GeneticSolver::new(&game, small_config(), Some(99))
            .next_guess(&history)
            .unwrap();
        let second = GeneticSolver::new(&game, small_config(), Some(99))
            .next_guess(&history)
            .unwrap();
        assert_eq!(first, second);
    }
}
