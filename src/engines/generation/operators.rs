use crate::engines::generation::genetic_solver::Individual;
use crate::types::Symbol;
use rand::Rng;

/// Uniform selection: every parent equally likely
pub fn uniform_selection<'a, R: Rng>(population: &'a [Individual], rng: &mut R) -> &'a Individual {
    &population[rng.gen_range(0..population.len())]
}

/// Tournament selection: lowest score of K random candidates
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_score = population[best_idx].fitness.score;

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].fitness.score < best_score {
            best_idx = idx;
            best_score = population[idx].fitness.score;
        }
    }

    &population[best_idx]
}

/// Single-point crossover: left of the cut from one parent, right from the other.
/// The cut lies in `1..len`, so both children mix both parents.
pub fn crossover<R: Rng>(
    parent1: &[Symbol],
    parent2: &[Symbol],
    rng: &mut R,
) -> (Vec<Symbol>, Vec<Symbol>) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let point = rng.gen_range(1..len);

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    child1[point..len].copy_from_slice(&parent2[point..len]);
    child2[point..len].copy_from_slice(&parent1[point..len]);

    (child1, child2)
}

/// Number of leading positions the in-place operators may touch.
pub fn operator_span(len: usize, skip_last_position: bool) -> usize {
    if skip_last_position && len > 1 {
        len - 1
    } else {
        len
    }
}

/// Mutation: one random position gets a random symbol
pub fn mutate<R: Rng>(genes: &mut [Symbol], colors: usize, span: usize, rng: &mut R) {
    if span == 0 {
        return;
    }
    let position = rng.gen_range(0..span);
    genes[position] = Symbol(rng.gen_range(0..colors) as u8);
}

/// Permutation: symbols at two random positions are swapped
pub fn permute<R: Rng>(genes: &mut [Symbol], span: usize, rng: &mut R) {
    if span == 0 {
        return;
    }
    let a = rng.gen_range(0..span);
    let b = rng.gen_range(0..span);
    genes.swap(a, b);
}

/// Inversion: the run between two random positions is reversed
pub fn invert<R: Rng>(genes: &mut [Symbol], span: usize, rng: &mut R) {
    if span == 0 {
        return;
    }
    let a = rng.gen_range(0..span);
    let b = rng.gen_range(0..span);
    genes[a.min(b)..=a.max(b)].reverse();
}
