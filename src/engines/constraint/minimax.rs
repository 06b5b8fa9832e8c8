use crate::engines::evaluation::feedback;
use crate::types::Code;
use rayon::prelude::*;

/// Size of the largest group of `candidates` that would share one feedback if
/// `guess` were played.
pub fn worst_case(guess: &Code, candidates: &[Code]) -> usize {
    let width = guess.len() + 1;
    let mut partitions = vec![0usize; width * width];
    for candidate in candidates {
        let fb = feedback::compute(guess, candidate);
        partitions[fb.exact * width + fb.wrong] += 1;
    }
    partitions.into_iter().max().unwrap_or(0)
}

/// Picks the candidate minimizing the worst-case number of survivors.
/// Ties go to the earliest candidate.
pub fn select(candidates: &[Code]) -> Option<&Code> {
    candidates
        .par_iter()
        .enumerate()
        .map(|(i, guess)| (worst_case(guess, candidates), i))
        .min()
        .map(|(_, i)| &candidates[i])
}
