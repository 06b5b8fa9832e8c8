use crate::types::{Code, Feedback, MAX_COLORS};

/// Scores `guess` against `reference`.
///
/// Exact matches are counted position by position. The remaining symbols of each
/// code form two residual multisets, and `wrong` is the size of their intersection:
/// every leftover reference symbol can satisfy at most one leftover guess symbol.
///
/// Both codes must have the same length and only hold symbols below [`MAX_COLORS`].
pub fn compute(guess: &Code, reference: &Code) -> Feedback {
    debug_assert_eq!(guess.len(), reference.len());

    let mut exact = 0;
    let mut guess_residual = [0u16; MAX_COLORS];
    let mut reference_residual = [0u16; MAX_COLORS];

    for (g, r) in guess.symbols().iter().zip(reference.symbols()) {
        if g == r {
            exact += 1;
        } else {
            guess_residual[g.index()] += 1;
            reference_residual[r.index()] += 1;
        }
    }

    let wrong = guess_residual
        .iter()
        .zip(reference_residual.iter())
        .map(|(&g, &r)| g.min(r) as usize)
        .sum();

    Feedback { exact, wrong }
}
