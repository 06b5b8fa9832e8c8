use codebreaker::config::{ConstraintConfig, GameConfig};
use codebreaker::engines::constraint::ConstraintSolver;
use codebreaker::engines::evaluation::compute;
use codebreaker::{Alphabet, Code, CodebreakerError, Feedback, GuessHistory};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rgby() -> Alphabet {
    Alphabet::from_names(vec!["R".into(), "G".into(), "B".into(), "Y".into()]).unwrap()
}

#[test]
fn test_four_by_four_scenario() {
    let alphabet = rgby();
    let secret = alphabet.parse_code("RGBY").unwrap();
    let game = GameConfig::new(4, 4, true);
    let mut solver = ConstraintSolver::new(&game, ConstraintConfig::default(), Some(1)).unwrap();

    assert_eq!(solver.remaining_candidate_count(), 256);

    let mut history = GuessHistory::new();
    let guess = alphabet.parse_code("RRBY").unwrap();
    assert_eq!(compute(&guess, &secret), Feedback::new(3, 0));
    history.push(guess, Feedback::new(3, 0));

    solver.filter_last_guess(&history).unwrap();

    // One position differs, and the replaced symbol may be any of the three others.
    assert_eq!(solver.remaining_candidate_count(), 12);
    assert!(solver.contains(&secret));
    assert!(!solver.contains(&alphabet.parse_code("GGBY").unwrap()));

    let next = solver.next_guess(&history).unwrap();
    assert!(solver.contains(&next));
}

#[test]
fn test_secret_survives_random_play() {
    let mut rng = StdRng::seed_from_u64(77);
    let game = GameConfig::new(5, 7, false);

    for round in 0..5 {
        let secret_indices: Vec<u8> =
            rand::seq::index::sample(&mut rng, 7, 5).into_iter().map(|i| i as u8).collect();
        let secret = Code::from_indices(&secret_indices);
        let mut solver =
            ConstraintSolver::new(&game, ConstraintConfig::default(), Some(round)).unwrap();
        let mut history = GuessHistory::new();
        let mut previous = solver.remaining_candidate_count();

        for _ in 0..10 {
            let guess = solver.next_guess(&history).unwrap();
            let feedback = compute(&guess, &secret);
            history.push(guess, feedback);
            if feedback.is_win(5) {
                break;
            }

            solver.filter_last_guess(&history).unwrap();
            let remaining = solver.remaining_candidate_count();
            assert!(remaining <= previous);
            assert!(solver.contains(&secret));
            previous = remaining;
        }

        assert!(history.last().map_or(false, |g| g.feedback.is_win(5)));
    }
}

#[test]
fn test_untruthful_feedback_surfaces_error() {
    let game = GameConfig::new(4, 4, true);
    let mut solver = ConstraintSolver::new(&game, ConstraintConfig::default(), Some(3)).unwrap();
    let mut history = GuessHistory::new();
    history.push(Code::from_indices(&[0, 1, 2, 3]), Feedback::new(0, 0));
    history.push(Code::from_indices(&[0, 0, 0, 0]), Feedback::new(2, 0));

    assert!(matches!(
        solver.next_guess(&history),
        Err(CodebreakerError::EmptyCandidateSet { .. })
    ));
}
