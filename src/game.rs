use crate::config::GameConfig;
use crate::engines::constraint::CandidateSpace;
use crate::engines::evaluation::feedback;
use crate::error::{CodebreakerError, Result};
use crate::session::SolverSession;
use crate::types::{Code, Feedback, Guess};
use log::{info, warn};
use rand::Rng;

/// Self-play oracle holding the secret code.
#[derive(Debug, Clone)]
pub struct Game {
    secret: Code,
}

impl Game {
    pub fn new(secret: Code) -> Self {
        Self { secret }
    }

    /// Draws a secret that honours the duplicate policy.
    pub fn random<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        Self::new(CandidateSpace::new(config).random_code(rng))
    }

    pub fn secret(&self) -> &Code {
        &self.secret
    }

    pub fn score(&self, guess: &Code) -> Feedback {
        feedback::compute(guess, &self.secret)
    }
}

#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub solved: bool,
    pub guesses: Vec<Guess>,
}

/// Plays `game` to the end with `session`, stopping after the configured number of guesses.
///
/// When the genetic search runs out of generations, the best non-eligible code it
/// saw is played instead. Every other failure ends the game with an error.
pub fn play_out(session: &mut SolverSession, game: &Game) -> Result<GameOutcome> {
    let space = CandidateSpace::new(&session.config().game);
    if !space.allows(game.secret()) {
        return Err(CodebreakerError::InvalidCode(format!(
            "Secret {} does not fit {} positions over {} colors (duplicates allowed: {})",
            game.secret(),
            space.code_length(),
            space.colors(),
            space.allow_duplicates()
        )));
    }

    let max_guesses = session.config().game.max_guesses;
    while session.history().len() < max_guesses && !session.is_solved() {
        let guess = match session.next_guess() {
            Ok(code) => code,
            Err(CodebreakerError::NoSolutionFound {
                generations,
                best: Some(best),
            }) => {
                warn!(
                    "No eligible code after {} generations, playing best candidate (score {})",
                    generations, best.score
                );
                best.code
            }
            Err(e) => return Err(e),
        };

        let fb = game.score(&guess);
        session.record_feedback(guess, fb)?;
    }

    let solved = session.is_solved();
    if solved {
        info!("Solved in {} guesses", session.history().len());
    }

    Ok(GameOutcome {
        solved,
        guesses: session.history().as_slice().to_vec(),
    })
}
