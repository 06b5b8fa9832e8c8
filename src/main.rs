use anyhow::Context;
use codebreaker::config::ConfigManager;
use codebreaker::game::{play_out, Game};
use codebreaker::SolverSession;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // codebreaker [config.toml] [secret]
    let args: Vec<String> = env::args().collect();

    let manager = match args.get(1) {
        Some(path) => ConfigManager::load_from_file(path)
            .with_context(|| format!("loading config from {}", path))?,
        None => ConfigManager::new(),
    };
    let config = manager.get();

    let mut session = SolverSession::new(config.clone())?;
    let alphabet = session.alphabet().clone();

    let game = match args.get(2) {
        Some(secret) => Game::new(
            alphabet
                .parse_code(secret)
                .with_context(|| format!("parsing secret {:?}", secret))?,
        ),
        None => {
            let mut rng = match config.solver.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
                None => StdRng::from_entropy(),
            };
            Game::random(&config.game, &mut rng)
        }
    };

    info!(
        "Playing {} positions over {} symbols with the {:?} strategy",
        config.game.code_length, config.game.number_of_colors, config.solver.strategy
    );

    let outcome = play_out(&mut session, &game)?;
    for (i, guess) in outcome.guesses.iter().enumerate() {
        info!(
            "#{:<2} {}  {}",
            i + 1,
            alphabet.render(&guess.code),
            guess.feedback
        );
    }

    if outcome.solved {
        info!("Secret {} found", alphabet.render(game.secret()));
    } else {
        warn!(
            "Secret {} not found within {} guesses",
            alphabet.render(game.secret()),
            config.game.max_guesses
        );
    }

    Ok(())
}
