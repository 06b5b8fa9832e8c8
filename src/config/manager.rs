use super::{
    constraint::ConstraintConfig,
    game::GameConfig,
    genetic::GeneticConfig,
    solver::{SolverConfig, Strategy},
    traits::ConfigSection,
};
use crate::error::CodebreakerError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment prefix for overrides, e.g. `CODEBREAKER__GENETIC__POPULATION_SIZE=200`.
pub const ENV_PREFIX: &str = "CODEBREAKER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub solver: SolverConfig,
    pub genetic: GeneticConfig,
    pub constraint: ConstraintConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CodebreakerError> {
        self.game.validate()?;
        self.solver.validate()?;
        self.genetic.validate()?;
        self.constraint.validate()?;

        if self.solver.strategy == Strategy::Constraint {
            match self.game.index_space() {
                Some(space) if space <= self.constraint.max_universe => {}
                _ => {
                    return Err(CodebreakerError::InvalidConfiguration(format!(
                        "{} colors over {} positions exceeds the constraint solver limit of {} codes",
                        self.game.number_of_colors,
                        self.game.code_length,
                        self.constraint.max_universe
                    )))
                }
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Layers a TOML file under `CODEBREAKER__*` environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CodebreakerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CodebreakerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Config file not found: {}", path.display()),
            )));
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_settings(settings)
    }

    pub fn load_from_str(contents: &str) -> Result<Self, CodebreakerError> {
        let settings = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, CodebreakerError> {
        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(Self { config })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CodebreakerError> {
        let toml_str = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), CodebreakerError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
