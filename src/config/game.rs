use super::traits::ConfigSection;
use crate::error::CodebreakerError;
use crate::types::{Alphabet, MAX_CODE_LENGTH, MAX_COLORS};
use serde::{Deserialize, Serialize};

/// Shape of the game being solved: alphabet, code length and duplicate policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub code_length: usize,
    pub number_of_colors: usize,
    pub allow_duplicates: bool,
    pub max_guesses: usize,
    /// Optional display names, one per color. Empty means `0..number_of_colors`.
    pub symbols: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            code_length: 4,
            number_of_colors: 6,
            allow_duplicates: true,
            max_guesses: 10,
            symbols: Vec::new(),
        }
    }
}

impl GameConfig {
    pub fn new(code_length: usize, number_of_colors: usize, allow_duplicates: bool) -> Self {
        Self {
            code_length,
            number_of_colors,
            allow_duplicates,
            ..Self::default()
        }
    }

    pub fn alphabet(&self) -> Result<Alphabet, CodebreakerError> {
        if self.symbols.is_empty() {
            Alphabet::numbered(self.number_of_colors)
        } else {
            Alphabet::from_names(self.symbols.clone())
        }
    }

    /// Number of codes allowed by the duplicate policy, saturating at `u128::MAX`.
    pub fn universe_size(&self) -> u128 {
        let colors = self.number_of_colors as u128;
        if self.allow_duplicates {
            (0..self.code_length).fold(1u128, |acc, _| acc.saturating_mul(colors))
        } else if self.code_length > self.number_of_colors {
            0
        } else {
            (0..self.code_length as u128).fold(1u128, |acc, i| acc.saturating_mul(colors - i))
        }
    }

    /// Size of the indexed enumeration space (`colors^length`), if it fits in a `u64`.
    pub fn index_space(&self) -> Option<u64> {
        let exponent = u32::try_from(self.code_length).ok()?;
        (self.number_of_colors as u64).checked_pow(exponent)
    }
}

impl ConfigSection for GameConfig {
    fn section_name() -> &'static str {
        "game"
    }

    fn validate(&self) -> Result<(), CodebreakerError> {
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(CodebreakerError::InvalidConfiguration(format!(
                "Code length must be between 1 and {}, got {}",
                MAX_CODE_LENGTH, self.code_length
            )));
        }
        if self.number_of_colors == 0 || self.number_of_colors > MAX_COLORS {
            return Err(CodebreakerError::InvalidConfiguration(format!(
                "Number of colors must be between 1 and {}, got {}",
                MAX_COLORS, self.number_of_colors
            )));
        }
        if !self.symbols.is_empty() && self.symbols.len() != self.number_of_colors {
            return Err(CodebreakerError::InvalidConfiguration(format!(
                "Expected {} symbol names, got {}",
                self.number_of_colors,
                self.symbols.len()
            )));
        }
        if !self.allow_duplicates && self.code_length > self.number_of_colors {
            return Err(CodebreakerError::InvalidConfiguration(format!(
                "Code length {} exceeds {} colors while duplicates are disallowed",
                self.code_length, self.number_of_colors
            )));
        }
        if self.max_guesses == 0 {
            return Err(CodebreakerError::InvalidConfiguration(
                "Max guesses must be at least 1".to_string(),
            ));
        }
        self.alphabet()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_size() {
        assert_eq!(GameConfig::new(4, 4, true).universe_size(), 256);
        assert_eq!(GameConfig::new(4, 6, true).universe_size(), 1296);
        assert_eq!(GameConfig::new(4, 6, false).universe_size(), 360);
        assert_eq!(GameConfig::new(4, 4, false).universe_size(), 24);
        assert_eq!(GameConfig::new(20, 64, true).index_space(), None);
    }

    #[test]
    fn test_infeasible_duplicate_policy() {
        let config = GameConfig::new(5, 4, false);
        assert!(matches!(
            config.validate(),
            Err(CodebreakerError::InvalidConfiguration(_))
        ));
        assert!(GameConfig::new(5, 4, true).validate().is_ok());
    }

    #[test]
    fn test_symbol_count_must_match() {
        let mut config = GameConfig::new(4, 4, true);
        config.symbols = vec!["R".into(), "G".into(), "B".into()];
        assert!(config.validate().is_err());
        config.symbols.push("Y".into());
        assert!(config.validate().is_ok());
    }
}
