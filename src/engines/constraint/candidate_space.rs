use crate::config::GameConfig;
use crate::types::{Code, Symbol};
use rand::seq::index;
use rand::Rng;
use rayon::prelude::*;

/// Indexed view over every code the duplicate policy allows.
///
/// Index `i` decodes to the code whose position `p` holds digit `p` of `i` written
/// in base `colors`. Under a no-duplicates policy some indices decode to nothing.
/// Nothing is materialized until a caller asks for the codes passing a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSpace {
    code_length: usize,
    colors: usize,
    allow_duplicates: bool,
}

impl CandidateSpace {
    pub fn new(game: &GameConfig) -> Self {
        Self {
            code_length: game.code_length,
            colors: game.number_of_colors,
            allow_duplicates: game.allow_duplicates,
        }
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn colors(&self) -> usize {
        self.colors
    }

    pub fn allow_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Number of codes in the universe, saturating at `u128::MAX`.
    pub fn size(&self) -> u128 {
        GameConfig::new(self.code_length, self.colors, self.allow_duplicates).universe_size()
    }

    /// `colors^length`, if it fits in a `u64`.
    pub fn index_space(&self) -> Option<u64> {
        let exponent = u32::try_from(self.code_length).ok()?;
        (self.colors as u64).checked_pow(exponent)
    }

    pub fn allows(&self, code: &Code) -> bool {
        code.len() == self.code_length
            && code.symbols().iter().all(|s| s.index() < self.colors)
            && (self.allow_duplicates || !code.has_duplicates())
    }

    pub fn decode(&self, mut index: u64) -> Option<Code> {
        let colors = self.colors as u64;
        let mut symbols = Vec::with_capacity(self.code_length);
        for _ in 0..self.code_length {
            symbols.push(Symbol((index % colors) as u8));
            index /= colors;
        }
        let code = Code::new(symbols);
        if self.allow_duplicates || !code.has_duplicates() {
            Some(code)
        } else {
            None
        }
    }

    /// Draws a code uniformly from the universe without enumerating it.
    pub fn random_code<R: Rng>(&self, rng: &mut R) -> Code {
        let symbols = if self.allow_duplicates {
            (0..self.code_length)
                .map(|_| Symbol(rng.gen_range(0..self.colors) as u8))
                .collect()
        } else {
            index::sample(rng, self.colors, self.code_length)
                .into_iter()
                .map(|i| Symbol(i as u8))
                .collect()
        };
        Code::new(symbols)
    }

    /// Streams the whole index space through `keep` in parallel and returns the
    /// survivors in index order. Callers must check `index_space` first.
    pub fn collect_matching<F>(&self, space: u64, keep: F) -> Vec<Code>
    where
        F: Fn(&Code) -> bool + Sync + Send,
    {
        (0..space)
            .into_par_iter()
            .filter_map(|i| self.decode(i))
            .filter(|code| keep(code))
            .collect()
    }
}
