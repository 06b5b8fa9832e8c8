use crate::error::{CodebreakerError, Result};
use std::collections::HashSet;
use std::fmt;

/// Largest alphabet a session may use. Symbols are stored as `u8` indices and
/// feedback scoring keeps per-symbol counters on the stack.
pub const MAX_COLORS: usize = 64;

/// Longest code a session may use.
pub const MAX_CODE_LENGTH: usize = 64;

/// Opaque alphabet member, stored as an index into the session's [`Alphabet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(pub u8);

impl Symbol {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-length, immutable sequence of symbols. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(Box<[Symbol]>);

impl Code {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols.into_boxed_slice())
    }

    pub fn from_indices(indices: &[u8]) -> Self {
        Self(indices.iter().copied().map(Symbol).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn has_duplicates(&self) -> bool {
        let mut seen = [false; 256];
        self.0
            .iter()
            .any(|symbol| std::mem::replace(&mut seen[symbol.index()], true))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", symbol.0)?;
        }
        write!(f, "]")
    }
}

/// Oracle score of a guess: symbols in the right place, and symbols present elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    pub exact: usize,
    pub wrong: usize,
}

impl Feedback {
    pub fn new(exact: usize, wrong: usize) -> Self {
        Self { exact, wrong }
    }

    pub fn is_win(&self, code_length: usize) -> bool {
        self.exact == code_length
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.exact, self.wrong)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub code: Code,
    pub feedback: Feedback,
}

/// Append-only record of confirmed guesses for one game.
#[derive(Debug, Clone, Default)]
pub struct GuessHistory {
    guesses: Vec<Guess>,
}

impl GuessHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: Code, feedback: Feedback) {
        self.guesses.push(Guess { code, feedback });
    }

    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    pub fn last(&self) -> Option<&Guess> {
        self.guesses.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Guess> {
        self.guesses.iter()
    }

    pub fn as_slice(&self) -> &[Guess] {
        &self.guesses
    }
}

impl<'a> IntoIterator for &'a GuessHistory {
    type Item = &'a Guess;
    type IntoIter = std::slice::Iter<'a, Guess>;

    fn into_iter(self) -> Self::IntoIter {
        self.guesses.iter()
    }
}

/// A candidate code together with its fitness score (lower is better).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCode {
    pub code: Code,
    pub score: f64,
}

/// Display names for the symbols of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    names: Vec<String>,
}

impl Alphabet {
    pub fn from_names(names: Vec<String>) -> Result<Self> {
        if names.is_empty() || names.len() > MAX_COLORS {
            return Err(CodebreakerError::InvalidConfiguration(format!(
                "Alphabet must hold between 1 and {} symbols, got {}",
                MAX_COLORS,
                names.len()
            )));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() || !seen.insert(name.as_str()) {
                return Err(CodebreakerError::InvalidConfiguration(format!(
                    "Alphabet symbol names must be distinct and non-empty, got {:?}",
                    name
                )));
            }
        }
        Ok(Self { names })
    }

    /// Alphabet named `0`, `1`, ... `n-1`.
    pub fn numbered(size: usize) -> Result<Self> {
        Self::from_names((0..size).map(|i| i.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, symbol: Symbol) -> Option<&str> {
        self.names.get(symbol.index()).map(String::as_str)
    }

    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| Symbol(i as u8))
    }

    /// Parses a code written as separated names (`R,G,B,Y` or `R G B Y`), or as a
    /// run of single-character names (`RGBY`).
    pub fn parse_code(&self, text: &str) -> Result<Code> {
        let text = text.trim();
        let tokens: Vec<String> = if text.contains(|c: char| c == ',' || c.is_whitespace()) {
            text.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        } else {
            text.chars().map(|c| c.to_string()).collect()
        };

        let symbols = tokens
            .iter()
            .map(|token| {
                self.symbol(token).ok_or_else(|| {
                    CodebreakerError::InvalidCode(format!("Unknown symbol {:?}", token))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Code::new(symbols))
    }

    pub fn render(&self, code: &Code) -> String {
        code.symbols()
            .iter()
            .map(|&s| self.name(s).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(",")
    }
}
