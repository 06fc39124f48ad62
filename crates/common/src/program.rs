//! Program representation for intvm memory images.
//!
//! Program source is a comma-separated list of decimal integers giving the
//! initial memory contents from address 0.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// An intvm program: the initial memory image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// Memory words in address order.
    pub words: Vec<i64>,
}

impl Program {
    /// Create a new program from raw words.
    pub fn new(words: Vec<i64>) -> Self {
        Self { words }
    }

    /// Parse comma-separated source text.
    ///
    /// Whitespace around each word is ignored, so a trailing newline or
    /// line-wrapped source is accepted.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ParseError::Empty);
        }

        let words = source
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| ParseError::InvalidWord {
                    index,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { words })
    }

    /// Number of words in the program.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the program has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}
