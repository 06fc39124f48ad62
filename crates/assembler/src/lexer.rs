//! Tokenizer for intvm assembly text.

use crate::error::AsmError;
use intvm_common::Mode;

/// A single token from an assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A mnemonic. Always uppercase.
    Ident(String),
    /// A numeric operand with its addressing mode.
    ///
    /// Bare numbers are position mode, `#n` is immediate, `@n` is relative.
    Operand(Mode, i64),
}

fn parse_number(text: &str, word: &str, line_num: usize) -> Result<i64, AsmError> {
    let invalid = || AsmError::InvalidNumber {
        line: line_num,
        token: word.to_string(),
    };

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).map_err(|_| invalid())
    } else {
        text.parse::<i64>().map_err(|_| invalid())
    }
}

/// Tokenize a single line of assembly text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line. Commas separate
/// tokens like whitespace does.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    // Strip comment
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = Vec::new();
    for word in line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
    {
        let token = if let Some(rest) = word.strip_prefix('#') {
            Token::Operand(Mode::Immediate, parse_number(rest, word, line_num)?)
        } else if let Some(rest) = word.strip_prefix('@') {
            Token::Operand(Mode::Relative, parse_number(rest, word, line_num)?)
        } else if word
            .as_bytes()
            .first()
            .is_some_and(|b| b.is_ascii_digit() || *b == b'-' || *b == b'+')
        {
            Token::Operand(Mode::Position, parse_number(word, word, line_num)?)
        } else {
            Token::Ident(word.to_uppercase())
        };
        tokens.push(token);
    }

    Ok(tokens)
}
