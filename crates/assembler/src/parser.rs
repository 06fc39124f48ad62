//! Parser for intvm assembly tokens → memory words.

use crate::error::AsmError;
use crate::lexer::Token;
use intvm_common::opcode::ALL_OPCODES;
use intvm_common::{Instruction, Mode, Opcode};

/// Mnemonic for raw data words.
pub(crate) const DATA: &str = "DATA";

fn lookup_opcode(mnemonic: &str) -> Option<Opcode> {
    ALL_OPCODES
        .iter()
        .find(|op| op.mnemonic() == mnemonic)
        .copied()
}

fn unexpected(token: &Token, line_num: usize) -> AsmError {
    let token = match token {
        Token::Ident(s) => s.clone(),
        Token::Operand(Mode::Position, n) => n.to_string(),
        Token::Operand(Mode::Immediate, n) => format!("#{n}"),
        Token::Operand(Mode::Relative, n) => format!("@{n}"),
    };
    AsmError::UnexpectedToken {
        line: line_num,
        token,
    }
}

/// Parse the tokens of a single line into the words it assembles to.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(tokens: &[Token], line_num: usize) -> Result<Option<Vec<i64>>, AsmError> {
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    let mnemonic = match first {
        Token::Ident(s) => s.as_str(),
        other => return Err(unexpected(other, line_num)),
    };
    let args = &tokens[1..];

    if mnemonic == DATA {
        return parse_data(args, line_num).map(Some);
    }

    let opcode = lookup_opcode(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line: line_num,
        token: mnemonic.to_string(),
    })?;

    let expected = opcode.operand_count();
    if args.len() < expected {
        return Err(AsmError::MissingArgument {
            line: line_num,
            opcode: opcode.mnemonic(),
            expected,
        });
    }
    if let Some(extra) = args.get(expected) {
        return Err(unexpected(extra, line_num));
    }

    let mut modes = Vec::with_capacity(expected);
    let mut words = vec![0];
    for (index, arg) in args.iter().enumerate() {
        let (mode, value) = match arg {
            Token::Operand(mode, value) => (*mode, *value),
            other => return Err(unexpected(other, line_num)),
        };
        if mode == Mode::Immediate && opcode.write_operand() == Some(index) {
            return Err(AsmError::ImmediateWrite {
                line: line_num,
                opcode: opcode.mnemonic(),
            });
        }
        modes.push(mode);
        words.push(value);
    }
    words[0] = Instruction::new(opcode, &modes).encode();

    Ok(Some(words))
}

/// `DATA` takes one or more bare numbers.
fn parse_data(args: &[Token], line_num: usize) -> Result<Vec<i64>, AsmError> {
    if args.is_empty() {
        return Err(AsmError::MissingArgument {
            line: line_num,
            opcode: DATA,
            expected: 1,
        });
    }

    args.iter()
        .map(|arg| match arg {
            Token::Operand(Mode::Position, value) => Ok(*value),
            other => Err(unexpected(other, line_num)),
        })
        .collect()
}
