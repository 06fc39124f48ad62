//! intvm assembler — bidirectional mnemonic text ↔ memory image translation.
//!
//! One line assembles to one instruction (opcode word plus operands) or to
//! a run of raw `DATA` words. Operands are bare numbers (position mode),
//! `#n` (immediate) or `@n` (relative).
//!
//! # Usage
//!
//! ```
//! use intvm_assembler::{assemble, disassemble};
//!
//! let text = "IN 0\nOUT 0\nHALT\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.words, vec![3, 0, 4, 0, 99]);
//! assert_eq!(disassemble(&program), text);
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for every program.
//! The disassembler outputs canonical text; the assembler also accepts
//! non-canonical input (hex literals, commas, lowercase mnemonics).

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use intvm_common::Program;
use lexer::tokenize_line;
use parser::parse_line;

/// Assemble text into a program.
///
/// Returns the first error encountered. Fix one error at a time.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut words = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        if let Some(line_words) = parse_line(&tokens, line_num)? {
            words.extend(line_words);
        }
    }

    Ok(Program::new(words))
}

/// Disassemble a program into canonical assembly text.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_with_comments_and_blanks() {
        let text = "\
; echo one value
IN 0      ; read

OUT 0     ; write back
HALT
";
        let program = assemble(text).unwrap();
        assert_eq!(program.words, vec![3, 0, 4, 0, 99]);
    }

    #[test]
    fn assemble_lowercase_and_hex() {
        let lower = assemble("out #0x2a\nhalt\n").unwrap();
        let upper = assemble("OUT #42\nHALT\n").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn roundtrip_assemble_then_disassemble_then_assemble() {
        let text = "ARB #1\nOUT @-1\nDATA 7, 8\nHALT\n";
        let first = assemble(text).unwrap();
        let canonical = disassemble(&first);
        let second = assemble(&canonical).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn error_reports_correct_line() {
        let err = assemble("HALT\nFOOBAR\n").unwrap_err();
        assert!(matches!(err, AsmError::UnknownOpcode { line: 2, .. }));
    }

    #[test]
    fn empty_text_is_empty_program() {
        assert!(assemble("; nothing here\n").unwrap().is_empty());
    }
}
