//! intvm common types and instruction decoding.
//!
//! This crate provides the foundational data structures for the intvm
//! instruction set:
//!
//! - [`Opcode`] — the ten operations and their operand counts
//! - [`Mode`] — position, immediate and relative addressing
//! - [`Instruction`] — decimal-digit decoding of an instruction word
//! - [`Program`] — a memory image parsed from comma-separated source
//! - [`DecodeError`] / [`ParseError`] — decoding and parsing failures

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::{DecodeError, ParseError};
pub use instruction::{Instruction, Mode};
pub use opcode::Opcode;
pub use program::Program;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(&opcode::ALL_OPCODES[..])
    }

    fn arb_mode() -> impl Strategy<Value = Mode> {
        prop::sample::select(vec![Mode::Position, Mode::Immediate, Mode::Relative])
    }

    proptest! {
        /// Building an instruction from typed parts and decoding its word
        /// gives back the same parts.
        #[test]
        fn encode_decode_roundtrip(
            op in arb_opcode(),
            modes in prop::collection::vec(arb_mode(), 0..=3),
        ) {
            let instr = Instruction::new(op, &modes);
            let decoded = Instruction::decode(instr.encode()).unwrap();
            prop_assert_eq!(decoded, instr);
            for (i, mode) in modes.iter().enumerate() {
                prop_assert_eq!(decoded.mode(i), Ok(*mode));
            }
        }

        /// Decoding any non-negative word yields the opcode from its low
        /// two digits or a specific error.
        #[test]
        fn decode_uses_low_two_digits(word in 0i64..10_000_000) {
            match Instruction::decode(word) {
                Ok(instr) => prop_assert_eq!(instr.opcode as u8 as i64, word % 100),
                Err(DecodeError::InvalidOpcode(op)) => prop_assert_eq!(op, word % 100),
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }

        /// Source rendering parses back to the same program.
        #[test]
        fn program_source_roundtrip(words in prop::collection::vec(any::<i64>(), 1..50)) {
            let program = Program::new(words);
            let parsed = Program::parse(&program.to_string()).unwrap();
            prop_assert_eq!(parsed, program);
        }
    }
}
