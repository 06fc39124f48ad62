//! Instruction word decoding for the intvm instruction set.
//!
//! An instruction word packs an opcode and up to three parameter modes in
//! its decimal digits:
//! ```text
//!   ABCDE
//!   ||| `-- DE: opcode
//!   ||`---- C : mode of parameter 1
//!   |`----- B : mode of parameter 2
//!   `------ A : mode of parameter 3
//! ```
//! Missing leading digits read as 0 (position mode).

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::Opcode;

/// Maximum number of parameters any opcode takes.
pub const MAX_PARAMS: usize = 3;

/// Parameter addressing mode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The operand cell holds the address of the value.
    #[default]
    Position = 0,
    /// The operand cell is the value.
    Immediate = 1,
    /// The operand cell holds an offset from the relative base.
    Relative = 2,
}

impl TryFrom<i64> for Mode {
    type Error = DecodeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            _ => Err(DecodeError::InvalidMode(value)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Position => "position",
            Mode::Immediate => "immediate",
            Mode::Relative => "relative",
        };
        f.write_str(name)
    }
}

/// A decoded instruction word.
///
/// Mode digits are kept raw: only the modes an opcode actually uses are
/// validated, and only when they are resolved through [`Instruction::mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Raw mode digits for parameters 1..=3.
    pub modes: [i64; MAX_PARAMS],
}

/// The decimal digit at 1-based position `pos`, counting from the right.
fn digit(word: i64, pos: u32) -> i64 {
    (word / 10_i64.pow(pos - 1)) % 10
}

impl Instruction {
    /// Decode an instruction word.
    ///
    /// Fails only when the opcode is unknown; operand count and mode
    /// validity are left to the interpreter.
    pub fn decode(word: i64) -> Result<Self, DecodeError> {
        let opcode = Opcode::try_from(word % 100)?;
        let modes = [digit(word, 3), digit(word, 4), digit(word, 5)];
        Ok(Self { opcode, modes })
    }

    /// Build an instruction from an opcode and typed modes.
    ///
    /// Parameters not covered by `modes` default to position mode.
    pub fn new(opcode: Opcode, modes: &[Mode]) -> Self {
        let mut raw = [0; MAX_PARAMS];
        for (slot, mode) in raw.iter_mut().zip(modes) {
            *slot = *mode as u8 as i64;
        }
        Self { opcode, modes: raw }
    }

    /// Resolve the addressing mode of parameter `index` (0-based).
    pub fn mode(&self, index: usize) -> Result<Mode, DecodeError> {
        let raw = self
            .modes
            .get(index)
            .ok_or(DecodeError::NoSuchParameter(index))?;
        Mode::try_from(*raw)
    }

    /// Encode back into a single instruction word.
    pub fn encode(&self) -> i64 {
        self.opcode as u8 as i64
            + self.modes[0] * 100
            + self.modes[1] * 1_000
            + self.modes[2] * 10_000
    }
}
