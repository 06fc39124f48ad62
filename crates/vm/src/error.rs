//! Runtime errors for the intvm interpreter.
//!
//! Every instruction-level error carries the instruction pointer (`at`) of
//! the faulting instruction. None of them are resumable.

use intvm_common::ParseError;
use thiserror::Error;

/// A memory offset that is negative, or a write target above
/// [`MAX_ADDRESS`](crate::memory::MAX_ADDRESS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid memory address {0}")]
pub struct AddressError(pub i64);

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Read or write at a negative memory offset, or a write above the
    /// memory ceiling.
    #[error("invalid memory address {address} at instruction {at}")]
    InvalidAddress { at: i64, address: i64 },

    /// Parameter mode outside {0, 1, 2}, or immediate mode on a write target.
    #[error("invalid parameter mode {mode} at instruction {at}")]
    InvalidMode { at: i64, mode: i64 },

    /// Opcode not in the instruction table.
    #[error("invalid opcode {opcode} at instruction {at}")]
    InvalidOpcode { at: i64, opcode: i64 },

    /// Checked arithmetic overflowed a 64-bit word.
    #[error("arithmetic overflow at instruction {at}")]
    Overflow { at: i64 },

    /// The program blocked on input and the caller had none to give.
    #[error("input exhausted at instruction {at}")]
    InputExhausted { at: i64 },

    /// Every machine in a feedback loop is blocked on input.
    #[error("all machines blocked on input")]
    Deadlock,
}

/// Errors that occur while building a machine from source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("override rejected: {0}")]
    Override(#[from] AddressError),
}
