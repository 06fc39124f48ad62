//! Machine state: instruction pointer, relative base, memory, input queue.

use std::collections::VecDeque;

use crate::error::{AddressError, LoadError};
use crate::memory::Memory;
use intvm_common::Program;

/// What a call to [`Machine::step`] stopped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// An input instruction found the queue empty. The instruction pointer
    /// still addresses that instruction.
    AwaitInput,
    /// One value was emitted. The instruction pointer is past the output
    /// instruction.
    Output(i64),
    /// The program executed HALT.
    Halted,
}

/// The execution context of one program.
///
/// A machine is a plain value. The caller owns it and drives it through
/// `&mut self`; independent machines share nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Address of the next instruction word.
    pub ip: i64,
    /// Offset added to relative-mode operands.
    pub relative_base: i64,
    /// Program memory.
    pub memory: Memory,
    /// Pending input values, consumed front first.
    pub input: VecDeque<i64>,
    /// Latched once HALT executes.
    pub(crate) halted: bool,
}

impl Machine {
    /// Create a machine with the program loaded at address 0.
    pub fn new(program: &Program) -> Self {
        Self {
            ip: 0,
            relative_base: 0,
            memory: Memory::load(&program.words),
            input: VecDeque::new(),
            halted: false,
        }
    }

    /// Create a machine and then apply `(address, value)` overrides.
    pub fn with_overrides<I>(program: &Program, overrides: I) -> Result<Self, AddressError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut machine = Self::new(program);
        for (addr, value) in overrides {
            machine.memory.write(addr, value)?;
        }
        Ok(machine)
    }

    /// Parse comma-separated source, load it and apply overrides.
    pub fn from_source<I>(source: &str, overrides: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let program = Program::parse(source)?;
        Ok(Self::with_overrides(&program, overrides)?)
    }

    /// Queue one input value.
    pub fn push_input(&mut self, value: i64) {
        self.input.push_back(value);
    }

    /// Queue several input values in order.
    pub fn extend_input<I: IntoIterator<Item = i64>>(&mut self, values: I) {
        self.input.extend(values);
    }

    /// Returns true once the program has executed HALT.
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
