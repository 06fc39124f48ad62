//! Instruction dispatch and the step/run loops.

use tracing::{debug, trace};

use crate::error::{AddressError, RuntimeError};
use crate::machine::{Machine, StepResult};
use intvm_common::instruction::MAX_PARAMS;
use intvm_common::{DecodeError, Instruction, Mode, Opcode};

impl Machine {
    /// Run until the program outputs a value, blocks on input, or halts.
    ///
    /// A halted machine keeps returning [`StepResult::Halted`] without
    /// touching memory. After [`StepResult::AwaitInput`], queue input and
    /// call `step` again to retry the same instruction.
    pub fn step(&mut self) -> Result<StepResult, RuntimeError> {
        loop {
            if let Some(result) = self.execute_one()? {
                return Ok(result);
            }
        }
    }

    /// Drive the machine to completion.
    ///
    /// `input` is polled whenever the machine blocks; returning `None`
    /// leaves the machine suspended and this returns
    /// [`StepResult::AwaitInput`]. Every output is passed to `output`.
    /// Never returns [`StepResult::Output`].
    pub fn run<I, O>(&mut self, mut input: I, mut output: O) -> Result<StepResult, RuntimeError>
    where
        I: FnMut() -> Option<i64>,
        O: FnMut(i64),
    {
        loop {
            match self.step()? {
                StepResult::Output(value) => output(value),
                StepResult::AwaitInput => match input() {
                    Some(value) => self.input.push_back(value),
                    None => return Ok(StepResult::AwaitInput),
                },
                StepResult::Halted => return Ok(StepResult::Halted),
            }
        }
    }

    /// Execute exactly one instruction.
    ///
    /// Returns `None` when the instruction completed without producing an
    /// event (arithmetic, comparisons, jumps, base adjustment, a satisfied
    /// input).
    pub fn execute_one(&mut self) -> Result<Option<StepResult>, RuntimeError> {
        if self.halted {
            return Ok(Some(StepResult::Halted));
        }

        let at = self.ip;
        let word = self.load(at, at)?;
        let instr = Instruction::decode(word).map_err(|e| decode_error(at, e))?;
        trace!(ip = at, word, opcode = instr.opcode.mnemonic(), "decode");

        let count = instr.opcode.operand_count();
        let mut addrs = [0i64; MAX_PARAMS];
        for (index, slot) in addrs.iter_mut().enumerate().take(count) {
            *slot = self.operand_address(&instr, index, at)?;
        }

        self.ip = offset(at, 1 + count as i64, at)?;

        match instr.opcode {
            Opcode::Add => {
                let value = self
                    .load(addrs[0], at)?
                    .checked_add(self.load(addrs[1], at)?)
                    .ok_or(RuntimeError::Overflow { at })?;
                self.store(addrs[2], value, at)?;
            }
            Opcode::Mul => {
                let value = self
                    .load(addrs[0], at)?
                    .checked_mul(self.load(addrs[1], at)?)
                    .ok_or(RuntimeError::Overflow { at })?;
                self.store(addrs[2], value, at)?;
            }
            Opcode::Input => match self.input.pop_front() {
                Some(value) => self.store(addrs[0], value, at)?,
                None => {
                    self.ip = at;
                    debug!(ip = at, "awaiting input");
                    return Ok(Some(StepResult::AwaitInput));
                }
            },
            Opcode::Output => {
                let value = self.load(addrs[0], at)?;
                debug!(ip = at, value, "output");
                return Ok(Some(StepResult::Output(value)));
            }
            Opcode::JumpIfTrue => {
                if self.load(addrs[0], at)? != 0 {
                    self.ip = self.load(addrs[1], at)?;
                }
            }
            Opcode::JumpIfFalse => {
                if self.load(addrs[0], at)? == 0 {
                    self.ip = self.load(addrs[1], at)?;
                }
            }
            Opcode::LessThan => {
                let value = self.load(addrs[0], at)? < self.load(addrs[1], at)?;
                self.store(addrs[2], value as i64, at)?;
            }
            Opcode::Equals => {
                let value = self.load(addrs[0], at)? == self.load(addrs[1], at)?;
                self.store(addrs[2], value as i64, at)?;
            }
            Opcode::AdjustBase => {
                let delta = self.load(addrs[0], at)?;
                self.relative_base = offset(self.relative_base, delta, at)?;
            }
            Opcode::Halt => {
                self.ip = at;
                self.halted = true;
                debug!(ip = at, "halt");
                return Ok(Some(StepResult::Halted));
            }
        }

        Ok(None)
    }

    /// Effective address of operand `index` of the instruction at `at`.
    fn operand_address(
        &self,
        instr: &Instruction,
        index: usize,
        at: i64,
    ) -> Result<i64, RuntimeError> {
        let mode = instr.mode(index).map_err(|e| decode_error(at, e))?;
        let cell = offset(at, 1 + index as i64, at)?;

        match mode {
            Mode::Immediate if instr.opcode.write_operand() == Some(index) => {
                Err(RuntimeError::InvalidMode {
                    at,
                    mode: Mode::Immediate as u8 as i64,
                })
            }
            Mode::Immediate => Ok(cell),
            Mode::Position => self.load(cell, at),
            Mode::Relative => offset(self.relative_base, self.load(cell, at)?, at),
        }
    }

    fn load(&self, addr: i64, at: i64) -> Result<i64, RuntimeError> {
        self.memory.read(addr).map_err(|e| address_error(at, e))
    }

    fn store(&mut self, addr: i64, value: i64, at: i64) -> Result<(), RuntimeError> {
        trace!(addr, value, "store");
        self.memory
            .write(addr, value)
            .map_err(|e| address_error(at, e))
    }
}

fn offset(base: i64, delta: i64, at: i64) -> Result<i64, RuntimeError> {
    base.checked_add(delta).ok_or(RuntimeError::Overflow { at })
}

fn address_error(at: i64, AddressError(address): AddressError) -> RuntimeError {
    RuntimeError::InvalidAddress { at, address }
}

fn decode_error(at: i64, err: DecodeError) -> RuntimeError {
    match err {
        DecodeError::InvalidOpcode(opcode) => RuntimeError::InvalidOpcode { at, opcode },
        DecodeError::InvalidMode(mode) => RuntimeError::InvalidMode { at, mode },
        // Operand indices stay below `operand_count() <= MAX_PARAMS`.
        DecodeError::NoSuchParameter(index) => RuntimeError::InvalidMode {
            at,
            mode: index as i64,
        },
    }
}
