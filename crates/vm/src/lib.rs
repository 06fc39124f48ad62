//! intvm interpreter — resumable execution of integer memory images.
//!
//! The machine has:
//! - Growable, zero-initialised word memory
//! - An instruction pointer and a relative base register
//! - A FIFO input queue; execution suspends when it runs dry
//!
//! # Usage
//!
//! ```
//! use intvm_vm::{create_program, StepResult};
//!
//! let mut machine = create_program("3,0,4,0,99", []).unwrap();
//! assert_eq!(machine.step(), Ok(StepResult::AwaitInput));
//!
//! machine.push_input(42);
//! assert_eq!(machine.step(), Ok(StepResult::Output(42)));
//! assert_eq!(machine.step(), Ok(StepResult::Halted));
//! ```

pub mod error;
pub mod execute;
pub mod feedback;
pub mod machine;
pub mod memory;

pub use error::{AddressError, LoadError, RuntimeError};
pub use feedback::feedback_loop;
pub use machine::{Machine, StepResult};
pub use memory::{Memory, HEADROOM, MAX_ADDRESS};

use intvm_common::Program;

/// Parse `source`, load it, then apply `(address, value)` overrides.
///
/// # Errors
///
/// Returns [`LoadError`] if the source is malformed or an override names
/// a negative address.
pub fn create_program<I>(source: &str, overrides: I) -> Result<Machine, LoadError>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    Machine::from_source(source, overrides)
}

/// Execute a program with a fixed list of inputs and collect its outputs.
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails, or
/// [`RuntimeError::InputExhausted`] if the program asks for more input than
/// `inputs` provides.
pub fn run<I>(program: &Program, inputs: I) -> Result<Vec<i64>, RuntimeError>
where
    I: IntoIterator<Item = i64>,
{
    let mut machine = Machine::new(program);
    machine.extend_input(inputs);

    let mut outputs = Vec::new();
    match machine.run(|| None, |value| outputs.push(value))? {
        StepResult::AwaitInput => Err(RuntimeError::InputExhausted { at: machine.ip }),
        _ => Ok(outputs),
    }
}
