//! Round-robin driver for machines wired into a ring.

use tracing::debug;

use crate::error::RuntimeError;
use crate::machine::{Machine, StepResult};

/// Run `machines` as a ring: every output of machine `i` is queued as
/// input to machine `i + 1`, and the last machine feeds the first.
///
/// `seed` is queued on the first machine before anything runs; any other
/// per-machine setup (such as a configuration value) must already be in
/// each input queue. Machines are resumed in order until all have halted.
///
/// Returns the last value emitted by the final machine, or `None` if it
/// never emitted anything.
///
/// # Errors
///
/// Propagates the first [`RuntimeError`] of any machine, and returns
/// [`RuntimeError::Deadlock`] when a full round produces no output while
/// some machine is still waiting for input.
pub fn feedback_loop(machines: &mut [Machine], seed: i64) -> Result<Option<i64>, RuntimeError> {
    let Some(first) = machines.first_mut() else {
        return Ok(None);
    };
    first.push_input(seed);

    let count = machines.len();
    let mut last_output = None;
    let mut round = 0usize;

    loop {
        let mut produced = false;
        let mut running = 0usize;

        for i in 0..count {
            let mut outputs = Vec::new();
            let result = machines[i].run(|| None, |value| outputs.push(value))?;

            if !outputs.is_empty() {
                produced = true;
                if i == count - 1 {
                    last_output = outputs.last().copied();
                }
                machines[(i + 1) % count].extend_input(outputs);
            }
            if result == StepResult::AwaitInput {
                running += 1;
            }
        }

        round += 1;
        debug!(round, running, produced, "feedback round");

        if running == 0 {
            return Ok(last_output);
        }
        if !produced {
            return Err(RuntimeError::Deadlock);
        }
    }
}
