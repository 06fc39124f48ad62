//! CLI command implementations.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use intvm_common::Program;
use intvm_vm::{Machine, StepResult};
use tracing::{debug, info};

/// Execute a program, printing each output on its own line.
pub fn run(
    file: &Path,
    inputs: Vec<i64>,
    overrides: Vec<(i64, i64)>,
    use_stdin: bool,
) -> Result<(), i32> {
    let program = read_program(file)?;
    let mut machine = Machine::with_overrides(&program, overrides).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    info!(words = program.len(), "loaded {}", file.display());

    let mut source = InputSource::new(inputs, use_stdin);
    let stdout = io::stdout();
    drive(&mut machine, &mut source, &mut stdout.lock())
}

/// Step the machine, writing outputs to `out` and feeding it from
/// `source`, until it halts, faults, starves for input, or `out` stops
/// accepting writes.
fn drive<W: Write>(
    machine: &mut Machine,
    source: &mut InputSource,
    out: &mut W,
) -> Result<(), i32> {
    loop {
        match machine.step() {
            Ok(StepResult::Output(value)) => {
                if let Err(e) = writeln!(out, "{value}") {
                    if e.kind() == io::ErrorKind::BrokenPipe {
                        debug!(ip = machine.ip, "output closed, stopping");
                        return Ok(());
                    }
                    eprintln!("error: cannot write output: {e}");
                    return Err(1);
                }
            }
            Ok(StepResult::AwaitInput) => match source.next() {
                Some(value) => machine.push_input(value),
                None => {
                    if let Some(message) = &source.error {
                        eprintln!("error: {message}");
                        return Err(1);
                    }
                    eprintln!(
                        "error: program is waiting for input at instruction {}",
                        machine.ip
                    );
                    return Err(2);
                }
            },
            Ok(StepResult::Halted) => {
                debug!(ip = machine.ip, "program halted");
                return Ok(());
            }
            Err(e) => {
                eprintln!("runtime error: {e}");
                return Err(3);
            }
        }
    }
}

/// Print a program as mnemonic assembly text.
pub fn disassemble(file: &Path) -> Result<(), i32> {
    let program = read_program(file)?;
    print!("{}", intvm_assembler::disassemble(&program));
    Ok(())
}

/// Assemble mnemonic text into comma-separated program source.
pub fn assemble(file: &Path, output: Option<PathBuf>) -> Result<(), i32> {
    let output = output.unwrap_or_else(|| file.with_extension("int"));
    if output == file {
        eprintln!(
            "error: refusing to overwrite input '{}'; pass -o",
            file.display()
        );
        return Err(1);
    }

    let text = read_text(file)?;
    let program = intvm_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    fs::write(&output, format!("{program}\n")).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })?;

    eprintln!(
        "assembled {} words -> {}",
        program.len(),
        output.display()
    );
    Ok(())
}

// --- Helpers ---

fn read_text(path: &Path) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        1
    })
}

/// Read and parse a comma-separated program file.
fn read_program(path: &Path) -> Result<Program, i32> {
    let source = read_text(path)?;
    Program::parse(&source).map_err(|e| {
        eprintln!("error: invalid program '{}': {e}", path.display());
        1
    })
}

/// Input values for a running program: the `--input` list first, then,
/// if enabled, whitespace-separated integers read from stdin on demand.
struct InputSource {
    queued: VecDeque<i64>,
    stdin: bool,
    /// First stdin token that failed to parse.
    error: Option<String>,
}

impl InputSource {
    fn new(inputs: Vec<i64>, stdin: bool) -> Self {
        Self {
            queued: inputs.into(),
            stdin,
            error: None,
        }
    }

    fn next(&mut self) -> Option<i64> {
        if self.error.is_some() {
            return None;
        }
        while self.queued.is_empty() && self.stdin {
            self.refill();
        }
        self.queued.pop_front()
    }

    /// Read one stdin line into the queue. Disables stdin at EOF.
    fn refill(&mut self) {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => self.stdin = false,
            Ok(_) => {
                for token in line.split_whitespace() {
                    match token.parse::<i64>() {
                        Ok(value) => self.queued.push_back(value),
                        Err(_) => {
                            self.error = Some(format!("invalid input value '{token}'"));
                            self.stdin = false;
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                self.error = Some(format!("cannot read stdin: {e}"));
                self.stdin = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `limit` writes, then fails every write with `kind`.
    struct ClosingWriter {
        limit: usize,
        written: usize,
        kind: io::ErrorKind,
    }

    impl Write for ClosingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written >= self.limit {
                return Err(io::Error::from(self.kind));
            }
            if buf.ends_with(b"\n") {
                self.written += 1;
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// OUT #1, then jump back to 0 forever.
    fn endless_output() -> Machine {
        Machine::new(&Program::new(vec![104, 1, 1105, 1, 0]))
    }

    #[test]
    fn closed_pipe_stops_a_non_halting_program() {
        let mut machine = endless_output();
        let mut source = InputSource::new(vec![], false);
        let mut out = ClosingWriter {
            limit: 1,
            written: 0,
            kind: io::ErrorKind::BrokenPipe,
        };
        assert_eq!(drive(&mut machine, &mut source, &mut out), Ok(()));
        assert_eq!(out.written, 1);
        assert!(!machine.is_halted());
    }

    #[test]
    fn other_write_failures_exit_1() {
        let mut machine = endless_output();
        let mut source = InputSource::new(vec![], false);
        let mut out = ClosingWriter {
            limit: 3,
            written: 0,
            kind: io::ErrorKind::Other,
        };
        assert_eq!(drive(&mut machine, &mut source, &mut out), Err(1));
        assert_eq!(out.written, 3);
    }

    #[test]
    fn drive_collects_outputs_until_halt() {
        let mut machine = Machine::new(&Program::new(vec![3, 0, 4, 0, 99]));
        let mut source = InputSource::new(vec![42], false);
        let mut out = Vec::new();
        assert_eq!(drive(&mut machine, &mut source, &mut out), Ok(()));
        assert_eq!(out, b"42\n");
    }

    #[test]
    fn drive_reports_starved_input() {
        let mut machine = Machine::new(&Program::new(vec![3, 0, 99]));
        let mut source = InputSource::new(vec![], false);
        assert_eq!(drive(&mut machine, &mut source, &mut Vec::new()), Err(2));
        assert_eq!(machine.ip, 0);
    }

    #[test]
    fn queued_inputs_come_first_in_order() {
        let mut source = InputSource::new(vec![1, 2], false);
        assert_eq!(source.next(), Some(1));
        assert_eq!(source.next(), Some(2));
        assert_eq!(source.next(), None);
    }
}
