//! intvm CLI — run, assemble and disassemble programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage/input/parse/assembly error
//! - 2: Program blocked on input that was never supplied
//! - 3: Runtime error

mod commands;
mod logger;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// Resumable integer-program virtual machine
#[derive(Parser, Debug)]
#[command(name = "intvm", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoded events at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log every instruction
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a comma-separated program, printing one output per line
    Run {
        /// Program source file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Input value, queued in order (repeatable)
        #[arg(short, long = "input", value_name = "N", allow_hyphen_values = true)]
        inputs: Vec<i64>,

        /// Overwrite memory after loading (repeatable)
        #[arg(short = 's', long = "set", value_name = "ADDR=VALUE", value_parser = parse_override)]
        overrides: Vec<(i64, i64)>,

        /// Read further input values from stdin once --input values run out
        #[arg(long)]
        stdin: bool,
    },

    /// Print a program as mnemonic assembly text
    Disassemble {
        /// Program source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Translate mnemonic assembly text to comma-separated source
    Assemble {
        /// Assembly text file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (defaults to FILE with extension .int)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

fn parse_override(arg: &str) -> Result<(i64, i64), String> {
    let (addr, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE, got '{arg}'"))?;
    let addr = addr
        .trim()
        .parse()
        .map_err(|_| format!("invalid address '{addr}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{value}'"))?;
    Ok((addr, value))
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    logger::init(logger::level(cli.verbose, cli.trace));

    let result = match cli.command {
        Commands::Run {
            file,
            inputs,
            overrides,
            stdin,
        } => commands::run(&file, inputs, overrides, stdin),
        Commands::Disassemble { file } => commands::disassemble(&file),
        Commands::Assemble { file, output } => commands::assemble(&file, output),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
