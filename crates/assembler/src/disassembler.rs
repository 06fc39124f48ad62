//! Disassembler: memory image → canonical assembly text.
//!
//! Linear sweep from address 0. A word is shown as an instruction only if
//! re-assembling that line reproduces it exactly; everything else,
//! including the tails of truncated instructions, becomes `DATA`.

use crate::parser::DATA;
use intvm_common::{Instruction, Mode, Program};

/// Render the instruction starting at `pc`, if the words there form one
/// canonically.
fn instruction_at(words: &[i64], pc: usize) -> Option<(String, usize)> {
    let word = words[pc];
    let instr = Instruction::decode(word).ok()?;
    if instr.encode() != word {
        return None;
    }

    let count = instr.opcode.operand_count();
    let operands = words.get(pc + 1..pc + 1 + count)?;
    if instr.modes[count..].iter().any(|&m| m != 0) {
        return None;
    }

    let mut line = instr.opcode.mnemonic().to_string();
    for (index, value) in operands.iter().enumerate() {
        let mode = instr.mode(index).ok()?;
        if mode == Mode::Immediate && instr.opcode.write_operand() == Some(index) {
            return None;
        }
        match mode {
            Mode::Position => line.push_str(&format!(" {value}")),
            Mode::Immediate => line.push_str(&format!(" #{value}")),
            Mode::Relative => line.push_str(&format!(" @{value}")),
        }
    }

    Some((line, 1 + count))
}

fn flush_data(data: &mut Vec<i64>, lines: &mut Vec<String>) {
    if data.is_empty() {
        return;
    }
    let words: Vec<String> = data.iter().map(i64::to_string).collect();
    lines.push(format!("{DATA} {}", words.join(" ")));
    data.clear();
}

/// Disassemble a program into canonical assembly text.
///
/// The output is guaranteed to reassemble to an identical program
/// (`assemble(disassemble(program)) == program`).
pub fn disassemble(program: &Program) -> String {
    let words = &program.words;
    let mut lines = Vec::new();
    let mut data = Vec::new();
    let mut pc = 0;

    while pc < words.len() {
        match instruction_at(words, pc) {
            Some((line, width)) => {
                flush_data(&mut data, &mut lines);
                lines.push(line);
                pc += width;
            }
            None => {
                data.push(words[pc]);
                pc += 1;
            }
        }
    }
    flush_data(&mut data, &mut lines);

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
