//! Compiles template source into a [`fae::Program`]: the escape-aware
//! tokenizer, the five command patterns, and the fixup stack that patches
//! `if`/`for` placeholder jumps once their `end` is seen.

mod error;
mod fixup;
mod grammar;

use fae::{OpCode, Program, ProgramBuilder, MAX_OPERAND};
use log::debug;

pub use error::{CompileError, UnbalancedKind};
use error::line_col;
use fixup::FixupStack;

/// Compiles `source` into a ready-to-render [`Program`].
pub fn compile(source: &str) -> Result<Program, CompileError> {
    let mut builder = ProgramBuilder::new();
    let mut fixups = FixupStack::new();
    let mut processed = 0usize;

    while let Some(rel) = source[processed..].find("$(") {
        let exp_start = processed + rel;
        let bytes = source.as_bytes();

        // `expStart == 0` has no preceding character, so the escape check
        // is skipped entirely (a literal index `-1` would underflow).
        let escaped = exp_start > 0 && bytes[exp_start - 1] == b'\\';
        let double_escaped = escaped && exp_start >= 2 && bytes[exp_start - 2] == b'\\';

        if escaped && !double_escaped {
            // A single backslash escapes the command: flush up to (not
            // including) the backslash, append a literal `$`, and leave
            // the `(` and everything after it as plain text.
            flush_literal(&mut builder, source, processed, exp_start - 1, Some('$'))?;
            processed = exp_start + 1;
            continue;
        }

        // Either no escape, or a doubled backslash collapsing to one —
        // both cases flush up to the command and then parse it. For the
        // doubled case the flush range stops one byte short (swallowing
        // the second backslash), leaving a single `\` in the fragment.
        let literal_end = if double_escaped { exp_start - 1 } else { exp_start };
        flush_literal(&mut builder, source, processed, literal_end, None)?;

        let command_start = exp_start + 2;
        let rest = &source[command_start..];

        if let Some(m) = grammar::END.find(rest) {
            let p0 = fixups.pop().ok_or_else(|| unbalanced(source, exp_start, UnbalancedKind::UnmatchedEnd))?;
            if builder.opcode_at(p0) == OpCode::ListEndJump {
                builder.emit(OpCode::Jump, pc_operand(p0)?);
            }
            builder.patch(p0, pc_operand(builder.pc())?);
            processed = command_start + m.end();
        } else if let Some(caps) = grammar::SUBSTITUTE.captures(rest) {
            let idx = builder.intern_variable(&caps[1])?;
            builder.emit(OpCode::Substitute, idx);
            processed = command_start + caps.get(0).unwrap().end();
        } else if let Some(caps) = grammar::IF.captures(rest) {
            let idx = builder.intern_variable(&caps[1])?;
            builder.emit(OpCode::Immediate, idx);
            let placeholder = builder.emit(OpCode::FalseJump, 0);
            fixups.push(placeholder);
            processed = command_start + caps.get(0).unwrap().end();
        } else if let Some(caps) = grammar::FOR.captures(rest) {
            let item_idx = builder.intern_variable(&caps[1])?;
            let list_idx = builder.intern_variable(&caps[2])?;
            builder.emit(OpCode::Immediate, item_idx);
            builder.emit(OpCode::Immediate, list_idx);
            let placeholder = builder.emit(OpCode::ListEndJump, 0);
            fixups.push(placeholder);
            processed = command_start + caps.get(0).unwrap().end();
        } else if let Some(caps) = grammar::INCLUDE.captures(rest) {
            let idx = builder.intern_include(caps[1].to_owned())?;
            builder.emit(OpCode::Include, idx);
            processed = command_start + caps.get(0).unwrap().end();
        } else {
            return Err(invalid_command(source, exp_start));
        }
    }

    flush_literal(&mut builder, source, processed, source.len(), None)?;

    if !fixups.is_empty() {
        return Err(unbalanced(source, source.len(), UnbalancedKind::UnclosedBlock));
    }

    let program = builder.finish();
    debug!(
        target: "fae::compiler",
        "compiled {} instructions, {} fragments, {} variables, {} includes",
        program.instructions().len(),
        program.fragments().len(),
        program.variables().len(),
        program.includes().len()
    );
    Ok(program)
}

/// Emits `source[start..end]` (plus `extra`, if any) as a fragment and a
/// `Copy` instruction, unless both are empty.
fn flush_literal(
    builder: &mut ProgramBuilder,
    source: &str,
    start: usize,
    end: usize,
    extra: Option<char>,
) -> Result<(), CompileError> {
    let mut text = source[start..end].to_owned();
    if let Some(c) = extra {
        text.push(c);
    }
    if text.is_empty() {
        return Ok(());
    }
    let idx = builder.intern_fragment(text)?;
    builder.emit(OpCode::Copy, idx);
    Ok(())
}

/// A jump target or fixup PC must itself fit the 13-bit operand a `Jump`/
/// `FalseJump`/`ListEndJump` carries, same as the four name tables.
fn pc_operand(pc: usize) -> Result<u16, CompileError> {
    if pc > MAX_OPERAND as usize {
        return Err(CompileError::TableOverflow {
            table: "instruction",
            limit: MAX_OPERAND as usize + 1,
        });
    }
    Ok(pc as u16)
}

fn invalid_command(source: &str, offset: usize) -> CompileError {
    let (line, column) = line_col(source, offset);
    CompileError::InvalidCommand { offset, line, column }
}

fn unbalanced(source: &str, offset: usize, kind: UnbalancedKind) -> CompileError {
    let (line, column) = line_col(source, offset);
    CompileError::UnbalancedBlock { kind, offset, line, column }
}
