//! Compile-time failures, carrying enough position information for a host
//! to render a caret diagnostic.

use fae::TableOverflowError;
use thiserror::Error;

/// Why a block turned out unbalanced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnbalancedKind {
    /// `$(end)` seen with no open `if`/`for` to close.
    UnmatchedEnd,
    /// Source ended with the fixup stack still non-empty.
    UnclosedBlock,
}

impl std::fmt::Display for UnbalancedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnbalancedKind::UnmatchedEnd => write!(f, "unmatched end"),
            UnbalancedKind::UnclosedBlock => write!(f, "unclosed block"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CompileError {
    /// None of the five command patterns matched at `$(...)`.
    #[error("invalid command at line {line}, column {column}")]
    InvalidCommand {
        offset: usize,
        line: usize,
        column: usize,
    },

    /// A `$(end)` with nothing to close, or an `if`/`for` never closed.
    #[error("{kind} at line {line}, column {column}")]
    UnbalancedBlock {
        kind: UnbalancedKind,
        offset: usize,
        line: usize,
        column: usize,
    },

    /// One of the program's four append-only tables (or the instruction
    /// stream itself, which a jump operand must also address) grew past
    /// the 13-bit operand limit.
    #[error("{table} table overflowed its {limit}-entry limit")]
    TableOverflow { table: &'static str, limit: usize },
}

impl From<TableOverflowError> for CompileError {
    fn from(err: TableOverflowError) -> CompileError {
        CompileError::TableOverflow {
            table: err.table,
            limit: err.limit,
        }
    }
}

/// Converts a byte offset into 1-based line/column, counting columns in
/// bytes rather than codepoints (template sources in this grammar are
/// expected to be ASCII command syntax around arbitrary literal text).
pub(crate) fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = match before.iter().rposition(|&b| b == b'\n') {
        Some(pos) => offset - pos,
        None => offset + 1,
    };
    (line, column)
}
