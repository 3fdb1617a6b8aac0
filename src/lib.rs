//! Fae: a minimal text-templating engine.
//!
//! This crate is the core: bytecode instruction encoding, the compiled
//! [`Program`] representation, the [`Binding`] capability a host implements,
//! a default [`Value`]/[`Bindings`] pair for callers who don't want to write
//! their own binding, and the VM that walks a program's instructions and
//! renders it to a `String`.
//!
//! Compiling template source into a [`Program`] lives in the sibling
//! `fae-compiler` crate; wrapping a directory of templates and resolving
//! `$(include ...)` between them lives in `fae-library`.

pub mod binding;
pub mod error;
pub mod opcode;
pub mod program;
pub mod value;
pub mod vm;


pub use binding::Binding;
pub use error::RenderError;
pub use opcode::{Instruction, OpCode, MAX_OPERAND};
pub use program::{Program, ProgramBuilder, TableOverflowError};
pub use value::{Bindings, Value};
pub use vm::{render, swallow_include_failure, VmLimits};
