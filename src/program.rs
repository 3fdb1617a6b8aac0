//! The compiled output of a template: an instruction vector plus the three
//! name tables it indexes into. Immutable after construction and cheap to
//! share, the way the processor core treats a loaded program as read-only
//! for the lifetime of a run.

use std::collections::HashMap;
use std::sync::Arc;

use crate::opcode::{Instruction, OpCode, MAX_OPERAND};

/// The immutable compilation output of a template.
///
/// Cloning a `Program` is an `Arc` bump, not a deep copy — `Library` hands
/// out clones freely and a render only ever borrows one.
#[derive(Clone, Debug)]
pub struct Program(pub(crate) Arc<ProgramData>);

#[derive(Debug)]
pub(crate) struct ProgramData {
    pub instructions: Vec<Instruction>,
    pub fragments: Vec<String>,
    pub variables: Vec<String>,
    pub includes: Vec<String>,
}

impl Program {
    pub fn instructions(&self) -> &[Instruction] {
        &self.0.instructions
    }

    pub fn fragments(&self) -> &[String] {
        &self.0.fragments
    }

    pub fn variables(&self) -> &[String] {
        &self.0.variables
    }

    pub fn includes(&self) -> &[String] {
        &self.0.includes
    }
}

#[derive(Debug)]
pub struct TableOverflowError {
    pub table: &'static str,
    pub limit: usize,
}

/// Accumulates instructions and the three name tables while a compiler
/// walks a template. Fragments and includes never dedupe (every
/// `Copy`/`Include` gets its own slot); variable names dedupe by `intern`,
/// returning the existing index if the name was seen before.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    instructions: Vec<Instruction>,
    fragments: Vec<String>,
    variables: Vec<String>,
    variable_index: HashMap<String, u16>,
    includes: Vec<String>,
}

impl ProgramBuilder {
    pub fn new() -> ProgramBuilder {
        ProgramBuilder::default()
    }

    pub fn pc(&self) -> usize {
        self.instructions.len()
    }

    pub fn emit(&mut self, opcode: OpCode, operand: u16) -> usize {
        let pc = self.instructions.len();
        self.instructions.push(Instruction::new(opcode, operand));
        pc
    }

    /// Overwrites the operand of a previously-emitted instruction, keeping
    /// its opcode. Used by the compiler's fixup stack to patch forward
    /// jumps once their target is known.
    pub fn patch(&mut self, pc: usize, operand: u16) {
        let opcode = self.instructions[pc].opcode().expect("builder only holds valid instructions");
        self.instructions[pc] = Instruction::new(opcode, operand);
    }

    pub fn opcode_at(&self, pc: usize) -> OpCode {
        self.instructions[pc].opcode().expect("builder only holds valid instructions")
    }

    pub fn intern_fragment(&mut self, text: String) -> Result<u16, TableOverflowError> {
        push_table("fragment", &mut self.fragments, text)
    }

    /// Interns a variable name, deduping against previously-seen names.
    pub fn intern_variable(&mut self, name: &str) -> Result<u16, TableOverflowError> {
        if let Some(&idx) = self.variable_index.get(name) {
            return Ok(idx);
        }
        let idx = push_table("variable", &mut self.variables, name.to_owned())?;
        self.variable_index.insert(name.to_owned(), idx);
        Ok(idx)
    }

    pub fn intern_include(&mut self, target: String) -> Result<u16, TableOverflowError> {
        push_table("include", &mut self.includes, target)
    }

    pub fn finish(mut self) -> Program {
        self.instructions.push(Instruction::new(OpCode::Halt, 0));
        Program(Arc::new(ProgramData {
            instructions: self.instructions,
            fragments: self.fragments,
            variables: self.variables,
            includes: self.includes,
        }))
    }
}

fn push_table(
    table: &'static str,
    entries: &mut Vec<String>,
    value: String,
) -> Result<u16, TableOverflowError> {
    if entries.len() > MAX_OPERAND as usize {
        return Err(TableOverflowError {
            table,
            limit: MAX_OPERAND as usize + 1,
        });
    }
    let idx = entries.len() as u16;
    entries.push(value);
    Ok(idx)
}
