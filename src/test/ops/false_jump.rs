use super::super::*;
use crate::opcode::OpCode;
use crate::program::ProgramBuilder;

/// Hand-assembles `$(if v)found$(end)`.
fn program_if(var_name: &str, body: &str) -> crate::Program {
    let mut builder = ProgramBuilder::new();
    let var = builder.intern_variable(var_name).unwrap();
    builder.emit(OpCode::Immediate, var);
    let jump_pc = builder.emit(OpCode::FalseJump, 0);
    let frag = builder.intern_fragment(body.to_owned()).unwrap();
    builder.emit(OpCode::Copy, frag);
    let after = builder.pc();
    builder.patch(jump_pc, after as u16);
    builder.finish()
}

#[test]
fn presence_not_truthiness() {
    // `bFalse=false` still runs the body — presence, not truthiness.
    let program = program_if("bFalse", "found");
    let b = bindings(&[("bFalse", Value::Bool(false))]);
    assert_eq!(run(&program, &b), "found");
}

#[test]
fn missing_binding_skips_body() {
    let program = program_if("iDontExist", "found");
    assert_eq!(run(&program, &bindings(&[])), "");
}

#[test]
fn jump_target_is_strictly_forward() {
    let mut builder = ProgramBuilder::new();
    let var = builder.intern_variable("v").unwrap();
    builder.emit(OpCode::Immediate, var);
    let jump_pc = builder.emit(OpCode::FalseJump, 0);
    let after = builder.pc();
    builder.patch(jump_pc, after as u16);
    let program = builder.finish();

    let instr = program.instructions()[jump_pc];
    assert!(instr.operand() as usize > jump_pc);
}
