use super::super::*;
use crate::program::ProgramBuilder;

#[test]
fn empty_program_halts_immediately() {
    let program = ProgramBuilder::new().finish();
    assert_eq!(run(&program, &bindings(&[])), "");
}

#[test]
fn halt_stops_before_trailing_instructions() {
    // A program is always terminated by `finish()`, so there is no way to
    // place an instruction after Halt through the builder; this exercises
    // that a program with only a literal before the implicit Halt renders
    // exactly that literal and nothing more.
    let mut builder = ProgramBuilder::new();
    let frag = builder.intern_fragment("only this".to_owned()).unwrap();
    builder.emit(crate::opcode::OpCode::Copy, frag);
    let program = builder.finish();
    assert_eq!(run(&program, &bindings(&[])), "only this");
}
