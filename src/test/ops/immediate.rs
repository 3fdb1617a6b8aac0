use super::super::*;
use crate::opcode::OpCode;
use crate::program::ProgramBuilder;

#[test]
fn immediate_produces_no_output_on_its_own() {
    let mut builder = ProgramBuilder::new();
    let a = builder.intern_fragment("a".to_owned()).unwrap();
    builder.emit(OpCode::Copy, a);
    let var = builder.intern_variable("whatever").unwrap();
    builder.emit(OpCode::Immediate, var);
    let b = builder.intern_fragment("b".to_owned()).unwrap();
    builder.emit(OpCode::Copy, b);
    let program = builder.finish();

    assert_eq!(run(&program, &bindings(&[])), "ab");
}
