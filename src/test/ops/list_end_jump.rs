use super::super::*;
use crate::opcode::OpCode;
use crate::program::ProgramBuilder;

/// Hand-assembles `$(for item in list)$(item)$(end)`.
fn program_for(item_name: &str, list_name: &str) -> crate::Program {
    let mut builder = ProgramBuilder::new();
    let item = builder.intern_variable(item_name).unwrap();
    let list = builder.intern_variable(list_name).unwrap();
    builder.emit(OpCode::Immediate, item);
    builder.emit(OpCode::Immediate, list);
    let jump_pc = builder.emit(OpCode::ListEndJump, 0);
    builder.emit(OpCode::Substitute, item);

    // `end`: since the head instruction is a ListEndJump, emit the
    // re-entry Jump first, then patch the ListEndJump to land after it.
    builder.emit(OpCode::Jump, jump_pc as u16);
    let after = builder.pc();
    builder.patch(jump_pc, after as u16);

    builder.finish()
}

#[test]
fn iterates_every_element() {
    let program = program_for("n", "collection");
    let b = bindings(&[(
        "collection",
        Value::Container(vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
            Value::Int(4),
            Value::Int(5),
        ]),
    )]);
    assert_eq!(run(&program, &b), "12345");
}

#[test]
fn empty_container_skips_body() {
    let program = program_for("n", "collection");
    let b = bindings(&[("collection", Value::Container(vec![]))]);
    assert_eq!(run(&program, &b), "");
}

#[test]
fn missing_container_skips_body() {
    let program = program_for("n", "collection");
    assert_eq!(run(&program, &bindings(&[])), "");
}

#[test]
fn non_iterable_container_skips_body() {
    let program = program_for("n", "scalar");
    let b = bindings(&[("scalar", Value::Int(5))]);
    assert_eq!(run(&program, &b), "");
}

#[test]
fn loop_variable_is_not_visible_after_the_loop() {
    // `$(for n in xs)$(n)$(end)$(n)` — the trailing `$(n)` sees no binding
    // and no active loop, so it must emit nothing.
    let mut builder = ProgramBuilder::new();
    let item = builder.intern_variable("n").unwrap();
    let list = builder.intern_variable("xs").unwrap();
    builder.emit(OpCode::Immediate, item);
    builder.emit(OpCode::Immediate, list);
    let jump_pc = builder.emit(OpCode::ListEndJump, 0);
    builder.emit(OpCode::Substitute, item);
    builder.emit(OpCode::Jump, jump_pc as u16);
    let after = builder.pc();
    builder.patch(jump_pc, after as u16);
    builder.emit(OpCode::Substitute, item);
    let program = builder.finish();

    let b = bindings(&[("xs", Value::Container(vec![Value::Int(7)]))]);
    assert_eq!(run(&program, &b), "7");
}
