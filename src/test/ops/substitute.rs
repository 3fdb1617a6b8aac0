use super::super::*;

#[test]
fn substitutes_bound_variable() {
    let program = program_literal_then_substitute("someVal: ", "someVal");
    let b = bindings(&[("someVal", Value::Int(123))]);
    assert_eq!(run(&program, &b), "someVal: 123");
}

#[test]
fn unbound_variable_emits_nothing() {
    let program = program_literal_then_substitute("someVal: ", "someVal");
    assert_eq!(run(&program, &bindings(&[])), "someVal: ");
}

#[test]
fn bool_value_uses_bindings_stringification() {
    let program = program_literal_then_substitute("someVal: ", "someVal");
    let b = bindings(&[("someVal", Value::Bool(true))]);
    assert_eq!(run(&program, &b), "someVal: true");
}
