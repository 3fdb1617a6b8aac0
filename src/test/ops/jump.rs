use super::super::*;
use crate::opcode::OpCode;
use crate::program::ProgramBuilder;
use crate::vm::{render, VmLimits};
use crate::RenderError;

#[test]
fn unconditional_jump_skips_instructions() {
    let mut builder = ProgramBuilder::new();
    let skipped = builder.intern_fragment("skipped".to_owned()).unwrap();
    let kept = builder.intern_fragment("kept".to_owned()).unwrap();

    // pc0: Jump(2) -> skip straight to the Copy at pc2.
    builder.emit(OpCode::Jump, 2);
    builder.emit(OpCode::Copy, skipped);
    builder.emit(OpCode::Copy, kept);
    let program = builder.finish();

    assert_eq!(run(&program, &bindings(&[])), "kept");
}

#[test]
fn backward_jump_reexecutes_a_prior_pc() {
    // pc0: Copy "x", pc1: Jump(0) — jumps back to pc0 and re-runs it,
    // looping forever rather than falling through to the trailing Halt.
    let mut builder = ProgramBuilder::new();
    let frag = builder.intern_fragment("x".to_owned()).unwrap();
    builder.emit(OpCode::Copy, frag);
    builder.emit(OpCode::Jump, 0);
    let program = builder.finish();

    let result = render(
        &program,
        &bindings(&[]),
        |_target, _out| {},
        VmLimits { max_steps: Some(11) },
    );

    assert_eq!(result, Err(RenderError::StepLimitExceeded { limit: 11 }));
}
