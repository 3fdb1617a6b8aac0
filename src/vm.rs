//! The bytecode VM: program-counter dispatch loop plus the loop-iterator
//! bookkeeping that makes `for` blocks work.

use std::collections::HashMap;
use std::num::Wrapping;

use log::{debug, trace, warn};

use crate::binding::Binding;
use crate::error::RenderError;
use crate::opcode::OpCode;
use crate::program::Program;
use crate::value::Value;

/// Caps on VM execution, mainly to bound a pathological include cycle or
/// runaway loop rather than spinning forever. `None` means unbounded,
/// which is the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct VmLimits {
    pub max_steps: Option<u64>,
}

/// Render-scoped state for one active `for` loop: the iterator over its
/// container and the element currently bound to the loop variable.
struct LoopState<'b> {
    iter: Box<dyn Iterator<Item = Value> + 'b>,
    current: Value,
}

/// Executes `program` against `binding`, resolving `$(include ...)` via
/// `resolve_include`, and returns the rendered text.
///
/// `resolve_include` is called once per `Include` instruction with the raw
/// include target and a `&mut String` to append to; it is responsible for
/// silently swallowing its own failures — the VM itself never treats a
/// failed include as fatal, it simply calls the closure and moves on.
pub fn render<B, F>(
    program: &Program,
    binding: &B,
    mut resolve_include: F,
    limits: VmLimits,
) -> Result<String, RenderError>
where
    B: Binding,
    F: FnMut(&str, &mut String),
{
    let instructions = program.instructions();
    let fragments = program.fragments();
    let variables = program.variables();
    let includes = program.includes();

    let mut out = String::new();
    let mut iters: HashMap<u16, LoopState<'_>> = HashMap::new();
    let mut pc = Wrapping(0usize);
    let mut steps: u64 = 0;
    let mut includes_resolved: u64 = 0;

    loop {
        if let Some(limit) = limits.max_steps {
            if steps >= limit {
                return Err(RenderError::StepLimitExceeded { limit });
            }
        }
        steps += 1;

        let instr = instructions[pc.0];
        let opcode = instr.opcode().ok_or(RenderError::UnrecognizedInstruction {
            pc: pc.0,
            raw: instr.raw(),
        })?;
        let operand = instr.operand();
        trace!(target: "fae::vm", "pc={} opcode={:?} operand={}", pc.0, opcode, operand);

        match opcode {
            OpCode::Halt => {
                debug!(
                    target: "fae::vm",
                    "render finished: {} steps, {} includes resolved",
                    steps, includes_resolved
                );
                return Ok(out);
            }

            OpCode::Copy => {
                out.push_str(&fragments[operand as usize]);
            }

            OpCode::Substitute => {
                emit(operand, variables, &iters, binding, &mut out);
            }

            OpCode::Immediate => {
                // Read by the following control instruction via lookback;
                // no effect of its own.
            }

            OpCode::FalseJump => {
                let var_idx = instructions[(pc - Wrapping(1)).0].operand();
                if !exists(var_idx, variables, &iters, binding) {
                    pc = Wrapping(operand as usize) - Wrapping(1);
                }
            }

            OpCode::ListEndJump => {
                let item_idx = instructions[(pc - Wrapping(2)).0].operand();
                let list_idx = instructions[(pc - Wrapping(1)).0].operand();
                if !advance(item_idx, list_idx, variables, &mut iters, binding) {
                    pc = Wrapping(operand as usize) - Wrapping(1);
                }
            }

            OpCode::Jump => {
                pc = Wrapping(operand as usize) - Wrapping(1);
            }

            OpCode::Include => {
                includes_resolved += 1;
                let target = &includes[operand as usize];
                resolve_include(target, &mut out);
            }
        }

        pc += Wrapping(1);
    }
}

fn emit<B: Binding>(
    idx: u16,
    variables: &[String],
    iters: &HashMap<u16, LoopState<'_>>,
    binding: &B,
    out: &mut String,
) {
    if let Some(state) = iters.get(&idx) {
        out.push_str(&state.current.to_string());
    } else {
        binding.emit(&variables[idx as usize], out);
    }
}

fn exists<B: Binding>(
    idx: u16,
    variables: &[String],
    iters: &HashMap<u16, LoopState<'_>>,
    binding: &B,
) -> bool {
    iters.contains_key(&idx) || binding.exists(&variables[idx as usize])
}

/// Advances (or initializes) the loop cursor for `item_idx` over the
/// container bound to `list_idx`. Returns `true` if the loop body should
/// run for the (possibly new) current element, `false` if the loop is
/// done (or the container was absent/empty/non-iterable).
fn advance<'b, B: Binding>(
    item_idx: u16,
    list_idx: u16,
    variables: &[String],
    iters: &mut HashMap<u16, LoopState<'b>>,
    binding: &'b B,
) -> bool {
    if let Some(state) = iters.get_mut(&item_idx) {
        match state.iter.next() {
            Some(value) => {
                state.current = value;
                true
            }
            None => {
                iters.remove(&item_idx);
                false
            }
        }
    } else {
        let list_name = &variables[list_idx as usize];
        let mut iter = match binding.iterate(list_name) {
            Some(iter) => iter,
            None => return false,
        };
        match iter.next() {
            Some(first) => {
                iters.insert(
                    item_idx,
                    LoopState {
                        iter,
                        current: first,
                    },
                );
                true
            }
            None => false,
        }
    }
}

/// Called by a host that resolves an include and finds it missing, cyclic,
/// or unparsable — a convenience for the common "log it and append
/// nothing" recovery policy.
pub fn swallow_include_failure(target: &str, reason: &str) {
    warn!(target: "fae::vm", "include \"{}\" swallowed: {}", target, reason);
}
