//! Compile-time stack of pending forward jumps. A small vector of PCs
//! suffices for both `if` and `for` heads — the opcode already sitting at
//! the stored PC tells `end`-close time which kind of block it is closing,
//! so no separate tag is carried alongside it.

#[derive(Debug, Default)]
pub(crate) struct FixupStack(Vec<usize>);

impl FixupStack {
    pub(crate) fn new() -> FixupStack {
        FixupStack::default()
    }

    pub(crate) fn push(&mut self, pc: usize) {
        self.0.push(pc);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
