use thiserror::Error;

/// Failures the VM can raise while executing a [`Program`](crate::Program).
///
/// Both variants are internal-invariant violations, not user errors: a
/// `Program` produced by `fae-compiler` never triggers either one. They
/// exist for hosts that construct or deserialize a `Program` by hand and
/// can accidentally hand the VM something malformed.
#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("unrecognized instruction at pc {pc}: {raw:#06x}")]
    UnrecognizedInstruction { pc: usize, raw: u16 },

    #[error("render exceeded the configured step limit of {limit}")]
    StepLimitExceeded { limit: u64 },
}
