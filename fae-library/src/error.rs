//! Failures a directory-backed library can surface. Matches the two
//! caller-visible kinds plus the I/O case a directory scan can hit that a
//! single in-memory compile never could.

use std::path::PathBuf;

use fae_compiler::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("template \"{name}\" not found")]
    TemplateNotFound { name: String },

    #[error("template \"{path}\" failed to compile: {source}")]
    Compile {
        path: String,
        #[source]
        source: CompileError,
    },

    #[error("reading \"{path}\" failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
