//! A directory of compiled templates, keyed by their path relative to the
//! library root. Resolves `$(include ...)` by recursively rendering
//! another entry in the same map.

mod error;
mod options;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fae::{swallow_include_failure, Binding, Program, VmLimits};
use log::{debug, warn};

pub use error::LibraryError;
pub use options::LibraryOptions;

pub struct Library {
    options: LibraryOptions,
    programs: HashMap<String, Program>,
}

impl Library {
    /// Builds a library by scanning `options.directory` immediately
    /// (equivalent to `reload(true)` on a freshly-constructed, empty map).
    pub fn new(options: LibraryOptions) -> Result<Library, LibraryError> {
        let mut library = Library {
            options,
            programs: HashMap::new(),
        };
        library.reload(true)?;
        Ok(library)
    }

    /// Re-scans the library root. If `discard`, the existing map is
    /// cleared first; otherwise entries are added or replaced in place
    /// and anything removed from disk since the last scan lingers.
    pub fn reload(&mut self, discard: bool) -> Result<(), LibraryError> {
        if discard {
            self.programs.clear();
        }

        let mut files = Vec::new();
        collect_files(
            &self.options.directory,
            &self.options.directory,
            self.options.recursive,
            &mut files,
        )?;

        for (name, path) in files {
            let source = match std::fs::read_to_string(&path) {
                Ok(source) => source,
                Err(source) => {
                    if self.options.ignore_bad_templates {
                        warn!(target: "fae::library", "dropping unreadable template \"{}\": {}", name, source);
                        continue;
                    }
                    return Err(LibraryError::Io { path, source });
                }
            };

            match fae_compiler::compile(&source) {
                Ok(program) => {
                    self.programs.insert(name, program);
                }
                Err(source) => {
                    if self.options.ignore_bad_templates {
                        warn!(target: "fae::library", "dropping template \"{}\": {}", name, source);
                        continue;
                    }
                    return Err(LibraryError::Compile { path: name, source });
                }
            }
        }

        debug!(
            target: "fae::library",
            "loaded {} templates from {}",
            self.programs.len(),
            self.options.directory.display()
        );
        Ok(())
    }

    /// Renders the template named `name` (a `/`-separated path relative to
    /// the library root) against `bindings`.
    pub fn render<B: Binding>(&self, name: &str, bindings: &B) -> Result<String, LibraryError> {
        let program = self
            .programs
            .get(name)
            .ok_or_else(|| LibraryError::TemplateNotFound { name: name.to_owned() })?;
        let mut chain = vec![name.to_owned()];
        Ok(self.render_program(program, bindings, &mut chain))
    }

    fn render_program<B: Binding>(&self, program: &Program, bindings: &B, chain: &mut Vec<String>) -> String {
        fae::render(
            program,
            bindings,
            |target, out| self.resolve_include(target, bindings, chain, out),
            VmLimits::default(),
        )
        // A program compiled by `fae_compiler::compile` only ever contains
        // the eight defined opcodes, and this VmLimits has no step cap, so
        // `render` cannot actually fail here.
        .expect("library-compiled templates never produce a RenderError")
    }

    /// The VM's include callback: looks `target` up in this same map and
    /// recursively renders it, swallowing not-found and cyclic includes to
    /// empty output.
    fn resolve_include<B: Binding>(&self, target: &str, bindings: &B, chain: &mut Vec<String>, out: &mut String) {
        if chain.iter().any(|seen| seen == target) {
            swallow_include_failure(target, &format!("cycle: {} -> {}", chain.join(" -> "), target));
            return;
        }

        let program = match self.programs.get(target) {
            Some(program) => program,
            None => {
                swallow_include_failure(target, "template not found");
                return;
            }
        };

        chain.push(target.to_owned());
        let rendered = self.render_program(program, bindings, chain);
        chain.pop();
        out.push_str(&rendered);
    }
}

/// Recursively gathers `(relative/slash/path, absolute path)` pairs for
/// every regular file under `dir`, honoring `recursive` for subdirectories.
fn collect_files(
    root: &Path,
    dir: &Path,
    recursive: bool,
    files: &mut Vec<(String, PathBuf)>,
) -> Result<(), LibraryError> {
    let entries = std::fs::read_dir(dir).map_err(|source| LibraryError::Io {
        path: dir.to_owned(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| LibraryError::Io {
            path: dir.to_owned(),
            source,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| LibraryError::Io {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            if recursive {
                collect_files(root, &path, recursive, files)?;
            }
            continue;
        }

        files.push((relative_slash_path(root, &path), path));
    }

    Ok(())
}

/// `path` relative to `root`, joined with `/` regardless of the host's
/// native path separator — template names are portable, not filesystem
/// paths.
fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).expect("scanned path is always under its own root");
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
