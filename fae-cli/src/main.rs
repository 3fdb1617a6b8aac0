use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use fae::{Bindings, Value};
use fae_library::{Library, LibraryOptions};

/// Fae: compile and render the minimal `$(...)` templating language.
#[derive(Parser)]
#[command(name = "fae")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a template from a directory-backed library.
    Render {
        /// Library root directory.
        dir: PathBuf,
        /// Template name, relative to `dir`, using `/` separators.
        template: String,
        /// Scan subdirectories too.
        #[arg(long)]
        recursive: bool,
        /// Fail the whole scan on the first unparsable template instead of
        /// dropping it.
        #[arg(long = "no-ignore-bad")]
        no_ignore_bad: bool,
        /// Bindings as `KEY=VALUE`, e.g. `place=Mars count=3 active=true`.
        bindings: Vec<String>,
    },
    /// Compile a single template file and report success or failure.
    Check {
        file: PathBuf,
    },
    /// Compile a single template file and print its bytecode.
    Dump {
        file: PathBuf,
    },
}

#[derive(Debug)]
enum Error {
    Io(std::io::Error, PathBuf),
    Compile(fae_compiler::CompileError),
    Library(fae_library::LibraryError),
    BadBinding(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err, path) => write!(f, "reading \"{}\" failed: {}", path.display(), err),
            Error::Compile(err) => write!(f, "{}", err),
            Error::Library(err) => write!(f, "{}", err),
            Error::BadBinding(raw) => write!(f, "binding \"{}\" is not in KEY=VALUE form", raw),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render {
            dir,
            template,
            recursive,
            no_ignore_bad,
            bindings,
        } => render(&dir, &template, recursive, !no_ignore_bad, &bindings),
        Command::Check { file } => check(&file),
        Command::Dump { file } => dump(&file),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn render(dir: &Path, template: &str, recursive: bool, ignore_bad: bool, raw_bindings: &[String]) -> Result<(), Error> {
    let options = LibraryOptions::new(dir).recursive(recursive).ignore_bad_templates(ignore_bad);
    let library = Library::new(options).map_err(Error::Library)?;
    let bindings = parse_bindings(raw_bindings)?;
    let output = library.render(template, &bindings).map_err(Error::Library)?;
    println!("{}", output);
    Ok(())
}

fn check(file: &Path) -> Result<(), Error> {
    read_source(file).and_then(|source| fae_compiler::compile(&source).map_err(Error::Compile))?;
    println!("{}: OK", file.display());
    Ok(())
}

fn dump(file: &Path) -> Result<(), Error> {
    let source = read_source(file)?;
    let program = fae_compiler::compile(&source).map_err(Error::Compile)?;

    for (pc, instr) in program.instructions().iter().enumerate() {
        println!("{:4}  {:?}", pc, instr);
    }
    println!("fragments: {:?}", program.fragments());
    println!("variables: {:?}", program.variables());
    println!("includes:  {:?}", program.includes());
    Ok(())
}

fn read_source(file: &Path) -> Result<String, Error> {
    std::fs::read_to_string(file).map_err(|err| Error::Io(err, file.to_owned()))
}

/// Parses `KEY=VALUE` pairs, guessing a `Value` kind from the literal text:
/// `true`/`false` become `Bool`, a bare integer becomes `Int`, a bare float
/// becomes `Float`, everything else is kept as `String`.
fn parse_bindings(raw: &[String]) -> Result<Bindings, Error> {
    let mut bindings = Bindings::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| Error::BadBinding(entry.clone()))?;
        bindings.insert(key, parse_value(value));
    }
    Ok(bindings)
}

fn parse_value(raw: &str) -> Value {
    if let Ok(b) = raw.parse::<bool>() {
        return Value::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Float(f);
    }
    Value::String(raw.to_owned())
}
