//! CLI support for logix
//!
//! Loading rule text and context documents, and the commands behind the
//! `logix` binary, kept in the library so they can be tested and embedded.

mod check;
mod tokens;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use tokens::format_tokens;

use std::{fs, io, io::Read, path::Path};

use thiserror::Error;

use crate::{EvalError, ParseError};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Invalid JSON context: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No context provided. Use --context, --context-json or pipe JSON to stdin.")]
    NoContext,
}

impl From<crate::Error> for CliError {
    fn from(e: crate::Error) -> Self {
        match e {
            crate::Error::Parse(e) => CliError::Parse(e),
            crate::Error::Eval(e) => CliError::Eval(e),
        }
    }
}

/// Read rule text from a file, or from stdin when `path` is `-`.
pub fn load_rules(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    read_file(Path::new(path))
}

/// Read a rule or context file into memory.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}
