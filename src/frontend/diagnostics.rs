//! Error types for the preprocessing cycle and for compilation.
//!
//! Load-time errors always name the file they concern, so the CLI can report them through the same channel
//! as remapped compiler diagnostics.

use std::io;

use glslink_core::ShaderStage;
use miette::Diagnostic;
use thiserror::Error;

use crate::backend::CompilerError;

/// Errors that abort a load/flatten cycle.
#[derive(Debug, Error, Diagnostic)]
pub enum PreprocessError {
    #[error("file open failed: {path}")]
    #[diagnostic(
        code(glslink::file_open),
        help("includes resolve relative to the directory of the including file")
    )]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "different source code versions: {path} declares {declared}, main file declares {expected}",
        declared = .found.as_deref().unwrap_or("no #version")
    )]
    #[diagnostic(
        code(glslink::version_mismatch),
        help("every included file must carry the same #version line as the main file")
    )]
    VersionMismatch {
        path: String,
        expected: String,
        found: Option<String>,
    },

    #[error("circular include: {path} is included again from {from}")]
    #[diagnostic(code(glslink::include_cycle))]
    IncludeCycle { path: String, from: String },

    #[error("include depth limit of {limit} exceeded at {path}")]
    #[diagnostic(code(glslink::include_depth))]
    IncludeTooDeep { path: String, limit: usize },

    /// Flattening was asked for a file that was never loaded. This is a bug, not a user error.
    #[error("source not loaded: {path}")]
    #[diagnostic(code(glslink::not_found))]
    NotFound { path: String },
}

impl PreprocessError {
    /// The file the error is about.
    pub fn path(&self) -> &str {
        match self {
            PreprocessError::FileOpen { path, .. }
            | PreprocessError::VersionMismatch { path, .. }
            | PreprocessError::IncludeCycle { path, .. }
            | PreprocessError::IncludeTooDeep { path, .. }
            | PreprocessError::NotFound { path } => path,
        }
    }
}

/// A compile attempt that did not produce a shader.
#[derive(Debug, Error, Diagnostic)]
pub enum CompileFailure {
    /// The compiler rejected the source; `diagnostics` are already remapped to original files.
    #[error("{stage} failed to compile")]
    #[diagnostic(code(glslink::compile))]
    Rejected {
        stage: ShaderStage,
        diagnostics: Vec<String>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compiler(#[from] CompilerError),
}
