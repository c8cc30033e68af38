#![forbid(unsafe_code)]
//! glslink: multi-file GLSL assembly with compiler diagnostic remapping
//!
//! GLSL has no `#include`. glslink loads an entry shader and everything it includes, flattens the files into
//! one source with a single active `#version`, and keeps a line-by-line map back to the original files so
//! compiler errors can be reported where they were written.
//!
//! ## Pipeline
//!
//! entry path → [`frontend::loader`] → [`frontend::assembler`] → [`frontend::render`] → compiler →
//! [`frontend::remap`]. [`Shader`] runs the whole cycle.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod shader;
pub mod version;

pub use glslink_core::{Severity, ShaderStage};

pub use backend::{CommandCompiler, CompilerError, ShaderCompiler};
pub use config::PreprocessConfig;
pub use frontend::assembler::AssemblyRef;
pub use frontend::diagnostics::{CompileFailure, PreprocessError};
pub use frontend::registry::{Registry, SourceFile, SourceId};
pub use frontend::source::{ByteSource, FsSource, MemorySource};
pub use shader::Shader;
