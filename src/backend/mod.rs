//! glslink backend: handing assembled text to a GLSL compiler.
//!
//! The core never compiles anything itself. A [`ShaderCompiler`] takes the rendered source and either
//! produces a handle or returns the compiler's raw log, which the frontend remaps.
//!
//! ## Module Organization
//!
//! - `compiler.rs` - The compiler trait and the external-validator implementation

pub mod compiler;

pub use compiler::{CommandCompiler, CompilerError, ShaderCompiler};
