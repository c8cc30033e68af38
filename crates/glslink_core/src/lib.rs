//! Provide the canonical shader vocabulary shared by the glslink scanner, assembler and CLI.
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no global state, no dependencies.
//! - Current scope: shader stages and their display names, compiler diagnostic severities, and the
//!   directive keywords the scanner special-cases.

pub mod lang;

pub use lang::directives::{self, DirectiveId};
pub use lang::severity::{self, Severity};
pub use lang::stages::{self, ShaderStage};
