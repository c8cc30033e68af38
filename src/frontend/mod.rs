//! glslink frontend: everything between a shader path and compilable text.
//!
//! - `source`: byte sources (filesystem, in-memory, closures)
//! - `registry`: deduplicating store of loaded files
//! - `loader`: recursive `#include` loading
//! - `assembler`: flattening into an ordered line-reference sequence
//! - `render`: assembled text and debug listings
//! - `remap`: compiler log positions back to original files
//! - `diagnostics`: error types

// Line classification is provided by the shared glslink_syntax crate.
pub use glslink_syntax::{Line, LineKind};

pub mod assembler;
pub mod diagnostics;
pub mod loader;
pub mod registry;
pub mod remap;
pub mod render;
pub mod source;
