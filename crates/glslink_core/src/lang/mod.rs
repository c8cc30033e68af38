//! Registry-first vocabularies for GLSL tooling.
//!
//! Each submodule exposes a stable identifier enum plus a `const` metadata table, so the scanner, the
//! remapper and the CLI agree on spellings without repeating string literals.

pub mod directives;
pub mod severity;
pub mod stages;
