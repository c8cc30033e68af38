//! Shared syntax layer for glslink: physical line splitting and directive scanning.
//!
//! This crate is dependency-light and has no IO. It turns one line of GLSL text into a classified [`Line`]
//! and leaves loading, flattening and rendering to the `glslink` crate.
//!
//! ## Examples
//! ```rust
//! use glslink_syntax::{classify, LineKind};
//!
//! let line = classify("#include \"lighting.glsl\"", "shaders/");
//! assert_eq!(line.kind, LineKind::Include);
//! assert_eq!(line.payload, "shaders/lighting.glsl");
//! ```

pub mod directive;
pub mod lines;

pub use directive::{Line, LineKind, classify, directory_of};
pub use lines::{SplitLines, split_lines};
