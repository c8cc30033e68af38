//! Preprocessor directives that glslink handles itself.
//!
//! Only `#version` and `#include` are special-cased. Every other `#`-led line (`#define`, `#ifdef`, ...) is
//! opaque code that is handed to the GPU compiler untouched.
//!
//! ## Examples
//! ```rust
//! use glslink_core::lang::directives::{self, DirectiveId};
//!
//! assert_eq!(directives::from_str("#include"), Some(DirectiveId::Include));
//! assert_eq!(directives::from_str("#define"), None);
//! assert_eq!(directives::as_str(DirectiveId::Version), "#version");
//! ```

/// Stable identifier for every directive the scanner recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveId {
    Version,
    Include,
}

/// Metadata for one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveInfo {
    pub id: DirectiveId,
    /// Spelling including the leading `#`.
    pub canonical: &'static str,
    pub description: &'static str,
}

pub const DIRECTIVES: &[DirectiveInfo] = &[
    DirectiveInfo {
        id: DirectiveId::Version,
        canonical: "#version",
        description: "GLSL version (and optional profile); only the first one stays active",
    },
    DirectiveInfo {
        id: DirectiveId::Include,
        canonical: "#include",
        description: "Textual inclusion of another file, resolved against the including file's directory",
    },
];

/// Look up a directive by its first whitespace-delimited token (case-sensitive).
pub fn from_str(token: &str) -> Option<DirectiveId> {
    DIRECTIVES.iter().find(|d| d.canonical == token).map(|d| d.id)
}

/// Canonical spelling of a directive.
pub fn as_str(id: DirectiveId) -> &'static str {
    info_for(id).canonical
}

pub fn info_for(id: DirectiveId) -> &'static DirectiveInfo {
    match id {
        DirectiveId::Version => &DIRECTIVES[0],
        DirectiveId::Include => &DIRECTIVES[1],
    }
}

/// Prefix used to neutralise a directive line while keeping it in the assembled text.
pub const LINE_COMMENT: &str = "//";
