//! Directive scanner: classifies a single source line.
//!
//! Lines are classified once, at load time, into a tagged [`Line`]. Downstream stages match on
//! [`LineKind`] and never re-parse the text.
//!
//! ## Notes
//! - Only `#version` and `#include` are recognised; any other `#` line is opaque [`LineKind::Code`].
//! - `"..."` and `<...>` includes resolve identically, against the including file's directory. There is no
//!   system include path.
//! - A directive with no operand (`#include` or `#version` alone) stays `Code`, so the GPU compiler reports
//!   it at its real position.

use glslink_core::directives::{self, DirectiveId, LINE_COMMENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Anything that is not a recognised directive, including blank lines and comments.
    Code,
    Version,
    Include,
}

/// A classified source line.
///
/// `payload` holds the raw text for `Code`, the normalised version (`"450"` or `"450 core"`) for
/// `Version`, and the resolved path for `Include`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub payload: String,
}

impl Line {
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Code,
            payload: text.into(),
        }
    }

    pub fn version(version: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Version,
            payload: version.into(),
        }
    }

    pub fn include(resolved_path: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Include,
            payload: resolved_path.into(),
        }
    }
}

/// Classify `line`, resolving include targets against `current_dir`.
///
/// `current_dir` is concatenated verbatim, so it must be empty or end with a separator (see
/// [`directory_of`]).
pub fn classify(line: &str, current_dir: &str) -> Line {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('#') {
        return Line::code(line);
    }

    let mut tokens = trimmed.split_whitespace();
    match tokens.next().and_then(directives::from_str) {
        Some(DirectiveId::Version) => match tokens.next() {
            Some(number) => {
                let version = match tokens.next() {
                    Some(profile) if !profile.starts_with('/') => format!("{number} {profile}"),
                    _ => number.to_string(),
                };
                Line::version(version)
            }
            None => Line::code(line),
        },
        Some(DirectiveId::Include) => match tokens.next().map(include_target) {
            Some(target) if !target.is_empty() => Line::include(format!("{current_dir}{target}")),
            _ => Line::code(line),
        },
        None => Line::code(line),
    }
}

/// Opening token of a block comment.
const BLOCK_COMMENT: &str = "/*";

/// Extract the path from an include operand.
///
/// A `"..."` or `<...>` operand ends at its closing delimiter, so anything glued after it (`"a.glsl"/*c*/`,
/// `<a.glsl>//c`) is dropped. A bare operand is cut at the first `//` or `/*`.
fn include_target(token: &str) -> &str {
    let close = match token.chars().next() {
        Some('"') => Some('"'),
        Some('<') => Some('>'),
        _ => None,
    };
    if let Some(close) = close {
        let inner = &token[1..];
        if let Some(end) = inner.find(close) {
            return inner[..end].trim();
        }
    }

    let end = [LINE_COMMENT, BLOCK_COMMENT]
        .iter()
        .filter_map(|marker| token.find(marker))
        .min()
        .unwrap_or(token.len());
    token[..end].trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '<' | '>'))
}

/// Directory part of `path`, including the trailing separator (`/` or `\`). Empty when there is none.
pub fn directory_of(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[..=pos],
        None => "",
    }
}
