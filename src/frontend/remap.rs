//! Diagnostic remapper: rewrites compiler log positions into original file/line positions.
//!
//! Compiler logs use the `SEVERITY: column:row: message` convention, where `row` is a 1-based line of the
//! assembled text. Every such line is re-emitted as
//!
//! ```text
//! ERROR: fragment shader: "shaders/lighting.glsl": 0:14: 'albedo' : undeclared identifier
//! ```
//!
//! ## Notes
//! - When the row lands in a file other than the main file, the entry one line above is reported instead.
//!   For the first line of an included file that is the `#include` line of the includer.
//! - Lines that are not positioned diagnostics (vendor banners, summaries) pass through unchanged, as do
//!   positions that cannot be resolved.
//! - This module performs no IO.

use glslink_core::Severity;
use glslink_syntax::{SplitLines, split_lines};

use super::assembler::AssemblyRef;
use super::registry::{Registry, SourceId};

/// An original position: file and 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    pub file: SourceId,
    pub path: &'a str,
    pub line: usize,
}

/// Resolve a 1-based row of the rendered text to its original location.
///
/// Returns `None` for row 0 or rows past the end of the assembly.
pub fn locate<'a>(
    registry: &'a Registry,
    assembly: &[AssemblyRef],
    main: SourceId,
    row: usize,
) -> Option<SourceLocation<'a>> {
    let mut y = row.checked_sub(1)?;
    if assembly.get(y)?.file != main {
        y = y.checked_sub(1)?;
    }
    let r = assembly.get(y)?;
    Some(SourceLocation {
        file: r.file,
        path: registry.get(r.file).path(),
        line: r.line_index + 1,
    })
}

/// A parsed `SEVERITY: column:row: message` log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry<'a> {
    pub severity: Severity,
    pub column: usize,
    pub row: usize,
    pub message: &'a str,
}

/// Parse one log line. `None` when the line is not a positioned diagnostic.
pub fn parse_log_line(line: &str) -> Option<LogEntry<'_>> {
    let (severity, rest) = next_token(line)?;
    let severity = Severity::from_token(severity)?;
    let (position, message) = next_token(rest)?;

    let mut parts = position.split(':');
    let column = parts.next()?.parse().ok()?;
    let row = parts.next()?.parse().ok()?;

    Some(LogEntry {
        severity,
        column,
        row,
        message: message.trim_start(),
    })
}

/// Split off the first whitespace-delimited token, returning it and the unconsumed remainder.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

/// Lazily remap `log`, one output line per log line.
pub fn remap<'a>(
    log: &'a str,
    registry: &'a Registry,
    assembly: &'a [AssemblyRef],
    main: SourceId,
    stage_name: &'a str,
) -> Remapper<'a> {
    Remapper {
        lines: split_lines(log),
        registry,
        assembly,
        main,
        stage_name,
    }
}

/// Iterator returned by [`remap`].
pub struct Remapper<'a> {
    lines: SplitLines<'a>,
    registry: &'a Registry,
    assembly: &'a [AssemblyRef],
    main: SourceId,
    stage_name: &'a str,
}

impl Remapper<'_> {
    fn remap_line(&self, line: &str) -> Option<String> {
        let entry = parse_log_line(line)?;
        let location = locate(self.registry, self.assembly, self.main, entry.row)?;
        Some(format!(
            "{} {}: \"{}\": {}:{}: {}",
            entry.severity, self.stage_name, location.path, entry.column, location.line, entry.message
        ))
    }
}

impl Iterator for Remapper<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let line = self.lines.next()?;
        if line.trim().is_empty() {
            return Some(String::new());
        }
        Some(self.remap_line(line).unwrap_or_else(|| line.to_string()))
    }
}
