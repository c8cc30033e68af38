//! Renders an assembly into compilable GLSL text.
//!
//! Exactly one line of output is produced per [`AssemblyRef`], so compiler row numbers index straight back
//! into the assembly. Only the first `#version` in assembly order stays active; later ones and every
//! `#include` directive are emitted as `//` comments to keep the line count intact.

use std::fmt;

use glslink_core::directives::{self, DirectiveId, LINE_COMMENT};
use glslink_syntax::LineKind;

use super::assembler::AssemblyRef;
use super::registry::Registry;

/// What a rendered line was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineTag {
    Code,
    /// The one `#version` left active.
    ActiveVersion,
    /// A later `#version`, commented out.
    DuplicateVersion,
    /// An `#include` directive, replaced by a comment naming the resolved path.
    Include,
}

impl fmt::Display for LineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineTag::Code => write!(f, "code"),
            LineTag::ActiveVersion => write!(f, "active version"),
            LineTag::DuplicateVersion => write!(f, "duplicate version"),
            LineTag::Include => write!(f, "include"),
        }
    }
}

/// One line of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// 1-based position in the rendered text.
    pub number: usize,
    pub tag: LineTag,
    pub text: String,
}

/// Iterate the rendered lines of `assembly` in order.
pub fn rendered_lines<'a>(registry: &'a Registry, assembly: &'a [AssemblyRef]) -> RenderedLines<'a> {
    RenderedLines {
        registry,
        refs: assembly.iter().enumerate(),
        tag_version: false,
    }
}

/// Iterator returned by [`rendered_lines`].
pub struct RenderedLines<'a> {
    registry: &'a Registry,
    refs: std::iter::Enumerate<std::slice::Iter<'a, AssemblyRef>>,
    /// Whether the active `#version` has been emitted.
    tag_version: bool,
}

impl Iterator for RenderedLines<'_> {
    type Item = RenderedLine;

    fn next(&mut self) -> Option<RenderedLine> {
        let (i, r) = self.refs.next()?;
        let line = &self.registry.get(r.file).lines()[r.line_index];

        let (tag, text) = match line.kind {
            LineKind::Code => (LineTag::Code, line.payload.clone()),
            LineKind::Version => {
                let directive = format!("{} {}", directives::as_str(DirectiveId::Version), line.payload);
                if self.tag_version {
                    (LineTag::DuplicateVersion, format!("{LINE_COMMENT}{directive}"))
                } else {
                    self.tag_version = true;
                    (LineTag::ActiveVersion, directive)
                }
            }
            LineKind::Include => (LineTag::Include, format!("{LINE_COMMENT}{}", line.payload)),
        };

        Some(RenderedLine {
            number: i + 1,
            tag,
            text,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.refs.size_hint()
    }
}

/// Render `assembly` to a single string, one `\n`-terminated line per reference.
///
/// With `debug` set, every line is also logged with its number and tag.
#[tracing::instrument(skip_all, fields(lines = assembly.len()))]
pub fn render(registry: &Registry, assembly: &[AssemblyRef], debug: bool) -> String {
    let mut code = String::new();
    for line in rendered_lines(registry, assembly) {
        if debug {
            tracing::debug!(number = line.number, tag = %line.tag, "{}", line.text);
        }
        code.push_str(&line.text);
        code.push('\n');
    }
    code
}

/// Numbered listing of the rendered text, with directive lines tagged.
pub fn render_listing(registry: &Registry, assembly: &[AssemblyRef]) -> String {
    let width = assembly.len().to_string().len();
    let mut listing = String::new();
    for line in rendered_lines(registry, assembly) {
        listing.push_str(&format!("{:>width$}: {}", line.number, line.text));
        if line.tag != LineTag::Code {
            listing.push_str(&format!("    [{}]", line.tag));
        }
        listing.push('\n');
    }
    listing
}
