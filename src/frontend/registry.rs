//! Source registry: the deduplicating, pointer-stable store of every file loaded in one cycle.
//!
//! Files live in an index arena. A [`SourceId`] handed out by [`Registry::insert`] stays valid for the
//! whole cycle because entries are never removed or moved. The registry is released as a whole when its
//! [`Shader`](crate::Shader) is dropped.

use std::collections::HashMap;

use glslink_syntax::{Line, LineKind};

/// Stable handle to a file in a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(usize);

/// One loaded file and its classified lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: String,
    version: Option<String>,
    visited: bool,
    lines: Vec<Line>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: None,
            visited: false,
            lines: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Version declared by the first `#version` line of this file, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether the file has already been flattened into the assembly.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Append a line. Later `#version` lines are kept but do not replace the first one.
    pub fn push_line(&mut self, line: Line) {
        if line.kind == LineKind::Version && self.version.is_none() {
            self.version = Some(line.payload.clone());
        }
        self.lines.push(line);
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    /// Paths this file includes, in line order.
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|l| l.kind == LineKind::Include)
            .map(|l| l.payload.as_str())
    }
}

/// Resolved path -> owned [`SourceFile`].
#[derive(Debug, Default)]
pub struct Registry {
    files: Vec<SourceFile>,
    by_path: HashMap<String, SourceId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty file for `path`, or return the existing entry.
    ///
    /// The boolean is `true` when the entry was created by this call.
    pub fn insert(&mut self, path: &str) -> (SourceId, bool) {
        if let Some(&id) = self.by_path.get(path) {
            return (id, false);
        }
        let id = SourceId(self.files.len());
        self.files.push(SourceFile::new(path));
        self.by_path.insert(path.to_string(), id);
        (id, true)
    }

    pub fn find(&self, path: &str) -> Option<SourceId> {
        self.by_path.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// ## Panics
    /// If `id` was issued by a different registry.
    pub fn get(&self, id: SourceId) -> &SourceFile {
        &self.files[id.0]
    }

    pub fn get_mut(&mut self, id: SourceId) -> &mut SourceFile {
        &mut self.files[id.0]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &SourceFile)> {
        self.files.iter().enumerate().map(|(i, f)| (SourceId(i), f))
    }
}
