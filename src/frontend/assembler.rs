//! Flattening assembler: turns the include graph into one ordered list of line references.
//!
//! The walk is a depth-first preorder from the main file. An `#include` line contributes a reference to
//! itself, immediately followed by the included file's contribution. A file already flattened through
//! another include edge contributes nothing the second time.
//!
//! The resulting `Vec<AssemblyRef>` is the only artifact shared by the renderer and the remapper: rendered
//! line `N` (1-based) is `assembly[N - 1]`.

use glslink_syntax::LineKind;

use super::diagnostics::PreprocessError;
use super::registry::{Registry, SourceId};

/// One line of the assembled text: which file, which line of that file (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssemblyRef {
    pub file: SourceId,
    pub line_index: usize,
}

/// Flatten `path` and everything it includes.
///
/// `main` is the entry file whose `#version` every other file must match. When `main` declares no version,
/// any version is accepted.
#[tracing::instrument(skip_all, fields(path = path))]
pub fn flatten(registry: &mut Registry, path: &str, main: SourceId) -> Result<Vec<AssemblyRef>, PreprocessError> {
    let mut assembler = Assembler {
        registry,
        main,
        out: Vec::new(),
        stack: Vec::new(),
    };
    assembler.flatten_file(path)?;
    Ok(assembler.out)
}

struct Assembler<'a> {
    registry: &'a mut Registry,
    main: SourceId,
    out: Vec<AssemblyRef>,
    /// Files currently being flattened.
    stack: Vec<SourceId>,
}

impl Assembler<'_> {
    fn flatten_file(&mut self, path: &str) -> Result<(), PreprocessError> {
        let id = self
            .registry
            .find(path)
            .ok_or_else(|| PreprocessError::NotFound { path: path.to_string() })?;

        if self.registry.get(id).is_visited() {
            return Ok(());
        }

        // The loader rejects cycles; a hand-built registry may still contain one.
        if self.stack.contains(&id) {
            let from = self
                .stack
                .last()
                .map(|&f| self.registry.get(f).path().to_string())
                .unwrap_or_default();
            return Err(PreprocessError::IncludeCycle {
                path: path.to_string(),
                from,
            });
        }

        if id != self.main {
            self.check_version(id)?;
        }

        self.stack.push(id);
        for line_index in 0..self.registry.get(id).lines().len() {
            self.out.push(AssemblyRef { file: id, line_index });

            let line = &self.registry.get(id).lines()[line_index];
            if line.kind == LineKind::Include {
                let target = line.payload.clone();
                self.flatten_file(&target)?;
            }
        }
        self.stack.pop();

        self.registry.get_mut(id).mark_visited();
        Ok(())
    }

    fn check_version(&self, id: SourceId) -> Result<(), PreprocessError> {
        let Some(expected) = self.registry.get(self.main).version() else {
            return Ok(());
        };
        let file = self.registry.get(id);
        if file.version() == Some(expected) {
            return Ok(());
        }

        tracing::warn!("different source code versions: {}", file.path());
        Err(PreprocessError::VersionMismatch {
            path: file.path().to_string(),
            expected: expected.to_string(),
            found: file.version().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreprocessConfig;
    use crate::frontend::loader::load;
    use crate::frontend::source::MemorySource;
    use glslink_syntax::Line;

    fn load_and_flatten(mut source: MemorySource, entry: &str) -> (Registry, Result<Vec<AssemblyRef>, PreprocessError>) {
        let mut registry = Registry::new();
        let main = load(&mut registry, &mut source, entry, &PreprocessConfig::default()).unwrap();
        let result = flatten(&mut registry, entry, main);
        (registry, result)
    }

    /// `(path, line_index)` pairs for readable assertions.
    fn describe(registry: &Registry, assembly: &[AssemblyRef]) -> Vec<(String, usize)> {
        assembly
            .iter()
            .map(|r| (registry.get(r.file).path().to_string(), r.line_index))
            .collect()
    }

    #[test]
    fn test_single_file_is_identity() {
        let source = MemorySource::new().with_file("main.glsl", "a\nb");
        let (registry, result) = load_and_flatten(source, "main.glsl");
        let assembly = result.unwrap();
        assert_eq!(
            describe(&registry, &assembly),
            vec![("main.glsl".into(), 0), ("main.glsl".into(), 1), ("main.glsl".into(), 2)]
        );
    }

    #[test]
    fn test_include_is_spliced_after_directive() {
        let source = MemorySource::new()
            .with_file("main.glsl", "#version 450\n#include \"lib.glsl\"\nvoid main() {}")
            .with_file("lib.glsl", "#version 450\nfloat f;");
        let (registry, result) = load_and_flatten(source, "main.glsl");
        let assembly = result.unwrap();
        assert_eq!(
            describe(&registry, &assembly),
            vec![
                ("main.glsl".into(), 0),
                ("main.glsl".into(), 1),
                ("lib.glsl".into(), 0),
                ("lib.glsl".into(), 1),
                ("lib.glsl".into(), 2),
                ("main.glsl".into(), 2),
                ("main.glsl".into(), 3),
            ]
        );
    }

    #[test]
    fn test_diamond_flattens_shared_file_once() {
        let source = MemorySource::new()
            .with_file("main.glsl", "#include \"a.glsl\"\n#include \"b.glsl\"")
            .with_file("a.glsl", "#include \"common.glsl\"")
            .with_file("b.glsl", "#include \"common.glsl\"")
            .with_file("common.glsl", "float shared;");
        let (registry, result) = load_and_flatten(source, "main.glsl");
        let assembly = result.unwrap();

        let common = registry.find("common.glsl").unwrap();
        let common_refs = assembly.iter().filter(|r| r.file == common).count();
        assert_eq!(common_refs, registry.get(common).lines().len());

        let total: usize = registry.iter().map(|(_, f)| f.lines().len()).sum();
        assert_eq!(assembly.len(), total);
        assert!(registry.iter().all(|(_, f)| f.is_visited()));
    }

    #[test]
    fn test_version_mismatch() {
        let source = MemorySource::new()
            .with_file("main.glsl", "#version 450\n#include \"lib.glsl\"")
            .with_file("lib.glsl", "#version 330");
        let (_, result) = load_and_flatten(source, "main.glsl");
        match result {
            Err(PreprocessError::VersionMismatch { path, expected, found }) => {
                assert_eq!(path, "lib.glsl");
                assert_eq!(expected, "450");
                assert_eq!(found.as_deref(), Some("330"));
            }
            other => panic!("expected VersionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_unversioned_include_under_versioned_main_is_a_mismatch() {
        let source = MemorySource::new()
            .with_file("main.glsl", "#version 450\n#include \"lib.glsl\"")
            .with_file("lib.glsl", "float f;");
        let (_, result) = load_and_flatten(source, "main.glsl");
        assert!(matches!(result, Err(PreprocessError::VersionMismatch { found: None, .. })));
    }

    #[test]
    fn test_unversioned_main_accepts_any_include_version() {
        let source = MemorySource::new()
            .with_file("main.glsl", "#include \"lib.glsl\"")
            .with_file("lib.glsl", "#version 330");
        let (_, result) = load_and_flatten(source, "main.glsl");
        assert!(result.is_ok());
    }

    #[test]
    fn test_not_found() {
        let mut registry = Registry::new();
        let (main, _) = registry.insert("main.glsl");
        let err = flatten(&mut registry, "other.glsl", main).unwrap_err();
        assert!(matches!(err, PreprocessError::NotFound { ref path } if path == "other.glsl"));
    }

    #[test]
    fn test_hand_built_cycle_is_rejected() {
        let mut registry = Registry::new();
        let (a, _) = registry.insert("a.glsl");
        let (b, _) = registry.insert("b.glsl");
        registry.get_mut(a).push_line(Line::include("b.glsl"));
        registry.get_mut(b).push_line(Line::include("a.glsl"));

        let err = flatten(&mut registry, "a.glsl", a).unwrap_err();
        assert!(matches!(err, PreprocessError::IncludeCycle { ref path, ref from } if path == "a.glsl" && from == "b.glsl"));
    }
}
