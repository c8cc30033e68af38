//! Include loader: reads the entry file and everything it transitively includes into a [`Registry`].
//!
//! ## Notes
//! - A file is registered *before* its includes are followed, so a diamond-shaped graph reads each file once.
//! - Files still on the include stack are tracked separately; meeting one again is an
//!   [`IncludeCycle`](PreprocessError::IncludeCycle) instead of unbounded recursion later on.
//! - Every file gets one synthetic `// end <path>` line after its last physical line. It keeps a
//!   diagnostic that lands just past a file's content inside that file instead of the next one.

use std::io;

use glslink_syntax::{Line, LineKind, classify, directory_of, split_lines};

use super::diagnostics::PreprocessError;
use super::registry::{Registry, SourceId};
use super::source::ByteSource;
use crate::config::PreprocessConfig;

/// Prefix of the synthetic line appended to every loaded file.
pub const END_MARKER_PREFIX: &str = "// end ";

/// The synthetic end-of-file line for `path`.
pub fn end_marker(path: &str) -> Line {
    Line::code(format!("{END_MARKER_PREFIX}{path}"))
}

/// Load `path` and its includes into `registry`.
///
/// Returns the id of `path`. Loading a path that is already registered is a no-op.
#[tracing::instrument(skip_all, fields(path = path))]
pub fn load(
    registry: &mut Registry,
    source: &mut dyn ByteSource,
    path: &str,
    config: &PreprocessConfig,
) -> Result<SourceId, PreprocessError> {
    let mut loader = Loader {
        registry,
        source,
        config,
        stack: Vec::new(),
    };
    loader.load_file(path, 0)
}

struct Loader<'a> {
    registry: &'a mut Registry,
    source: &'a mut dyn ByteSource,
    config: &'a PreprocessConfig,
    /// Files whose lines are still being scanned, outermost first.
    stack: Vec<String>,
}

impl Loader<'_> {
    fn load_file(&mut self, path: &str, depth: usize) -> Result<SourceId, PreprocessError> {
        if self.stack.iter().any(|p| p == path) {
            return Err(PreprocessError::IncludeCycle {
                path: path.to_string(),
                from: self.stack.last().cloned().unwrap_or_default(),
            });
        }

        if let Some(id) = self.registry.find(path) {
            return Ok(id);
        }

        if depth > self.config.max_include_depth {
            return Err(PreprocessError::IncludeTooDeep {
                path: path.to_string(),
                limit: self.config.max_include_depth,
            });
        }

        let text = self.read_text(path)?;
        tracing::info!("load source \"{}\"", path);

        let (id, _) = self.registry.insert(path);
        self.stack.push(path.to_string());

        let dir = directory_of(path);
        for physical in split_lines(&text) {
            let line = classify(physical, dir);
            if line.kind == LineKind::Include {
                self.load_file(&line.payload, depth + 1)?;
            }
            self.registry.get_mut(id).push_line(line);
        }
        self.registry.get_mut(id).push_line(end_marker(path));

        self.stack.pop();
        Ok(id)
    }

    fn read_text(&mut self, path: &str) -> Result<String, PreprocessError> {
        let bytes = self.source.read(path).map_err(|source| {
            tracing::warn!("file open failed: {}", path);
            PreprocessError::FileOpen {
                path: path.to_string(),
                source,
            }
        })?;

        String::from_utf8(bytes).map_err(|e| PreprocessError::FileOpen {
            path: path.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }
}
