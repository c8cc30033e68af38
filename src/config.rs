//! Preprocessing configuration.

/// Options for one load/flatten/render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Log every rendered line with its 1-based index (at `debug` level).
    pub debug: bool,
    /// Deepest include nesting accepted before the load fails. The entry file is depth 0.
    pub max_include_depth: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_include_depth: Self::DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

impl PreprocessConfig {
    pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }
}
