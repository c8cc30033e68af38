//! Shader pipeline stages.
//!
//! A closed enumeration with a const metadata table: display names used in remapped diagnostics,
//! conventional file extensions, and the stage tag understood by `glslangValidator -S`.
//!
//! ## Examples
//! ```rust
//! use glslink_core::lang::stages::{self, ShaderStage};
//!
//! assert_eq!(ShaderStage::Fragment.display_name(), "fragment shader");
//! assert_eq!(stages::from_extension("comp"), ShaderStage::Compute);
//! assert_eq!(stages::from_extension("glsl"), ShaderStage::Unknown);
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageInfo {
    pub stage: ShaderStage,
    /// Name used in diagnostics (`"vertex shader"`).
    pub display_name: &'static str,
    /// Conventional file extension, also the `glslangValidator -S` tag.
    pub extension: Option<&'static str>,
}

pub const STAGES: &[StageInfo] = &[
    StageInfo {
        stage: ShaderStage::Vertex,
        display_name: "vertex shader",
        extension: Some("vert"),
    },
    StageInfo {
        stage: ShaderStage::Fragment,
        display_name: "fragment shader",
        extension: Some("frag"),
    },
    StageInfo {
        stage: ShaderStage::Geometry,
        display_name: "geometry shader",
        extension: Some("geom"),
    },
    StageInfo {
        stage: ShaderStage::TessControl,
        display_name: "tess control shader",
        extension: Some("tesc"),
    },
    StageInfo {
        stage: ShaderStage::TessEvaluation,
        display_name: "tess evaluation shader",
        extension: Some("tese"),
    },
    StageInfo {
        stage: ShaderStage::Compute,
        display_name: "compute shader",
        extension: Some("comp"),
    },
    StageInfo {
        stage: ShaderStage::Unknown,
        display_name: "unknown shader",
        extension: None,
    },
];

impl ShaderStage {
    pub fn info(self) -> &'static StageInfo {
        // STAGES is declared in enum order.
        &STAGES[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub fn extension(self) -> Option<&'static str> {
        self.info().extension
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Map a file extension (without the dot) to a stage. Unrecognised extensions map to `Unknown`.
pub fn from_extension(ext: &str) -> ShaderStage {
    STAGES
        .iter()
        .find(|s| s.extension == Some(ext))
        .map(|s| s.stage)
        .unwrap_or(ShaderStage::Unknown)
}

/// Infer the stage from the last extension of a path (`water.frag` -> `Fragment`).
pub fn from_path(path: &str) -> ShaderStage {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) => from_extension(ext),
        None => ShaderStage::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_in_enum_order() {
        for (i, info) in STAGES.iter().enumerate() {
            assert_eq!(info.stage as usize, i, "STAGES out of order at {:?}", info.stage);
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex shader");
        assert_eq!(ShaderStage::TessControl.to_string(), "tess control shader");
        assert_eq!(ShaderStage::TessEvaluation.to_string(), "tess evaluation shader");
        assert_eq!(ShaderStage::Unknown.to_string(), "unknown shader");
    }

    #[test]
    fn test_from_path() {
        assert_eq!(from_path("shaders/water.frag"), ShaderStage::Fragment);
        assert_eq!(from_path("shaders\\sky.vert"), ShaderStage::Vertex);
        assert_eq!(from_path("a.b/c"), ShaderStage::Unknown);
        assert_eq!(from_path("common.glsl"), ShaderStage::Unknown);
        assert_eq!(from_path("noext"), ShaderStage::Unknown);
    }
}
