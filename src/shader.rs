//! One preprocessing cycle for one shader.
//!
//! [`Shader::load`] runs the whole pipeline: load the entry file and its includes, flatten them, render the
//! text. The result owns its registry and assembly; dropping it (or calling [`Shader::dispose`]) releases
//! both together. A failed load leaves nothing behind, so a retry always starts from a fresh registry.
//!
//! ## Examples
//! ```rust
//! use glslink::{MemorySource, PreprocessConfig, Shader, ShaderStage};
//!
//! let mut files = MemorySource::new()
//!     .with_file("main.frag", "#version 450\n#include \"lib.glsl\"\nvoid main() {}")
//!     .with_file("lib.glsl", "#version 450\nfloat f;");
//! let shader = Shader::load(ShaderStage::Fragment, "main.frag", &mut files, &PreprocessConfig::default()).unwrap();
//! assert!(shader.source_text().starts_with("#version 450\n//lib.glsl\n//#version 450\n"));
//! ```

use glslink_core::ShaderStage;

use crate::backend::{CompilerError, ShaderCompiler};
use crate::config::PreprocessConfig;
use crate::frontend::assembler::{self, AssemblyRef};
use crate::frontend::diagnostics::{CompileFailure, PreprocessError};
use crate::frontend::loader;
use crate::frontend::registry::{Registry, SourceFile, SourceId};
use crate::frontend::remap::{self, Remapper, SourceLocation};
use crate::frontend::render;
use crate::frontend::source::ByteSource;

/// A loaded, flattened and rendered shader.
#[derive(Debug)]
pub struct Shader {
    stage: ShaderStage,
    registry: Registry,
    assembly: Vec<AssemblyRef>,
    main: SourceId,
    source_text: String,
}

impl Shader {
    /// Load `path` through `source` and assemble it.
    #[tracing::instrument(skip_all, fields(stage = %stage, path = path))]
    pub fn load(
        stage: ShaderStage,
        path: &str,
        source: &mut dyn ByteSource,
        config: &PreprocessConfig,
    ) -> Result<Self, PreprocessError> {
        let mut registry = Registry::new();
        let main = loader::load(&mut registry, source, path, config)?;
        let assembly = assembler::flatten(&mut registry, path, main)?;
        let source_text = render::render(&registry, &assembly, config.debug);

        Ok(Self {
            stage,
            registry,
            assembly,
            main,
            source_text,
        })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// The entry file.
    pub fn main_file(&self) -> &SourceFile {
        self.registry.get(self.main)
    }

    pub fn main_path(&self) -> &str {
        self.main_file().path()
    }

    /// Version of the main file, if it declares one.
    pub fn version(&self) -> Option<&str> {
        self.main_file().version()
    }

    /// The rendered, compilable text.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn assembly(&self) -> &[AssemblyRef] {
        &self.assembly
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Every loaded file, main file first.
    pub fn sources(&self) -> impl Iterator<Item = &SourceFile> {
        self.registry.iter().map(|(_, f)| f)
    }

    /// Paths of every file pulled in through `#include`, in load order.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.registry
            .iter()
            .filter(move |(id, _)| *id != self.main)
            .map(|(_, f)| f.path())
    }

    /// Numbered listing of [`source_text`](Self::source_text) with directive lines tagged.
    pub fn listing(&self) -> String {
        render::render_listing(&self.registry, &self.assembly)
    }

    /// Original location of a 1-based row of the rendered text.
    pub fn locate(&self, row: usize) -> Option<SourceLocation<'_>> {
        remap::locate(&self.registry, &self.assembly, self.main, row)
    }

    /// Remap a compiler log against this shader.
    pub fn remap<'a>(&'a self, log: &'a str) -> Remapper<'a> {
        remap::remap(log, &self.registry, &self.assembly, self.main, self.stage.display_name())
    }

    /// Compile the rendered text. A rejection carries the remapped log.
    pub fn compile<C: ShaderCompiler>(&self, compiler: &mut C) -> Result<C::Handle, CompileFailure> {
        match compiler.compile(&self.source_text, self.stage) {
            Ok(handle) => Ok(handle),
            Err(CompilerError::Rejected { log }) => {
                let diagnostics: Vec<String> = self.remap(&log).collect();
                tracing::warn!(stage = %self.stage, count = diagnostics.len(), "compile rejected");
                for line in diagnostics.iter().filter(|l| !l.is_empty()) {
                    tracing::debug!("{}", line);
                }
                Err(CompileFailure::Rejected {
                    stage: self.stage,
                    diagnostics,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Release the registry and assembly.
    pub fn dispose(self) {}
}
