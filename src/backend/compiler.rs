//! Compiler boundary.
//!
//! [`ShaderCompiler`] is the seam between the preprocessing core and whatever actually compiles GLSL: an
//! OpenGL context, a Vulkan toolchain, or an external validator process. [`CommandCompiler`] is the
//! process-based implementation used by the CLI.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use glslink_core::ShaderStage;
use miette::Diagnostic;
use thiserror::Error;

/// Errors reported by a compiler backend.
#[derive(Debug, Error, Diagnostic)]
pub enum CompilerError {
    /// The compiler ran and rejected the source. `log` is in `SEVERITY: column:row: message` form.
    #[error("compiler rejected the source")]
    #[diagnostic(code(glslink::compiler::rejected))]
    Rejected { log: String },

    #[error("failed to run `{program}`")]
    #[diagnostic(
        code(glslink::compiler::unavailable),
        help("install the validator or pass --validator with the program to use")
    )]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot compile a shader of unknown stage")]
    #[diagnostic(
        code(glslink::compiler::unknown_stage),
        help("name the file with a stage extension (.vert, .frag, ...) or pass --stage")
    )]
    UnknownStage,
}

/// Compile assembled GLSL for one stage.
pub trait ShaderCompiler {
    /// What a successful compile produces (an object name, a SPIR-V blob, a validator log...).
    type Handle;

    fn compile(&mut self, source: &str, stage: ShaderStage) -> Result<Self::Handle, CompilerError>;
}

/// Runs an external validator, feeding the source on stdin.
///
/// The default invocation is `glslangValidator --stdin -S <stage>`. A successful run yields the validator's
/// output (which may contain warnings); a non-zero exit yields [`CompilerError::Rejected`] with the same
/// output.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
}

impl Default for CommandCompiler {
    fn default() -> Self {
        Self::new("glslangValidator")
    }
}

impl CommandCompiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed before `--stdin -S <stage>`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, stage_tag: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("--stdin")
            .arg("-S")
            .arg(stage_tag)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn unavailable(&self, source: io::Error) -> CompilerError {
        CompilerError::Unavailable {
            program: self.program.clone(),
            source,
        }
    }
}

impl ShaderCompiler for CommandCompiler {
    type Handle = String;

    #[tracing::instrument(skip_all, fields(program = %self.program, stage = %stage))]
    fn compile(&mut self, source: &str, stage: ShaderStage) -> Result<String, CompilerError> {
        let stage_tag = stage.extension().ok_or(CompilerError::UnknownStage)?;

        let mut child = self.command(stage_tag).spawn().map_err(|e| self.unavailable(e))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).map_err(|e| self.unavailable(e))?;
        }
        let output = child.wait_with_output().map_err(|e| self.unavailable(e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let log = if stderr.trim().is_empty() {
            stdout.into_owned()
        } else {
            format!("{}\n{}", stdout, stderr)
        };

        if output.status.success() {
            Ok(log)
        } else {
            tracing::debug!(status = ?output.status, "validator rejected source");
            Err(CompilerError::Rejected { log })
        }
    }
}
