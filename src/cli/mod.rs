//! CLI module for glslink
//!
//! ## Commands
//!
//! - `assemble <file>` - Print (or write) the assembled source
//! - `deps <file>` - List every file pulled in through `#include`
//! - `remap <file> --log <log>` - Rewrite a compiler log against the assembled source
//! - `check <file>` - Assemble, run the validator and report remapped diagnostics
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use glslink_core::ShaderStage;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::config::PreprocessConfig;
use crate::version::GLSLINK_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create an error with a custom exit code.
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Assemble multi-file GLSL shaders and remap compiler diagnostics
#[derive(Parser, Debug)]
#[command(name = "glslink")]
#[command(version = GLSLINK_VERSION)]
#[command(about = "Assemble multi-file GLSL shaders and remap compiler diagnostics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,
}

/// Flags shared by every command that loads a shader.
#[derive(Args, Debug, Clone)]
pub struct PreprocessArgs {
    /// Log every rendered line at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Maximum `#include` nesting depth
    #[arg(long, value_name = "N", global = true, default_value_t = PreprocessConfig::DEFAULT_MAX_INCLUDE_DEPTH)]
    pub max_include_depth: usize,
}

impl PreprocessArgs {
    pub fn config(&self) -> PreprocessConfig {
        PreprocessConfig::new()
            .with_debug(self.debug)
            .with_max_include_depth(self.max_include_depth)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the assembled source
    Assemble {
        /// Entry shader
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        /// Print a numbered listing with directive lines tagged
        #[arg(long)]
        listing: bool,
    },

    /// List the files pulled in through #include
    Deps {
        /// Entry shader
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Rewrite a compiler log in terms of the original files
    Remap {
        /// Entry shader the log was produced for
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Compiler log (`-` reads stdin)
        #[arg(long, value_name = "LOG")]
        log: PathBuf,
        /// Shader stage (default: from the file extension)
        #[arg(long, value_enum)]
        stage: Option<StageArg>,
    },

    /// Assemble and validate with an external compiler
    Check {
        /// Entry shader
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Shader stage (default: from the file extension)
        #[arg(long, value_enum)]
        stage: Option<StageArg>,
        /// Validator program
        #[arg(long, value_name = "CMD", default_value = "glslangValidator")]
        validator: String,
    },
}

/// Stage names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    Vert,
    Frag,
    Geom,
    Tesc,
    Tese,
    Comp,
}

impl From<StageArg> for ShaderStage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Vert => ShaderStage::Vertex,
            StageArg::Frag => ShaderStage::Fragment,
            StageArg::Geom => ShaderStage::Geometry,
            StageArg::Tesc => ShaderStage::TessControl,
            StageArg::Tese => ShaderStage::TessEvaluation,
            StageArg::Comp => ShaderStage::Compute,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Log filter for a CLI invocation: `RUST_LOG` if set, else `info`.
///
/// `--debug` additionally enables `debug` for glslink itself, which is where the per-line listing is logged.
pub fn log_filter(debug: bool) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    with_debug_listing(base, debug)
}

fn with_debug_listing(filter: EnvFilter, debug: bool) -> EnvFilter {
    if !debug {
        return filter;
    }
    match "glslink=debug".parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Parse the command line. Kept separate from [`run`] so `main` can configure logging from the flags first.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run(cli: Cli) {
    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.preprocess.config();

    match cli.command {
        Some(Command::Assemble { file, output, listing }) => {
            commands::assemble(&file.to_string_lossy(), output.as_deref(), listing, &config)
        }
        Some(Command::Deps { file }) => commands::deps(&file.to_string_lossy(), &config),
        Some(Command::Remap { file, log, stage }) => {
            let stage = resolve_stage(&file, stage);
            commands::remap(&file.to_string_lossy(), &log, stage, &config)
        }
        Some(Command::Check { file, stage, validator }) => {
            let stage = resolve_stage(&file, stage);
            commands::check(&file.to_string_lossy(), stage, &validator, &config)
        }
        // No command - show help
        None => Err(CliError::new("", ExitCode::FAILURE)),
    }
}

/// Explicit `--stage` wins; otherwise infer from the file extension.
fn resolve_stage(file: &std::path::Path, stage: Option<StageArg>) -> ShaderStage {
    match stage {
        Some(stage) => stage.into(),
        None => glslink_core::stages::from_path(&file.to_string_lossy()),
    }
}

// ============================================================================
// Tests
// ============================================================================
