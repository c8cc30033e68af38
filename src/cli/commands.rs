//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use glslink_core::ShaderStage;

use crate::backend::{CommandCompiler, CompilerError};
use crate::config::PreprocessConfig;
use crate::frontend::diagnostics::CompileFailure;
use crate::frontend::source::FsSource;
use crate::shader::Shader;

use super::{CliError, CliResult, ExitCode};

// ============================================================================
// Shared helpers
// ============================================================================

/// Render any diagnostic through miette's reporter.
fn report(err: impl miette::Diagnostic + Send + Sync + 'static) -> String {
    format!("{:?}", miette::Report::new(err))
}

/// Load and assemble `file_path` from disk, turning a failed cycle into a CLI error.
fn load_shader(file_path: &str, stage: ShaderStage, config: &PreprocessConfig) -> CliResult<Shader> {
    Shader::load(stage, file_path, &mut FsSource, config).map_err(|e| CliError::failure(report(e)))
}

/// Read a log file, or stdin when the path is `-`.
fn read_log(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut log = String::new();
        io::stdin()
            .read_to_string(&mut log)
            .map_err(|e| CliError::failure(format!("Error reading log from stdin: {}", e)))?;
        Ok(log)
    } else {
        fs::read_to_string(path)
            .map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e)))
    }
}

/// Write remapped diagnostics to `out`, one per line.
///
/// Commands pass stderr, the same stream `run()` uses for load errors, so every diagnostic shares one channel.
fn write_diagnostics<W: Write>(out: &mut W, lines: impl IntoIterator<Item = String>) -> CliResult<()> {
    for line in lines {
        writeln!(out, "{}", line).map_err(|e| CliError::failure(format!("Error writing diagnostics: {}", e)))?;
    }
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

/// Print the assembled source (or its numbered listing), or write it to `output`.
pub fn assemble(
    file_path: &str,
    output: Option<&Path>,
    listing: bool,
    config: &PreprocessConfig,
) -> CliResult<ExitCode> {
    let shader = load_shader(file_path, glslink_core::stages::from_path(file_path), config)?;
    let text = if listing {
        shader.listing()
    } else {
        shader.source_text().to_string()
    };

    match output {
        Some(out) => {
            fs::write(out, text)
                .map_err(|e| CliError::failure(format!("Error writing {}: {}", out.display(), e)))?;
            tracing::info!("wrote {}", out.display());
        }
        None => print!("{}", text),
    }
    Ok(ExitCode::SUCCESS)
}

/// Print every included path, one per line, in load order.
pub fn deps(file_path: &str, config: &PreprocessConfig) -> CliResult<ExitCode> {
    let shader = load_shader(file_path, glslink_core::stages::from_path(file_path), config)?;
    for path in shader.dependencies() {
        println!("{}", path);
    }
    Ok(ExitCode::SUCCESS)
}

/// Rewrite a compiler log produced for the assembled form of `file_path`.
pub fn remap(file_path: &str, log_path: &Path, stage: ShaderStage, config: &PreprocessConfig) -> CliResult<ExitCode> {
    let shader = load_shader(file_path, stage, config)?;
    let log = read_log(log_path)?;
    write_diagnostics(&mut io::stderr().lock(), shader.remap(&log))?;
    Ok(ExitCode::SUCCESS)
}

/// Assemble `file_path`, run it through `validator`, and print remapped diagnostics.
pub fn check(file_path: &str, stage: ShaderStage, validator: &str, config: &PreprocessConfig) -> CliResult<ExitCode> {
    let shader = load_shader(file_path, stage, config)?;
    let mut compiler = CommandCompiler::new(validator);

    match shader.compile(&mut compiler) {
        Ok(log) => {
            // A passing validator may still print warnings.
            write_diagnostics(
                &mut io::stderr().lock(),
                shader.remap(&log).filter(|l| !l.trim().is_empty()),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(CompileFailure::Rejected { stage, diagnostics }) => {
            write_diagnostics(
                &mut io::stderr().lock(),
                diagnostics.into_iter().filter(|l| !l.trim().is_empty()),
            )?;
            Err(CliError::failure(format!("{} failed to compile: {}", stage, shader.main_path())))
        }
        Err(CompileFailure::Compiler(e @ CompilerError::Unavailable { .. })) => {
            Err(CliError::with_code(report(e), 127))
        }
        Err(CompileFailure::Compiler(e)) => Err(CliError::failure(report(e))),
    }
}
