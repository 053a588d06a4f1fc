//! Build and staging pipeline orchestration.
//!
//! Coordinates the builder and stager for a full declare-then-build run,
//! writing progress to an injected stream so the CLI stays thin and the flow
//! stays testable.

use crate::builder::{BuildConfig, BuildResult, Builder};
use crate::compiler::Compiler;
use crate::descriptor::ExtensionDescriptor;
use crate::error::Result;
use crate::output::{success_message, write_stderr_line};
use crate::stager::Stager;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

/// Context for a build/stage pipeline run.
pub struct PipelineContext<'a> {
    /// The C compiler to invoke.
    pub compiler: &'a Compiler,
    /// Scratch directory for compile output.
    pub build_dir: &'a Utf8Path,
    /// Directory the finished modules are placed into.
    pub install_dir: &'a Utf8Path,
    /// Compiler output verbosity.
    pub verbosity: u8,
    /// Suppress progress output.
    pub quiet: bool,
}

/// Build all declared extensions.
///
/// Prints progress to stderr if not in quiet mode.
///
/// # Errors
///
/// Returns an error if any extension fails to build; extensions are built
/// sequentially and the first failure aborts the run.
pub fn perform_build(
    context: &PipelineContext<'_>,
    descriptors: &[ExtensionDescriptor],
    stderr: &mut dyn Write,
) -> Result<Vec<BuildResult>> {
    if !context.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Building {} extension module(s) with {}...",
                descriptors.len(),
                context.compiler.program()
            ),
        );
        for descriptor in descriptors {
            write_stderr_line(stderr, format!("  - {}", descriptor.name()));
        }
        write_stderr_line(stderr, "");
    }

    let config = BuildConfig {
        compiler: context.compiler.clone(),
        build_dir: context.build_dir.to_owned(),
        verbosity: context.verbosity,
    };
    Builder::new(config).build_all(descriptors)
}

/// Stage built modules into the install directory and return its path.
///
/// Prints progress to stderr if not in quiet mode.
///
/// # Errors
///
/// Returns an error if the install directory cannot be prepared or a copy
/// fails.
pub fn stage_modules(
    context: &PipelineContext<'_>,
    build_results: &[BuildResult],
    stderr: &mut dyn Write,
) -> Result<Utf8PathBuf> {
    let stager = Stager::new(context.install_dir.to_owned());

    if !context.quiet {
        write_stderr_line(
            stderr,
            format!("Placing modules in {}...", stager.install_dir()),
        );
    }

    stager.prepare()?;
    stager.stage_all(build_results)?;

    if !context.quiet {
        write_stderr_line(stderr, "");
        write_stderr_line(
            stderr,
            success_message(build_results.len(), stager.install_dir()),
        );
    }

    Ok(stager.install_dir().to_owned())
}
