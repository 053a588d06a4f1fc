//! Build driver CLI entrypoint.
//!
//! Reads the extension manifest, builds each declared module with the
//! discovered C compiler, and places the finished artifacts where the host
//! import mechanism expects them.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use pyext_build::cli::{BuildArgs, Cli, Command};
use pyext_build::compiler::Compiler;
use pyext_build::descriptor::ExtensionDescriptor;
use pyext_build::error::Result;
use pyext_build::list::run_list;
use pyext_build::manifest;
use pyext_build::output::write_stderr_line;
use pyext_build::pipeline::{PipelineContext, perform_build, stage_modules};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Some(Command::List(args)) => run_list(args, stdout),
        Some(Command::Build(args)) => run_build(args, stderr),
        None => run_build(&cli.build, stderr),
    }
}

fn run_build(args: &BuildArgs, stderr: &mut dyn Write) -> Result<()> {
    let manifest_path = manifest::resolve_path(args.manifest.as_deref());
    let descriptors = manifest::load(&manifest_path)?;

    let compiler = resolve_compiler(args.cc.as_deref());
    let base_dir = manifest::manifest_dir(&manifest_path);
    let build_dir = resolve_build_dir(args, &base_dir);
    let install_dir = args.install_dir.clone().unwrap_or(base_dir);

    let context = PipelineContext {
        compiler: &compiler,
        build_dir: &build_dir,
        install_dir: &install_dir,
        verbosity: args.verbosity,
        quiet: args.quiet,
    };

    // Dry-run mode: show what would be done without side effects.
    if args.dry_run {
        print_dry_run_info(&context, &manifest_path, &descriptors, stderr);
        return Ok(());
    }

    compiler.verify_available()?;

    let build_results = perform_build(&context, &descriptors, stderr)?;
    stage_modules(&context, &build_results, stderr)?;

    Ok(())
}

/// Uses the `--cc` override when given, otherwise discovers from `CC`/`cc`.
fn resolve_compiler(override_program: Option<&str>) -> Compiler {
    match override_program {
        Some(program) => Compiler::with_override(program),
        None => Compiler::detect(),
    }
}

fn resolve_build_dir(args: &BuildArgs, base_dir: &Utf8Path) -> Utf8PathBuf {
    args.build_dir
        .clone()
        .unwrap_or_else(|| base_dir.join("build"))
}

/// Prints dry run configuration information.
fn print_dry_run_info(
    context: &PipelineContext<'_>,
    manifest_path: &Utf8Path,
    descriptors: &[ExtensionDescriptor],
    stderr: &mut dyn Write,
) {
    write_stderr_line(stderr, "Dry run - no files will be modified");
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, format!("Manifest: {manifest_path}"));
    write_stderr_line(stderr, format!("Compiler: {}", context.compiler.program()));
    write_stderr_line(stderr, format!("Build directory: {}", context.build_dir));
    write_stderr_line(
        stderr,
        format!("Install directory: {}", context.install_dir),
    );
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, "Extensions to build:");
    for descriptor in descriptors {
        write_stderr_line(
            stderr,
            format!(
                "  - {} ({} source file(s))",
                descriptor.name(),
                descriptor.sources().len()
            ),
        );
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
