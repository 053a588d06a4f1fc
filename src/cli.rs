//! CLI argument definitions for the build driver.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Build C extension modules from a declarative manifest.
#[derive(Parser, Debug)]
#[command(name = "pyext-build")]
#[command(version, about)]
#[command(long_about = concat!(
    "Build C extension modules from a declarative manifest.\n\n",
    "pyext-build reads extension.toml, which declares one or more extension ",
    "modules and the previously generated C sources that produce them, and ",
    "compiles each declaration into a platform-native loadable module named ",
    "after the extension.\n\n",
    "By default modules are built in place: the finished artifact lands next ",
    "to the manifest, where the host import mechanism expects to find it. Use ",
    "--install-dir to place artifacts elsewhere.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build every declared extension in place:\n",
    "    $ pyext-build\n\n",
    "  Build against a specific manifest:\n",
    "    $ pyext-build --manifest bindings/extension.toml\n\n",
    "  Place artifacts in a separate directory:\n",
    "    $ pyext-build --install-dir dist/\n\n",
    "  Use a specific compiler:\n",
    "    $ pyext-build --cc clang\n\n",
    "  Show declared extensions and their build state:\n",
    "    $ pyext-build list\n\n",
    "  Preview without building:\n",
    "    $ pyext-build --dry-run",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Build arguments (used when no subcommand is given).
    #[command(flatten)]
    pub build: BuildArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build declared extension modules (default when no subcommand given).
    Build(BuildArgs),

    /// List declared extensions and whether their artifacts are present.
    List(ListArgs),
}

/// Arguments for the build command.
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Path to the extension manifest [default: extension.toml].
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<Utf8PathBuf>,

    /// Directory to place finished modules in [default: the manifest's directory].
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<Utf8PathBuf>,

    /// Scratch directory for compile output [default: build/ beside the manifest].
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<Utf8PathBuf>,

    /// C compiler to invoke [default: $CC, then cc].
    #[arg(long, value_name = "PROG")]
    pub cc: Option<String>,

    /// Show configuration and exit without building.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase compiler output verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Arguments for the list command.
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,

    /// Path to the extension manifest [default: extension.toml].
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<Utf8PathBuf>,

    /// Directory to look for artifacts in [default: the manifest's directory].
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<Utf8PathBuf>,
}

impl Cli {
    /// Returns the effective build arguments.
    ///
    /// If a `Build` subcommand was provided, returns those arguments;
    /// otherwise returns the flattened build arguments, so `pyext-build` and
    /// `pyext-build build` behave identically.
    #[must_use]
    pub fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Some(Command::Build(args)) => args,
            Some(Command::List(_)) | None => &self.build,
        }
    }
}

impl Default for BuildArgs {
    /// Creates a `BuildArgs` instance with all flags disabled.
    fn default() -> Self {
        Self {
            manifest: None,
            install_dir: None,
            build_dir: None,
            cc: None,
            dry_run: false,
            verbosity: 0,
            quiet: false,
        }
    }
}

impl Default for ListArgs {
    /// Creates a `ListArgs` instance with default settings.
    fn default() -> Self {
        Self {
            json: false,
            manifest: None,
            install_dir: None,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
