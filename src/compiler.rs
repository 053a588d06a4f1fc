//! C compiler discovery and invocation plumbing.
//!
//! The build driver treats the compiler as an opaque external collaborator:
//! discover a program name, optionally probe that it can be invoked, and hand
//! argument lists to it. Discovery honours the conventional `CC` and `CFLAGS`
//! environment variables and falls back to `cc`.

use crate::error::{BuildError, Result};
use log::debug;
use std::process::{Command, Output};

/// Default compiler program when `CC` is not set.
pub const DEFAULT_COMPILER: &str = "cc";

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output>;
}

pub(crate) struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output> {
        Command::new(program).args(args).output()
    }
}

/// A discovered or overridden C compiler.
#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
    cflags: Vec<String>,
}

impl Compiler {
    /// Discover the compiler from the environment.
    ///
    /// Uses `CC` when set, otherwise [`DEFAULT_COMPILER`]. `CFLAGS` is split
    /// on whitespace and appended to every compile invocation.
    #[must_use]
    pub fn detect() -> Self {
        let program = match std::env::var("CC") {
            Ok(cc) if !cc.trim().is_empty() => {
                debug!("using C compiler from CC: {cc}");
                cc
            }
            _ => DEFAULT_COMPILER.to_owned(),
        };

        Self {
            program,
            cflags: cflags_from_env(),
        }
    }

    /// Create a compiler with an explicit program, skipping discovery.
    ///
    /// Used for the `--cc` CLI override. `CFLAGS` still applies.
    #[must_use]
    pub fn with_override(program: &str) -> Self {
        Self {
            program: program.to_owned(),
            cflags: cflags_from_env(),
        }
    }

    /// The compiler program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Extra flags appended to every compile invocation.
    #[must_use]
    pub fn cflags(&self) -> &[String] {
        &self.cflags
    }

    /// Probe that the compiler can be invoked.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::CompilerNotFound`] if running
    /// `<program> --version` fails or exits non-zero.
    pub fn verify_available(&self) -> Result<()> {
        let runner = SystemCommandRunner;
        self.verify_available_with(&runner)
    }

    fn verify_available_with(&self, runner: &dyn CommandRunner) -> Result<()> {
        let args = vec!["--version".to_owned()];
        let output =
            runner
                .run(&self.program, &args)
                .map_err(|e| BuildError::CompilerNotFound {
                    program: self.program.clone(),
                    reason: e.to_string(),
                })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(BuildError::CompilerNotFound {
                program: self.program.clone(),
                reason: "version probe exited with failure".to_owned(),
            })
        }
    }
}

fn cflags_from_env() -> Vec<String> {
    std::env::var("CFLAGS")
        .map(|flags| flags.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitStatus;

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;

        ExitStatusExt::from_raw(code << 8)
    }

    #[cfg(windows)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::windows::process::ExitStatusExt;

        ExitStatusExt::from_raw(code as u32)
    }

    fn output(code: i32) -> Output {
        Output {
            status: exit_status(code),
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }

    #[test]
    fn with_override_uses_given_program() {
        let compiler = Compiler::with_override("clang");
        assert_eq!(compiler.program(), "clang");
    }

    #[test]
    fn detect_prefers_cc_from_environment() {
        temp_env::with_vars([("CC", Some("clang")), ("CFLAGS", None)], || {
            let compiler = Compiler::detect();
            assert_eq!(compiler.program(), "clang");
            assert!(compiler.cflags().is_empty());
        });
    }

    #[test]
    fn detect_falls_back_when_cc_is_unset() {
        temp_env::with_vars([("CC", None::<&str>), ("CFLAGS", None)], || {
            assert_eq!(Compiler::detect().program(), DEFAULT_COMPILER);
        });
    }

    #[test]
    fn detect_falls_back_when_cc_is_blank() {
        temp_env::with_vars([("CC", Some("   ")), ("CFLAGS", None)], || {
            assert_eq!(Compiler::detect().program(), DEFAULT_COMPILER);
        });
    }

    #[test]
    fn cflags_are_split_on_whitespace() {
        temp_env::with_var("CFLAGS", Some("-I/opt/include  -DNDEBUG\t-fno-plt"), || {
            let compiler = Compiler::with_override("cc");
            assert_eq!(
                compiler.cflags(),
                [
                    "-I/opt/include".to_owned(),
                    "-DNDEBUG".to_owned(),
                    "-fno-plt".to_owned(),
                ]
            );
        });
    }

    #[test]
    fn cflags_default_to_empty_when_unset() {
        temp_env::with_var("CFLAGS", None::<&str>, || {
            assert!(Compiler::with_override("cc").cflags().is_empty());
        });
    }

    #[test]
    fn verify_available_accepts_successful_probe() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program, args| program == "cc" && args == ["--version".to_owned()])
            .times(1)
            .returning(|_, _| Ok(output(0)));

        let compiler = Compiler::with_override("cc");
        assert!(compiler.verify_available_with(&runner).is_ok());
    }

    #[test]
    fn verify_available_rejects_failing_probe() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| Ok(output(1)));

        let compiler = Compiler::with_override("cc");
        let err = compiler
            .verify_available_with(&runner)
            .expect_err("failing probe should be rejected");
        assert!(matches!(err, BuildError::CompilerNotFound { .. }));
    }

    #[test]
    fn verify_available_reports_missing_program() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_, _| Err(std::io::Error::other("No such file or directory")));

        let compiler = Compiler::with_override("nonexistent-cc");
        let err = compiler
            .verify_available_with(&runner)
            .expect_err("missing program should be reported");
        assert!(matches!(
            err,
            BuildError::CompilerNotFound { program, .. } if program == "nonexistent-cc"
        ));
    }
}
