//! Compile orchestration for extension modules.
//!
//! One descriptor yields one compiler invocation and one loadable artifact.
//! Output is committed with a temp-then-rename so a rejected compile never
//! leaves a partial artifact where a loadable one stood.

use crate::compiler::{CommandRunner, Compiler, SystemCommandRunner};
use crate::descriptor::ExtensionDescriptor;
use crate::error::{BuildError, Result};
use crate::module_name::ModuleName;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::process::Output;

/// Configuration for the build process.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// The C compiler to invoke.
    pub compiler: Compiler,
    /// Directory for compile output before staging.
    pub build_dir: Utf8PathBuf,
    /// Compiler output verbosity (each level adds a `-v`).
    pub verbosity: u8,
}

/// Result of building a single extension module.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Name the artifact loads under.
    pub module: ModuleName,
    /// Path to the compiled module in the build directory.
    pub artifact_path: Utf8PathBuf,
}

/// Builder for compiling extension descriptors.
pub struct Builder {
    config: BuildConfig,
}

impl Builder {
    /// Create a new builder with the given configuration.
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build a single extension module.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SourceNotFound`] if a declared source does not
    /// resolve to a file, [`BuildError::CompilerNotFound`] if the compiler
    /// cannot be invoked, and [`BuildError::Compilation`] with the compiler's
    /// diagnostics if it rejects the source.
    pub fn build(&self, descriptor: &ExtensionDescriptor) -> Result<BuildResult> {
        let runner = SystemCommandRunner;
        self.build_with(&runner, descriptor)
    }

    fn build_with(
        &self,
        runner: &dyn CommandRunner,
        descriptor: &ExtensionDescriptor,
    ) -> Result<BuildResult> {
        check_sources(descriptor)?;
        fs::create_dir_all(&self.config.build_dir)?;

        let artifact_path = self.artifact_path(descriptor.name());
        let scratch_path = Utf8PathBuf::from(format!("{artifact_path}.tmp"));

        let args = self.compile_args(descriptor, &scratch_path);
        let output = runner
            .run(self.config.compiler.program(), &args)
            .map_err(|e| BuildError::CompilerNotFound {
                program: self.config.compiler.program().to_owned(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            // Leave any previously built artifact untouched.
            let _ = fs::remove_file(&scratch_path);
            return Err(BuildError::Compilation {
                module: descriptor.name().clone(),
                diagnostics: diagnostics_message(&output),
            });
        }

        fs::rename(&scratch_path, &artifact_path)?;

        Ok(BuildResult {
            module: descriptor.name().clone(),
            artifact_path,
        })
    }

    /// Build all given descriptors sequentially.
    ///
    /// The first failure aborts the run with that descriptor's error; earlier
    /// descriptors keep their committed artifacts.
    ///
    /// # Errors
    ///
    /// Returns the first build error encountered.
    pub fn build_all(&self, descriptors: &[ExtensionDescriptor]) -> Result<Vec<BuildResult>> {
        let runner = SystemCommandRunner;
        self.build_all_with(&runner, descriptors)
    }

    fn build_all_with(
        &self,
        runner: &dyn CommandRunner,
        descriptors: &[ExtensionDescriptor],
    ) -> Result<Vec<BuildResult>> {
        let mut results = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let result = self.build_with(runner, descriptor)?;
            results.push(result);
        }

        Ok(results)
    }

    /// Compute the artifact path for a module in the build directory.
    #[must_use]
    pub fn artifact_path(&self, module: &ModuleName) -> Utf8PathBuf {
        self.config.build_dir.join(module_filename(module))
    }

    fn compile_args(&self, descriptor: &ExtensionDescriptor, out_path: &Utf8Path) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-shared".to_owned(),
            "-fPIC".to_owned(),
            "-O2".to_owned(),
        ];

        args.extend(platform_link_args().iter().map(|&s| s.to_owned()));
        args.extend(self.config.compiler.cflags().iter().cloned());

        for _ in 0..self.config.verbosity {
            args.push("-v".to_owned());
        }

        args.push("-o".to_owned());
        args.push(out_path.to_string());
        args.extend(descriptor.sources().iter().map(|s| s.to_string()));

        args
    }
}

/// Return the platform-specific extension-module suffix (including the dot).
///
/// Extension modules carry no `lib` prefix: the host import machinery
/// resolves the bare module name.
#[must_use]
pub const fn module_extension() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        ".pyd"
    }
    #[cfg(not(target_os = "windows"))]
    {
        ".so"
    }
}

/// Compute the artifact filename for a module name.
#[must_use]
pub fn module_filename(module: &ModuleName) -> String {
    format!("{}{}", module.as_str(), module_extension())
}

/// Extra linker arguments required on some platforms.
const fn platform_link_args() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &["-undefined", "dynamic_lookup"]
    }
    #[cfg(not(target_os = "macos"))]
    {
        &[]
    }
}

fn check_sources(descriptor: &ExtensionDescriptor) -> Result<()> {
    for source in descriptor.sources() {
        if !source.is_file() {
            return Err(BuildError::SourceNotFound {
                module: descriptor.name().clone(),
                path: source.clone(),
            });
        }
    }
    Ok(())
}

fn diagnostics_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        "unknown compiler error".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
