//! Error types for the extension build driver.
//!
//! This module defines semantic error variants that explain why a build failed
//! and, where applicable, what the user can do about it. Every error
//! propagates to the top-level invocation; there is no in-process recovery
//! path because nothing downstream can proceed without the artifact.

use crate::module_name::ModuleName;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while declaring or building extension modules.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A descriptor was malformed: empty name, invalid name, or no sources.
    #[error("invalid extension declaration: {reason}")]
    Configuration {
        /// Description of what was wrong with the declaration.
        reason: String,
    },

    /// The manifest file was not found at the expected location.
    #[error("manifest not found at {path}")]
    ManifestNotFound {
        /// Path where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// The manifest file could not be parsed.
    #[error("invalid manifest at {path}: {reason}")]
    InvalidManifest {
        /// Path to the unparseable manifest.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// The C compiler could not be invoked.
    #[error("C compiler {program} not available: {reason}; set CC or pass --cc")]
    CompilerNotFound {
        /// The compiler program that was tried.
        program: String,
        /// Description of why invocation failed.
        reason: String,
    },

    /// A declared source file does not resolve to a readable file.
    #[error("source file {path} for module {module} not found")]
    SourceNotFound {
        /// Module whose source list references the missing file.
        module: ModuleName,
        /// The missing source path.
        path: Utf8PathBuf,
    },

    /// The compiler rejected the source.
    #[error("compilation of module {module} failed:\n{diagnostics}")]
    Compilation {
        /// Module that failed to compile.
        module: ModuleName,
        /// Diagnostic output captured from the compiler.
        diagnostics: String,
    },

    /// The output directory exists but is not writable.
    #[error("output directory {path} is not writable: {reason}")]
    OutputNotWritable {
        /// Path to the non-writable directory.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write command output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiler_not_found_suggests_cc_override() {
        let err = BuildError::CompilerNotFound {
            program: "cc".to_owned(),
            reason: "No such file or directory".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cc"));
        assert!(msg.contains("--cc"));
    }

    #[test]
    fn source_not_found_names_module_and_path() {
        let module = ModuleName::new("pykimuracore").expect("valid name");
        let err = BuildError::SourceNotFound {
            module,
            path: Utf8PathBuf::from("pykimuracore.c"),
        };
        let msg = err.to_string();
        assert!(msg.contains("pykimuracore"));
        assert!(msg.contains("pykimuracore.c"));
    }

    #[test]
    fn compilation_error_carries_diagnostics() {
        let module = ModuleName::new("pykimuracore").expect("valid name");
        let err = BuildError::Compilation {
            module,
            diagnostics: "pykimuracore.c:1: error: expected ';'".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected ';'"));
    }

    #[test]
    fn write_failed_preserves_source() {
        let source = std::io::Error::other("broken pipe");
        let err = BuildError::WriteFailed { source };
        let source_err = std::error::Error::source(&err);
        assert!(source_err.is_some());
    }
}
