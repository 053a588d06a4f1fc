//! Artifact placement for built extension modules.
//!
//! Built modules are copied from the build directory to the directory the
//! host import mechanism searches: the manifest's directory by default, or an
//! explicit install directory.

use crate::builder::BuildResult;
use crate::error::{BuildError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Handles placement of built modules into the import path.
pub struct Stager {
    install_dir: Utf8PathBuf,
}

impl Stager {
    /// Create a new stager targeting the given install directory.
    #[must_use]
    pub fn new(install_dir: Utf8PathBuf) -> Self {
        Self { install_dir }
    }

    /// Ensure the install directory exists and is writable.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or is not writable.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.install_dir)?;

        // Verify writability by attempting to create a probe file.
        let probe_path = self.install_dir.join(".pyext-build-probe");
        match fs::write(&probe_path, b"probe") {
            Ok(()) => {
                let _ = fs::remove_file(&probe_path);
                Ok(())
            }
            Err(e) => Err(BuildError::OutputNotWritable {
                path: self.install_dir.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Copy one built module into the install directory, keeping its filename.
    ///
    /// The module is copied through a scratch name and renamed into place
    /// only once the copy completes, so a mid-copy failure never leaves a
    /// truncated file at the loadable location.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy operation fails.
    pub fn stage(&self, build_result: &BuildResult) -> Result<Utf8PathBuf> {
        let filename = build_result
            .artifact_path
            .file_name()
            .ok_or_else(|| BuildError::OutputNotWritable {
                path: build_result.artifact_path.clone(),
                reason: "artifact path has no filename".to_owned(),
            })?;
        let dest_path = self.install_dir.join(filename);

        if dest_path == build_result.artifact_path {
            // Building directly into the install directory; nothing to copy.
            return Ok(dest_path);
        }

        let scratch_path = Utf8PathBuf::from(format!("{dest_path}.tmp"));
        if let Err(e) = fs::copy(&build_result.artifact_path, &scratch_path) {
            let _ = fs::remove_file(&scratch_path);
            return Err(BuildError::OutputNotWritable {
                path: dest_path,
                reason: format!("failed to copy {}: {e}", build_result.artifact_path),
            });
        }
        fs::rename(&scratch_path, &dest_path)?;

        Ok(dest_path)
    }

    /// Stage all built modules.
    ///
    /// # Errors
    ///
    /// Returns an error if any staging operation fails.
    pub fn stage_all(&self, build_results: &[BuildResult]) -> Result<Vec<Utf8PathBuf>> {
        build_results.iter().map(|r| self.stage(r)).collect()
    }

    /// The install directory modules are placed into.
    #[must_use]
    pub fn install_dir(&self) -> &Utf8Path {
        &self.install_dir
    }
}
