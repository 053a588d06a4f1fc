//! Manifest loading for declared extensions.
//!
//! The manifest (`extension.toml` by default) is the declarative analogue of
//! a packaging script: a top-level informational version and one
//! `[[extension]]` table per module.
//!
//! ```toml
//! version = "0.1"
//!
//! [[extension]]
//! name = "pykimuracore"
//! sources = ["pykimuracore.c"]
//! ```

use crate::descriptor::ExtensionDescriptor;
use crate::error::{BuildError, Result};
use crate::module_name::ModuleName;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Default manifest filename looked up in the working directory.
pub const DEFAULT_MANIFEST: &str = "extension.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: Option<String>,
    #[serde(default)]
    extension: Vec<ExtensionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExtensionEntry {
    name: String,
    sources: Vec<String>,
    /// Overrides the manifest-level version for this extension.
    version: Option<String>,
}

/// Load a manifest and declare one descriptor per `[[extension]]` table.
///
/// Relative source paths are kept relative; the builder resolves them against
/// the working directory, matching how the original packaging script was run
/// from the directory containing the generated sources.
///
/// # Errors
///
/// Returns [`BuildError::ManifestNotFound`] if `path` does not exist,
/// [`BuildError::InvalidManifest`] if it is not valid TOML or declares no
/// extensions, and [`BuildError::Configuration`] for a malformed declaration.
pub fn load(path: &Utf8Path) -> Result<Vec<ExtensionDescriptor>> {
    if !path.exists() {
        return Err(BuildError::ManifestNotFound {
            path: path.to_owned(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    parse(&contents, path)
}

/// Parse manifest contents into descriptors.
///
/// Split out from [`load`] so tests can exercise parsing without touching the
/// filesystem.
///
/// # Errors
///
/// Same conditions as [`load`], minus the existence check.
pub fn parse(contents: &str, path: &Utf8Path) -> Result<Vec<ExtensionDescriptor>> {
    let manifest: Manifest =
        toml::from_str(contents).map_err(|e| BuildError::InvalidManifest {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;

    if manifest.extension.is_empty() {
        return Err(BuildError::InvalidManifest {
            path: path.to_owned(),
            reason: "manifest declares no [[extension]] tables".to_owned(),
        });
    }

    manifest
        .extension
        .into_iter()
        .map(|entry| declare_entry(entry, manifest.version.as_deref()))
        .collect()
}

/// Resolve the manifest path from an optional CLI override.
#[must_use]
pub fn resolve_path(cli_manifest: Option<&Utf8Path>) -> Utf8PathBuf {
    cli_manifest.map_or_else(|| Utf8PathBuf::from(DEFAULT_MANIFEST), Utf8Path::to_path_buf)
}

/// The directory containing a manifest, used as the default install location.
///
/// A bare relative filename resolves to the current directory.
#[must_use]
pub fn manifest_dir(manifest_path: &Utf8Path) -> Utf8PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_owned(),
        _ => Utf8PathBuf::from("."),
    }
}

fn declare_entry(
    entry: ExtensionEntry,
    manifest_version: Option<&str>,
) -> Result<ExtensionDescriptor> {
    let name = ModuleName::new(entry.name)?;
    let sources = entry.sources.into_iter().map(Utf8PathBuf::from).collect();
    let descriptor = ExtensionDescriptor::declare(name, sources)?;

    let version = entry.version.as_deref().or(manifest_version);
    Ok(match version {
        Some(v) => descriptor.with_version(v),
        None => descriptor,
    })
}
