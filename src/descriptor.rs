//! Extension descriptors: the declarative unit of a build.
//!
//! A descriptor binds a module name to the ordered source files that produce
//! it. Declaration is pure value construction; source existence is only
//! checked when the descriptor is built.

use crate::error::{BuildError, Result};
use crate::module_name::ModuleName;
use camino::Utf8PathBuf;

/// An immutable declaration of one extension module.
///
/// Constructed once per build invocation via [`ExtensionDescriptor::declare`]
/// and consumed by the builder; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    name: ModuleName,
    sources: Vec<Utf8PathBuf>,
    version: Option<String>,
}

impl ExtensionDescriptor {
    /// Declare an extension from a name and an ordered, non-empty source list.
    ///
    /// Declaration performs no filesystem checks; a source path that does not
    /// exist is reported at build time, not here.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Configuration`] if `sources` is empty.
    pub fn declare(name: ModuleName, sources: Vec<Utf8PathBuf>) -> Result<Self> {
        if sources.is_empty() {
            return Err(BuildError::Configuration {
                reason: format!("extension {name} declares no source files"),
            });
        }

        Ok(Self {
            name,
            sources,
            version: None,
        })
    }

    /// Attach an informational version string.
    ///
    /// The version is not used for dependency resolution; it is carried
    /// through to listings only.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The module name the artifact will load under.
    #[must_use]
    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    /// The declared source files, in compilation order.
    #[must_use]
    pub fn sources(&self) -> &[Utf8PathBuf] {
        &self.sources
    }

    /// The informational version, if one was declared.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
