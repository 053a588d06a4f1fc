//! List command implementation.
//!
//! Shows the extensions a manifest declares and whether each one's artifact
//! is currently present in the install directory, in human-readable or JSON
//! form.

use camino::Utf8Path;
use log::trace;
use serde::Serialize;
use std::io::Write;

use crate::builder::module_filename;
use crate::cli::ListArgs;
use crate::descriptor::ExtensionDescriptor;
use crate::error::{BuildError, Result};
use crate::manifest;

/// Status of one declared extension.
#[derive(Debug, Serialize)]
pub struct ExtensionStatus {
    /// Declared module name.
    pub name: String,
    /// Informational version, if declared.
    pub version: Option<String>,
    /// Declared source files.
    pub sources: Vec<String>,
    /// Whether the artifact is present in the install directory.
    pub built: bool,
    /// Path the artifact loads from when built.
    pub artifact: String,
}

#[derive(Debug, Serialize)]
struct ExtensionListJson<'a> {
    extensions: &'a [ExtensionStatus],
}

/// Lists declared extensions and their build state.
///
/// Output is written to stdout (human-readable by default, JSON with
/// `--json`).
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or writing to stdout
/// fails.
pub fn run_list(args: &ListArgs, stdout: &mut dyn Write) -> Result<()> {
    let manifest_path = manifest::resolve_path(args.manifest.as_deref());
    let descriptors = manifest::load(&manifest_path)?;

    let default_dir = manifest::manifest_dir(&manifest_path);
    let install_dir = args.install_dir.as_deref().unwrap_or(&default_dir);

    let statuses: Vec<ExtensionStatus> = descriptors
        .iter()
        .map(|descriptor| status_of(descriptor, install_dir))
        .collect();

    let output = if args.json {
        format_json(&statuses)
    } else {
        format_human(&statuses)
    };

    writeln!(stdout, "{output}").map_err(|e| BuildError::WriteFailed { source: e })?;

    Ok(())
}

fn status_of(descriptor: &ExtensionDescriptor, install_dir: &Utf8Path) -> ExtensionStatus {
    let artifact = install_dir.join(module_filename(descriptor.name()));
    let built = artifact.is_file();
    trace!("artifact {artifact}: built={built}");

    ExtensionStatus {
        name: descriptor.name().as_str().to_owned(),
        version: descriptor.version().map(str::to_owned),
        sources: descriptor.sources().iter().map(ToString::to_string).collect(),
        built,
        artifact: artifact.into_string(),
    }
}

/// Format extension statuses for human-readable output.
#[must_use]
pub fn format_human(statuses: &[ExtensionStatus]) -> String {
    let mut output = String::from("Declared extensions:\n");

    for status in statuses {
        let state = if status.built { "built" } else { "not built" };
        let version = status
            .version
            .as_deref()
            .map_or(String::new(), |v| format!(" v{v}"));

        output.push_str(&format!("\n{}{version} [{state}]\n", status.name));
        output.push_str(&format!("  artifact: {}\n", status.artifact));
        output.push_str("  sources:\n");
        for source in &status.sources {
            output.push_str(&format!("    - {source}\n"));
        }
    }

    output
}

/// Format extension statuses as JSON.
#[must_use]
pub fn format_json(statuses: &[ExtensionStatus]) -> String {
    let json_data = ExtensionListJson {
        extensions: statuses,
    };

    serde_json::to_string_pretty(&json_data).unwrap_or_else(|_| "{}".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn status(name: &str, built: bool) -> ExtensionStatus {
        ExtensionStatus {
            name: name.to_owned(),
            version: Some("0.1".to_owned()),
            sources: vec![format!("{name}.c")],
            built,
            artifact: format!("./{name}.so"),
        }
    }

    #[test]
    fn format_human_shows_build_state() {
        let output = format_human(&[status("pykimuracore", false)]);
        assert!(output.contains("pykimuracore v0.1 [not built]"));
        assert!(output.contains("- pykimuracore.c"));
    }

    #[test]
    fn format_json_is_parseable() {
        let json = format_json(&[status("pykimuracore", true)]);
        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("output should be valid JSON");
        assert_eq!(parsed["extensions"][0]["name"], "pykimuracore");
        assert_eq!(parsed["extensions"][0]["built"], true);
    }

    #[test]
    fn run_list_reads_manifest_and_checks_artifacts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_owned()).expect("UTF-8 temp path");
        let manifest_path = root.join("extension.toml");
        std::fs::write(
            &manifest_path,
            "[[extension]]\nname = \"pykimuracore\"\nsources = [\"pykimuracore.c\"]\n",
        )
        .expect("write manifest");
        std::fs::write(root.join("pykimuracore.so"), b"ELF").expect("write artifact");

        let args = ListArgs {
            json: true,
            manifest: Some(manifest_path),
            install_dir: None,
        };
        let mut stdout = Vec::new();

        run_list(&args, &mut stdout).expect("list should succeed");

        let text = String::from_utf8(stdout).expect("stdout should be UTF-8");
        let parsed: serde_json::Value =
            serde_json::from_str(&text).expect("output should be valid JSON");
        assert_eq!(parsed["extensions"][0]["built"], true);
    }

    #[test]
    fn run_list_fails_on_missing_manifest() {
        let args = ListArgs {
            json: false,
            manifest: Some(Utf8PathBuf::from("/nonexistent/extension.toml")),
            install_dir: None,
        };
        let mut stdout = Vec::new();

        let err = run_list(&args, &mut stdout).expect_err("missing manifest should fail");
        assert!(matches!(err, BuildError::ManifestNotFound { .. }));
    }
}
