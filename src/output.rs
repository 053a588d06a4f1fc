//! User-facing output formatting for the build driver.

use camino::Utf8Path;
use std::io::Write;

/// Format the success message shown after staging completes.
#[must_use]
pub fn success_message(count: usize, install_dir: &Utf8Path) -> String {
    let noun = if count == 1 { "module" } else { "modules" };
    format!("Built {count} extension {noun} into {install_dir}")
}

/// Write a line to the given stream, ignoring write failures.
///
/// Progress output is best-effort; a closed stderr must not abort a build.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    let _ = writeln!(stderr, "{message}");
}
