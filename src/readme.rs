// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

/// README synchronization with change detection.
///
/// The rendered document replaces the README wholesale; the write is skipped
/// when the file already matches so scheduled runs do not produce no-op
/// commits.
use std::{fs, path::Path};

use tracing::info;

use crate::error::{Error, io_error};

/// Writes `content` to `path` unless the file already matches.
///
/// A missing README is created. Returns whether a write happened, so the
/// caller can tell the invoking workflow whether a commit is warranted.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read or written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use octostats::sync_readme;
///
/// # fn main() -> Result<(), octostats::Error> {
/// let changed = sync_readme(Path::new("README.md"), "# GitHub Stats\n")?;
/// if changed {
///     println!("README refreshed");
/// }
/// # Ok(())
/// # }
/// ```
pub fn sync_readme(path: &Path, content: &str) -> Result<bool, Error> {
    if path.exists() {
        let existing = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
        if existing == content {
            info!("README at {} unchanged, skipping write", path.display());
            return Ok(false);
        }
    }

    fs::write(path, content).map_err(|source| io_error(path, source))?;
    info!("README at {} updated", path.display());

    Ok(true)
}
