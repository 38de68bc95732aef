//! Persists finished documents under the output directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `text` to `base/relative` and return the full path.
///
/// The base directory must exist; missing intermediate directories are the
/// caller's job. Nothing is retried.
pub fn write_document(base: &Path, relative: &Path, text: &str) -> Result<PathBuf> {
    let path = base.join(relative);
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
