//! JSON snapshots of API responses

use crate::error::{Result, ResultExt};
use serde::Serialize;
use std::path::Path;

/// Write `value` as pretty-printed JSON, creating parent directories as needed
///
/// Existing files are overwritten.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .context(format!("Failed to create directory {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).context(format!("Failed to write snapshot {}", path.display()))
}
