//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Contents of a file read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    Text(String),
    /// The bytes are not valid UTF-8.
    Undecodable(String),
}

/// Read a file, separating "not text" from "could not read".
///
/// A decode failure is not an error: callers decide whether to skip the file.
pub fn read_text_file(path: &Path, operation: &str) -> Result<TextContent> {
    let bytes = fs::read(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(TextContent::Text(text)),
        Err(e) => Ok(TextContent::Undecodable(e.utf8_error().to_string())),
    }
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// Readers always see either the old content or the new content, never a
/// partial write. A symlink is resolved first so the link stays in place and
/// its target is replaced; an existing file keeps its permissions.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    let parent = target.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = target.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation)))
    })?;

    if let Some(permissions) = permissions {
        fs::set_permissions(&tmp_path, permissions).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("{} (permissions)", operation)))
        })?;
    }

    fs::rename(&tmp_path, &target)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (rename)", operation))))?;

    Ok(())
}
