use std::fs;
use std::path::{Path, PathBuf};

use crate::app::error::{AppError, Result};

/// Get the temp directory for preview documents.
pub fn preview_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("pagesmith");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Write generated HTML to a temp preview file.
/// Returns the preview file path, or None if writing failed.
pub fn write_preview_file(html: &str) -> Option<String> {
    let temp_path = preview_dir().join("preview.html");
    fs::write(&temp_path, html).ok()?;
    Some(temp_path.to_string_lossy().to_string())
}

/// Remove the temp preview HTML file if it exists.
pub fn cleanup_preview_file() {
    let temp_path = preview_dir().join("preview.html");
    let _ = fs::remove_file(temp_path);
}

/// Write a generated document to the given path, creating parent
/// directories as needed.
pub fn write_document(html: &str, path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(AppError::Export(format!(
            "destination is a directory: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, html)?;
    Ok(())
}
