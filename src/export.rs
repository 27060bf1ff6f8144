//! Writing the raster to disk for the save command.

use crate::draw::SurfaceError;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed filename of the saved drawing.
pub const EXPORT_FILENAME: &str = "drawing.png";

/// Errors that can occur while saving a drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode drawing: {0}")]
    Encode(#[from] SurfaceError),

    #[error("Failed to write drawing: {0}")]
    Io(#[from] std::io::Error),
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes PNG bytes to `<directory>/drawing.png`, replacing any earlier save.
///
/// # Returns
/// Path to the saved file
pub fn save_drawing(image_data: &[u8], directory: &Path) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(EXPORT_FILENAME);

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    fs::write(&file_path, image_data)?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn saves_with_fixed_name() {
        let temp = TempDir::new().unwrap();
        let path = save_drawing(b"png-bytes", temp.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "drawing.png");
        assert_eq!(fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn second_save_overwrites_first() {
        let temp = TempDir::new().unwrap();
        save_drawing(b"first", temp.path()).unwrap();
        let path = save_drawing(b"second", temp.path()).unwrap();
        assert_eq!(fs::read(path).unwrap(), b"second");
    }

    #[test]
    fn creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let path = save_drawing(b"x", &nested).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }
}
