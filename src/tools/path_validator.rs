use crate::error::{IoContext, LibraryError, Result};
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(LibraryError::Validation(format!(
            "path does not exist: {}",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(LibraryError::Validation(format!(
            "path is not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .io_context(|| format!("creating directory {}", path.display()))?;
    }
    Ok(())
}
