use crate::model::PictureType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options file looked up in the working directory.
pub const OPTIONS_FILE_NAME: &str = "picture_library.json";

/// Extension classes used to route imported files.
///
/// Entries are lowercase and carry the leading dot (`.arw`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTypeTable {
    #[serde(rename = "RAW_FILE")]
    pub raw_file: Vec<String>,
    #[serde(rename = "PREVIEW_FILE")]
    pub preview_file: Vec<String>,
}

impl FileTypeTable {
    /// Classify an extension (with or without the leading dot, any case).
    #[must_use]
    pub fn classify(&self, extension: &str) -> PictureType {
        if extension.is_empty() {
            return PictureType::Unknown;
        }
        let normalized = if extension.starts_with('.') {
            extension.to_lowercase()
        } else {
            format!(".{}", extension.to_lowercase())
        };

        if self.raw_file.contains(&normalized) {
            PictureType::Raw
        } else if self.preview_file.contains(&normalized) {
            PictureType::Preview
        } else {
            PictureType::Unknown
        }
    }

    #[must_use]
    pub fn is_raw_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.classify(ext) == PictureType::Raw)
    }
}

/// Application options, read from [`OPTIONS_FILE_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// SQLite catalog file
    pub database_path: PathBuf,
    /// Library root used when the stored settings leave it empty
    pub default_library_root: PathBuf,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("picture_library.db"),
            default_library_root: PathBuf::from("library"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file_type_table: FileTypeTable,
    pub options: AppOptions,
}
