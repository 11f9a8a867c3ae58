use crate::config::types::{AppOptions, Config, FileTypeTable, OPTIONS_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Extension table embedded at compile time
const FILE_TYPE_TABLE_JSON: &str = include_str!("../data/file_type_table.json");

impl Config {
    pub fn new() -> Result<Self> {
        let file_type_table = Self::load_embedded_file_type_table()?;
        let options = Self::load_options(Path::new(OPTIONS_FILE_NAME))?;

        Ok(Self {
            file_type_table,
            options,
        })
    }

    /// Build a config around explicit options, skipping the options file.
    pub fn with_options(options: AppOptions) -> Result<Self> {
        Ok(Self {
            file_type_table: Self::load_embedded_file_type_table()?,
            options,
        })
    }

    pub fn load_options(path: &Path) -> Result<AppOptions> {
        if !path.exists() {
            return Ok(AppOptions::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse options from {}", path.display()))
    }

    pub fn load_embedded_file_type_table() -> Result<FileTypeTable> {
        serde_json::from_str(FILE_TYPE_TABLE_JSON).context("Failed to parse embedded file type table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PictureType;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_table_classification() {
        let table = Config::load_embedded_file_type_table().unwrap();
        assert_eq!(table.classify(".ARW"), PictureType::Raw);
        assert_eq!(table.classify("nef"), PictureType::Raw);
        assert_eq!(table.classify(".JPG"), PictureType::Preview);
        assert_eq!(table.classify(".xmp"), PictureType::Unknown);
        assert_eq!(table.classify(""), PictureType::Unknown);
        assert!(table.is_raw_file(Path::new("/in/IMG_042.CR2")));
        assert!(!table.is_raw_file(Path::new("/in/IMG_042.jpg")));
    }

    #[test]
    fn test_missing_options_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let options = Config::load_options(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(options, AppOptions::default());
    }

    #[test]
    fn test_partial_options_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(OPTIONS_FILE_NAME);
        fs::write(&path, r#"{ "default_library_root": "/photos" }"#).unwrap();

        let options = Config::load_options(&path).unwrap();
        assert_eq!(options.default_library_root, Path::new("/photos"));
        assert_eq!(options.database_path, AppOptions::default().database_path);
    }
}
