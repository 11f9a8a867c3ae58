//! File grouper
//!
//! Scans a flat source directory and groups files sharing a base name
//! (`IMG_042.ARW` + `IMG_042.JPG`) into one shot.

use crate::error::{IoContext, LibraryError, Result};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// A file found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Original file name, e.g. `IMG_042.ARW`
    pub name: String,
    /// Extension with leading dot and original case, empty when absent
    pub extension: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// One captured moment: every file sharing a base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotGroup {
    /// File name without its final extension
    pub base_name: String,
    /// Sorted by file name
    pub files: Vec<SourceFile>,
}

impl ShotGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Metadata files written by operating systems, never camera output.
const OS_METADATA_FILES: [&str; 4] = [".DS_Store", "Thumbs.db", "desktop.ini", ".localized"];

/// `.DS_Store`, `Thumbs.db` and friends, plus macOS `._*` resource forks.
fn is_os_metadata_file(file_name: &str) -> bool {
    file_name.starts_with("._")
        || OS_METADATA_FILES
            .iter()
            .any(|junk| junk.eq_ignore_ascii_case(file_name))
}

/// Split a file name at its final extension: `a.tar.gz` -> (`a.tar`, `.gz`).
#[must_use]
pub fn split_file_name(file_name: &str) -> (String, String) {
    let path = Path::new(file_name);
    let base_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
        .unwrap_or_default();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    (base_name, extension)
}

#[derive(Debug, Default)]
pub struct FileGrouper;

impl FileGrouper {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Scan `directory` (no recursion) and group its files by base name.
    ///
    /// Any listing or metadata failure aborts the whole scan, as does a file
    /// name that is not valid UTF-8. Subdirectories and OS metadata files
    /// are skipped; other dotfiles are imported like any file. Groups come
    /// back sorted by base name.
    pub fn scan_and_group(&self, directory: &Path) -> Result<Vec<ShotGroup>> {
        info!("Scanning source directory: {}", directory.display());

        let mut groups: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();

        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry.map_err(|e| {
                LibraryError::io(
                    format!("listing source directory {}", directory.display()),
                    io::Error::from(e),
                )
            })?;

            let path = entry.path();

            if path.is_dir() {
                debug!("Skipping subdirectory {}", path.display());
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                return Err(LibraryError::Validation(format!(
                    "file name is not valid UTF-8: {}",
                    path.display()
                )));
            };

            if is_os_metadata_file(&name) {
                info!("Ignoring OS metadata file {name}");
                continue;
            }

            let modified = fs::metadata(path)
                .and_then(|meta| meta.modified())
                .io_context(|| format!("reading file info for {name}"))?;

            let (base_name, extension) = split_file_name(&name);

            groups.entry(base_name).or_default().push(SourceFile {
                name,
                extension,
                path: entry.into_path(),
                modified,
            });
        }

        let result: Vec<ShotGroup> = groups
            .into_iter()
            .map(|(base_name, mut files)| {
                files.sort_by(|a, b| a.name.cmp(&b.name));
                ShotGroup { base_name, files }
            })
            .collect();

        info!(
            "Scan complete, {} file(s) in {} group(s)",
            result.iter().map(ShotGroup::len).sum::<usize>(),
            result.len()
        );

        Ok(result)
    }
}
