//! Library error types
//!
//! The console layer works with `anyhow`; everything below it returns
//! [`LibraryError`] so callers can tell conflicts and lookup misses apart
//! from fatal IO or database failures.

use crate::model::HierarchyNode;
use std::fmt;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LibraryError>;

/// Stage of an import at which it aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    /// Listing the source directory or reading file metadata
    Scan,
    /// Inserting a picture record
    Persist,
    /// Copying a source file to its destination
    Copy,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan => write!(f, "scan"),
            Self::Persist => write!(f, "persist"),
            Self::Copy => write!(f, "copy"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LibraryError {
    /// Bad input shape (empty name, unknown node type, ...)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Duplicate sibling folder name
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// Import aborted; completed side effects are left in place.
    #[error(
        "import failed during {stage} ({records_persisted} record(s) persisted, {files_copied} file(s) copied): {source}"
    )]
    Import {
        stage: ImportStage,
        records_persisted: usize,
        files_copied: usize,
        #[source]
        source: Box<LibraryError>,
    },

    /// The node row exists, the import that followed it did not finish.
    #[error("node '{}' created, but import failed: {source}", .node.name)]
    NodeCreatedImportFailed {
        node: Box<HierarchyNode>,
        #[source]
        source: Box<LibraryError>,
    },
}

impl LibraryError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Short category name, used by the console front end.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::Io { .. } => "io",
            Self::Persistence(_) => "persistence",
            Self::Import { .. } => "import",
            Self::NodeCreatedImportFailed { .. } => "partial",
        }
    }
}

/// Attach a message to `std::io` failures, the way `anyhow::Context` does.
pub trait IoContext<T> {
    fn io_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> IoContext<T> for std::result::Result<T, io::Error> {
    fn io_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|source| LibraryError::io(context(), source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_reports_stage_and_counts() {
        let err = LibraryError::Import {
            stage: ImportStage::Copy,
            records_persisted: 3,
            files_copied: 2,
            source: Box::new(LibraryError::io(
                "copy a -> b",
                io::Error::new(io::ErrorKind::NotFound, "missing"),
            )),
        };

        let message = err.to_string();
        assert!(message.contains("during copy"));
        assert!(message.contains("3 record(s) persisted"));
        assert!(message.contains("2 file(s) copied"));
        assert_eq!(err.kind(), "import");
    }

    #[test]
    fn test_io_context() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = result.io_context(|| "reading /src").unwrap_err();
        assert!(matches!(err, LibraryError::Io { ref context, .. } if context == "reading /src"));
    }
}
