//! Library records shared by the store, the importer and the tree builder

use thiserror::Error;

/// A stored or submitted string that names no known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// `ToSql`/`FromSql` for string-backed enums (`as_str` + `FromStr`).
macro_rules! sql_text_enum {
    ($ty:ty) => {
        impl rusqlite::types::ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(rusqlite::types::ToSqlOutput::from(self.as_str()))
            }
        }

        impl rusqlite::types::FromSql for $ty {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| rusqlite::types::FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

mod hierarchy;
mod picture;
mod settings;

pub use hierarchy::{HierarchyNode, NewNode, NewSubFolder, NodeType, SubFolder};
pub use picture::{NewPicture, Picture, PictureType};
pub use settings::{Settings, ThemeMode};
