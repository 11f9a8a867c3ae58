use super::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Classification of an imported file by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PictureType {
    Raw,
    Preview,
    Unknown,
}

impl PictureType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Preview => "preview",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PictureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PictureType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "preview" => Ok(Self::Preview),
            "unknown" => Ok(Self::Unknown),
            _ => Err(UnknownVariant {
                kind: "picture type",
                value: s.to_string(),
            }),
        }
    }
}

sql_text_enum!(PictureType);

/// A stored picture. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub id: i64,
    pub sub_folder_id: i64,
    /// Zero-padded shot index, e.g. `000001`
    pub index: String,
    /// Renamed file name, e.g. `000001.ARW`
    pub file_name: String,
    /// Original extension including the dot, case preserved
    pub extension: String,
    #[serde(rename = "type")]
    pub picture_type: PictureType,
    pub location: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPicture {
    pub sub_folder_id: i64,
    pub index: String,
    pub file_name: String,
    pub extension: String,
    #[serde(rename = "type")]
    pub picture_type: PictureType,
    pub location: PathBuf,
}
