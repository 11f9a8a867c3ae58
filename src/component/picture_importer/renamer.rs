//! Renaming and placement
//!
//! Gives every ordered shot a sequential index and decides where each of
//! its files lands inside the album.

use super::file_grouper::{ShotGroup, SourceFile};
use crate::config::FileTypeTable;
use crate::model::{NewPicture, PictureType, SubFolder};
use log::warn;
use std::path::PathBuf;

/// Subfolder receiving raw files
pub const RAW_STORE: &str = "RAWs";
/// Subfolder receiving previews and everything unclassified
pub const PREVIEW_STORE: &str = "JPGs";

/// Minimum width of an index string
pub const INDEX_WIDTH: usize = 6;

/// Where one source file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub source: SourceFile,
    pub index: String,
    pub new_file_name: String,
    pub picture_type: PictureType,
    pub sub_folder_id: i64,
    pub destination: PathBuf,
}

impl Placement {
    #[must_use]
    pub fn to_new_picture(&self) -> NewPicture {
        NewPicture {
            sub_folder_id: self.sub_folder_id,
            index: self.index.clone(),
            file_name: self.new_file_name.clone(),
            extension: self.source.extension.clone(),
            picture_type: self.picture_type,
            location: self.destination.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PlacementPlan {
    pub placements: Vec<Placement>,
    /// Files dropped because their target subfolder does not exist
    pub skipped: Vec<SourceFile>,
}

pub struct Renamer {
    file_type_table: FileTypeTable,
}

impl Renamer {
    #[must_use]
    pub const fn new(file_type_table: FileTypeTable) -> Self {
        Self { file_type_table }
    }

    /// 1-based position to index string: `1` -> `000001`. Wider numbers
    /// keep all their digits.
    #[must_use]
    pub fn format_index(position: usize) -> String {
        format!("{position:0width$}", width = INDEX_WIDTH)
    }

    /// Subfolder name a picture type is routed to.
    #[must_use]
    pub const fn target_store(picture_type: PictureType) -> &'static str {
        match picture_type {
            PictureType::Raw => RAW_STORE,
            PictureType::Preview | PictureType::Unknown => PREVIEW_STORE,
        }
    }

    /// Plan names and destinations for `groups`, already in capture order.
    ///
    /// Files whose target subfolder is missing from `sub_folders` are
    /// logged and skipped; the remaining files are still placed.
    #[must_use]
    pub fn plan(&self, groups: &[ShotGroup], sub_folders: &[SubFolder]) -> PlacementPlan {
        let mut plan = PlacementPlan::default();

        for (i, group) in groups.iter().enumerate() {
            let index = Self::format_index(i + 1);

            for file in &group.files {
                let picture_type = self.file_type_table.classify(&file.extension);
                let store_name = Self::target_store(picture_type);

                let Some(sub_folder) = sub_folders.iter().find(|sf| sf.name == store_name) else {
                    warn!(
                        "Target subfolder '{store_name}' not found, skipping {}",
                        file.name
                    );
                    plan.skipped.push(file.clone());
                    continue;
                };

                let new_file_name = format!("{index}{}", file.extension);
                let destination = sub_folder.location.join(&new_file_name);

                plan.placements.push(Placement {
                    source: file.clone(),
                    index: index.clone(),
                    new_file_name,
                    picture_type,
                    sub_folder_id: sub_folder.id,
                    destination,
                });
            }
        }

        plan
    }
}
