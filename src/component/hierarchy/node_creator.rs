//! Node creation
//!
//! Validates and stores a new folder or album. Albums get a time-ordered
//! UUID and, when a source directory is given, the standard subfolders on
//! disk followed by an import.

use crate::component::picture_importer::{ImportPipeline, PREVIEW_STORE, RAW_STORE};
use crate::config::FileTypeTable;
use crate::error::{LibraryError, Result};
use crate::model::{HierarchyNode, NewNode, NewSubFolder, NodeType};
use crate::store::Store;
use crate::tools::{ensure_directory_exists, validate_directory_exists};
use log::{error, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use uuid::Uuid;

static REGEX_ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("Invalid regex"));

/// Input for [`NodeCreator::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNodeRequest {
    /// `None` or `0` creates a root node
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Extra subfolders, albums only
    #[serde(default)]
    pub sub_folders: Vec<NewSubFolder>,
    /// Directory to import pictures from, albums only
    #[serde(default)]
    pub source_path: Option<PathBuf>,
}

impl CreateNodeRequest {
    pub fn folder(parent_id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            parent_id,
            name: name.into(),
            node_type: NodeType::Folder,
            sub_folders: Vec::new(),
            source_path: None,
        }
    }

    pub fn album(parent_id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Album,
            ..Self::folder(parent_id, name)
        }
    }

    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }
}

/// Trimmed name, or a validation error when it cannot be used.
pub fn validate_node_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::Validation("name must not be empty".to_string()));
    }
    if REGEX_ILLEGAL_CHARS.is_match(trimmed) {
        return Err(LibraryError::Validation(format!(
            "name contains reserved characters: '{trimmed}'"
        )));
    }
    Ok(trimmed.to_string())
}

pub struct NodeCreator<'a> {
    store: &'a Store,
    file_type_table: FileTypeTable,
    library_root: PathBuf,
    show_progress: bool,
}

impl<'a> NodeCreator<'a> {
    pub fn new(store: &'a Store, file_type_table: FileTypeTable, library_root: PathBuf) -> Self {
        Self {
            store,
            file_type_table,
            library_root,
            show_progress: false,
        }
    }

    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Create a folder or album.
    ///
    /// Folder names are unique among their siblings; album names are not.
    /// Directories are created before the node is stored and are not removed
    /// if a later step fails. If the import fails the node stays and
    /// [`LibraryError::NodeCreatedImportFailed`] carries it.
    pub fn create(&self, request: CreateNodeRequest) -> Result<HierarchyNode> {
        let name = validate_node_name(&request.name)?;
        let parent_id = request.parent_id.filter(|&id| id != 0);
        let source_path = request
            .source_path
            .filter(|path| !path.as_os_str().is_empty());

        if let Some(parent_id) = parent_id {
            if self.store.find_node(parent_id)?.is_none() {
                return Err(LibraryError::NotFound(format!("parent node {parent_id}")));
            }
        }

        let mut new_node = NewNode {
            parent_id,
            node_type: request.node_type,
            name,
            uuid: None,
            location: None,
            sub_folders: request.sub_folders,
        };

        match new_node.node_type {
            NodeType::Folder => self.prepare_folder(&new_node, source_path.is_some())?,
            NodeType::Album => self.prepare_album(&mut new_node, source_path.as_deref())?,
        }

        let node = self.store.insert_node(&new_node)?;
        info!(
            "Created {} '{}' (id {}{})",
            node.node_type,
            node.name,
            node.id,
            node.uuid
                .as_deref()
                .map(|uuid| format!(", uuid {uuid}"))
                .unwrap_or_default()
        );

        if let Some(source_path) = source_path {
            let pipeline = ImportPipeline::new(self.store, self.file_type_table.clone())
                .with_progress(self.show_progress);

            if let Err(e) = pipeline.run(&source_path, &node) {
                error!("Import into '{}' failed: {e}", node.name);
                return Err(LibraryError::NodeCreatedImportFailed {
                    node: Box::new(node),
                    source: Box::new(e),
                });
            }
        }

        Ok(node)
    }

    fn prepare_folder(&self, node: &NewNode, has_source: bool) -> Result<()> {
        if !node.sub_folders.is_empty() {
            return Err(LibraryError::Validation(
                "only albums can own subfolders".to_string(),
            ));
        }
        if has_source {
            return Err(LibraryError::Validation(
                "only albums can import pictures".to_string(),
            ));
        }
        if self
            .store
            .exists_sibling(node.parent_id, &node.name, NodeType::Folder)?
        {
            info!("Rejected duplicate folder '{}'", node.name);
            return Err(LibraryError::Conflict(format!(
                "a folder named '{}' already exists here",
                node.name
            )));
        }
        Ok(())
    }

    /// Assign the album UUID; with a source directory, stage the standard
    /// subfolders and create every staged subfolder on disk.
    fn prepare_album(&self, node: &mut NewNode, source_path: Option<&Path>) -> Result<()> {
        let uuid = Uuid::now_v7().to_string();

        if let Some(source_path) = source_path {
            validate_directory_exists(source_path)?;

            let album_root = self.library_root.join(&uuid);
            for role in [RAW_STORE, PREVIEW_STORE] {
                if !node.sub_folders.iter().any(|sf| sf.name == role) {
                    node.sub_folders.push(NewSubFolder {
                        name: role.to_string(),
                        location: album_root.join(role),
                    });
                }
            }

            ensure_directory_exists(&album_root)
                .inspect_err(|e| error!("Failed to create album directory: {e}"))?;
            for sub_folder in &node.sub_folders {
                ensure_directory_exists(&sub_folder.location)
                    .inspect_err(|e| error!("Failed to create subfolder {}: {e}", sub_folder.name))?;
            }

            node.location = Some(album_root);
        }

        node.uuid = Some(uuid);
        Ok(())
    }
}
