use super::{Picture, UnknownVariant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Folder,
    Album,
}

impl NodeType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Album => "album",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "folder" => Ok(Self::Folder),
            "album" => Ok(Self::Album),
            _ => Err(UnknownVariant {
                kind: "node type",
                value: s.to_string(),
            }),
        }
    }
}

sql_text_enum!(NodeType);

/// A folder or album in the library tree.
///
/// Only `parent_id` is stored; `children` is rebuilt on every read and is
/// always serialized as a list, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: i64,
    /// `None` for root nodes
    pub parent_id: Option<i64>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    /// Album identifier, also the album's directory name on disk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Album root directory, set when the album was created with an import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
    #[serde(default)]
    pub sub_folders: Vec<SubFolder>,
}

impl HierarchyNode {
    #[must_use]
    pub const fn is_album(&self) -> bool {
        matches!(self.node_type, NodeType::Album)
    }

    /// Look up one of this node's subfolders by its role name.
    #[must_use]
    pub fn sub_folder(&self, name: &str) -> Option<&SubFolder> {
        self.sub_folders.iter().find(|sf| sf.name == name)
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(&node.children);
        }
        count
    }
}

/// On-disk storage role owned by an album (e.g. `RAWs`, `JPGs`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubFolder {
    pub id: i64,
    pub node_id: i64,
    pub name: String,
    pub location: PathBuf,
    #[serde(default)]
    pub pictures: Vec<Picture>,
}

/// Subfolder staged for insertion together with its node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubFolder {
    pub name: String,
    pub location: PathBuf,
}

/// Node staged for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode {
    pub parent_id: Option<i64>,
    pub node_type: NodeType,
    pub name: String,
    pub uuid: Option<String>,
    pub location: Option<PathBuf>,
    pub sub_folders: Vec<NewSubFolder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_parse() {
        assert_eq!("folder".parse::<NodeType>().unwrap(), NodeType::Folder);
        assert_eq!(" Album ".parse::<NodeType>().unwrap(), NodeType::Album);
        assert!("collection".parse::<NodeType>().is_err());
    }

    #[test]
    fn test_leaf_serializes_empty_children() {
        let node = HierarchyNode {
            id: 1,
            parent_id: None,
            node_type: NodeType::Folder,
            name: "2024".to_string(),
            uuid: None,
            location: None,
            children: Vec::new(),
            sub_folders: Vec::new(),
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "folder");
        assert_eq!(json["children"], serde_json::json!([]));
        assert!(json["parent_id"].is_null());
        assert!(json.get("uuid").is_none());
        assert!(!node.is_album());
    }
}
