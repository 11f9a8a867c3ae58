use super::{Store, path_to_sql};
use crate::error::Result;
use crate::model::{HierarchyNode, NewNode, NodeType, SubFolder};
use log::{debug, error};
use rusqlite::{OptionalExtension, Row, params};
use std::collections::HashMap;
use std::path::PathBuf;

const NODE_COLUMNS: &str = "id, parent_id, node_type, name, uuid, location";

fn node_from_row(row: &Row<'_>) -> rusqlite::Result<HierarchyNode> {
    Ok(HierarchyNode {
        id: row.get(0)?,
        parent_id: row.get(1)?,
        node_type: row.get(2)?,
        name: row.get(3)?,
        uuid: row.get(4)?,
        location: row.get::<_, Option<String>>(5)?.map(PathBuf::from),
        children: Vec::new(),
        sub_folders: Vec::new(),
    })
}

impl Store {
    /// Insert a node together with its staged subfolders in one transaction.
    ///
    /// Returns the stored node with ids assigned to it and its subfolders.
    pub fn insert_node(&self, node: &NewNode) -> Result<HierarchyNode> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO nodes (parent_id, node_type, name, uuid, location) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                node.parent_id,
                node.node_type,
                node.name,
                node.uuid,
                node.location.as_deref().map(path_to_sql),
            ],
        )
        .inspect_err(|e| error!("Failed to insert node '{}': {e}", node.name))?;
        let node_id = tx.last_insert_rowid();

        let mut sub_folders = Vec::with_capacity(node.sub_folders.len());
        for staged in &node.sub_folders {
            tx.execute(
                "INSERT INTO sub_folders (node_id, name, location) VALUES (?1, ?2, ?3)",
                params![node_id, staged.name, path_to_sql(&staged.location)],
            )
            .inspect_err(|e| error!("Failed to insert subfolder '{}': {e}", staged.name))?;

            sub_folders.push(SubFolder {
                id: tx.last_insert_rowid(),
                node_id,
                name: staged.name.clone(),
                location: staged.location.clone(),
                pictures: Vec::new(),
            });
        }

        tx.commit()?;
        debug!(
            "Stored {} '{}' (id {node_id}, {} subfolder(s))",
            node.node_type,
            node.name,
            sub_folders.len()
        );

        Ok(HierarchyNode {
            id: node_id,
            parent_id: node.parent_id,
            node_type: node.node_type,
            name: node.name.clone(),
            uuid: node.uuid.clone(),
            location: node.location.clone(),
            children: Vec::new(),
            sub_folders,
        })
    }

    /// Every node, ordered by name, with subfolders and their pictures attached.
    /// `children` is left empty; the tree builder fills it.
    pub fn find_all_nodes(&self) -> Result<Vec<HierarchyNode>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {NODE_COLUMNS} FROM nodes ORDER BY name ASC, id ASC"))?;
        let mut nodes = stmt
            .query_map([], node_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut sub_folders_by_node: HashMap<i64, Vec<SubFolder>> = HashMap::new();
        for sub_folder in self.find_all_sub_folders_with_pictures()? {
            sub_folders_by_node
                .entry(sub_folder.node_id)
                .or_default()
                .push(sub_folder);
        }

        for node in &mut nodes {
            if let Some(sub_folders) = sub_folders_by_node.remove(&node.id) {
                node.sub_folders = sub_folders;
            }
        }

        Ok(nodes)
    }

    /// Single node with its subfolders (without pictures).
    pub fn find_node(&self, id: i64) -> Result<Option<HierarchyNode>> {
        let node = self
            .conn
            .query_row(
                &format!("SELECT {NODE_COLUMNS} FROM nodes WHERE id = ?1"),
                [id],
                node_from_row,
            )
            .optional()?;

        match node {
            Some(mut node) => {
                node.sub_folders = self.find_sub_folders_by_node(node.id)?;
                Ok(Some(node))
            }
            None => Ok(None),
        }
    }

    /// Whether a node with this name and type already sits under `parent_id`
    /// (`None` = root).
    pub fn exists_sibling(
        &self,
        parent_id: Option<i64>,
        name: &str,
        node_type: NodeType,
    ) -> Result<bool> {
        // `IS` matches NULL parents as well as concrete ids
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM nodes WHERE name = ?1 AND node_type = ?2 AND parent_id IS ?3",
            params![name, node_type, parent_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
