use super::Store;
use crate::error::Result;
use crate::model::SubFolder;
use rusqlite::Row;
use std::collections::HashMap;
use std::path::PathBuf;

fn sub_folder_from_row(row: &Row<'_>) -> rusqlite::Result<SubFolder> {
    Ok(SubFolder {
        id: row.get(0)?,
        node_id: row.get(1)?,
        name: row.get(2)?,
        location: PathBuf::from(row.get::<_, String>(3)?),
        pictures: Vec::new(),
    })
}

impl Store {
    pub fn find_sub_folders_by_node(&self, node_id: i64) -> Result<Vec<SubFolder>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, node_id, name, location FROM sub_folders WHERE node_id = ?1 ORDER BY id",
        )?;
        let sub_folders = stmt
            .query_map([node_id], sub_folder_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sub_folders)
    }

    /// All subfolders with their pictures, in insertion order.
    pub(super) fn find_all_sub_folders_with_pictures(&self) -> Result<Vec<SubFolder>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, node_id, name, location FROM sub_folders ORDER BY id")?;
        let mut sub_folders = stmt
            .query_map([], sub_folder_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut pictures_by_sub_folder: HashMap<i64, Vec<_>> = HashMap::new();
        for picture in self.find_all_pictures()? {
            pictures_by_sub_folder
                .entry(picture.sub_folder_id)
                .or_default()
                .push(picture);
        }

        for sub_folder in &mut sub_folders {
            if let Some(pictures) = pictures_by_sub_folder.remove(&sub_folder.id) {
                sub_folder.pictures = pictures;
            }
        }

        Ok(sub_folders)
    }
}
