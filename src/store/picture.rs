use super::{Store, path_to_sql};
use crate::error::{LibraryError, Result};
use crate::model::{NewPicture, Picture};
use log::error;
use rusqlite::{OptionalExtension, Row, params};
use std::path::PathBuf;

const PICTURE_COLUMNS: &str =
    "p.id, p.sub_folder_id, p.picture_index, p.file_name, p.extension, p.picture_type, p.location";

fn picture_from_row(row: &Row<'_>) -> rusqlite::Result<Picture> {
    Ok(Picture {
        id: row.get(0)?,
        sub_folder_id: row.get(1)?,
        index: row.get(2)?,
        file_name: row.get(3)?,
        extension: row.get(4)?,
        picture_type: row.get(5)?,
        location: PathBuf::from(row.get::<_, String>(6)?),
    })
}

impl Store {
    pub fn insert_picture(&self, picture: &NewPicture) -> Result<Picture> {
        self.conn
            .execute(
                "INSERT INTO pictures (sub_folder_id, picture_index, file_name, extension, picture_type, location)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    picture.sub_folder_id,
                    picture.index,
                    picture.file_name,
                    picture.extension,
                    picture.picture_type,
                    path_to_sql(&picture.location),
                ],
            )
            .inspect_err(|e| error!("Failed to insert picture '{}': {e}", picture.file_name))?;

        Ok(Picture {
            id: self.conn.last_insert_rowid(),
            sub_folder_id: picture.sub_folder_id,
            index: picture.index.clone(),
            file_name: picture.file_name.clone(),
            extension: picture.extension.clone(),
            picture_type: picture.picture_type,
            location: picture.location.clone(),
        })
    }

    pub fn find_all_pictures(&self) -> Result<Vec<Picture>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PICTURE_COLUMNS} FROM pictures p ORDER BY p.picture_index, p.id"
        ))?;
        let pictures = stmt
            .query_map([], picture_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(pictures)
    }

    pub fn find_picture(&self, id: i64) -> Result<Picture> {
        self.conn
            .query_row(
                &format!("SELECT {PICTURE_COLUMNS} FROM pictures p WHERE p.id = ?1"),
                [id],
                picture_from_row,
            )
            .optional()?
            .ok_or_else(|| LibraryError::NotFound(format!("picture {id}")))
    }

    /// Pictures of every subfolder owned by `node_id`.
    pub fn find_pictures_by_node(&self, node_id: i64) -> Result<Vec<Picture>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PICTURE_COLUMNS} FROM pictures p
             JOIN sub_folders sf ON sf.id = p.sub_folder_id
             WHERE sf.node_id = ?1
             ORDER BY p.picture_index, p.id"
        ))?;
        let pictures = stmt
            .query_map([node_id], picture_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(pictures)
    }
}
