//! SQLite catalog
//!
//! Four tables: `nodes` (self-referencing through `parent_id`),
//! `sub_folders` (owned by a node), `pictures` (owned by a subfolder) and
//! `settings` (a single row with a fixed key).

mod hierarchy;
mod picture;
mod settings;
mod sub_folder;

use crate::error::{IoContext, Result};
use log::info;
use rusqlite::Connection;
use std::path::Path;

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the catalog at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .io_context(|| format!("creating database directory {}", parent.display()))?;
        }

        let conn = Connection::open(path)?;
        info!("Catalog opened at {}", path.display());

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Fresh catalog that lives only as long as the returned value.
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS nodes (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                parent_id   INTEGER REFERENCES nodes(id),
                node_type   TEXT NOT NULL,
                name        TEXT NOT NULL,
                uuid        TEXT UNIQUE,
                location    TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_nodes_parent_id ON nodes(parent_id);

            CREATE TABLE IF NOT EXISTS sub_folders (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                node_id     INTEGER NOT NULL,
                name        TEXT NOT NULL,
                location    TEXT NOT NULL,
                FOREIGN KEY(node_id) REFERENCES nodes(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_sub_folders_node_id ON sub_folders(node_id);

            CREATE TABLE IF NOT EXISTS pictures (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                sub_folder_id   INTEGER NOT NULL,
                picture_index   TEXT NOT NULL,
                file_name       TEXT NOT NULL,
                extension       TEXT NOT NULL,
                picture_type    TEXT NOT NULL,
                location        TEXT NOT NULL,
                FOREIGN KEY(sub_folder_id) REFERENCES sub_folders(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_pictures_sub_folder_id ON pictures(sub_folder_id);
            CREATE INDEX IF NOT EXISTS idx_pictures_type ON pictures(picture_type);

            CREATE TABLE IF NOT EXISTS settings (
                id              INTEGER PRIMARY KEY CHECK (id = 1),
                theme_mode      TEXT NOT NULL DEFAULT 'system',
                library_path    TEXT NOT NULL DEFAULT ''
            );",
        )?;

        Ok(())
    }
}

/// Paths are stored as text.
fn path_to_sql(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
