use super::Store;
use crate::error::Result;
use crate::model::Settings;
use rusqlite::{OptionalExtension, params};

/// Fixed key of the settings row
const SETTINGS_ID: i64 = 1;

impl Store {
    /// Stored settings, or defaults when the row was never written.
    pub fn get_settings(&self) -> Result<Settings> {
        let settings = self
            .conn
            .query_row(
                "SELECT theme_mode, library_path FROM settings WHERE id = ?1",
                [SETTINGS_ID],
                |row| {
                    Ok(Settings {
                        theme_mode: row.get(0)?,
                        library_path: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(settings.unwrap_or_default())
    }

    /// Overwrite the settings row, creating it on first use.
    pub fn update_settings(&self, settings: &Settings) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (id, theme_mode, library_path) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                theme_mode = excluded.theme_mode,
                library_path = excluded.library_path",
            params![SETTINGS_ID, settings.theme_mode, settings.library_path],
        )?;
        Ok(())
    }
}
