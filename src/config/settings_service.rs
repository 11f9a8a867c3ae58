//! Access to the persisted settings singleton

use crate::config::types::AppOptions;
use crate::error::Result;
use crate::model::Settings;
use crate::store::Store;
use log::{error, info};
use std::path::PathBuf;

pub struct SettingsService<'a> {
    store: &'a Store,
    options: &'a AppOptions,
}

impl<'a> SettingsService<'a> {
    pub const fn new(store: &'a Store, options: &'a AppOptions) -> Self {
        Self { store, options }
    }

    /// Current settings; defaults when nothing was saved yet.
    pub fn get_settings(&self) -> Result<Settings> {
        self.store
            .get_settings()
            .inspect_err(|e| error!("Failed to load settings: {e}"))
    }

    /// Replace the stored settings. There is only ever one row.
    pub fn update_settings(&self, settings: &Settings) -> Result<()> {
        self.store
            .update_settings(settings)
            .inspect_err(|e| error!("Failed to update settings: {e}"))?;
        info!(
            "Settings updated - theme: {}, library path: '{}'",
            settings.theme_mode, settings.library_path
        );
        Ok(())
    }

    /// Directory new albums are created under.
    pub fn resolve_library_root(&self) -> Result<PathBuf> {
        let settings = self.get_settings()?;
        let trimmed = settings.library_path.trim();
        if trimmed.is_empty() {
            Ok(self.options.default_library_root.clone())
        } else {
            Ok(PathBuf::from(trimmed))
        }
    }
}
