pub mod load;
pub mod settings_service;
pub mod types;

pub use settings_service::SettingsService;
pub use types::{AppOptions, Config, FileTypeTable, OPTIONS_FILE_NAME};
