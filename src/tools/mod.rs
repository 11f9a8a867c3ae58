mod path_validator;

pub use path_validator::{ensure_directory_exists, validate_directory_exists};
