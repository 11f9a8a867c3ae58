//! Library components
//!
//! Each submodule implements one piece of the library workflow together
//! with the helpers only it uses.

pub mod hierarchy;
pub mod picture_importer;

pub use hierarchy::HierarchyManager;
pub use picture_importer::ImportPipeline;
