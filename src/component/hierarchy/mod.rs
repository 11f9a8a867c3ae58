//! Folder/album hierarchy component
//!
//! Creates nodes and assembles the library tree for display.

mod main;
mod node_creator;
mod tree_builder;

pub use main::HierarchyManager;
pub use node_creator::{CreateNodeRequest, NodeCreator, validate_node_name};
pub use tree_builder::HierarchyTreeBuilder;
