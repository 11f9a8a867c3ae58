//! Hierarchy manager
//!
//! Entry point used by the front end: resolves the library root from the
//! stored settings, then delegates to the node creator or the tree builder.

use super::node_creator::{CreateNodeRequest, NodeCreator};
use super::tree_builder::HierarchyTreeBuilder;
use crate::config::{Config, SettingsService};
use crate::error::Result;
use crate::model::{HierarchyNode, NodeType};
use crate::store::Store;
use log::error;

pub struct HierarchyManager<'a> {
    store: &'a Store,
    config: &'a Config,
    tree_builder: HierarchyTreeBuilder,
    show_progress: bool,
}

impl<'a> HierarchyManager<'a> {
    pub const fn new(store: &'a Store, config: &'a Config) -> Self {
        Self {
            store,
            config,
            tree_builder: HierarchyTreeBuilder::new(),
            show_progress: false,
        }
    }

    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn create_node(&self, request: CreateNodeRequest) -> Result<HierarchyNode> {
        let library_root =
            SettingsService::new(self.store, &self.config.options).resolve_library_root()?;

        NodeCreator::new(
            self.store,
            self.config.file_type_table.clone(),
            library_root,
        )
        .with_progress(self.show_progress)
        .create(request)
    }

    /// Root nodes with children attached, siblings sorted by name.
    pub fn get_full_hierarchy(&self) -> Result<Vec<HierarchyNode>> {
        let nodes = self
            .store
            .find_all_nodes()
            .inspect_err(|e| error!("Failed to load hierarchy: {e}"))?;
        Ok(self.tree_builder.build(nodes))
    }

    /// Flat list of nodes of one type, sorted by name.
    pub fn list_nodes(&self, node_type: NodeType) -> Result<Vec<HierarchyNode>> {
        Ok(self
            .store
            .find_all_nodes()?
            .into_iter()
            .filter(|n| n.node_type == node_type)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppOptions;
    use crate::model::Settings;
    use std::fs;
    use tempfile::TempDir;

    fn config(library: &TempDir) -> Config {
        Config::with_options(AppOptions {
            database_path: library.path().join("catalog.db"),
            default_library_root: library.path().join("default"),
        })
        .unwrap()
    }

    #[test]
    fn test_full_hierarchy_nests_children() {
        let library = TempDir::new().unwrap();
        let store = Store::open_in_memory().unwrap();
        let config = config(&library);
        let manager = HierarchyManager::new(&store, &config);

        let year = manager.create_node(CreateNodeRequest::folder(None, "2024")).unwrap();
        manager
            .create_node(CreateNodeRequest::album(Some(year.id), "Oslo"))
            .unwrap();
        manager
            .create_node(CreateNodeRequest::album(Some(year.id), "Miami"))
            .unwrap();
        manager.create_node(CreateNodeRequest::folder(None, "2023")).unwrap();

        let roots = manager.get_full_hierarchy().unwrap();
        let root_names: Vec<&str> = roots.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(root_names, vec!["2023", "2024"]);

        let albums: Vec<&str> = roots[1].children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(albums, vec!["Miami", "Oslo"]);
        assert_eq!(manager.list_nodes(NodeType::Album).unwrap().len(), 2);
    }

    #[test]
    fn test_album_root_follows_settings() {
        let library = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("DSC_0001.NEF"), "raw").unwrap();

        let store = Store::open_in_memory().unwrap();
        let config = config(&library);
        let manager = HierarchyManager::new(&store, &config);

        let first = manager
            .create_node(CreateNodeRequest::album(None, "Default").with_source_path(source.path()))
            .unwrap();
        assert!(first.location.unwrap().starts_with(library.path().join("default")));

        let custom = library.path().join("custom");
        SettingsService::new(&store, &config.options)
            .update_settings(&Settings {
                library_path: custom.to_string_lossy().into_owned(),
                ..Settings::default()
            })
            .unwrap();

        let second = manager
            .create_node(CreateNodeRequest::album(None, "Custom").with_source_path(source.path()))
            .unwrap();
        let second_root = second.location.unwrap();
        assert!(second_root.starts_with(&custom));
        assert!(second_root.join("RAWs").join("000001.NEF").is_file());
    }
}
