//! End-to-end checks through the public API: node creation, album import,
//! tree assembly and the settings singleton.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use picture_library::component::HierarchyManager;
use picture_library::component::hierarchy::CreateNodeRequest;
use picture_library::config::{AppOptions, Config, SettingsService};
use picture_library::error::LibraryError;
use picture_library::model::{PictureType, Settings, ThemeMode};
use picture_library::store::Store;
use tempfile::TempDir;

fn test_config(library: &Path) -> Config {
    Config::with_options(AppOptions {
        database_path: library.join("catalog.db"),
        default_library_root: library.join("albums"),
    })
    .unwrap()
}

fn write_with_mtime(dir: &Path, name: &str, secs: u64) {
    let path = dir.join(name);
    fs::write(&path, name).unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

#[test]
fn test_album_import_round_trip() {
    let library = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();

    // raw file anchors shot A, so B comes first despite A's early JPG
    write_with_mtime(source.path(), "A.ARW", 2_000);
    write_with_mtime(source.path(), "A.JPG", 100);
    write_with_mtime(source.path(), "B.JPG", 1_000);
    write_with_mtime(source.path(), "C.xmp", 3_000);
    write_with_mtime(source.path(), ".DS_Store", 10);

    let store = Store::open_in_memory().unwrap();
    let config = test_config(library.path());
    let manager = HierarchyManager::new(&store, &config);

    let year = manager
        .create_node(CreateNodeRequest::folder(None, "2024"))
        .unwrap();
    let album = manager
        .create_node(
            CreateNodeRequest::album(Some(year.id), "2024-06 Miami").with_source_path(source.path()),
        )
        .unwrap();

    let uuid = album.uuid.clone().unwrap();
    let album_root = library.path().join("albums").join(&uuid);
    assert_eq!(album.location.as_deref(), Some(album_root.as_path()));

    assert_eq!(fs::read_to_string(album_root.join("JPGs/000001.JPG")).unwrap(), "B.JPG");
    assert_eq!(fs::read_to_string(album_root.join("RAWs/000002.ARW")).unwrap(), "A.ARW");
    assert_eq!(fs::read_to_string(album_root.join("JPGs/000002.JPG")).unwrap(), "A.JPG");
    assert_eq!(fs::read_to_string(album_root.join("JPGs/000003.xmp")).unwrap(), "C.xmp");
    assert_eq!(fs::read_dir(album_root.join("RAWs")).unwrap().count(), 1);
    assert_eq!(fs::read_dir(album_root.join("JPGs")).unwrap().count(), 3);

    let pictures = store.find_pictures_by_node(album.id).unwrap();
    let stored: Vec<(&str, &str, PictureType)> = pictures
        .iter()
        .map(|p| (p.index.as_str(), p.file_name.as_str(), p.picture_type))
        .collect();
    assert_eq!(
        stored,
        vec![
            ("000001", "000001.JPG", PictureType::Preview),
            ("000002", "000002.ARW", PictureType::Raw),
            ("000002", "000002.JPG", PictureType::Preview),
            ("000003", "000003.xmp", PictureType::Unknown),
        ]
    );

    // source files are copied, never moved
    assert!(source.path().join("A.ARW").is_file());
}

#[test]
fn test_dotfiles_are_imported() {
    let library = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    write_with_mtime(source.path(), "IMG_1.JPG", 100);
    write_with_mtime(source.path(), ".IMG_2.ARW", 200);
    write_with_mtime(source.path(), ".DS_Store", 50);

    let store = Store::open_in_memory().unwrap();
    let config = test_config(library.path());
    let album = HierarchyManager::new(&store, &config)
        .create_node(CreateNodeRequest::album(None, "Hidden").with_source_path(source.path()))
        .unwrap();

    let names: Vec<String> = store
        .find_pictures_by_node(album.id)
        .unwrap()
        .into_iter()
        .map(|p| p.file_name)
        .collect();
    assert_eq!(names, vec!["000001.JPG", "000002.ARW"]);
}

#[test]
fn test_tree_serializes_children_as_lists() {
    let library = TempDir::new().unwrap();
    let store = Store::open_in_memory().unwrap();
    let config = test_config(library.path());
    let manager = HierarchyManager::new(&store, &config);

    let year = manager
        .create_node(CreateNodeRequest::folder(None, "2024"))
        .unwrap();
    manager
        .create_node(CreateNodeRequest::album(Some(year.id), "Oslo"))
        .unwrap();

    let roots = manager.get_full_hierarchy().unwrap();
    let json = serde_json::to_value(&roots).unwrap();

    assert_eq!(json[0]["name"], "2024");
    assert_eq!(json[0]["type"], "folder");
    assert_eq!(json[0]["parent_id"], serde_json::Value::Null);
    assert_eq!(json[0]["children"][0]["name"], "Oslo");
    assert_eq!(json[0]["children"][0]["type"], "album");
    assert_eq!(json[0]["children"][0]["children"], serde_json::json!([]));
}

#[test]
fn test_empty_library_tree() {
    let library = TempDir::new().unwrap();
    let store = Store::open_in_memory().unwrap();
    let config = test_config(library.path());

    let roots = HierarchyManager::new(&store, &config)
        .get_full_hierarchy()
        .unwrap();
    assert_eq!(serde_json::to_string(&roots).unwrap(), "[]");
}

#[test]
fn test_duplicate_folder_conflict() {
    let library = TempDir::new().unwrap();
    let store = Store::open_in_memory().unwrap();
    let config = test_config(library.path());
    let manager = HierarchyManager::new(&store, &config);

    let first = manager
        .create_node(CreateNodeRequest::folder(None, "Trips"))
        .unwrap();
    let err = manager
        .create_node(CreateNodeRequest::folder(None, "Trips"))
        .unwrap_err();
    assert!(matches!(err, LibraryError::Conflict(_)));

    // same name under another parent, or as an album, is fine
    manager
        .create_node(CreateNodeRequest::folder(Some(first.id), "Trips"))
        .unwrap();
    manager
        .create_node(CreateNodeRequest::album(None, "Trips"))
        .unwrap();
    manager
        .create_node(CreateNodeRequest::album(None, "Trips"))
        .unwrap();

    let roots = manager.get_full_hierarchy().unwrap();
    assert_eq!(roots.len(), 3);
}

#[test]
fn test_missing_source_creates_nothing() {
    let library = TempDir::new().unwrap();
    let store = Store::open_in_memory().unwrap();
    let config = test_config(library.path());
    let manager = HierarchyManager::new(&store, &config);

    let err = manager
        .create_node(
            CreateNodeRequest::album(None, "Ghost").with_source_path(library.path().join("nope")),
        )
        .unwrap_err();

    assert!(matches!(err, LibraryError::Validation(_)));
    assert!(manager.get_full_hierarchy().unwrap().is_empty());
    assert!(!library.path().join("albums").exists());
}

#[test]
fn test_settings_singleton_persists() {
    let library = TempDir::new().unwrap();
    let config = test_config(library.path());

    {
        let store = Store::open(&config.options.database_path).unwrap();
        let service = SettingsService::new(&store, &config.options);
        assert_eq!(service.get_settings().unwrap(), Settings::default());

        service
            .update_settings(&Settings {
                theme_mode: ThemeMode::Light,
                library_path: "/tmp/first".to_string(),
            })
            .unwrap();
        service
            .update_settings(&Settings {
                theme_mode: ThemeMode::Dark,
                library_path: "/srv/photos".to_string(),
            })
            .unwrap();
    }

    let store = Store::open(&config.options.database_path).unwrap();
    let service = SettingsService::new(&store, &config.options);
    let settings = service.get_settings().unwrap();

    assert_eq!(settings.theme_mode, ThemeMode::Dark);
    assert_eq!(settings.library_path, "/srv/photos");
    assert_eq!(
        service.resolve_library_root().unwrap(),
        Path::new("/srv/photos")
    );
}
