//! Shot ordering
//!
//! Puts shot groups in capture order, oldest first.

use super::file_grouper::ShotGroup;
use crate::config::FileTypeTable;
use std::time::SystemTime;

pub struct ShotOrderer {
    file_type_table: FileTypeTable,
}

impl ShotOrderer {
    #[must_use]
    pub const fn new(file_type_table: FileTypeTable) -> Self {
        Self { file_type_table }
    }

    /// Timestamp a group is ordered by.
    ///
    /// The earliest modification time among the group's raw files; groups
    /// without a raw file use their first file by name.
    #[must_use]
    pub fn capture_time(&self, group: &ShotGroup) -> Option<SystemTime> {
        let primary = group
            .files
            .iter()
            .filter(|f| self.file_type_table.is_raw_file(&f.path))
            .map(|f| f.modified)
            .min();

        primary.or_else(|| group.files.first().map(|f| f.modified))
    }

    /// Sort groups ascending by capture time. Equal times fall back to the
    /// base name, and empty groups go last.
    #[must_use]
    pub fn order(&self, groups: Vec<ShotGroup>) -> Vec<ShotGroup> {
        let mut keyed: Vec<(Option<SystemTime>, ShotGroup)> = groups
            .into_iter()
            .map(|group| (self.capture_time(&group), group))
            .collect();

        keyed.sort_by(|(time_a, group_a), (time_b, group_b)| {
            time_a
                .is_none()
                .cmp(&time_b.is_none())
                .then_with(|| time_a.cmp(time_b))
                .then_with(|| group_a.base_name.cmp(&group_b.base_name))
        });

        keyed.into_iter().map(|(_, group)| group).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::picture_importer::file_grouper::SourceFile;
    use crate::config::Config;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    fn orderer() -> ShotOrderer {
        ShotOrderer::new(Config::load_embedded_file_type_table().unwrap())
    }

    fn file(name: &str, extension: &str, secs: u64) -> SourceFile {
        SourceFile {
            name: format!("{name}{extension}"),
            extension: extension.to_string(),
            path: PathBuf::from(format!("/in/{name}{extension}")),
            modified: UNIX_EPOCH + Duration::from_secs(secs),
        }
    }

    fn group(base_name: &str, files: Vec<SourceFile>) -> ShotGroup {
        ShotGroup {
            base_name: base_name.to_string(),
            files,
        }
    }

    #[test]
    fn test_capture_time_uses_raw_file() {
        // JPG written earlier than the raw file must not anchor the group
        let shot = group(
            "IMG_001",
            vec![file("IMG_001", ".ARW", 500), file("IMG_001", ".JPG", 100)],
        );
        assert_eq!(
            orderer().capture_time(&shot),
            Some(UNIX_EPOCH + Duration::from_secs(500))
        );
    }

    #[test]
    fn test_capture_time_min_among_raw_files() {
        let shot = group(
            "IMG_001",
            vec![
                file("IMG_001", ".ARW", 900),
                file("IMG_001", ".DNG", 300),
                file("IMG_001", ".JPG", 100),
            ],
        );
        assert_eq!(
            orderer().capture_time(&shot),
            Some(UNIX_EPOCH + Duration::from_secs(300))
        );
    }

    #[test]
    fn test_capture_time_without_raw_uses_first_file() {
        let shot = group(
            "IMG_001",
            vec![file("IMG_001", ".JPG", 700), file("IMG_001", ".png", 100)],
        );
        assert_eq!(
            orderer().capture_time(&shot),
            Some(UNIX_EPOCH + Duration::from_secs(700))
        );
        assert_eq!(orderer().capture_time(&group("empty", Vec::new())), None);
    }

    #[test]
    fn test_order_oldest_first() {
        let groups = vec![
            group("c", vec![file("c", ".ARW", 300)]),
            group("a", vec![file("a", ".ARW", 200), file("a", ".JPG", 1)]),
            group("b", vec![file("b", ".JPG", 100)]),
        ];

        let ordered: Vec<String> = orderer()
            .order(groups)
            .into_iter()
            .map(|g| g.base_name)
            .collect();
        assert_eq!(ordered, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_order_ties_broken_by_base_name() {
        let groups = vec![
            group("zulu", vec![file("zulu", ".ARW", 100)]),
            group("empty", Vec::new()),
            group("alpha", vec![file("alpha", ".ARW", 100)]),
        ];

        let ordered: Vec<String> = orderer()
            .order(groups)
            .into_iter()
            .map(|g| g.base_name)
            .collect();
        assert_eq!(ordered, vec!["alpha", "zulu", "empty"]);
    }
}
