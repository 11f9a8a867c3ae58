//! Import pipeline
//!
//! Coordinates grouping, ordering and placement, then writes a picture
//! record and copies the file for every placement, in that order.

use super::file_grouper::FileGrouper;
use super::renamer::Renamer;
use super::shot_orderer::ShotOrderer;
use crate::config::FileTypeTable;
use crate::error::{ImportStage, IoContext, LibraryError, Result};
use crate::model::HierarchyNode;
use crate::store::Store;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of a completed import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of shots (distinct base names)
    pub groups: usize,
    /// Pictures stored and copied
    pub pictures_imported: usize,
    /// Files without a target subfolder
    pub skipped: usize,
    pub elapsed: Duration,
}

pub struct ImportPipeline<'a> {
    store: &'a Store,
    file_grouper: FileGrouper,
    shot_orderer: ShotOrderer,
    renamer: Renamer,
    show_progress: bool,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(store: &'a Store, file_type_table: FileTypeTable) -> Self {
        Self {
            store,
            file_grouper: FileGrouper::new(),
            shot_orderer: ShotOrderer::new(file_type_table.clone()),
            renamer: Renamer::new(file_type_table),
            show_progress: false,
        }
    }

    /// Draw a progress bar on the terminal while copying.
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Import every file of `source_dir` into the subfolders of `node`.
    ///
    /// Stops at the first failure. Records and copies completed before it
    /// stay in place; the returned [`LibraryError::Import`] says how many.
    pub fn run(&self, source_dir: &Path, node: &HierarchyNode) -> Result<ImportSummary> {
        let start = Instant::now();
        info!(
            "Starting import from {} into '{}'",
            source_dir.display(),
            node.name
        );

        let groups = self
            .file_grouper
            .scan_and_group(source_dir)
            .map_err(|e| abort(ImportStage::Scan, 0, 0, e))?;
        let group_count = groups.len();

        let ordered = self.shot_orderer.order(groups);
        let plan = self.renamer.plan(&ordered, &node.sub_folders);

        let progress_bar = self.progress_bar(plan.placements.len());
        let mut records_persisted = 0;
        let mut files_copied = 0;

        for placement in &plan.placements {
            self.store
                .insert_picture(&placement.to_new_picture())
                .map_err(|e| abort(ImportStage::Persist, records_persisted, files_copied, e))?;
            records_persisted += 1;

            fs::copy(&placement.source.path, &placement.destination)
                .io_context(|| {
                    format!(
                        "copying {} -> {}",
                        placement.source.path.display(),
                        placement.destination.display()
                    )
                })
                .map_err(|e| abort(ImportStage::Copy, records_persisted, files_copied, e))?;
            files_copied += 1;

            debug!(
                "Imported {} as {}",
                placement.source.name, placement.new_file_name
            );
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        let summary = ImportSummary {
            groups: group_count,
            pictures_imported: files_copied,
            skipped: plan.skipped.len(),
            elapsed: start.elapsed(),
        };

        info!(
            "Import complete - album: '{}', shots: {}, pictures: {}, skipped: {}, took {:.2}s",
            node.name,
            summary.groups,
            summary.pictures_imported,
            summary.skipped,
            summary.elapsed.as_secs_f64()
        );

        Ok(summary)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress_bar.set_message("Importing...");
        progress_bar
    }
}

fn abort(
    stage: ImportStage,
    records_persisted: usize,
    files_copied: usize,
    source: LibraryError,
) -> LibraryError {
    error!(
        "Import aborted during {stage} after {records_persisted} record(s) and {files_copied} copy(ies): {source}"
    );
    LibraryError::Import {
        stage,
        records_persisted,
        files_copied,
        source: Box::new(source),
    }
}
