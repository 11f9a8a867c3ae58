//! Picture import component
//!
//! Groups camera files into shots, orders them by capture time, renames
//! them to sequential indices and copies them into an album's subfolders.

mod file_grouper;
mod main;
mod renamer;
mod shot_orderer;

pub use file_grouper::{FileGrouper, ShotGroup, SourceFile, split_file_name};
pub use main::{ImportPipeline, ImportSummary};
pub use renamer::{INDEX_WIDTH, PREVIEW_STORE, Placement, PlacementPlan, RAW_STORE, Renamer};
pub use shot_orderer::ShotOrderer;
