pub mod collection;
pub mod patch;
pub mod text;

use anyhow::Result;
use std::path::Path;

pub use collection::{Collection, CollectionBuilder, EntryStatus};
pub use patch::{DiffJob, DiffLine, DiffLineOrigin, DiffMap, PatchBuilder};

/// The services background jobs call into. Methods run on the blocking pool.
pub trait DiffBackend: Send + Sync + 'static {
    fn build_collection(&self, left: &Path, right: &Path) -> Result<Collection>;
    fn is_text(&self, path: &Path) -> bool;
    fn build_diffs(&self, jobs: &[DiffJob], context_lines: usize) -> Result<DiffMap>;
}

/// Compares real files on disk.
pub struct FsBackend;

impl DiffBackend for FsBackend {
    fn build_collection(&self, left: &Path, right: &Path) -> Result<Collection> {
        CollectionBuilder::build(left, right)
    }

    fn is_text(&self, path: &Path) -> bool {
        text::is_path_text(path)
    }

    fn build_diffs(&self, jobs: &[DiffJob], context_lines: usize) -> Result<DiffMap> {
        PatchBuilder::build_all(jobs, context_lines)
    }
}
