use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Diff results keyed by the collection entry key of each file.
pub type DiffMap = HashMap<String, Patch>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineOrigin {
    Context,
    Addition,
    Deletion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub origin: DiffLineOrigin,
    pub old_lineno: Option<u32>,
    pub new_lineno: Option<u32>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// 1-based first line of the old range.
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    pub lines: Vec<DiffLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub hunks: Vec<Hunk>,
    pub added_count: usize,
    pub removed_count: usize,
}

impl Hunk {
    /// Unified-diff style header. An empty range reports the line before it.
    pub fn header(&self) -> String {
        let old_pos = if self.old_lines == 0 {
            self.old_start - 1
        } else {
            self.old_start
        };
        let new_pos = if self.new_lines == 0 {
            self.new_start - 1
        } else {
            self.new_start
        };
        format!(
            "@@ -{old_pos},{} +{new_pos},{} @@",
            self.old_lines, self.new_lines
        )
    }
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

/// One modified file pair to diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffJob {
    pub key: String,
    pub left: PathBuf,
    pub right: PathBuf,
}

pub struct PatchBuilder;

impl PatchBuilder {
    /// Diff every job, keyed by job key. Fails on the first unreadable file.
    pub fn build_all(jobs: &[DiffJob], context_lines: usize) -> Result<DiffMap> {
        let mut map = DiffMap::with_capacity(jobs.len());
        for job in jobs {
            let patch = Self::diff_files(&job.left, &job.right, context_lines)?;
            map.insert(job.key.clone(), patch);
        }
        Ok(map)
    }

    pub fn diff_files(left: &Path, right: &Path, context_lines: usize) -> Result<Patch> {
        let old = read_lossy(left)?;
        let new = read_lossy(right)?;
        Ok(Self::diff_text(&old, &new, context_lines))
    }

    pub fn diff_text(old: &str, new: &str, context_lines: usize) -> Patch {
        let diff = TextDiff::from_lines(old, new);
        let mut patch = Patch::default();

        for group in diff.grouped_ops(context_lines) {
            let (Some(first), Some(last)) = (group.first(), group.last()) else {
                continue;
            };
            let old_start = first.old_range().start;
            let new_start = first.new_range().start;
            let old_lines = last.old_range().end - old_start;
            let new_lines = last.new_range().end - new_start;

            let mut hunk = Hunk {
                old_start: old_start as u32 + 1,
                old_lines: old_lines as u32,
                new_start: new_start as u32 + 1,
                new_lines: new_lines as u32,
                lines: Vec::new(),
            };

            for op in &group {
                for change in diff.iter_changes(op) {
                    let origin = match change.tag() {
                        ChangeTag::Equal => DiffLineOrigin::Context,
                        ChangeTag::Insert => {
                            patch.added_count += 1;
                            DiffLineOrigin::Addition
                        }
                        ChangeTag::Delete => {
                            patch.removed_count += 1;
                            DiffLineOrigin::Deletion
                        }
                    };
                    hunk.lines.push(DiffLine {
                        origin,
                        old_lineno: change.old_index().map(|i| i as u32 + 1),
                        new_lineno: change.new_index().map(|i| i as u32 + 1),
                        content: change.value().trim_end_matches(['\n', '\r']).to_string(),
                    });
                }
            }
            patch.hunks.push(hunk);
        }

        patch
    }
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
