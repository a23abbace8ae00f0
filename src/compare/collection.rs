use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::patch::DiffJob;
use super::text::is_path_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Added,
    Removed,
    Modified,
}

impl EntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Added => "A",
            EntryStatus::Removed => "D",
            EntryStatus::Modified => "M",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the compared roots, `/`-separated.
    pub key: String,
    pub status: EntryStatus,
    pub left: Option<PathBuf>,
    pub right: Option<PathBuf>,
    /// Line count of a whole-file add or remove; `None` for binaries and modifications.
    pub line_count: Option<usize>,
}

/// Every difference between two comparison targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Sorted by key.
    pub entries: Vec<Entry>,
    /// Lines contributed by whole-file additions.
    pub added_count: usize,
    /// Lines contributed by whole-file removals.
    pub removed_count: usize,
}

impl Collection {
    pub fn new(mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        let mut added_count = 0;
        let mut removed_count = 0;
        for entry in &entries {
            match entry.status {
                EntryStatus::Added => added_count += entry.line_count.unwrap_or(0),
                EntryStatus::Removed => removed_count += entry.line_count.unwrap_or(0),
                EntryStatus::Modified => {}
            }
        }
        Self {
            entries,
            added_count,
            removed_count,
        }
    }

    /// Visit every entry in key order.
    pub fn apply<F: FnMut(&Entry)>(&self, mut f: F) {
        for entry in &self.entries {
            f(entry);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One job per modified entry, before any text filtering.
    pub fn diff_candidates(&self) -> Vec<DiffJob> {
        let mut jobs = Vec::new();
        self.apply(|entry| {
            if entry.status != EntryStatus::Modified {
                return;
            }
            if let (Some(left), Some(right)) = (&entry.left, &entry.right) {
                jobs.push(DiffJob {
                    key: entry.key.clone(),
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        });
        jobs
    }
}

pub struct CollectionBuilder;

impl CollectionBuilder {
    /// Compare two files or two directory trees.
    pub fn build(left: &Path, right: &Path) -> Result<Collection> {
        let left_meta = std::fs::metadata(left)
            .with_context(|| format!("Could not access {}", left.display()))?;
        let right_meta = std::fs::metadata(right)
            .with_context(|| format!("Could not access {}", right.display()))?;

        match (left_meta.is_dir(), right_meta.is_dir()) {
            (true, true) => Self::compare_dirs(left, right),
            (false, false) => Self::compare_files(left, right),
            _ => bail!(
                "Cannot compare a file with a directory: {} vs {}",
                left.display(),
                right.display()
            ),
        }
    }

    fn compare_files(left: &Path, right: &Path) -> Result<Collection> {
        let mut entries = Vec::new();
        if !same_contents(left, right)? {
            let key = right
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| right.display().to_string());
            entries.push(Entry {
                key,
                status: EntryStatus::Modified,
                left: Some(left.to_path_buf()),
                right: Some(right.to_path_buf()),
                line_count: None,
            });
        }
        Ok(Collection::new(entries))
    }

    fn compare_dirs(left: &Path, right: &Path) -> Result<Collection> {
        let left_files = walk(left)?;
        let mut right_files = walk(right)?;
        let mut entries = Vec::new();

        for (key, left_path) in left_files {
            match right_files.remove(&key) {
                Some(right_path) => {
                    if !same_contents(&left_path, &right_path)? {
                        entries.push(Entry {
                            key,
                            status: EntryStatus::Modified,
                            left: Some(left_path),
                            right: Some(right_path),
                            line_count: None,
                        });
                    }
                }
                None => {
                    let line_count = text_line_count(&left_path)?;
                    entries.push(Entry {
                        key,
                        status: EntryStatus::Removed,
                        left: Some(left_path),
                        right: None,
                        line_count,
                    });
                }
            }
        }

        for (key, right_path) in right_files {
            let line_count = text_line_count(&right_path)?;
            entries.push(Entry {
                key,
                status: EntryStatus::Added,
                left: None,
                right: Some(right_path),
                line_count,
            });
        }

        tracing::debug!(
            "Compared {} and {}: {} differing entries",
            left.display(),
            right.display(),
            entries.len()
        );
        Ok(Collection::new(entries))
    }
}

/// All regular files under `root`, keyed by relative path.
fn walk(root: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut files = BTreeMap::new();
    for result in WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build()
    {
        let entry = result.with_context(|| format!("Error walking {}", root.display()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        files.insert(relative_key(rel), path.to_path_buf());
    }
    Ok(files)
}

fn relative_key(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn same_contents(left: &Path, right: &Path) -> Result<bool> {
    let left_len = std::fs::metadata(left)
        .with_context(|| format!("Could not access {}", left.display()))?
        .len();
    let right_len = std::fs::metadata(right)
        .with_context(|| format!("Could not access {}", right.display()))?
        .len();
    if left_len != right_len {
        return Ok(false);
    }
    let a = std::fs::read(left).with_context(|| format!("Could not read {}", left.display()))?;
    let b = std::fs::read(right).with_context(|| format!("Could not read {}", right.display()))?;
    Ok(a == b)
}

fn text_line_count(path: &Path) -> Result<Option<usize>> {
    if !is_path_text(path) {
        return Ok(None);
    }
    let bytes = std::fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
    Ok(Some(String::from_utf8_lossy(&bytes).lines().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn status_of(c: &Collection, key: &str) -> Option<EntryStatus> {
        c.entries.iter().find(|e| e.key == key).map(|e| e.status)
    }

    fn write(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_compare_dirs_classifies_entries() {
        let left = tempfile::tempdir().unwrap();
        let right = tempfile::tempdir().unwrap();
        write(left.path(), "same.txt", b"x\n");
        write(right.path(), "same.txt", b"x\n");
        write(left.path(), "src/changed.rs", b"fn a() {}\n");
        write(right.path(), "src/changed.rs", b"fn b() {}\n");
        write(left.path(), "old.txt", b"1\n2\n");
        write(right.path(), "new.txt", b"1\n2\n3\n");

        let c = CollectionBuilder::build(left.path(), right.path()).unwrap();
        let keys: Vec<_> = c.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["new.txt", "old.txt", "src/changed.rs"]);
        assert_eq!(status_of(&c, "new.txt").unwrap(), EntryStatus::Added);
        assert_eq!(status_of(&c, "old.txt").unwrap(), EntryStatus::Removed);
        assert_eq!(status_of(&c, "src/changed.rs").unwrap(), EntryStatus::Modified);
        assert!(status_of(&c, "same.txt").is_none());
        assert_eq!(c.added_count, 3);
        assert_eq!(c.removed_count, 2);
    }

    #[test]
    fn test_binary_add_contributes_no_lines() {
        let left = tempfile::tempdir().unwrap();
        let right = tempfile::tempdir().unwrap();
        write(right.path(), "image.bin", &[0, 1, 2, b'\n', 0]);

        let c = CollectionBuilder::build(left.path(), right.path()).unwrap();
        assert_eq!(c.entries.len(), 1);
        assert_eq!(c.entries[0].line_count, None);
        assert_eq!(c.added_count, 0);
    }

    #[test]
    fn test_compare_two_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", b"one\n");
        write(dir.path(), "b.txt", b"two\n");

        let c = CollectionBuilder::build(&dir.path().join("a.txt"), &dir.path().join("b.txt"))
            .unwrap();
        assert_eq!(c.entries.len(), 1);
        assert_eq!(c.entries[0].key, "b.txt");
        assert_eq!(c.entries[0].status, EntryStatus::Modified);
    }

    #[test]
    fn test_identical_files_yield_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", b"same\n");
        write(dir.path(), "b.txt", b"same\n");

        let c = CollectionBuilder::build(&dir.path().join("a.txt"), &dir.path().join("b.txt"))
            .unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn test_file_vs_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", b"x");
        assert!(CollectionBuilder::build(&dir.path().join("a.txt"), dir.path()).is_err());
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CollectionBuilder::build(&dir.path().join("nope"), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Could not access"));
    }

    #[test]
    fn test_diff_candidates_are_modifications_only() {
        let entries = vec![
            Entry {
                key: "a.rs".into(),
                status: EntryStatus::Modified,
                left: Some("l/a.rs".into()),
                right: Some("r/a.rs".into()),
                line_count: None,
            },
            Entry {
                key: "b.bin".into(),
                status: EntryStatus::Modified,
                left: Some("l/b.bin".into()),
                right: Some("r/b.bin".into()),
                line_count: None,
            },
            Entry {
                key: "c.rs".into(),
                status: EntryStatus::Added,
                left: None,
                right: Some("r/c.rs".into()),
                line_count: Some(4),
            },
        ];
        let c = Collection::new(entries);
        let keys: Vec<_> = c.diff_candidates().into_iter().map(|j| j.key).collect();
        assert_eq!(keys, vec!["a.rs", "b.bin"]);
        assert_eq!(c.added_count, 4);
    }
}
