use crate::compare::{Collection, DiffLine, DiffMap, EntryStatus};

/// What a single display row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    FileHeader {
        key: String,
        status: EntryStatus,
        added: usize,
        removed: usize,
    },
    HunkHeader(String),
    Line(DiffLine),
    Note(String),
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Index into the collection's entries.
    pub file: usize,
    pub kind: RowKind,
}

/// A place in the diff that survives rebuilding the rows: a file plus a row offset within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub key: String,
    pub offset: usize,
}

/// Every row of the rendered diff, plus where each file begins.
#[derive(Debug, Clone, Default)]
pub struct DisplayMap {
    pub rows: Vec<DisplayRow>,
    /// `(entry key, first row)` in display order.
    pub file_starts: Vec<(String, usize)>,
}

impl DisplayMap {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The file and offset of `row`.
    pub fn position_at(&self, row: usize) -> Option<Position> {
        let file = self.rows.get(row)?.file;
        let (key, start) = self.file_starts.get(file)?;
        Some(Position {
            key: key.clone(),
            offset: row - start,
        })
    }

    /// Row for `pos`, clamped to the end of its file. `None` if the file is gone.
    pub fn row_for(&self, pos: &Position) -> Option<usize> {
        let idx = self.file_starts.iter().position(|(k, _)| *k == pos.key)?;
        let start = self.file_starts[idx].1;
        let end = self
            .file_starts
            .get(idx + 1)
            .map(|(_, s)| *s)
            .unwrap_or(self.rows.len());
        Some((start + pos.offset).min(end.saturating_sub(1)))
    }

    pub fn next_file_row(&self, from: usize) -> Option<usize> {
        self.file_starts
            .iter()
            .map(|(_, s)| *s)
            .find(|&s| s > from)
    }

    pub fn prev_file_row(&self, from: usize) -> Option<usize> {
        self.file_starts
            .iter()
            .map(|(_, s)| *s)
            .rev()
            .find(|&s| s < from)
    }
}

/// Lay out every collection entry, pulling hunks from `diff_map` when present.
pub fn build_display_map(collection: &Collection, diff_map: Option<&DiffMap>) -> DisplayMap {
    let mut map = DisplayMap::default();

    for (file, entry) in collection.entries.iter().enumerate() {
        map.file_starts.push((entry.key.clone(), map.rows.len()));
        let mut push = |kind: RowKind| map.rows.push(DisplayRow { file, kind });

        let patch = diff_map.and_then(|m| m.get(&entry.key));
        let (added, removed) = match (entry.status, patch) {
            (EntryStatus::Added, _) => (entry.line_count.unwrap_or(0), 0),
            (EntryStatus::Removed, _) => (0, entry.line_count.unwrap_or(0)),
            (EntryStatus::Modified, Some(p)) => (p.added_count, p.removed_count),
            (EntryStatus::Modified, None) => (0, 0),
        };
        push(RowKind::FileHeader {
            key: entry.key.clone(),
            status: entry.status,
            added,
            removed,
        });

        match entry.status {
            EntryStatus::Added | EntryStatus::Removed => {
                let verb = if entry.status == EntryStatus::Added {
                    "Added"
                } else {
                    "Removed"
                };
                let note = match entry.line_count {
                    Some(n) => format!("{verb} file, {n} lines"),
                    None => format!("{verb} binary file"),
                };
                push(RowKind::Note(note));
            }
            EntryStatus::Modified => match (diff_map, patch) {
                (None, _) => push(RowKind::Note("Computing diff\u{2026}".to_string())),
                (Some(_), None) => push(RowKind::Note("Binary files differ".to_string())),
                (Some(_), Some(p)) if p.is_empty() => {
                    push(RowKind::Note("No textual changes".to_string()))
                }
                (Some(_), Some(p)) => {
                    for hunk in &p.hunks {
                        push(RowKind::HunkHeader(hunk.header()));
                        for line in &hunk.lines {
                            push(RowKind::Line(line.clone()));
                        }
                    }
                }
            },
        }
        push(RowKind::Blank);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::collection::Entry;
    use crate::compare::PatchBuilder;

    fn entry(key: &str, status: EntryStatus, line_count: Option<usize>) -> Entry {
        Entry {
            key: key.to_string(),
            status,
            left: Some(format!("l/{key}").into()),
            right: Some(format!("r/{key}").into()),
            line_count,
        }
    }

    fn sample() -> (Collection, DiffMap) {
        let collection = Collection::new(vec![
            entry("a.txt", EntryStatus::Modified, None),
            entry("b.bin", EntryStatus::Modified, None),
            entry("c.txt", EntryStatus::Added, Some(4)),
        ]);
        let mut map = DiffMap::new();
        map.insert(
            "a.txt".to_string(),
            PatchBuilder::diff_text("1\n2\n3\n", "1\nX\n3\n", 1),
        );
        (collection, map)
    }

    #[test]
    fn test_rows_per_file() {
        let (collection, map) = sample();
        let dm = build_display_map(&collection, Some(&map));

        // a.txt: header, hunk header, 4 lines, blank
        assert_eq!(dm.file_starts[0], ("a.txt".to_string(), 0));
        assert_eq!(dm.file_starts[1].1, 7);
        assert!(matches!(
            &dm.rows[0].kind,
            RowKind::FileHeader { added: 1, removed: 1, .. }
        ));
        assert_eq!(
            dm.rows[8].kind,
            RowKind::Note("Binary files differ".to_string())
        );
        assert_eq!(
            dm.rows[11].kind,
            RowKind::Note("Added file, 4 lines".to_string())
        );
    }

    #[test]
    fn test_pending_diff_shows_placeholder() {
        let (collection, _) = sample();
        let dm = build_display_map(&collection, None);
        assert_eq!(
            dm.rows[1].kind,
            RowKind::Note("Computing diff\u{2026}".to_string())
        );
    }

    #[test]
    fn test_position_round_trip_through_rebuild() {
        let (collection, map) = sample();
        let dm = build_display_map(&collection, Some(&map));
        let pos = dm.position_at(9).unwrap();
        assert_eq!(
            pos,
            Position {
                key: "b.bin".to_string(),
                offset: 2
            }
        );

        // Fewer rows for a.txt now; b.bin moves up but the position follows it.
        let mut smaller = map.clone();
        smaller.insert(
            "a.txt".to_string(),
            PatchBuilder::diff_text("1\n2\n3\n", "1\nX\n3\n", 0),
        );
        let rebuilt = build_display_map(&collection, Some(&smaller));
        let row = rebuilt.row_for(&pos).unwrap();
        assert_eq!(rebuilt.position_at(row), Some(pos));
    }

    #[test]
    fn test_row_for_clamps_to_file_end() {
        let (collection, map) = sample();
        let dm = build_display_map(&collection, Some(&map));
        let pos = Position {
            key: "a.txt".to_string(),
            offset: 100,
        };
        assert_eq!(dm.row_for(&pos), Some(6));
        let gone = Position {
            key: "zzz".to_string(),
            offset: 0,
        };
        assert_eq!(dm.row_for(&gone), None);
    }

    #[test]
    fn test_file_navigation() {
        let (collection, map) = sample();
        let dm = build_display_map(&collection, Some(&map));
        assert_eq!(dm.next_file_row(0), Some(7));
        assert_eq!(dm.next_file_row(7), Some(10));
        assert_eq!(dm.next_file_row(10), None);
        assert_eq!(dm.prev_file_row(8), Some(7));
        assert_eq!(dm.prev_file_row(0), None);
    }
}
