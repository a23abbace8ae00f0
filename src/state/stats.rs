use crate::compare::{Collection, DiffMap};

/// Total `(added, removed)` line counts: whole-file adds/removes plus every patch.
pub fn compute_totals(collection: &Collection, diff_map: &DiffMap) -> (usize, usize) {
    diff_map.values().fold(
        (collection.added_count, collection.removed_count),
        |(added, removed), patch| (added + patch.added_count, removed + patch.removed_count),
    )
}
