use crate::compare::{Collection, DiffMap};
use crate::display_map::{DisplayMap, Position};

/// Effectively unlimited context: every unchanged line is shown.
pub const ALL_CONTEXT: usize = 999_999;

pub struct DiffState {
    pub collection: Option<Collection>,
    pub diff_map: Option<DiffMap>,
    /// Derived from `collection` and `diff_map`; recomputed on every replacement.
    pub added_count: usize,
    pub removed_count: usize,
    pub context_lines: usize,
    pub original_context_lines: usize,
    pub loading: bool,

    pub display: DisplayMap,
    /// First visible display row.
    pub scroll_pos: usize,
    pub viewport_height: usize,
    /// Where to put the view once the pending diff arrives.
    pub restore_position: Option<Position>,
    pub needs_redraw: bool,
}

impl DiffState {
    pub fn new(context_lines: usize) -> Self {
        Self {
            collection: None,
            diff_map: None,
            added_count: 0,
            removed_count: 0,
            context_lines,
            original_context_lines: context_lines,
            loading: false,
            display: DisplayMap::default(),
            scroll_pos: 0,
            viewport_height: 20,
            restore_position: None,
            needs_redraw: true,
        }
    }

    pub fn max_scroll(&self) -> usize {
        self.display.len().saturating_sub(self.viewport_height)
    }

    pub fn scroll_to(&mut self, row: usize) {
        let row = row.min(self.max_scroll());
        if row != self.scroll_pos {
            self.scroll_pos = row;
            self.needs_redraw = true;
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll_pos.saturating_add_signed(delta);
        self.scroll_to(target);
    }

    pub fn current_position(&self) -> Option<Position> {
        self.display.position_at(self.scroll_pos)
    }

    /// Move the view to `pos`, if its file is still displayed.
    pub fn set_current_position(&mut self, pos: &Position) {
        if let Some(row) = self.display.row_for(pos) {
            self.scroll_to(row);
        }
    }

    /// Label of the current file and its index, for the status line.
    pub fn current_file(&self) -> Option<(usize, &str)> {
        let row = self.display.rows.get(self.scroll_pos)?;
        let (key, _) = self.display.file_starts.get(row.file)?;
        Some((row.file, key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_map::{DisplayRow, RowKind};

    fn state_with_rows(n: usize, files: &[(&str, usize)]) -> DiffState {
        let mut state = DiffState::new(3);
        state.viewport_height = 10;
        state.display.file_starts = files.iter().map(|(k, s)| (k.to_string(), *s)).collect();
        state.display.rows = (0..n)
            .map(|i| DisplayRow {
                file: files.iter().rposition(|(_, s)| *s <= i).unwrap_or(0),
                kind: RowKind::Blank,
            })
            .collect();
        state
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = state_with_rows(25, &[("a", 0)]);
        state.scroll_by(100);
        assert_eq!(state.scroll_pos, 15);
        state.scroll_by(-100);
        assert_eq!(state.scroll_pos, 0);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut state = state_with_rows(5, &[("a", 0)]);
        state.scroll_by(3);
        assert_eq!(state.scroll_pos, 0);
    }

    #[test]
    fn test_current_position_and_restore() {
        let mut state = state_with_rows(40, &[("a", 0), ("b", 12)]);
        state.scroll_to(14);
        let pos = state.current_position().unwrap();
        assert_eq!(pos.key, "b");
        assert_eq!(pos.offset, 2);
        assert_eq!(state.current_file(), Some((1, "b")));

        state.scroll_to(0);
        state.set_current_position(&pos);
        assert_eq!(state.scroll_pos, 14);
    }
}
