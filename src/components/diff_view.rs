use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::compare::{DiffLine, DiffLineOrigin, EntryStatus};
use crate::display_map::RowKind;
use crate::state::AppState;
use crate::theme::Theme;

use super::Component;

const GUTTER_WIDTH: usize = 5;

pub struct DiffView;

impl Component for DiffView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let diff = &state.diff;

        if diff.display.is_empty() {
            let content = if diff.loading || diff.collection.is_none() {
                " Loading..."
            } else {
                " No differences found"
            };
            let paragraph = Paragraph::new(content).style(Style::default().fg(theme.text_muted));
            frame.render_widget(paragraph, area);
            return;
        }

        let height = area.height as usize;
        let lines: Vec<Line> = diff
            .display
            .rows
            .iter()
            .skip(diff.scroll_pos)
            .take(height)
            .map(|row| make_row_line(&row.kind, theme))
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn make_row_line<'a>(kind: &'a RowKind, theme: &Theme) -> Line<'a> {
    match kind {
        RowKind::FileHeader {
            key,
            status,
            added,
            removed,
        } => {
            let status_fg = match status {
                EntryStatus::Added => theme.diff_add_fg,
                EntryStatus::Removed => theme.diff_del_fg,
                EntryStatus::Modified => theme.warning,
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", status.label()),
                    Style::default().fg(status_fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    key.as_str(),
                    Style::default()
                        .fg(theme.file_header_fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(format!("+{added}"), Style::default().fg(theme.diff_add_fg)),
                Span::raw(" "),
                Span::styled(format!("-{removed}"), Style::default().fg(theme.diff_del_fg)),
            ])
        }
        RowKind::HunkHeader(header) => Line::from(Span::styled(
            format!("{} {header}", " ".repeat(GUTTER_WIDTH * 2 + 1)),
            Style::default().fg(theme.diff_hunk_header_fg),
        )),
        RowKind::Line(line) => make_diff_line(line, theme),
        RowKind::Note(note) => Line::from(Span::styled(
            format!("   {note}"),
            Style::default()
                .fg(theme.text_muted)
                .add_modifier(Modifier::ITALIC),
        )),
        RowKind::Blank => Line::raw(""),
    }
}

fn make_diff_line<'a>(line: &'a DiffLine, theme: &Theme) -> Line<'a> {
    let (prefix, fg, bg) = match line.origin {
        DiffLineOrigin::Context => (" ", theme.diff_context_fg, None),
        DiffLineOrigin::Addition => ("+", theme.diff_add_fg, Some(theme.diff_add_bg)),
        DiffLineOrigin::Deletion => ("-", theme.diff_del_fg, Some(theme.diff_del_bg)),
    };

    let mut content_style = Style::default().fg(fg);
    if let Some(bg) = bg {
        content_style = content_style.bg(bg);
    }

    let gutter = format!(
        "{} {} ",
        format_lineno(line.old_lineno, GUTTER_WIDTH),
        format_lineno(line.new_lineno, GUTTER_WIDTH)
    );

    Line::from(vec![
        Span::styled(gutter, Style::default().fg(theme.line_number_fg)),
        Span::styled(prefix, content_style),
        Span::styled(line.content.as_str(), content_style),
    ])
}

fn format_lineno(lineno: Option<u32>, width: usize) -> String {
    match lineno {
        Some(n) => format!("{n:>width$}"),
        None => " ".repeat(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::collection::Entry;
    use crate::compare::Collection;
    use crate::display_map::build_display_map;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|frame| DiffView.render(frame, frame.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_pending_diff_is_not_reported_as_no_differences() {
        let mut state = AppState::new(3, Theme::default());
        let collection = Collection::new(vec![Entry {
            key: "a.txt".to_string(),
            status: EntryStatus::Modified,
            left: Some("l/a.txt".into()),
            right: Some("r/a.txt".into()),
            line_count: None,
        }]);
        state.diff.loading = true;
        state.diff.display = build_display_map(&collection, None);
        state.diff.collection = Some(collection);

        let text = screen_text(&state);
        assert!(text.contains("a.txt"));
        assert!(text.contains("Computing diff"));
        assert!(!text.contains("No differences"));
    }

    #[test]
    fn test_empty_rows_while_loading_say_loading() {
        let mut state = AppState::new(3, Theme::default());
        state.diff.collection = Some(Collection::default());
        state.diff.loading = true;
        assert!(screen_text(&state).contains("Loading..."));

        state.diff.loading = false;
        assert!(screen_text(&state).contains("No differences found"));
    }

    #[test]
    fn test_format_lineno_pads() {
        assert_eq!(format_lineno(Some(7), 5), "    7");
        assert_eq!(format_lineno(None, 3), "   ");
    }

    #[test]
    fn test_addition_line_has_plus_prefix() {
        let line = DiffLine {
            origin: DiffLineOrigin::Addition,
            old_lineno: None,
            new_lineno: Some(3),
            content: "hello".to_string(),
        };
        let rendered = make_diff_line(&line, &Theme::default());
        let text: String = rendered.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "          3 +hello");
    }
}
