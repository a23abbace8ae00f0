use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::diff_state::ALL_CONTEXT;
use crate::state::AppState;

use super::Component;

pub struct ContextBar;

impl Component for ContextBar {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let diff = &state.diff;

        let context_label = if diff.context_lines >= ALL_CONTEXT {
            "[context:all]".to_string()
        } else {
            format!("[context:{}]", diff.context_lines)
        };

        let line = Line::from(vec![
            Span::styled(
                " pairdiff ",
                Style::default().fg(Color::Black).bg(theme.accent),
            ),
            Span::raw("  "),
            Span::styled(
                &state.left_label,
                Style::default()
                    .fg(theme.diff_del_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" \u{2192} ", Style::default().fg(theme.text_muted)),
            Span::styled(
                &state.right_label,
                Style::default()
                    .fg(theme.diff_add_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("+{}", diff.added_count),
                Style::default().fg(theme.diff_add_fg),
            ),
            Span::raw(" "),
            Span::styled(
                format!("-{}", diff.removed_count),
                Style::default().fg(theme.diff_del_fg),
            ),
            Span::raw("  "),
            Span::styled(context_label, Style::default().fg(theme.text_muted)),
        ]);

        let bar = Paragraph::new(line).style(Style::default().bg(theme.surface));
        frame.render_widget(bar, area);
    }
}
