use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

use super::Component;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusBar;

impl Component for StatusBar {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let diff = &state.diff;
        let mut spans = vec![Span::raw(" ")];

        if diff.loading {
            let frame_char = SPINNER[state.spinner_frame % SPINNER.len()];
            let label = if diff.collection.is_none() {
                "Comparing"
            } else {
                "Diffing"
            };
            spans.push(Span::styled(
                format!("{frame_char} {label}\u{2026} "),
                Style::default().fg(theme.warning),
            ));
        }

        if let Some(collection) = diff.collection.as_ref() {
            if collection.is_empty() {
                spans.push(Span::styled(
                    "No differences ",
                    Style::default().fg(theme.text_muted),
                ));
            } else if let Some((idx, key)) = diff.current_file() {
                spans.push(Span::styled(
                    format!("{}/{} ", idx + 1, collection.entries.len()),
                    Style::default().fg(theme.text_muted),
                ));
                spans.push(Span::styled(
                    format!("{key} "),
                    Style::default().fg(theme.text),
                ));
            }
        }

        let bindings: &[(&str, &str)] = &[
            ("q", "quit"),
            ("j/k", "scroll"),
            ("n/N", "file"),
            ("+/-", "context"),
            ("=", "reset"),
            ("a", "all"),
        ];
        for (key, desc) in bindings {
            spans.push(Span::styled(
                format!("[{key}]"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("{desc} "),
                Style::default().fg(theme.text_muted),
            ));
        }

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface));
        frame.render_widget(bar, area);
    }
}
