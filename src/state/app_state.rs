use super::DiffState;
use crate::theme::Theme;

pub struct AppState {
    pub diff: DiffState,
    pub theme: Theme,
    pub left_label: String,
    pub right_label: String,
    pub should_quit: bool,
    /// Advances on ticks while a job is running.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(context_lines: usize, theme: Theme) -> Self {
        Self {
            diff: DiffState::new(context_lines),
            theme,
            left_label: String::new(),
            right_label: String::new(),
            should_quit: false,
            spinner_frame: 0,
        }
    }
}
