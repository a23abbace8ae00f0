use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use std::path::PathBuf;
use std::sync::Arc;

use crate::action::Action;
use crate::compare::DiffBackend;
use crate::components::context_bar::ContextBar;
use crate::components::diff_view::DiffView;
use crate::components::status_bar::StatusBar;
use crate::components::Component;
use crate::config::Config;
use crate::display_map::build_display_map;
use crate::event::{map_key_to_action, Event, EventReader, Waker};
use crate::jobs::{Envelope, JobRunner, JobTag};
use crate::state::diff_state::ALL_CONTEXT;
use crate::state::stats::compute_totals;
use crate::state::AppState;
use crate::tui::Tui;

pub struct App {
    state: AppState,
    jobs: JobRunner,
    backend: Arc<dyn DiffBackend>,
    left: PathBuf,
    right: PathBuf,
    /// Generation of the most recently submitted diff job.
    generation: u64,
}

impl App {
    pub fn new(
        config: Config,
        left: PathBuf,
        right: PathBuf,
        backend: Arc<dyn DiffBackend>,
        waker: Waker,
    ) -> Self {
        let mut state = AppState::new(config.context_lines, config.theme);
        state.left_label = left.display().to_string();
        state.right_label = right.display().to_string();
        Self {
            state,
            jobs: JobRunner::new(waker),
            backend,
            left,
            right,
            generation: 0,
        }
    }

    /// Start building the collection in the background.
    pub fn initialize(&mut self) {
        self.state.diff.loading = true;
        let backend = Arc::clone(&self.backend);
        let left = self.left.clone();
        let right = self.right.clone();
        tracing::info!("Comparing {} with {}", left.display(), right.display());
        self.jobs.submit(JobTag::Collection, move || {
            Envelope::Collection(backend.build_collection(&left, &right))
        });
    }

    /// Drain every queued job result. Stops at the first error and returns it;
    /// anything queued behind it waits for the next wakeup.
    pub fn on_wakeup(&mut self) -> Result<()> {
        while let Some(envelope) = self.jobs.try_recv() {
            if let Envelope::Diff { generation, .. } = &envelope {
                if *generation < self.generation {
                    tracing::debug!(
                        "Discarding stale diff (generation {generation}, current {})",
                        self.generation
                    );
                    continue;
                }
            }
            if envelope.is_err() {
                tracing::error!("{:?} job failed", envelope.kind());
            }
            self.handle_result(envelope)?;
        }
        Ok(())
    }

    fn handle_result(&mut self, envelope: Envelope) -> Result<()> {
        match envelope {
            Envelope::Collection(result) => {
                let collection = result?;
                tracing::info!(
                    "Collection ready: {} entries, +{} -{} whole-file lines",
                    collection.entries.len(),
                    collection.added_count,
                    collection.removed_count
                );
                self.state.diff.collection = Some(collection);
                self.render_diff();
                self.state.diff.needs_redraw = true;
                self.generate_diff();
            }
            Envelope::Diff { generation, result } => {
                let diff_map = result?;
                tracing::info!("Diff generation {generation} ready: {} patches", diff_map.len());
                self.state.diff.diff_map = Some(diff_map);
                self.calculate_statistics();
                self.render_diff();
                self.state.diff.scroll_pos = 0;
                if let Some(pos) = self.state.diff.restore_position.take() {
                    self.state.diff.set_current_position(&pos);
                }
                self.state.diff.loading = false;
                self.state.diff.needs_redraw = true;
            }
            Envelope::Highlight(result) => {
                result?;
            }
        }
        Ok(())
    }

    /// Submit a diff job for the current collection at the current context count.
    fn generate_diff(&mut self) {
        let Some(collection) = self.state.diff.collection.as_ref() else {
            return;
        };
        let candidates = collection.diff_candidates();
        let context_lines = self.state.diff.context_lines;
        let backend = Arc::clone(&self.backend);

        self.generation += 1;
        let generation = self.generation;
        self.state.diff.loading = true;

        self.jobs.submit(JobTag::Diff { generation }, move || {
            let jobs: Vec<_> = candidates
                .into_iter()
                .filter(|job| backend.is_text(&job.left) && backend.is_text(&job.right))
                .collect();
            Envelope::Diff {
                generation,
                result: backend.build_diffs(&jobs, context_lines),
            }
        });
    }

    fn calculate_statistics(&mut self) {
        let diff = &mut self.state.diff;
        let (added, removed) = match (&diff.collection, &diff.diff_map) {
            (Some(collection), Some(diff_map)) => compute_totals(collection, diff_map),
            (Some(collection), None) => (collection.added_count, collection.removed_count),
            _ => (0, 0),
        };
        diff.added_count = added;
        diff.removed_count = removed;
    }

    fn render_diff(&mut self) {
        let diff = &mut self.state.diff;
        if let Some(collection) = diff.collection.as_ref() {
            diff.display = build_display_map(collection, diff.diff_map.as_ref());
        }
    }

    fn change_context_count(&mut self, count: usize) {
        if count == self.state.diff.context_lines {
            return;
        }
        tracing::debug!(
            "Context lines {} -> {count}",
            self.state.diff.context_lines
        );
        self.state.diff.context_lines = count;
        self.state.diff.needs_redraw = true;
        if self.state.diff.collection.is_none() {
            return;
        }
        if self.state.diff.restore_position.is_none() {
            self.state.diff.restore_position = self.state.diff.current_position();
        }
        self.generate_diff();
    }

    fn update(&mut self, action: Action) {
        let page = self.state.diff.viewport_height.max(1) as isize;
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Tick => {
                if self.state.diff.loading {
                    self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
                    self.state.diff.needs_redraw = true;
                }
            }
            Action::Resize => self.state.diff.needs_redraw = true,
            Action::ScrollUp => self.state.diff.scroll_by(-1),
            Action::ScrollDown => self.state.diff.scroll_by(1),
            Action::ScrollPageUp => self.state.diff.scroll_by(-page),
            Action::ScrollPageDown => self.state.diff.scroll_by(page),
            Action::ScrollToTop => self.state.diff.scroll_to(0),
            Action::ScrollToBottom => {
                let max = self.state.diff.max_scroll();
                self.state.diff.scroll_to(max);
            }
            Action::NextFile => {
                if let Some(row) = self.state.diff.display.next_file_row(self.state.diff.scroll_pos)
                {
                    self.state.diff.scroll_to(row);
                }
            }
            Action::PrevFile => {
                if let Some(row) = self.state.diff.display.prev_file_row(self.state.diff.scroll_pos)
                {
                    self.state.diff.scroll_to(row);
                }
            }
            Action::IncreaseContext => {
                let count = (self.state.diff.context_lines + 1).min(ALL_CONTEXT);
                self.change_context_count(count);
            }
            Action::DecreaseContext => {
                let count = self.state.diff.context_lines.saturating_sub(1);
                self.change_context_count(count);
            }
            Action::ResetContext => {
                self.change_context_count(self.state.diff.original_context_lines);
            }
            Action::AllContext => self.change_context_count(ALL_CONTEXT),
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui, events: &mut EventReader) -> Result<()> {
        self.initialize();

        let context_bar = ContextBar;
        let diff_view = DiffView;
        let status_bar = StatusBar;

        loop {
            // context bar + status bar
            let term_size = terminal.size()?;
            let viewport_height = term_size.height.saturating_sub(2) as usize;
            if viewport_height != self.state.diff.viewport_height {
                self.state.diff.viewport_height = viewport_height;
                self.state.diff.needs_redraw = true;
            }

            if self.state.diff.needs_redraw {
                terminal.draw(|frame| {
                    let outer = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Length(1),
                            Constraint::Min(1),
                            Constraint::Length(1),
                        ])
                        .split(frame.area());

                    context_bar.render(frame, outer[0], &self.state);
                    diff_view.render(frame, outer[1], &self.state);
                    status_bar.render(frame, outer[2], &self.state);
                })?;
                self.state.diff.needs_redraw = false;
            }

            // Wait for at least one event, then drain all pending events.
            let Some(first) = events.next().await else {
                break;
            };
            let mut pending = vec![first];
            while let Some(ev) = events.try_next() {
                pending.push(ev);
            }

            // Coalesce: one drain covers any number of wakeups.
            let mut woke = false;
            let mut actions = Vec::new();
            for event in pending {
                match event {
                    Event::Wakeup => woke = true,
                    Event::Key(key) => actions.extend(map_key_to_action(key)),
                    Event::Resize => actions.push(Action::Resize),
                    Event::Tick => actions.push(Action::Tick),
                }
            }

            if woke {
                self.on_wakeup()?;
            }
            for action in actions {
                self.update(action);
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }
}
