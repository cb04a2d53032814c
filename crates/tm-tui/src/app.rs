//! Replay viewer state and rendering

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use tm_core::progress::Frame as RecordedFrame;

use crate::theme::Theme;
use crate::widgets::{CellStyle, MazeWidget, StatusWidget};

/// Steps through recorded generation snapshots
pub struct ReplayApp {
    frames: Vec<RecordedFrame>,
    index: usize,
    paused: bool,
    should_quit: bool,
    seed: u64,
    theme: Theme,
    cell_style: CellStyle,
}

impl ReplayApp {
    pub fn new(frames: Vec<RecordedFrame>, seed: u64, theme: Theme) -> Self {
        Self {
            frames,
            index: 0,
            paused: false,
            should_quit: false,
            seed,
            theme,
            cell_style: CellStyle::default(),
        }
    }

    pub fn with_cell_style(mut self, style: CellStyle) -> Self {
        self.cell_style = style;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Frame currently on screen
    pub fn current(&self) -> Option<&RecordedFrame> {
        self.frames.get(self.index)
    }

    fn last_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Move forward one frame; stops on the last one
    pub fn step_forward(&mut self) {
        self.index = (self.index + 1).min(self.last_index());
    }

    pub fn step_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Advance on a timer tick unless paused. Returns whether the frame changed.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.index >= self.last_index() {
            return false;
        }
        self.step_forward();
        true
    }

    /// Apply one terminal event
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Right => {
                self.paused = true;
                self.step_forward();
            }
            KeyCode::Left => {
                self.paused = true;
                self.step_back();
            }
            KeyCode::Home => self.index = 0,
            KeyCode::End => self.index = self.last_index(),
            _ => {}
        }
    }

    /// Draw the current frame and the status line
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(frame.area());

        let Some(current) = self.current() else {
            return;
        };
        let title = format!("Tower maze · {}", current.stage);
        frame.render_widget(
            MazeWidget::new(&current.grid, &self.theme)
                .title(&title)
                .cell_style(self.cell_style),
            chunks[0],
        );
        frame.render_widget(
            StatusWidget::new(current.stage, self.index, self.frames.len(), self.seed, &self.theme)
                .paused(self.paused),
            chunks[1],
        );
    }
}
