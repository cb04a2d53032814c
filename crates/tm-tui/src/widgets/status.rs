//! Replay status line

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use tm_core::Stage;

use crate::theme::Theme;

/// Stage, frame position and playback state
pub struct StatusWidget<'a> {
    stage: Stage,
    frame: usize,
    frames: usize,
    seed: u64,
    paused: bool,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(stage: Stage, frame: usize, frames: usize, seed: u64, theme: &'a Theme) -> Self {
        Self {
            stage,
            frame,
            frames,
            seed,
            paused: false,
            theme,
        }
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(self.stage.to_string(), Style::default().fg(self.theme.accent).bold()),
            Span::styled(
                format!("  frame {}/{}  seed {}", self.frame + 1, self.frames, self.seed),
                Style::default().fg(self.theme.text),
            ),
        ];
        if self.paused {
            spans.push(Span::styled("  PAUSED", Style::default().fg(self.theme.paused).bold()));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        if area.height > 1 {
            buf.set_string(
                area.x,
                area.y + 1,
                "space pause  ←/→ step  home/end jump  q quit",
                Style::default().fg(self.theme.text_dim),
            );
        }
    }
}
