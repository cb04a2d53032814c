//! Tower grid widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use tm_core::Grid;

use crate::theme::Theme;

/// Upper half block: foreground paints the top cell, background the bottom
const HALF_BLOCK: char = '▀';

/// How grid cells map onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    /// Two grid rows per terminal row, drawn as colored half blocks
    #[default]
    HalfBlock,
    /// One glyph per grid cell
    Glyph,
}

/// Widget for rendering a tower grid
pub struct MazeWidget<'a> {
    grid: &'a Grid,
    theme: &'a Theme,
    title: &'a str,
    style: CellStyle,
}

impl<'a> MazeWidget<'a> {
    pub fn new(grid: &'a Grid, theme: &'a Theme) -> Self {
        Self {
            grid,
            theme,
            title: "Tower",
            style: CellStyle::default(),
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn cell_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Terminal cells needed to show the whole grid, borders included
    pub fn required_size(&self) -> (u16, u16) {
        let size = self.grid.size();
        let rows = match self.style {
            CellStyle::HalfBlock => size.div_ceil(2),
            CellStyle::Glyph => size,
        };
        (
            (size + 2).min(u16::MAX as usize) as u16,
            (rows + 2).min(u16::MAX as usize) as u16,
        )
    }

    fn render_half_blocks(&self, inner: Rect, buf: &mut Buffer) {
        let size = self.grid.size();
        for row in 0..size.div_ceil(2).min(inner.height as usize) {
            for x in 0..size.min(inner.width as usize) {
                let top = self.theme.cell_color(self.grid.get(x, 2 * row));
                let bottom = if 2 * row + 1 < size {
                    self.theme.cell_color(self.grid.get(x, 2 * row + 1))
                } else {
                    Color::Reset
                };
                if let Some(cell) = buf.cell_mut(Position::new(inner.x + x as u16, inner.y + row as u16)) {
                    cell.set_char(HALF_BLOCK);
                    cell.set_style(Style::default().fg(top).bg(bottom));
                }
            }
        }
    }

    fn render_glyphs(&self, inner: Rect, buf: &mut Buffer) {
        let size = self.grid.size();
        for y in 0..size.min(inner.height as usize) {
            for x in 0..size.min(inner.width as usize) {
                let kind = self.grid.get(x, y);
                if let Some(cell) = buf.cell_mut(Position::new(inner.x + x as u16, inner.y + y as u16)) {
                    cell.set_char(kind.glyph());
                    cell.set_style(Style::default().fg(self.theme.cell_color(kind)));
                }
            }
        }
    }
}

impl Widget for MazeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(self.title);

        let inner = block.inner(area);
        block.render(area, buf);

        match self.style {
            CellStyle::HalfBlock => self.render_half_blocks(inner, buf),
            CellStyle::Glyph => self.render_glyphs(inner, buf),
        }
    }
}
