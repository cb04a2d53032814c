//! The square cell grid shared by every generation stage

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::cell::CellKind;
use crate::error::GridError;

/// Orthogonal unit offsets, in the scan order used by every stage
pub const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Square grid of cell kinds, addressed as `cells[x][y]`
///
/// The size is fixed at creation. Row-major iteration means `x` outer,
/// `y` inner, both ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<CellKind>>,
}

/// Unchecked serialized form of [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vec<Vec<CellKind>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let RawGrid { size, cells } = raw;
        if cells.len() != size {
            return Err(GridError::ColumnCount {
                size,
                found: cells.len(),
            });
        }
        if let Some((column, col)) = cells.iter().enumerate().find(|(_, col)| col.len() != size) {
            return Err(GridError::ColumnLength {
                size,
                column,
                found: col.len(),
            });
        }
        Ok(Self { size, cells })
    }
}

impl Grid {
    /// Create a grid filled with `Box`
    pub fn new(size: usize) -> Self {
        Self::filled(size, CellKind::Box)
    }

    /// Create a grid filled with one kind
    pub fn filled(size: usize, kind: CellKind) -> Self {
        Self {
            size,
            cells: vec![vec![kind; size]; size],
        }
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Center cell `(size / 2, size / 2)`
    pub fn center(&self) -> (usize, usize) {
        (self.size / 2, self.size / 2)
    }

    /// Kind at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> CellKind {
        self.cells[x][y]
    }

    /// Kind at signed coordinates, `None` outside the grid
    pub fn try_get(&self, x: i32, y: i32) -> Option<CellKind> {
        if self.in_bounds(x, y) {
            Some(self.cells[x as usize][y as usize])
        } else {
            None
        }
    }

    /// Set the kind at `(x, y)`. Panics when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, kind: CellKind) {
        self.cells[x][y] = kind;
    }

    /// Check signed coordinates against `[0, size)`
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// Check that signed coordinates lie strictly inside the outermost ring
    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        let last = self.size.saturating_sub(1);
        x > 0 && y > 0 && (x as usize) < last && (y as usize) < last
    }

    /// In-bounds orthogonal neighbours of `(x, y)` with their kinds
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize, CellKind)> + '_ {
        ORTHOGONAL.iter().filter_map(move |&(dx, dy)| {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            self.try_get(nx, ny)
                .map(|kind| (nx as usize, ny as usize, kind))
        })
    }

    /// Iterate every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(x, column)| column.iter().enumerate().map(move |(y, &kind)| (x, y, kind)))
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells
            .iter()
            .map(|column| column.iter().filter(|&&k| k == kind).count())
            .sum()
    }

    /// Cell count for every kind, in declaration order
    pub fn census(&self) -> Vec<(CellKind, usize)> {
        CellKind::iter().map(|kind| (kind, self.count(kind))).collect()
    }

    /// Render as text, one line per `y`, one glyph per cell
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for y in 0..self.size {
            for x in 0..self.size {
                out.push(self.cells[x][y].glyph());
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}
