//! Room templates and their rotation
//!
//! A layout is a row-major block of markers:
//! `z` wall without door, `x` wall that may hold a door, `0` room floor,
//! `a` don't care (left untouched by placement).

use serde::{Deserialize, Serialize};

use crate::consts::ROTATIONS;
use crate::error::TemplateError;
use crate::grid::CellKind;

/// One cell of a template layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    WallNoDoor,
    WallDoor,
    Floor,
    Skip,
}

impl Marker {
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'z' => Some(Marker::WallNoDoor),
            'x' => Some(Marker::WallDoor),
            '0' => Some(Marker::Floor),
            'a' => Some(Marker::Skip),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Marker::WallNoDoor => 'z',
            Marker::WallDoor => 'x',
            Marker::Floor => '0',
            Marker::Skip => 'a',
        }
    }

    /// Cell kind stamped for this marker, `None` for don't-care cells
    pub const fn cell_kind(self) -> Option<CellKind> {
        match self {
            Marker::WallNoDoor => Some(CellKind::WallNoDoor),
            Marker::WallDoor => Some(CellKind::WallDoor),
            Marker::Floor => Some(CellKind::RoomFloor),
            Marker::Skip => None,
        }
    }
}

/// Rectangular marker grid, indexed `rows[dy][dx]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Layout {
    width: usize,
    rows: Vec<Vec<Marker>>,
}

impl Layout {
    /// Parse layout rows, rejecting empty, ragged or unknown input
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, TemplateError> {
        let first = rows.first().ok_or(TemplateError::EmptyLayout)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(TemplateError::EmptyLayout);
        }

        let mut parsed = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(TemplateError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            let markers = line
                .chars()
                .enumerate()
                .map(|(column, c)| {
                    Marker::from_char(c).ok_or(TemplateError::UnknownMarker {
                        marker: c,
                        row,
                        column,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push(markers);
        }

        Ok(Self {
            width,
            rows: parsed,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Marker at column `dx`, row `dy`
    pub fn marker(&self, dx: usize, dy: usize) -> Marker {
        self.rows[dy][dx]
    }

    /// Non-skip cells as `(dx, dy, marker)`, `dy` outer
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Marker)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, m)| **m != Marker::Skip)
                .map(move |(dx, &m)| (dx, dy, m))
        })
    }

    /// Layout rows as marker strings
    pub fn rows(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|m| m.to_char()).collect())
            .collect()
    }

    /// Rotate by `quarter_turns` clockwise quarter turns
    pub fn rotated(&self, quarter_turns: u32) -> Layout {
        let w = self.width;
        let h = self.height();
        let rows: Vec<Vec<Marker>> = match quarter_turns % ROTATIONS {
            0 => return self.clone(),
            // column x read bottom-to-top becomes row x
            1 => (0..w)
                .map(|x| (0..h).rev().map(|y| self.rows[y][x]).collect())
                .collect(),
            2 => (0..h)
                .rev()
                .map(|y| (0..w).rev().map(|x| self.rows[y][x]).collect())
                .collect(),
            // columns right-to-left, each read top-to-bottom
            _ => (0..w)
                .rev()
                .map(|x| (0..h).map(|y| self.rows[y][x]).collect())
                .collect(),
        };
        Layout {
            width: row_width(&rows),
            rows,
        }
    }
}

fn row_width(rows: &[Vec<Marker>]) -> usize {
    rows.first().map_or(0, Vec::len)
}

impl TryFrom<Vec<String>> for Layout {
    type Error = TemplateError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Layout::parse(rows.as_slice())
    }
}

impl From<Layout> for Vec<String> {
    fn from(layout: Layout) -> Self {
        layout.rows()
    }
}

fn default_allow_rotation() -> bool {
    true
}

fn default_max_frequency() -> usize {
    usize::MAX
}

fn default_weight() -> usize {
    1
}

/// Immutable room blueprint with placement constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTemplate {
    pub name: String,
    pub layout: Layout,
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
    #[serde(default)]
    pub min_frequency: usize,
    #[serde(default = "default_max_frequency")]
    pub max_frequency: usize,
    /// Relative selection weight; 0 keeps the template out of random picks
    #[serde(default = "default_weight")]
    pub weight: usize,
}

impl RoomTemplate {
    pub fn new(name: impl Into<String>, layout: Layout) -> Self {
        Self {
            name: name.into(),
            layout,
            allow_rotation: default_allow_rotation(),
            min_frequency: 0,
            max_frequency: default_max_frequency(),
            weight: default_weight(),
        }
    }

    pub fn with_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    pub fn with_frequency(mut self, min: usize, max: usize) -> Self {
        self.min_frequency = min;
        self.max_frequency = max;
        self
    }

    pub fn with_weight(mut self, weight: usize) -> Self {
        self.weight = weight;
        self
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    /// Derived template turned by `quarter_turns` clockwise quarter turns.
    /// The original is left untouched.
    pub fn rotated(&self, quarter_turns: u32) -> RoomTemplate {
        RoomTemplate {
            layout: self.layout.rotated(quarter_turns),
            ..self.clone()
        }
    }
}
