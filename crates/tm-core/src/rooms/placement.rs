//! Room placement
//!
//! Greedy, order-dependent packing of templates into the tower disc.
//! A minimum-frequency phase first tries to satisfy every template's
//! `min_frequency`; a fill phase then draws from a weighted pool until the
//! attempt budget runs out or every template hits its `max_frequency`.

use serde::{Deserialize, Serialize};

use super::template::{Marker, RoomTemplate};
use crate::consts::ROTATIONS;
use crate::grid::{Grid, TowerShape};
use crate::progress::{Pacer, Stage};
use crate::rng::TowerRng;

/// A template stamped into the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRoom {
    /// Top-left corner of the bounding box
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// The template as stamped (already rotated)
    pub template: RoomTemplate,
    /// Index of the source template in the catalog
    pub template_index: usize,
    /// Clockwise quarter turns applied to the source template
    pub rotation: u32,
}

impl PlacedRoom {
    /// Whether `(x, y)` lies inside the bounding box
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Whether `(x, y)` is a cell this room stamped (inside the box, not a skip)
    pub fn owns(&self, x: usize, y: usize) -> bool {
        self.contains(x, y) && self.template.layout.marker(x - self.x, y - self.y) != Marker::Skip
    }

    /// Stamped cells in grid coordinates
    pub fn footprint(&self) -> impl Iterator<Item = (usize, usize, Marker)> + '_ {
        self.template
            .layout
            .cells()
            .map(|(dx, dy, m)| (self.x + dx, self.y + dy, m))
    }
}

/// A template that missed its minimum frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub template: String,
    pub required: usize,
    pub placed: usize,
}

/// Summary of the placement stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    /// `(template name, rooms placed)` in catalog order
    pub placed_per_template: Vec<(String, usize)>,
    pub shortfalls: Vec<Shortfall>,
    pub total: usize,
    pub min_rooms: usize,
    pub min_rooms_met: bool,
    /// Placement attempts spent, both phases
    pub attempts: usize,
}

/// Check that every non-skip cell of `template` at `(x, y)` is in bounds,
/// inside the room disc, and currently `box` or `floor`
pub fn can_place(grid: &Grid, shape: &TowerShape, template: &RoomTemplate, x: usize, y: usize) -> bool {
    template.layout.cells().all(|(dx, dy, _)| {
        let wx = x + dx;
        let wy = y + dy;
        wx < grid.size()
            && wy < grid.size()
            && shape.fits_room_cell(wx, wy)
            && grid.get(wx, wy).is_placeable()
    })
}

/// Write the markers of `template` at `(x, y)`. Don't-care cells are left alone.
pub fn stamp_room(grid: &mut Grid, template: &RoomTemplate, x: usize, y: usize) {
    for (dx, dy, marker) in template.layout.cells() {
        if let Some(kind) = marker.cell_kind() {
            grid.set(x + dx, y + dy, kind);
        }
    }
}

/// Placement engine state for one run
pub struct RoomPlacer<'a> {
    templates: &'a [RoomTemplate],
    shape: TowerShape,
    max_attempts: usize,
    counts: Vec<usize>,
    rooms: Vec<PlacedRoom>,
    attempts: usize,
}

impl<'a> RoomPlacer<'a> {
    pub fn new(templates: &'a [RoomTemplate], shape: TowerShape, max_attempts: usize) -> Self {
        Self {
            templates,
            shape,
            max_attempts,
            counts: vec![0; templates.len()],
            rooms: Vec::new(),
            attempts: 0,
        }
    }

    /// Rooms placed so far per template, in catalog order
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn rooms(&self) -> &[PlacedRoom] {
        &self.rooms
    }

    /// Run both phases and hand back the placed rooms
    pub fn place_all(
        mut self,
        grid: &mut Grid,
        min_rooms: usize,
        rng: &mut TowerRng,
        pacer: &mut Pacer<'_>,
    ) -> (Vec<PlacedRoom>, PlacementStats) {
        tracing::info!(templates = self.templates.len(), "placing rooms");
        let shortfalls = self.minimum_phase(grid, rng, pacer);
        self.fill_phase(grid, rng, pacer);

        let total = self.rooms.len();
        if total < min_rooms {
            tracing::warn!(placed = total, min_rooms, "fewer rooms than requested");
        }
        tracing::info!(rooms = total, attempts = self.attempts, "room placement complete");

        let stats = PlacementStats {
            placed_per_template: self
                .templates
                .iter()
                .zip(&self.counts)
                .map(|(t, &n)| (t.name.clone(), n))
                .collect(),
            shortfalls,
            total,
            min_rooms,
            min_rooms_met: total >= min_rooms,
            attempts: self.attempts,
        };
        (self.rooms, stats)
    }

    /// Place each template until it reaches `min_frequency` or fails
    /// `max_attempts` times in a row
    pub fn minimum_phase(
        &mut self,
        grid: &mut Grid,
        rng: &mut TowerRng,
        pacer: &mut Pacer<'_>,
    ) -> Vec<Shortfall> {
        let mut shortfalls = Vec::new();
        for index in 0..self.templates.len() {
            let required = self.templates[index].min_frequency;
            if required == 0 {
                continue;
            }
            let mut failures = 0;
            while self.counts[index] < required && failures < self.max_attempts {
                failures += 1;
                if self.try_place(index, grid, rng, pacer) {
                    failures = 0;
                }
            }
            if self.counts[index] < required {
                let name = &self.templates[index].name;
                tracing::warn!(
                    template = %name,
                    required,
                    placed = self.counts[index],
                    "minimum frequency not reached"
                );
                shortfalls.push(Shortfall {
                    template: name.clone(),
                    required,
                    placed: self.counts[index],
                });
            }
        }
        shortfalls
    }

    /// Draw templates from the weighted pool until the global budget is spent
    pub fn fill_phase(&mut self, grid: &mut Grid, rng: &mut TowerRng, pacer: &mut Pacer<'_>) {
        let mut pool: Vec<usize> = self
            .templates
            .iter()
            .enumerate()
            .flat_map(|(index, t)| std::iter::repeat_n(index, t.weight))
            .collect();

        let mut attempts = 0;
        while attempts < self.max_attempts && !pool.is_empty() {
            attempts += 1;
            let index = pool[rng.rn2(pool.len())];
            if self.counts[index] >= self.templates[index].max_frequency {
                pool.retain(|&i| i != index);
                tracing::debug!(template = %self.templates[index].name, "template at max frequency");
                continue;
            }
            self.try_place(index, grid, rng, pacer);
        }
    }

    /// One placement attempt: random rotation (if allowed), random origin,
    /// all-or-nothing validation, then stamp
    pub fn try_place(
        &mut self,
        index: usize,
        grid: &mut Grid,
        rng: &mut TowerRng,
        pacer: &mut Pacer<'_>,
    ) -> bool {
        self.attempts += 1;
        let source = &self.templates[index];
        let rotation = if source.allow_rotation {
            rng.rn2(ROTATIONS as usize) as u32
        } else {
            0
        };
        let template = source.rotated(rotation);

        let size = grid.size();
        if template.width() > size || template.height() > size {
            return false;
        }
        let x = rng.rn2(size - template.width());
        let y = rng.rn2(size - template.height());

        if !can_place(grid, &self.shape, &template, x, y) {
            return false;
        }

        stamp_room(grid, &template, x, y);
        tracing::debug!(template = %template.name, x, y, rotation, "room placed");
        self.counts[index] += 1;
        self.rooms.push(PlacedRoom {
            x,
            y,
            width: template.width(),
            height: template.height(),
            template,
            template_index: index,
            rotation,
        });
        pacer.emit(Stage::Rooms, grid);
        true
    }
}
