//! Tower footprint: outer void, wall ring, floor disc, pillars and center pin

use serde::{Deserialize, Serialize};

use super::cell::CellKind;
use super::map::Grid;
use crate::config::GeneratorConfig;
use crate::progress::{Pacer, Stage};

/// Geometry of the stamped tower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerShape {
    pub center: (usize, usize),
    pub radius: f64,
    pub wall_thickness: f64,
}

impl TowerShape {
    pub fn new(grid_size: usize, config: &GeneratorConfig) -> Self {
        Self {
            center: (grid_size / 2, grid_size / 2),
            radius: grid_size as f64 * config.tower_radius_factor,
            wall_thickness: config.wall_thickness,
        }
    }

    /// Euclidean distance from the center
    pub fn distance(&self, x: usize, y: usize) -> f64 {
        let dx = x as f64 - self.center.0 as f64;
        let dy = y as f64 - self.center.1 as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Radius of the disc rooms must stay inside (clear of the wall band)
    pub fn inner_radius(&self) -> f64 {
        self.radius - self.wall_thickness
    }

    /// Whether a room cell at `(x, y)` stays clear of the wall band
    pub fn fits_room_cell(&self, x: usize, y: usize) -> bool {
        self.distance(x, y) <= self.inner_radius()
    }

    /// Kind of a cell before pillars are applied
    fn classify(&self, x: usize, y: usize) -> CellKind {
        let dist = self.distance(x, y);
        if dist > self.radius {
            CellKind::Out
        } else if self.radius - dist < self.wall_thickness {
            CellKind::Wall
        } else if (x, y) == self.center {
            CellKind::Pin
        } else {
            CellKind::Floor
        }
    }
}

/// Whether `(x, y)` sits on the pillar lattice. A spacing of 0 disables pillars.
pub fn on_pillar_lattice(x: usize, y: usize, spacing: usize) -> bool {
    spacing > 0 && x % spacing == 0 && y % spacing == 0
}

/// Stamp the tower onto every cell of the grid
pub fn stamp_tower(grid: &mut Grid, config: &GeneratorConfig, pacer: &mut Pacer<'_>) -> TowerShape {
    let shape = TowerShape::new(grid.size(), config);
    tracing::info!(
        grid_size = grid.size(),
        radius = shape.radius,
        wall_thickness = shape.wall_thickness,
        "stamping tower"
    );

    let every = pacer.batch();
    for x in 0..grid.size() {
        for y in 0..grid.size() {
            let mut kind = shape.classify(x, y);
            if kind == CellKind::Floor && on_pillar_lattice(x, y, config.pillar_spacing) {
                kind = CellKind::Pillar;
            }
            grid.set(x, y, kind);
            pacer.tick(Stage::Tower, grid, every);
        }
    }
    pacer.flush(Stage::Tower, grid);

    tracing::info!(
        floor = grid.count(CellKind::Floor),
        pillars = grid.count(CellKind::Pillar),
        "tower stamped"
    );
    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(grid_size: usize, factor: f64, wall: f64, spacing: usize) -> GeneratorConfig {
        GeneratorConfig {
            grid_size,
            tower_radius_factor: factor,
            wall_thickness: wall,
            pillar_spacing: spacing,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_nine_by_nine_scenario() {
        let cfg = config(9, 0.5, 3.0, 16);
        let mut grid = Grid::new(9);
        let shape = stamp_tower(&mut grid, &cfg, &mut Pacer::silent());

        assert_eq!(shape.center, (4, 4));
        assert!((shape.radius - 4.5).abs() < 1e-9);
        assert_eq!(grid.get(4, 4), CellKind::Pin);
        assert_eq!(grid.get(0, 0), CellKind::Out);
        assert_eq!(grid.get(4, 0), CellKind::Wall);
        assert_eq!(grid.count(CellKind::Pin), 1);
    }

    #[test]
    fn test_pillars_on_lattice_only() {
        let cfg = config(33, 0.5, 2.0, 4);
        let mut grid = Grid::new(33);
        stamp_tower(&mut grid, &cfg, &mut Pacer::silent());

        let pillars: Vec<_> = grid
            .iter()
            .filter(|(_, _, k)| *k == CellKind::Pillar)
            .collect();
        assert!(!pillars.is_empty());
        for (x, y, _) in pillars {
            assert_eq!(x % 4, 0);
            assert_eq!(y % 4, 0);
        }
        // the center is on the lattice but the pin wins
        assert_eq!(grid.get(16, 16), CellKind::Pin);
    }

    #[test]
    fn test_no_box_left_after_stamping() {
        let cfg = config(21, 0.5, 3.0, 16);
        let mut grid = Grid::new(21);
        stamp_tower(&mut grid, &cfg, &mut Pacer::silent());
        assert_eq!(grid.count(CellKind::Box), 0);
    }

    #[test]
    fn test_zero_spacing_disables_pillars() {
        assert!(!on_pillar_lattice(0, 0, 0));
        assert!(on_pillar_lattice(0, 0, 3));
        assert!(!on_pillar_lattice(3, 1, 3));
    }

    #[test]
    fn test_room_disc_is_inside_wall_band() {
        let cfg = config(9, 0.5, 3.0, 16);
        let shape = TowerShape::new(9, &cfg);
        assert!(shape.fits_room_cell(4, 4));
        assert!(shape.fits_room_cell(5, 4));
        assert!(!shape.fits_room_cell(6, 4));
    }
}
