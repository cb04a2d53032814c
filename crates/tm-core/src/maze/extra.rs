//! Extra corridor links
//!
//! Punches additional two-cell links from existing corridors into uncarved
//! floor, which introduces cycles. Targets must be `box` or `floor`, so two
//! carved regions are never merged by this pass.

use super::carver::Direction;
use crate::grid::{CellKind, Grid};
use crate::progress::{Pacer, Stage};
use crate::rng::TowerRng;

/// Scan interior `path` cells (x outer, y inner) and extend each into
/// uncarved neighbours two steps away with `probability`.
/// Returns the number of links carved.
pub fn add_extra_connections(
    grid: &mut Grid,
    probability: f64,
    rng: &mut TowerRng,
    pacer: &mut Pacer<'_>,
) -> usize {
    let size = grid.size();
    let mut carved = 0;

    for x in 1..size.saturating_sub(1) {
        for y in 1..size.saturating_sub(1) {
            if grid.get(x, y) != CellKind::Path {
                continue;
            }
            for dir in Direction::ALL {
                let (dx, dy) = dir.delta();
                let (tx, ty) = (x as i32 + 2 * dx, y as i32 + 2 * dy);
                // targets may touch the last row or column, never the first
                if tx <= 0 || ty <= 0 {
                    continue;
                }
                let Some(target) = grid.try_get(tx, ty) else {
                    continue;
                };
                if !target.is_carvable() || !rng.chance(probability) {
                    continue;
                }
                let (mx, my) = ((x as i32 + dx) as usize, (y as i32 + dy) as usize);
                grid.set(mx, my, CellKind::Path);
                grid.set(tx as usize, ty as usize, CellKind::Path);
                carved += 1;
                pacer.emit(Stage::ExtraConnections, grid);
            }
        }
    }

    tracing::info!(links = carved, probability, "extra connections added");
    carved
}
