//! Dead-end pruning
//!
//! Repeatedly fills corridor cells with a single exit back to `floor`.
//! Detection finishes a full scan before any cell is reverted, so a pass
//! never depends on scan order.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_DEAD_END_ITERATIONS;
use crate::grid::{CellKind, Grid};
use crate::progress::{Pacer, Stage};

/// Summary of the pruning stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadEndStats {
    /// Whether the pruner ran at all
    pub ran: bool,
    /// Scans performed
    pub iterations: usize,
    /// Cells reverted to `floor`
    pub removed: usize,
    /// The last scan found nothing to remove
    pub converged: bool,
}

/// Number of orthogonal neighbours a walker can step onto
pub fn exit_count(grid: &Grid, x: usize, y: usize) -> usize {
    grid.neighbors(x, y).filter(|(_, _, kind)| kind.is_exit()).count()
}

/// Interior `path` cells with exactly one exit, x outer, y inner
pub fn find_dead_ends(grid: &Grid) -> Vec<(usize, usize)> {
    let size = grid.size();
    let mut found = Vec::new();
    for x in 1..size.saturating_sub(1) {
        for y in 1..size.saturating_sub(1) {
            if grid.get(x, y) == CellKind::Path && exit_count(grid, x, y) == 1 {
                found.push((x, y));
            }
        }
    }
    found
}

/// Prune until a scan finds no dead end or the iteration cap is reached
pub fn prune_dead_ends(grid: &mut Grid, pacer: &mut Pacer<'_>) -> DeadEndStats {
    let mut stats = DeadEndStats {
        ran: true,
        ..DeadEndStats::default()
    };

    while stats.iterations < MAX_DEAD_END_ITERATIONS {
        stats.iterations += 1;
        let dead_ends = find_dead_ends(grid);
        if dead_ends.is_empty() {
            stats.converged = true;
            break;
        }
        tracing::debug!(
            iteration = stats.iterations,
            count = dead_ends.len(),
            "filling dead ends"
        );
        for &(x, y) in &dead_ends {
            grid.set(x, y, CellKind::Floor);
        }
        stats.removed += dead_ends.len();
        pacer.emit(Stage::DeadEnds, grid);
    }

    if stats.converged {
        tracing::info!(
            iterations = stats.iterations,
            removed = stats.removed,
            "dead end removal complete"
        );
    } else {
        tracing::warn!(
            iterations = stats.iterations,
            removed = stats.removed,
            "dead end removal stopped at iteration cap"
        );
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(grid: &mut Grid, cells: &[(usize, usize)]) {
        for &(x, y) in cells {
            grid.set(x, y, CellKind::Path);
        }
    }

    #[test]
    fn test_exit_count_kinds() {
        let mut grid = Grid::filled(5, CellKind::Floor);
        grid.set(2, 2, CellKind::Path);
        grid.set(1, 2, CellKind::Path);
        grid.set(3, 2, CellKind::Door);
        grid.set(2, 1, CellKind::RoomFloor);
        grid.set(2, 3, CellKind::WallDoor);
        assert_eq!(exit_count(&grid, 2, 2), 3);
    }

    #[test]
    fn test_corridor_between_rooms_survives() {
        let mut grid = Grid::filled(9, CellKind::Floor);
        grid.set(1, 4, CellKind::Door);
        grid.set(7, 4, CellKind::Door);
        corridor(&mut grid, &[(2, 4), (3, 4), (4, 4), (5, 4), (6, 4)]);
        // a spur hanging off the middle
        corridor(&mut grid, &[(4, 5), (4, 6)]);

        let stats = prune_dead_ends(&mut grid, &mut Pacer::silent());
        assert!(stats.converged);
        assert_eq!(stats.removed, 2);
        assert_eq!(stats.iterations, 3);
        assert_eq!(grid.get(4, 5), CellKind::Floor);
        assert_eq!(grid.get(4, 6), CellKind::Floor);
        assert_eq!(grid.count(CellKind::Path), 5);
    }

    #[test]
    fn test_reverts_simultaneously() {
        // a two-cell corridor: both ends see one exit in the same scan
        let mut grid = Grid::filled(5, CellKind::Floor);
        corridor(&mut grid, &[(1, 2), (2, 2)]);
        let stats = prune_dead_ends(&mut grid, &mut Pacer::silent());
        assert_eq!(stats.removed, 2);
        assert_eq!(stats.iterations, 2);
        assert_eq!(grid.count(CellKind::Path), 0);
    }

    #[test]
    fn test_isolated_cell_is_left_alone() {
        let mut grid = Grid::filled(5, CellKind::Floor);
        grid.set(2, 2, CellKind::Path);
        let stats = prune_dead_ends(&mut grid, &mut Pacer::silent());
        assert_eq!(stats.removed, 0);
        assert_eq!(stats.iterations, 1);
        assert_eq!(grid.get(2, 2), CellKind::Path);
    }

    #[test]
    fn test_border_cells_are_not_scanned() {
        let mut grid = Grid::filled(5, CellKind::Floor);
        corridor(&mut grid, &[(0, 2), (1, 2), (2, 2), (3, 2)]);
        grid.set(4, 2, CellKind::Door);
        let stats = prune_dead_ends(&mut grid, &mut Pacer::silent());
        // (0, 2) is a dead end on the outer ring and stays put
        assert_eq!(grid.get(0, 2), CellKind::Path);
        assert!(stats.converged);
        assert_eq!(stats.removed, 0);
    }

    #[test]
    fn test_iteration_cap() {
        // a corridor longer than twice the cap cannot be fully pruned
        let size = 2 * MAX_DEAD_END_ITERATIONS + 11;
        let mut grid = Grid::filled(size, CellKind::Floor);
        for x in 1..size - 1 {
            grid.set(x, 1, CellKind::Path);
        }
        let stats = prune_dead_ends(&mut grid, &mut Pacer::silent());
        assert_eq!(stats.iterations, MAX_DEAD_END_ITERATIONS);
        assert!(!stats.converged);
        assert_eq!(stats.removed, 2 * MAX_DEAD_END_ITERATIONS);
    }

    #[test]
    fn test_one_snapshot_per_pass() {
        let mut recorder = crate::progress::SnapshotRecorder::new();
        let mut grid = Grid::filled(8, CellKind::Floor);
        corridor(&mut grid, &[(1, 3), (2, 3), (3, 3), (4, 3), (5, 3), (6, 3)]);
        {
            let mut pacer = Pacer::new(&mut recorder, 1, 50);
            prune_dead_ends(&mut grid, &mut pacer);
        }
        // both ends shrink by one cell per pass
        assert_eq!(recorder.count(Stage::DeadEnds), 3);
    }
}
