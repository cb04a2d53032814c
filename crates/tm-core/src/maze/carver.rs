//! Backtracking maze carver
//!
//! Depth-first walk over cells two steps apart, starting from the grid
//! center. Each hop carves the midpoint and the destination to `path`.
//! Only `floor` and `box` are ever carved, so rooms, pillars and the wall
//! ring shape the maze without being touched.

use serde::{Deserialize, Serialize};

use crate::grid::{CellKind, Grid};
use crate::progress::{Pacer, Stage};
use crate::rng::TowerRng;

/// Two-cell hop directions, in candidate order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit offset of one step
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
        }
    }
}

/// A legal hop from the current cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub between: (usize, usize),
    pub to: (usize, usize),
    pub dir: Direction,
}

/// Stack entry: position and the direction used to get there
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: usize,
    y: usize,
    dir: Option<Direction>,
}

/// Summary of the carving stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeStats {
    /// Cells turned into `path`
    pub cells_carved: usize,
    /// Loop iterations (carves plus backtracks)
    pub steps: usize,
}

fn carvable(grid: &Grid, x: i32, y: i32) -> bool {
    grid.is_interior(x, y) && grid.try_get(x, y).is_some_and(|k| k.is_carvable())
}

/// Legal hops from `(x, y)` in direction order
pub fn legal_moves(grid: &Grid, x: usize, y: usize) -> Vec<Move> {
    Direction::ALL
        .iter()
        .filter_map(|&dir| {
            let (dx, dy) = dir.delta();
            let (mx, my) = (x as i32 + dx, y as i32 + dy);
            let (tx, ty) = (x as i32 + 2 * dx, y as i32 + 2 * dy);
            (carvable(grid, mx, my) && carvable(grid, tx, ty)).then(|| Move {
                between: (mx as usize, my as usize),
                to: (tx as usize, ty as usize),
                dir,
            })
        })
        .collect()
}

/// Carve the maze from the grid center until the stack empties
pub fn carve_maze(
    grid: &mut Grid,
    straight_bias: f64,
    rng: &mut TowerRng,
    pacer: &mut Pacer<'_>,
) -> MazeStats {
    let (cx, cy) = grid.center();
    tracing::info!(start_x = cx, start_y = cy, straight_bias, "carving maze");

    let mut stats = MazeStats::default();
    let every = pacer.batch() * 2;
    let mut stack = vec![Frame {
        x: cx,
        y: cy,
        dir: None,
    }];

    while let Some(&current) = stack.last() {
        stats.steps += 1;
        let mut moves = legal_moves(grid, current.x, current.y);

        if let Some(dir) = current.dir
            && let Some(&straight) = moves.iter().find(|m| m.dir == dir)
            && rng.chance(straight_bias)
        {
            moves = vec![straight];
        }

        match rng.choose(&moves) {
            Some(&next) => {
                grid.set(next.between.0, next.between.1, CellKind::Path);
                grid.set(next.to.0, next.to.1, CellKind::Path);
                stats.cells_carved += 2;
                stack.push(Frame {
                    x: next.to.0,
                    y: next.to.1,
                    dir: Some(next.dir),
                });
            }
            None => {
                stack.pop();
            }
        }
        pacer.tick(Stage::Maze, grid, every);
    }
    pacer.flush(Stage::Maze, grid);

    tracing::info!(cells = stats.cells_carved, steps = stats.steps, "maze carved");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    fn open_grid(size: usize) -> Grid {
        let mut grid = Grid::filled(size, CellKind::Floor);
        let (cx, cy) = grid.center();
        grid.set(cx, cy, CellKind::Pin);
        grid
    }

    /// Cells reachable from `start` over orthogonal `path` steps
    fn flood(grid: &Grid, start: (usize, usize)) -> HashSet<(usize, usize)> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some((x, y)) = queue.pop_front() {
            for (nx, ny, kind) in grid.neighbors(x, y) {
                if kind == CellKind::Path && seen.insert((nx, ny)) {
                    queue.push_back((nx, ny));
                }
            }
        }
        seen
    }

    #[test]
    fn test_legal_moves_respect_ring() {
        let grid = open_grid(5);
        // from the center every hop would land on the outer ring
        assert!(legal_moves(&grid, 2, 2).is_empty());

        let grid = open_grid(7);
        let dirs: Vec<_> = legal_moves(&grid, 3, 3).iter().map(|m| m.dir).collect();
        assert_eq!(dirs, Direction::ALL.to_vec());
    }

    #[test]
    fn test_blocked_midpoint() {
        let mut grid = open_grid(7);
        grid.set(4, 3, CellKind::Pillar);
        let dirs: Vec<_> = legal_moves(&grid, 3, 3).iter().map(|m| m.dir).collect();
        assert!(!dirs.contains(&Direction::Right));
    }

    #[test]
    fn test_carves_every_lattice_cell() {
        let mut grid = open_grid(21);
        let mut rng = TowerRng::new(42);
        let stats = carve_maze(&mut grid, 0.7, &mut rng, &mut Pacer::silent());

        // lattice cells share the center's parity and stay inside 1..=19
        for x in (2..=18).step_by(2) {
            for y in (2..=18).step_by(2) {
                if (x, y) != (10, 10) {
                    assert_eq!(grid.get(x, y), CellKind::Path, "({x}, {y}) not carved");
                }
            }
        }
        assert_eq!(stats.cells_carved, grid.count(CellKind::Path));
    }

    #[test]
    fn test_maze_is_a_tree() {
        let mut grid = open_grid(31);
        let mut rng = TowerRng::new(9);
        carve_maze(&mut grid, 0.5, &mut rng, &mut Pacer::silent());

        // center 15 is odd, so lattice nodes sit on odd coordinates
        let nodes = grid
            .iter()
            .filter(|&(x, y, k)| k == CellKind::Path && x % 2 == 1 && y % 2 == 1)
            .count();
        let edges = grid
            .iter()
            .filter(|&(x, y, k)| k == CellKind::Path && (x % 2) != (y % 2))
            .count();
        // the pin itself is the root node: nodes + 1 vertices, edges = nodes
        assert_eq!(edges, nodes);

        let reached = flood(&grid, (15, 15));
        assert_eq!(reached.len(), grid.count(CellKind::Path));
    }

    #[test]
    fn test_full_bias_runs_straight() {
        let mut grid = open_grid(41);
        let mut rng = TowerRng::new(5);
        carve_maze(&mut grid, 1.0, &mut rng, &mut Pacer::silent());
        // the first hop's direction keeps going until the ring
        let (cx, cy) = grid.center();
        let straight_line = Direction::ALL.iter().any(|d| {
            let (dx, dy) = d.delta();
            (1..=18).all(|step| {
                let x = cx as i32 + dx * step;
                let y = cy as i32 + dy * step;
                grid.try_get(x, y) == Some(CellKind::Path)
            })
        });
        assert!(straight_line);
    }

    #[test]
    fn test_never_carves_rooms() {
        let mut grid = open_grid(21);
        grid.set(12, 10, CellKind::RoomFloor);
        grid.set(4, 4, CellKind::WallNoDoor);
        let mut rng = TowerRng::new(1);
        carve_maze(&mut grid, 0.7, &mut rng, &mut Pacer::silent());
        assert_eq!(grid.get(12, 10), CellKind::RoomFloor);
        assert_eq!(grid.get(4, 4), CellKind::WallNoDoor);
        assert_eq!(grid.get(10, 10), CellKind::Pin);
    }
}
