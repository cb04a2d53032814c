//! Corridor stages: carving, extra links and dead-end pruning

mod carver;
mod deadends;
mod extra;

pub use carver::{Direction, MazeStats, Move, carve_maze, legal_moves};
pub use deadends::{DeadEndStats, exit_count, find_dead_ends, prune_dead_ends};
pub use extra::add_extra_connections;
