//! Grid model
//!
//! Contains cell kinds, the square grid, and the tower footprint stamp.

mod cell;
mod map;
mod tower;

pub use cell::CellKind;
pub use map::{Grid, ORTHOGONAL};
pub use tower::{TowerShape, on_pillar_lattice, stamp_tower};
