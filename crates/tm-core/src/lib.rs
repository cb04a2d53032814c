//! tm-core: Core logic for the tower maze generator
//!
//! Builds a circular "tower" on a square grid, packs hand-authored room
//! templates into it, carves a backtracking maze through the remaining floor,
//! opens doors between rooms and corridors, and optionally prunes dead ends.
//!
//! The crate performs no I/O beyond optional configuration loading. Progress
//! is reported to a [`ProgressSink`] so front ends can animate the build.

pub mod config;
pub mod error;
pub mod generation;
pub mod grid;
pub mod maze;
pub mod progress;
pub mod rooms;

mod consts;
mod rng;

pub use config::GeneratorConfig;
pub use consts::*;
pub use error::{ConfigError, GridError, TemplateError};
pub use generation::{Generation, GenerationReport, TowerGenerator};
pub use grid::{CellKind, Grid, TowerShape};
pub use progress::{NullSink, ProgressSink, Snapshot, SnapshotRecorder, Stage};
pub use rng::TowerRng;
