//! tm-tui: Terminal front end for the tower maze generator
//!
//! Replays recorded generation snapshots with ratatui and renders grids
//! to PNG.

pub mod app;
pub mod png;
pub mod theme;
pub mod widgets;

pub use app::ReplayApp;
pub use theme::Theme;
