//! Custom widgets

mod maze;
mod status;

pub use maze::{CellStyle, MazeWidget};
pub use status::StatusWidget;
