//! Room system
//!
//! Contains templates, the built-in catalog, placement, and door connection.

mod catalog;
mod connect;
mod placement;
mod template;

pub use catalog::builtin_templates;
pub use connect::{DoorCandidate, DoorStats, connect_rooms, find_door_candidates, group_by_room};
pub use placement::{PlacedRoom, PlacementStats, RoomPlacer, Shortfall, can_place, stamp_room};
pub use template::{Layout, Marker, RoomTemplate};
