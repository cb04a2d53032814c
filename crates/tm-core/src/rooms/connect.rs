//! Door discovery and room connection
//!
//! A door candidate is a `wall_door` cell stamped by a room with at least
//! one orthogonal `path` neighbour. Don't-care cells of a room's box are not
//! part of it, even when a neighbour's wall sits there. Every room with candidates gets
//! one guaranteed door; the others open with `extra_door_probability`.

use serde::{Deserialize, Serialize};

use super::placement::PlacedRoom;
use super::template::Marker;
use crate::grid::{CellKind, Grid};
use crate::progress::{Pacer, Stage};
use crate::rng::TowerRng;

/// Coordinate of a door-eligible room wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorCandidate {
    pub x: usize,
    pub y: usize,
}

/// Summary of the connection stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorStats {
    pub candidates: usize,
    pub opened: usize,
    /// Indices of rooms left without any door
    pub sealed_rooms: Vec<usize>,
}

fn touches_path(grid: &Grid, x: usize, y: usize) -> bool {
    grid.neighbors(x, y).any(|(_, _, kind)| kind == CellKind::Path)
}

/// Every door candidate, walking each room's stamped cells `dy` outer, `dx` inner
pub fn find_door_candidates(grid: &Grid, rooms: &[PlacedRoom]) -> Vec<DoorCandidate> {
    let mut found = Vec::new();
    for room in rooms {
        for (x, y, marker) in room.footprint() {
            if marker != Marker::WallDoor
                || grid.get(x, y) != CellKind::WallDoor
                || !touches_path(grid, x, y)
            {
                continue;
            }
            let candidate = DoorCandidate { x, y };
            if !found.contains(&candidate) {
                found.push(candidate);
            }
        }
    }
    found
}

/// Candidates of each room, by stamped-cell membership
pub fn group_by_room(candidates: &[DoorCandidate], rooms: &[PlacedRoom]) -> Vec<Vec<DoorCandidate>> {
    rooms
        .iter()
        .map(|room| {
            candidates
                .iter()
                .copied()
                .filter(|c| room.owns(c.x, c.y))
                .collect()
        })
        .collect()
}

fn open_door(grid: &mut Grid, door: DoorCandidate) -> bool {
    if grid.get(door.x, door.y) == CellKind::WallDoor {
        grid.set(door.x, door.y, CellKind::Door);
        true
    } else {
        false
    }
}

/// Open doors between rooms and the carved maze
pub fn connect_rooms(
    grid: &mut Grid,
    rooms: &[PlacedRoom],
    extra_door_probability: f64,
    rng: &mut TowerRng,
    pacer: &mut Pacer<'_>,
) -> DoorStats {
    tracing::info!(rooms = rooms.len(), "connecting rooms to maze");
    let candidates = find_door_candidates(grid, rooms);
    let groups = group_by_room(&candidates, rooms);

    let mut stats = DoorStats {
        candidates: candidates.len(),
        ..DoorStats::default()
    };

    for (index, doors) in groups.iter().enumerate() {
        let Some(&first) = rng.choose(doors) else {
            tracing::warn!(
                room = index,
                template = %rooms[index].template.name,
                x = rooms[index].x,
                y = rooms[index].y,
                "room has no door candidates and stays sealed"
            );
            stats.sealed_rooms.push(index);
            continue;
        };
        if open_door(grid, first) {
            stats.opened += 1;
            pacer.emit(Stage::Doors, grid);
        }

        for &extra in doors.iter().filter(|&&d| d != first) {
            if rng.chance(extra_door_probability) && open_door(grid, extra) {
                stats.opened += 1;
                pacer.emit(Stage::Doors, grid);
            }
        }
    }

    tracing::info!(
        candidates = stats.candidates,
        opened = stats.opened,
        sealed = stats.sealed_rooms.len(),
        "room connections complete"
    );
    stats
}
