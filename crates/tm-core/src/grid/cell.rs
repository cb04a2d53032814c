//! Cell kinds of the tower grid

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Classification of a single grid position
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum CellKind {
    /// Outside the tower disc
    Out = 0,
    /// Outer boundary ring
    Wall = 1,
    /// Unused interior filler
    #[default]
    Box = 2,
    /// Interior candidate for carving and room placement
    Floor = 3,
    /// Decorative obstacle on the pillar lattice
    Pillar = 4,
    /// The single center cell
    Pin = 5,
    /// Carved corridor
    Path = 6,
    /// Inside of a placed room
    RoomFloor = 7,
    /// Room perimeter that may become a door
    WallDoor = 8,
    /// Room perimeter that never becomes a door
    WallNoDoor = 9,
    /// Opened connection between a room and a corridor
    Door = 10,
}

impl CellKind {
    /// Cells that never change once stamped
    pub const fn is_fixed(&self) -> bool {
        matches!(
            self,
            CellKind::Out | CellKind::Wall | CellKind::Pillar | CellKind::Pin
        )
    }

    /// Cells the maze carver may turn into corridor
    pub const fn is_carvable(&self) -> bool {
        matches!(self, CellKind::Floor | CellKind::Box)
    }

    /// Cells a room stamp may overwrite
    pub const fn is_placeable(&self) -> bool {
        matches!(self, CellKind::Floor | CellKind::Box)
    }

    /// Cells stamped by room placement
    pub const fn is_room(&self) -> bool {
        matches!(
            self,
            CellKind::RoomFloor | CellKind::WallDoor | CellKind::WallNoDoor | CellKind::Door
        )
    }

    /// Cells counted as an exit when looking for dead ends
    pub const fn is_exit(&self) -> bool {
        matches!(self, CellKind::Path | CellKind::Door | CellKind::RoomFloor)
    }

    /// Fixed display color as `[r, g, b]`
    pub const fn rgb(&self) -> [u8; 3] {
        match self {
            CellKind::Out => [0x00, 0x00, 0x00],
            CellKind::Wall => [0x55, 0x55, 0x55],
            CellKind::Box => [0x77, 0x77, 0x77],
            CellKind::Floor => [0xCC, 0xCC, 0xCC],
            CellKind::Pillar => [0xFF, 0x00, 0x00],
            CellKind::Pin => [0x00, 0xFF, 0x00],
            CellKind::Path => [0xFF, 0xFF, 0xFF],
            CellKind::RoomFloor => [0xCC, 0xFF, 0xCC],
            CellKind::WallDoor => [0x66, 0x55, 0x66],
            CellKind::WallNoDoor => [0x77, 0x44, 0x44],
            CellKind::Door => [0xFF, 0xFF, 0x00],
        }
    }

    /// ASCII representation used by text dumps and the terminal viewer
    pub const fn glyph(&self) -> char {
        match self {
            CellKind::Out => ' ',
            CellKind::Wall => '#',
            CellKind::Box => '=',
            CellKind::Floor => ':',
            CellKind::Pillar => 'I',
            CellKind::Pin => '@',
            CellKind::Path => '.',
            CellKind::RoomFloor => '_',
            CellKind::WallDoor => '+',
            CellKind::WallNoDoor => '%',
            CellKind::Door => 'D',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_matches_tag_names() {
        assert_eq!(CellKind::RoomFloor.to_string(), "room_floor");
        assert_eq!(CellKind::WallNoDoor.to_string(), "wall_no_door");
        assert_eq!(CellKind::Out.to_string(), "out");
    }

    #[test]
    fn test_serde_uses_tag_names() {
        let json = serde_json::to_string(&CellKind::WallDoor).unwrap();
        assert_eq!(json, "\"wall_door\"");
    }

    #[test]
    fn test_fixed_kinds_are_not_carvable_or_placeable() {
        for kind in CellKind::iter().filter(CellKind::is_fixed) {
            assert!(!kind.is_carvable());
            assert!(!kind.is_placeable());
        }
    }

    #[test]
    fn test_glyphs_distinguish_walls() {
        assert_ne!(CellKind::WallDoor.glyph(), CellKind::WallNoDoor.glyph());
        assert_ne!(CellKind::Door.glyph(), CellKind::WallDoor.glyph());
    }

    #[test]
    fn test_door_color() {
        assert_eq!(CellKind::Door.rgb(), [0xFF, 0xFF, 0x00]);
        assert_eq!(CellKind::iter().count(), 11);
    }
}
