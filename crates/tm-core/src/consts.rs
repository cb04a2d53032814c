//! Generation constants and configuration defaults

/// Default side length of the square grid (must be odd)
pub const DEFAULT_GRID_SIZE: usize = 129;

/// Default pixel size of one cell in rendered output
pub const DEFAULT_CELL_SIZE: u32 = 4;

/// Default number of mutations between two progress snapshots
pub const DEFAULT_SLEEP_THRESHOLD: usize = 50;

/// Default tower radius as a fraction of the grid size
pub const DEFAULT_TOWER_RADIUS_FACTOR: f64 = 0.5;

/// Default thickness of the outer wall ring, in cells
pub const DEFAULT_WALL_THICKNESS: f64 = 3.0;

/// Default period of the pillar lattice
pub const DEFAULT_PILLAR_SPACING: usize = 16;

/// Default chance to punch an extra corridor link from a path cell
pub const DEFAULT_CONNECTION_PROBABILITY: f64 = 0.1;

/// Default chance to keep carving in the direction of arrival
pub const DEFAULT_STRAIGHT_BIAS: f64 = 0.7;

/// Default minimum number of rooms expected in a tower
pub const DEFAULT_MIN_ROOMS: usize = 8;

/// Default placement attempt budget
pub const DEFAULT_MAX_ROOM_PLACEMENT_ATTEMPTS: usize = 500;

/// Default chance to open each additional door candidate of a room
pub const DEFAULT_EXTRA_DOOR_PROBABILITY: f64 = 0.2;

/// Default chance attached to dead-end removal (see `prune_dead_ends`)
pub const DEFAULT_DEAD_END_REMOVAL_CHANCE: f64 = 0.8;

/// Hard cap on dead-end pruning passes
pub const MAX_DEAD_END_ITERATIONS: usize = 100;

/// Number of distinct template rotations (0, 90, 180 and 270 degrees)
pub const ROTATIONS: u32 = 4;
