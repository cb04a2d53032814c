//! Generation pipeline
//!
//! Runs every stage in order on one owned grid:
//! tower, rooms, maze, doors, extra connections, then (optionally) dead-end
//! pruning. Each stage takes the grid by exclusive borrow and hands it on.

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::grid::{CellKind, Grid, TowerShape, stamp_tower};
use crate::maze::{DeadEndStats, MazeStats, add_extra_connections, carve_maze, prune_dead_ends};
use crate::progress::{NullSink, Pacer, ProgressSink, Stage};
use crate::rng::TowerRng;
use crate::rooms::{DoorStats, PlacedRoom, PlacementStats, RoomPlacer, connect_rooms};

/// Tower geometry and the cell census right after stamping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub radius: f64,
    pub wall_thickness: f64,
    pub census: Vec<(CellKind, usize)>,
}

/// Everything that happened during one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub grid_size: usize,
    pub tower: TowerStats,
    pub placement: PlacementStats,
    pub maze: MazeStats,
    pub doors: DoorStats,
    pub extra_connections: usize,
    pub dead_ends: DeadEndStats,
    /// Cell counts per kind of the finished grid
    pub census: Vec<(CellKind, usize)>,
}

impl GenerationReport {
    /// Final count of one cell kind
    pub fn final_count(&self, kind: CellKind) -> usize {
        self.census
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |&(_, n)| n)
    }
}

/// Output of a run
#[derive(Debug, Clone)]
pub struct Generation {
    pub grid: Grid,
    pub rooms: Vec<PlacedRoom>,
    pub shape: TowerShape,
    pub report: GenerationReport,
}

/// Pipeline driver bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct TowerGenerator {
    config: GeneratorConfig,
}

impl TowerGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Random source for a run: the configured seed, or a fresh one
    pub fn rng(&self) -> TowerRng {
        match self.config.seed {
            Some(seed) => TowerRng::new(seed),
            None => TowerRng::from_entropy(),
        }
    }

    /// Run the pipeline with the configured seed and no sink
    pub fn generate_default(&self) -> Generation {
        let mut rng = self.rng();
        self.generate(&mut rng, &mut NullSink)
    }

    /// Run the full pipeline, reporting snapshots to `sink`
    pub fn generate(&self, rng: &mut TowerRng, sink: &mut dyn ProgressSink) -> Generation {
        let config = &self.config;
        let span = tracing::info_span!("generate", seed = rng.seed(), grid_size = config.grid_size);
        let _enter = span.enter();

        let mut pacer = Pacer::new(sink, config.cell_size, config.sleep_threshold);
        let mut grid = Grid::new(config.grid_size);

        let shape = stamp_tower(&mut grid, config, &mut pacer);
        let tower = TowerStats {
            radius: shape.radius,
            wall_thickness: shape.wall_thickness,
            census: grid.census(),
        };

        let placer = RoomPlacer::new(&config.room_templates, shape, config.max_room_placement_attempts);
        let (rooms, placement) = placer.place_all(&mut grid, config.min_rooms, rng, &mut pacer);

        let maze = carve_maze(&mut grid, config.straight_bias, rng, &mut pacer);

        let doors = connect_rooms(&mut grid, &rooms, config.extra_door_probability, rng, &mut pacer);

        let extra_connections =
            add_extra_connections(&mut grid, config.connection_probability, rng, &mut pacer);

        let dead_ends = if config.remove_dead_ends {
            prune_dead_ends(&mut grid, &mut pacer)
        } else {
            DeadEndStats::default()
        };

        pacer.emit(Stage::Complete, &grid);
        tracing::info!(
            rooms = rooms.len(),
            paths = grid.count(CellKind::Path),
            doors = grid.count(CellKind::Door),
            "maze generation complete"
        );

        let report = GenerationReport {
            seed: rng.seed(),
            grid_size: config.grid_size,
            tower,
            placement,
            maze,
            doors,
            extra_connections,
            dead_ends,
            census: grid.census(),
        };
        Generation {
            grid,
            rooms,
            shape,
            report,
        }
    }
}
