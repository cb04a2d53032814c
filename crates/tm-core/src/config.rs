//! Generator configuration
//!
//! Option names follow the JSON form (`gridSize`, `straightBias`, ...).
//! Every field has a default, so a partial document only overrides what it
//! names. Generation never validates; callers run [`GeneratorConfig::validate`]
//! before handing a config over.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::rooms::{RoomTemplate, builtin_templates};

/// Immutable input of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Side length of the square grid (odd)
    pub grid_size: usize,
    /// Pixel size of one cell in rendered output
    pub cell_size: u32,
    /// Mutations between two progress snapshots
    pub sleep_threshold: usize,
    /// Tower radius is `grid_size * tower_radius_factor`
    pub tower_radius_factor: f64,
    /// Thickness of the outer wall ring
    pub wall_thickness: f64,
    /// Period of the pillar lattice
    pub pillar_spacing: usize,
    /// Chance to carve an extra link from a corridor into uncarved floor
    pub connection_probability: f64,
    /// Chance to keep going straight when the maze carver can
    pub straight_bias: f64,
    /// Rooms expected after placement; fewer is reported, not enforced
    pub min_rooms: usize,
    /// Placement attempt budget (per template in the minimum phase,
    /// global in the fill phase)
    pub max_room_placement_attempts: usize,
    /// Chance to open each door candidate beyond the guaranteed one
    pub extra_door_probability: f64,
    /// Run the dead-end pruner
    pub remove_dead_ends: bool,
    /// Carried for compatibility; the pruner removes every dead end it finds
    pub dead_end_removal_chance: f64,
    /// Fixed seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Room catalog used by placement
    pub room_templates: Vec<RoomTemplate>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            sleep_threshold: DEFAULT_SLEEP_THRESHOLD,
            tower_radius_factor: DEFAULT_TOWER_RADIUS_FACTOR,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            pillar_spacing: DEFAULT_PILLAR_SPACING,
            connection_probability: DEFAULT_CONNECTION_PROBABILITY,
            straight_bias: DEFAULT_STRAIGHT_BIAS,
            min_rooms: DEFAULT_MIN_ROOMS,
            max_room_placement_attempts: DEFAULT_MAX_ROOM_PLACEMENT_ATTEMPTS,
            extra_door_probability: DEFAULT_EXTRA_DOOR_PROBABILITY,
            remove_dead_ends: false,
            dead_end_removal_chance: DEFAULT_DEAD_END_REMOVAL_CHANCE,
            seed: None,
            room_templates: builtin_templates(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Pretty JSON form, suitable for writing back to a file
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Copy of this config with the keys of a JSON object applied on top.
    /// Keys absent from `overrides` keep their current value.
    pub fn with_overrides(&self, overrides: &str) -> Result<Self, ConfigError> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(overrides)?;
        if let (Some(base), serde_json::Value::Object(patch)) = (base.as_object_mut(), patch) {
            for (key, value) in patch {
                base.insert(key, value);
            }
        }
        Ok(serde_json::from_value(base)?)
    }

    /// Tower radius in cells
    pub fn radius(&self) -> f64 {
        self.grid_size as f64 * self.tower_radius_factor
    }

    /// Check every option against its sane range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 3 || self.grid_size % 2 == 0 {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        if !(self.tower_radius_factor > 0.0 && self.tower_radius_factor <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "towerRadiusFactor",
                value: self.tower_radius_factor,
                min: 0.0,
                max: 1.0,
            });
        }
        if !(self.wall_thickness.is_finite() && self.wall_thickness >= 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "wallThickness",
                value: self.wall_thickness,
                min: 0.0,
                max: f64::MAX,
            });
        }
        for (name, value) in [
            ("connectionProbability", self.connection_probability),
            ("straightBias", self.straight_bias),
            ("extraDoorProbability", self.extra_door_probability),
            ("deadEndRemovalChance", self.dead_end_removal_chance),
        ] {
            check_probability(name, value)?;
        }
        for (name, value) in [
            ("pillarSpacing", self.pillar_spacing),
            ("cellSize", self.cell_size as usize),
            ("sleepThreshold", self.sleep_threshold),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { name });
            }
        }

        let mut names = HashSet::new();
        for template in &self.room_templates {
            if template.min_frequency > template.max_frequency {
                return Err(ConfigError::FrequencyBounds {
                    name: template.name.clone(),
                    min: template.min_frequency,
                    max: template.max_frequency,
                });
            }
            if !names.insert(template.name.as_str()) {
                return Err(ConfigError::DuplicateTemplate(template.name.clone()));
            }
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}
