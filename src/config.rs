//! World tuning
//!
//! Every number the simulation depends on lives here so a presentation layer
//! can ship its own JSON without touching the core.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Tunable world parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === Geometry ===
    /// Play area width in pixels
    pub play_width: i32,
    /// Visible area height in pixels
    pub viewport_height: i32,
    /// Grid cell size (lane height and player step)
    pub cell_size: i32,

    // === Lane window ===
    /// Lanes kept alive at once
    pub max_lanes: usize,
    /// Rows of look-ahead the camera keeps above the player
    pub pre_generate_lines: i32,
    /// Longest allowed river run
    pub max_river_run: u32,
    /// Longest allowed grass run
    pub max_grass_run: u32,
    /// Longest allowed road run
    pub max_road_run: u32,

    // === Traffic ===
    /// Car speed magnitude (pixels per tick)
    pub car_speed: i32,
    /// Width of each car sprite variant; the first is the reference width
    pub car_widths: Vec<i32>,
    /// Cars spawned per road lane
    pub cars_per_road: RangeInclusive<u32>,
    /// Resample attempts before accepting an overlapping car
    pub placement_retries: u32,

    // === River ===
    /// Log speed magnitude (pixels per tick)
    pub log_speed: i32,
    /// Log width
    pub log_width: i32,
    /// Logs spawned per river lane
    pub logs_per_river: RangeInclusive<u32>,

    // === Art variants ===
    pub grass_variants: usize,
    pub road_variants: usize,
    pub river_variants: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            cell_size: CELL_SIZE,

            max_lanes: MAX_LANES,
            pre_generate_lines: PRE_GENERATE_LINES,
            max_river_run: MAX_RIVER_COUNT,
            max_grass_run: MAX_GRASS_COUNT,
            max_road_run: MAX_ROAD_COUNT,

            car_speed: CAR_SPEED,
            car_widths: vec![CAR_WIDTH; CAR_VARIANTS],
            cars_per_road: 1..=2,
            placement_retries: PLACEMENT_RETRIES,

            log_speed: LOG_SPEED,
            log_width: LOG_WIDTH,
            logs_per_river: 2..=4,

            grass_variants: GRASS_VARIANTS,
            road_variants: ROAD_VARIANTS,
            river_variants: RIVER_VARIANTS,
        }
    }
}

impl WorldConfig {
    /// Parse from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json).map_err(|e| SimError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Json(e.to_string()))
    }

    /// Width used for road spacing (first car variant)
    pub fn reference_car_width(&self) -> i32 {
        self.car_widths.first().copied().unwrap_or(0)
    }

    /// Widest car variant
    pub fn max_car_width(&self) -> i32 {
        self.car_widths.iter().copied().max().unwrap_or(0)
    }

    /// Upper bound on cars or logs spawned in a single lane (one per cell)
    pub fn max_obstacles_per_lane(&self) -> u32 {
        (self.play_width / self.cell_size.max(1)).max(0) as u32
    }

    /// Whole rows visible at once
    pub fn visible_rows(&self) -> usize {
        (self.viewport_height / self.cell_size.max(1)) as usize
    }

    /// Where a fresh player stands
    pub fn spawn_position(&self) -> (i32, i32) {
        let cell = self.cell_size;
        let x = (self.play_width / 2) / cell * cell;
        (x, self.viewport_height - cell)
    }

    /// Reject tuning that cannot produce a playable world
    pub fn validate(&self) -> Result<(), SimError> {
        let fail = |msg: String| Err(SimError::InvalidConfig(msg));

        if self.cell_size <= 0 {
            return fail(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if self.play_width < 2 * self.cell_size || self.play_width % self.cell_size != 0 {
            return fail(format!(
                "play_width {} must be a multiple of cell_size {} spanning at least two cells",
                self.play_width, self.cell_size
            ));
        }
        if self.viewport_height <= 0 || self.viewport_height % self.cell_size != 0 {
            return fail(format!(
                "viewport_height {} must be a positive multiple of cell_size {}",
                self.viewport_height, self.cell_size
            ));
        }
        if self.max_lanes < self.visible_rows() + 1 {
            return fail(format!(
                "max_lanes {} cannot cover {} visible rows plus one row of margin",
                self.max_lanes,
                self.visible_rows()
            ));
        }
        // Once scrolling, the player sits `rows - pre_generate_lines` rows below the
        // top of the screen and the lowest lane sits `max_lanes - 2` rows below it.
        let rows = self.visible_rows() as i64;
        let look_ahead = self.pre_generate_lines as i64;
        if look_ahead < 0 || look_ahead > rows {
            return fail(format!(
                "pre_generate_lines {} must lie in 0..={}",
                self.pre_generate_lines, rows
            ));
        }
        if rows - look_ahead + 1 > self.max_lanes as i64 - 1 {
            return fail(format!(
                "max_lanes {} leaves the player below the lane window with {} look-ahead rows",
                self.max_lanes, self.pre_generate_lines
            ));
        }
        if self.max_river_run == 0 || self.max_grass_run == 0 || self.max_road_run == 0 {
            return fail("every run cap must be at least 1".into());
        }
        if self.car_speed <= 0 || self.log_speed <= 0 {
            return fail("obstacle speeds must be positive magnitudes".into());
        }
        if self.car_widths.is_empty() || self.car_widths.iter().any(|&w| w <= 0) {
            return fail("car_widths needs at least one positive width".into());
        }
        if self.log_width <= 0 {
            return fail(format!("log_width must be positive, got {}", self.log_width));
        }
        if self.cars_per_road.is_empty() || self.logs_per_river.is_empty() {
            return fail("obstacle count ranges must not be empty".into());
        }
        let max_per_lane = self.max_obstacles_per_lane();
        if *self.cars_per_road.end() > max_per_lane || *self.logs_per_river.end() > max_per_lane {
            return fail(format!(
                "at most {} obstacles fit in one lane, got cars {:?} and logs {:?}",
                max_per_lane, self.cars_per_road, self.logs_per_river
            ));
        }
        // Even with every car packed side by side, one reference car width stays open.
        let packed = *self.cars_per_road.end() as i64 * self.max_car_width() as i64;
        let open = (self.play_width - self.reference_car_width()) as i64;
        if packed >= open {
            return fail(format!(
                "{} cars of width {} can block a {}px road",
                self.cars_per_road.end(),
                self.max_car_width(),
                self.play_width
            ));
        }
        if self.grass_variants == 0 || self.road_variants == 0 || self.river_variants == 0 {
            return fail("every lane type needs at least one art variant".into());
        }
        Ok(())
    }
}
