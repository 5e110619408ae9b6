//! Lanes and their obstacle population
//!
//! A lane's obstacle set is decided once, when the lane is built. After that
//! the obstacles move but are never added or removed.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::rng::RandomSource;
use crate::config::WorldConfig;

/// Lane types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneType {
    /// Always safe, no obstacles
    Grass,
    /// Cars kill on contact
    Road,
    /// Water kills unless standing on a log
    River,
}

impl LaneType {
    pub const ALL: [LaneType; 3] = [LaneType::Grass, LaneType::Road, LaneType::River];

    pub fn as_str(&self) -> &'static str {
        match self {
            LaneType::Grass => "grass",
            LaneType::Road => "road",
            LaneType::River => "river",
        }
    }

    /// How many background variants exist for this type
    fn texture_variants(&self, config: &WorldConfig) -> usize {
        match self {
            LaneType::Grass => config.grass_variants,
            LaneType::Road => config.road_variants,
            LaneType::River => config.river_variants,
        }
    }
}

/// One horizontal strip of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// World row (top edge); decreases as the world extends upward
    pub row: i32,
    pub lane_type: LaneType,
    /// Background art variant for the presentation layer
    pub texture_variant: usize,
    /// Spawn order is kept
    obstacles: Vec<Obstacle>,
}

impl Lane {
    /// Build a lane and populate it for its type
    pub fn generate<R: RandomSource + ?Sized>(
        row: i32,
        lane_type: LaneType,
        config: &WorldConfig,
        rng: &mut R,
    ) -> Self {
        let texture_variant = rng.pick_index(lane_type.texture_variants(config));
        let obstacles = match lane_type {
            LaneType::Grass => Vec::new(),
            LaneType::Road => place_cars(row, config, rng),
            LaneType::River => place_logs(row, config, rng),
        };
        Self {
            row,
            lane_type,
            texture_variant,
            obstacles,
        }
    }

    /// Build a lane with a hand-picked obstacle set
    pub fn with_obstacles(row: i32, lane_type: LaneType, obstacles: Vec<Obstacle>) -> Self {
        Self {
            row,
            lane_type,
            texture_variant: 0,
            obstacles,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Move every obstacle one tick
    pub fn advance(&mut self, play_width: i32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(play_width);
        }
    }
}

/// How many obstacles a new lane gets. Bounds past `i32::MAX` saturate.
fn draw_count<R: RandomSource + ?Sized>(range: &RangeInclusive<u32>, rng: &mut R) -> usize {
    let lo = i32::try_from(*range.start()).unwrap_or(i32::MAX);
    let hi = i32::try_from(*range.end()).unwrap_or(i32::MAX).max(lo);
    rng.range_inclusive(lo, hi).max(0) as usize
}

/// Road traffic: one shared direction, cars spaced left to right.
///
/// Each car after the first starts at least two reference widths past the
/// previous one. When that start no longer fits, the car drops into the left
/// half of the road instead. Draws that overlap an earlier car are resampled
/// up to `placement_retries` times; after that the last draw is kept.
fn place_cars<R: RandomSource + ?Sized>(row: i32, config: &WorldConfig, rng: &mut R) -> Vec<Obstacle> {
    let speed = rng.sign() * config.car_speed;
    let count = draw_count(&config.cars_per_road, rng);

    let reference = config.reference_car_width();
    let min_gap = reference * 2;
    let max_x = config.play_width - reference;

    let mut cars: Vec<Obstacle> = Vec::with_capacity(count);
    for _ in 0..count {
        let variant = rng.pick_index(config.car_widths.len());
        let width = config.car_widths[variant];
        let kind = ObstacleKind::Car { variant };

        let x = match cars.last() {
            None => rng.range_inclusive(0, max_x),
            Some(last) => {
                let start_x = last.x + min_gap;
                if start_x > max_x {
                    rng.range_inclusive(0, max_x / 2)
                } else {
                    let mut attempts = 0;
                    loop {
                        let x = rng.range_inclusive(start_x, max_x);
                        let candidate = Obstacle::new(kind, x, row, speed, width);
                        let bounds = candidate.bounding_box(config.cell_size);
                        let clear = !cars
                            .iter()
                            .any(|car| car.bounding_box(config.cell_size).intersects(&bounds));
                        attempts += 1;
                        if clear {
                            break x;
                        }
                        if attempts >= config.placement_retries.max(1) {
                            log::debug!(
                                "Road row {}: no clear slot after {} draws, keeping x={}",
                                row,
                                attempts,
                                x
                            );
                            break x;
                        }
                    }
                }
            }
        };
        cars.push(Obstacle::new(kind, x, row, speed, width));
    }
    cars
}

/// River logs: one shared direction, independent positions (overlap allowed)
fn place_logs<R: RandomSource + ?Sized>(row: i32, config: &WorldConfig, rng: &mut R) -> Vec<Obstacle> {
    let speed = rng.sign() * config.log_speed;
    let count = draw_count(&config.logs_per_river, rng);
    (0..count)
        .map(|_| {
            let x = rng.range_inclusive(0, config.play_width);
            Obstacle::new(ObstacleKind::Log, x, row, speed, config.log_width)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRng, SimRng};
    use proptest::prelude::*;

    fn config() -> WorldConfig {
        WorldConfig::default()
    }

    #[test]
    fn test_grass_has_no_obstacles() {
        let mut rng = SimRng::new(1);
        let lane = Lane::generate(0, LaneType::Grass, &config(), &mut rng);
        assert!(lane.obstacles().is_empty());
        assert!(lane.texture_variant < config().grass_variants);
    }

    #[test]
    fn test_road_cars_share_direction_and_count() {
        let config = config();
        let mut rng = SimRng::new(99);
        for i in 0..200 {
            let lane = Lane::generate(-50 * i, LaneType::Road, &config, &mut rng);
            let cars = lane.obstacles();
            assert!((1..=2).contains(&cars.len()));
            let speed = cars[0].speed();
            assert_eq!(speed.abs(), config.car_speed);
            for car in cars {
                assert_eq!(car.speed(), speed);
                assert_eq!(car.row, lane.row);
                assert!(matches!(car.kind, ObstacleKind::Car { .. }));
            }
        }
    }

    #[test]
    fn test_river_logs_share_direction_and_count() {
        let config = config();
        let mut rng = SimRng::new(5);
        for _ in 0..200 {
            let lane = Lane::generate(0, LaneType::River, &config, &mut rng);
            let logs = lane.obstacles();
            assert!((2..=4).contains(&logs.len()));
            for log in logs {
                assert_eq!(log.speed(), logs[0].speed());
                assert_eq!(log.speed().abs(), config.log_speed);
                assert!((0..=config.play_width).contains(&log.x));
                assert_eq!(log.width, config.log_width);
            }
        }
    }

    #[test]
    fn test_second_car_keeps_min_gap() {
        // texture, sign, count=2, variant, x=0, variant, x=250
        let mut rng = ScriptedRng::new(&[0, 1, 2, 0, 0, 0, 250]);
        let lane = Lane::generate(0, LaneType::Road, &config(), &mut rng);
        let xs: Vec<i32> = lane.obstacles().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0, 250]);
        assert_eq!(lane.obstacles()[0].speed(), 3);
    }

    #[test]
    fn test_second_car_falls_back_to_left_half() {
        // First car at 300: 300 + 200 > 400, so the next draw is clamped to [0, 200].
        let mut rng = ScriptedRng::new(&[0, 0, 2, 0, 300, 0, 999]);
        let lane = Lane::generate(0, LaneType::Road, &config(), &mut rng);
        let cars = lane.obstacles();
        assert_eq!(cars[0].x, 300);
        assert_eq!(cars[1].x, 200);
        assert_eq!(cars[0].speed(), -3);
    }

    #[test]
    fn test_exhausted_retries_accept_overlap() {
        // A wide first variant makes every draw in [start, max_x] overlap it.
        let config = WorldConfig {
            car_widths: vec![50, 400],
            placement_retries: 3,
            ..Default::default()
        };
        // texture, sign, count=2, variant 1 (w=400) at x=0, variant 0, then 3 draws at 100
        let mut rng = ScriptedRng::new(&[0, 1, 2, 1, 0, 0, 100, 100, 100, 7]);
        let lane = Lane::generate(0, LaneType::Road, &config, &mut rng);
        let cars = lane.obstacles();
        assert_eq!(cars.len(), 2);
        assert_eq!(cars[1].x, 100);
        assert!(cars[0].bounding_box(50).intersects(&cars[1].bounding_box(50)));
        // The fourth scripted draw was never consumed.
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_resample_finds_clear_slot() {
        let config = WorldConfig {
            car_widths: vec![50, 250],
            ..Default::default()
        };
        // First car w=250 at x=0; start = 100, draws 120 and 200 overlap, 260 is clear.
        let mut rng = ScriptedRng::new(&[0, 1, 2, 1, 0, 0, 120, 200, 260]);
        let lane = Lane::generate(0, LaneType::Road, &config, &mut rng);
        assert_eq!(lane.obstacles()[1].x, 260);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_count_draw_saturates_huge_bounds() {
        let mut rng = ScriptedRng::new(&[]);
        assert_eq!(draw_count(&(3..=u32::MAX), &mut rng), 3);

        let mut rng = ScriptedRng::new(&[7]);
        assert_eq!(draw_count(&(u32::MAX..=u32::MAX), &mut rng), i32::MAX as usize);
        assert_eq!(draw_count(&(2..=4), &mut ScriptedRng::new(&[4])), 4);
    }

    #[test]
    fn test_advance_moves_every_obstacle() {
        let mut rng = SimRng::new(3);
        let mut lane = Lane::generate(0, LaneType::River, &config(), &mut rng);
        let before: Vec<i32> = lane.obstacles().iter().map(|o| o.x).collect();
        let count = lane.obstacles().len();
        lane.advance(config().play_width);
        assert_eq!(lane.obstacles().len(), count);
        assert_ne!(
            before,
            lane.obstacles().iter().map(|o| o.x).collect::<Vec<_>>()
        );
    }

    proptest! {
        #[test]
        fn prop_road_always_leaves_a_gap(seed in any::<u64>()) {
            let config = config();
            let mut rng = SimRng::new(seed);
            let lane = Lane::generate(0, LaneType::Road, &config, &mut rng);
            // Covered span of the union, clipped to the play area.
            let mut spans: Vec<(i32, i32)> = lane
                .obstacles()
                .iter()
                .map(|c| (c.x.max(0), (c.x + c.width).min(config.play_width)))
                .collect();
            spans.sort();
            let mut covered = 0;
            let mut reach = 0;
            for (start, end) in spans {
                let start = start.max(reach);
                if end > start {
                    covered += end - start;
                    reach = end;
                }
            }
            prop_assert!(covered < config.play_width - config.reference_car_width());
        }
    }
}
