//! Lane window: generate ahead, retire behind
//!
//! Lanes are stored bottom to top. Index 0 is the lowest row still simulated
//! (the starting grass row right after a reset) and the back of the deque is
//! the leading edge. Rows are contiguous, one cell apart, so run caps hold
//! along the real row sequence.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::lane::{Lane, LaneType};
use super::rng::RandomSource;
use crate::config::WorldConfig;
use crate::error::SimError;

/// Consecutive-type counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub river: u32,
    pub grass: u32,
    pub road: u32,
}

impl RunCounters {
    /// Types still allowed under the configured caps, in a stable order
    pub fn candidates(&self, config: &WorldConfig) -> Vec<LaneType> {
        LaneType::ALL
            .into_iter()
            .filter(|lane_type| match lane_type {
                LaneType::River => self.river < config.max_river_run,
                LaneType::Grass => self.grass < config.max_grass_run,
                LaneType::Road => self.road < config.max_road_run,
            })
            .collect()
    }

    /// Extend the chosen run and break the others
    pub fn record(&mut self, lane_type: LaneType) {
        let (river, grass, road) = (self.river, self.grass, self.road);
        *self = RunCounters::default();
        match lane_type {
            LaneType::River => self.river = river + 1,
            LaneType::Grass => self.grass = grass + 1,
            LaneType::Road => self.road = road + 1,
        }
    }
}

/// Bounded window of simulated lanes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneTrack {
    lanes: VecDeque<Lane>,
    runs: RunCounters,
}

impl LaneTrack {
    /// Fill a fresh window: the bottom row is grass, the rest follow the run rules
    pub fn generate<R: RandomSource + ?Sized>(
        config: &WorldConfig,
        bottom_row: i32,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let mut track = Self {
            lanes: VecDeque::with_capacity(config.max_lanes + 1),
            runs: RunCounters::default(),
        };

        track.runs.record(LaneType::Grass);
        track
            .lanes
            .push_back(Lane::generate(bottom_row, LaneType::Grass, config, rng));

        while track.lanes.len() < config.max_lanes {
            track.push_next(config, rng)?;
        }

        log::debug!(
            "Lane window filled: {} lanes, rows {}..={}",
            track.lanes.len(),
            track.leading_row(),
            bottom_row
        );
        Ok(track)
    }

    /// Pick the next lane type under the run caps and update the counters
    pub fn select_type<R: RandomSource + ?Sized>(
        &mut self,
        config: &WorldConfig,
        rng: &mut R,
    ) -> Result<LaneType, SimError> {
        let candidates = self.runs.candidates(config);
        if candidates.is_empty() {
            return Err(SimError::NoLaneCandidates {
                river: self.runs.river,
                grass: self.runs.grass,
                road: self.runs.road,
            });
        }
        let lane_type = candidates[rng.pick_index(candidates.len())];
        self.runs.record(lane_type);
        Ok(lane_type)
    }

    /// Generate a lane one row above the leading edge
    fn push_next<R: RandomSource + ?Sized>(
        &mut self,
        config: &WorldConfig,
        rng: &mut R,
    ) -> Result<(), SimError> {
        let row = self.leading_row() - config.cell_size;
        let lane_type = self.select_type(config, rng)?;
        self.lanes.push_back(Lane::generate(row, lane_type, config, rng));
        Ok(())
    }

    /// Keep lanes ahead of the camera. Returns how many lanes were generated.
    ///
    /// While the leading lane sits lower than one cell above the top of the
    /// screen a new lane goes above it, and the lowest lane is dropped once
    /// the window is over capacity.
    pub fn advance<R: RandomSource + ?Sized>(
        &mut self,
        config: &WorldConfig,
        camera_offset: i32,
        rng: &mut R,
    ) -> Result<usize, SimError> {
        let mut generated = 0;
        while self.leading_row() - camera_offset > -config.cell_size {
            self.push_next(config, rng)?;
            generated += 1;
            while self.lanes.len() > config.max_lanes {
                if let Some(retired) = self.lanes.pop_front() {
                    log::debug!("Retired {} lane at row {}", retired.lane_type.as_str(), retired.row);
                }
            }
        }
        if generated > 0 {
            log::debug!(
                "Generated {} lane(s), leading row now {}",
                generated,
                self.leading_row()
            );
        }
        Ok(generated)
    }

    /// Row of the leading (top) lane
    pub fn leading_row(&self) -> i32 {
        self.lanes.back().map(|lane| lane.row).unwrap_or(0)
    }

    /// Row of the lowest lane
    pub fn trailing_row(&self) -> i32 {
        self.lanes.front().map(|lane| lane.row).unwrap_or(0)
    }

    pub fn runs(&self) -> RunCounters {
        self.runs
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Lane by window index (0 = lowest)
    pub fn get(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    /// Lanes bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.iter()
    }

    /// For moving obstacles; rows must not change
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Lane> {
        self.lanes.iter_mut()
    }

    /// Index of the lane holding `y`, if any lane lies within half a cell of it
    pub fn index_of_row(&self, y: i32, cell_size: i32) -> Option<usize> {
        let bottom = self.lanes.front()?.row;
        let offset = bottom - y;
        if offset < -cell_size / 2 {
            return None;
        }
        // Round to the nearest row; grid-aligned players land exactly.
        let index = ((offset + cell_size / 2) / cell_size) as usize;
        let lane = self.lanes.get(index)?;
        ((lane.row - y).abs() * 2 < cell_size).then_some(index)
    }

    /// Lane the player at `y` is standing in
    pub fn lane_at(&self, y: i32, cell_size: i32) -> Option<&Lane> {
        self.index_of_row(y, cell_size).and_then(|i| self.lanes.get(i))
    }

    /// Swap in a hand-built lane (the row must match the slot)
    pub fn replace(&mut self, index: usize, lane: Lane) -> Option<Lane> {
        let slot = self.lanes.get_mut(index)?;
        if slot.row != lane.row {
            return None;
        }
        Some(std::mem::replace(slot, lane))
    }
}
