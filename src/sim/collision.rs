//! Player vs lane rules
//!
//! Each lane type reacts differently to the player standing in it: grass is
//! always safe, any car overlap on a road is fatal, and a river is fatal
//! unless the player overlaps a log, in which case the log carries them.

use serde::{Deserialize, Serialize};

use super::lane::{Lane, LaneType};
use super::player::PlayerAgent;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    HitByCar,
    Drowned,
}

/// Result of evaluating the player against their current lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// Nothing happens
    Safe,
    /// Standing on a log; the player drifts by `speed` this tick
    Ride { log_index: usize, speed: i32 },
    /// Run over
    Die(DeathCause),
}

impl CollisionOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CollisionOutcome::Die(_))
    }
}

/// Evaluate the player against the lane they occupy.
///
/// Pure: the same player and lane always give the same outcome. When logs
/// overlap, the first one in spawn order is ridden.
pub fn resolve(player: &PlayerAgent, lane: &Lane, cell_size: i32) -> CollisionOutcome {
    let player_box = player.bounding_box(cell_size);
    let mut hits = lane
        .obstacles()
        .iter()
        .enumerate()
        .filter(|(_, obstacle)| obstacle.bounding_box(cell_size).intersects(&player_box));

    match lane.lane_type {
        LaneType::Grass => CollisionOutcome::Safe,
        LaneType::Road => match hits.next() {
            Some(_) => CollisionOutcome::Die(DeathCause::HitByCar),
            None => CollisionOutcome::Safe,
        },
        LaneType::River => match hits.next() {
            Some((log_index, log)) => CollisionOutcome::Ride {
                log_index,
                speed: log.speed(),
            },
            None => CollisionOutcome::Die(DeathCause::Drowned),
        },
    }
}
