//! Fixed timestep simulation tick
//!
//! Order per tick: player input, camera, lane generation, obstacle movement,
//! then the collision rules of the lane the player stands in.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionOutcome, resolve};
use super::player::DirectionKeys;
use super::scene::SceneSnapshot;
use super::state::{GameSession, SessionState};
use crate::error::SimError;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Direction keys currently held
    pub keys: DirectionKeys,
    /// Confirm / try again (only honoured after game over)
    pub confirm: bool,
}

impl TickInput {
    pub fn up() -> Self {
        Self::held(DirectionKeys { up: true, ..Default::default() })
    }

    pub fn left() -> Self {
        Self::held(DirectionKeys { left: true, ..Default::default() })
    }

    pub fn right() -> Self {
        Self::held(DirectionKeys { right: true, ..Default::default() })
    }

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Default::default()
        }
    }

    fn held(keys: DirectionKeys) -> Self {
        Self {
            keys,
            confirm: false,
        }
    }
}

/// Advance the session by one tick and describe the result
pub fn tick(session: &mut GameSession, input: &TickInput) -> Result<SceneSnapshot, SimError> {
    // Frozen until the player asks for another run
    if session.state == SessionState::GameOver {
        if input.confirm {
            session.reset()?;
        }
        return Ok(SceneSnapshot::capture(session));
    }

    session.time_ticks += 1;

    let config = &session.config;
    if let Some(step) = session.player.handle_keys(input.keys, config) {
        log::trace!("Player {:?} to {}", step, session.player.pos);
    }

    session.camera.follow(session.player.pos.y, &session.config);
    session.extend_track()?;

    let play_width = session.config.play_width;
    for lane in session.track.iter_mut() {
        lane.advance(play_width);
    }

    let cell = session.config.cell_size;
    let outcome = session
        .track
        .lane_at(session.player.pos.y, cell)
        .map(|lane| resolve(&session.player, lane, cell))
        .unwrap_or(CollisionOutcome::Safe);

    match outcome {
        CollisionOutcome::Safe => {}
        CollisionOutcome::Ride { log_index, speed } => {
            session.player.drift(speed);
            log::trace!("Riding log {} by {}", log_index, speed);
        }
        CollisionOutcome::Die(cause) => session.end_run(cause),
    }

    Ok(SceneSnapshot::capture(session))
}
