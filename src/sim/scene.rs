//! Renderable view of a session
//!
//! Everything a presentation layer needs to draw one frame, in screen rows.

use serde::{Deserialize, Serialize};

use super::lane::LaneType;
use super::obstacle::ObstacleKind;
use super::state::{GameEvent, GameSession, SessionState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub x: i32,
    pub width: i32,
    pub facing_right: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneView {
    pub lane_type: LaneType,
    /// World row
    pub row: i32,
    /// Row relative to the top of the screen
    pub screen_row: i32,
    pub texture_variant: usize,
    pub obstacles: Vec<ObstacleView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: i32,
    pub y: i32,
    pub screen_y: i32,
}

/// One frame's worth of state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub state: SessionState,
    pub score: u64,
    pub camera_offset: i32,
    pub player: PlayerView,
    /// Visible lanes, lowest first
    pub lanes: Vec<LaneView>,
    /// Events raised since the previous snapshot
    pub events: Vec<GameEvent>,
}

impl SceneSnapshot {
    /// Capture the visible part of the session and take its pending events
    pub fn capture(session: &mut GameSession) -> Self {
        let events = session.drain_events();
        let camera = session.camera;
        let lanes = session
            .track
            .iter()
            .filter(|lane| camera.is_visible(lane.row, &session.config))
            .map(|lane| LaneView {
                lane_type: lane.lane_type,
                row: lane.row,
                screen_row: camera.to_screen(lane.row),
                texture_variant: lane.texture_variant,
                obstacles: lane
                    .obstacles()
                    .iter()
                    .map(|o| ObstacleView {
                        kind: o.kind,
                        x: o.x,
                        width: o.width,
                        facing_right: o.facing_right(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            state: session.state,
            score: session.score(),
            camera_offset: camera.offset(),
            player: PlayerView {
                x: session.player.pos.x,
                y: session.player.pos.y,
                screen_y: camera.to_screen(session.player.pos.y),
            },
            lanes,
            events,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
