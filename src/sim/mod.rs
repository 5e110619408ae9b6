//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (lanes bottom to top, obstacles in spawn order)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod lane;
pub mod obstacle;
pub mod player;
pub mod rng;
pub mod scene;
pub mod state;
pub mod tick;
pub mod track;

pub use camera::CameraController;
pub use collision::{CollisionOutcome, DeathCause, resolve};
pub use lane::{Lane, LaneType};
pub use obstacle::{Obstacle, ObstacleKind};
pub use player::{DirectionKeys, PlayerAgent, Step};
pub use rng::{RandomSource, SimRng};
pub use scene::{LaneView, ObstacleView, PlayerView, SceneSnapshot};
pub use state::{GameEvent, GameSession, SessionState};
pub use tick::{TickInput, tick};
pub use track::{LaneTrack, RunCounters};
