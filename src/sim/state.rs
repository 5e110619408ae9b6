//! Game session state
//!
//! One owned value holds everything a run needs. The presentation layer keeps
//! it, feeds it a [`super::TickInput`] per tick, and resets it on request.

use serde::{Deserialize, Serialize};

use super::camera::CameraController;
use super::collision::DeathCause;
use super::player::PlayerAgent;
use super::rng::SimRng;
use super::track::LaneTrack;
use crate::config::WorldConfig;
use crate::error::SimError;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Active gameplay
    Playing,
    /// Run ended; frozen until reset
    GameOver,
}

/// One-shot notifications for collaborators such as audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (construction or reset)
    SessionStarted,
    /// The run just ended
    GameOverEntered { score: u64, cause: DeathCause },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: WorldConfig,
    /// Seed the session was created with
    pub seed: u64,
    rng: SimRng,
    pub state: SessionState,
    pub player: PlayerAgent,
    pub camera: CameraController,
    pub track: LaneTrack,
    /// Ticks simulated since the last reset
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session; the config is validated first
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = SimRng::new(seed);
        let player = PlayerAgent::new(&config);
        let track = LaneTrack::generate(&config, player.pos.y, &mut rng)?;
        log::info!("Session started with seed {}", seed);
        Ok(Self {
            config,
            seed,
            rng,
            state: SessionState::Playing,
            player,
            camera: CameraController::new(),
            track,
            time_ticks: 0,
            events: vec![GameEvent::SessionStarted],
        })
    }

    /// Start a new run. The random stream continues, so the new world differs
    /// from the last one while the whole sequence stays reproducible.
    pub fn reset(&mut self) -> Result<(), SimError> {
        let player = PlayerAgent::new(&self.config);
        self.track = LaneTrack::generate(&self.config, player.pos.y, &mut self.rng)?;
        self.player = player;
        self.camera = CameraController::new();
        self.state = SessionState::Playing;
        self.time_ticks = 0;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session reset");
        Ok(())
    }

    pub fn score(&self) -> u64 {
        self.player.score()
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Playing -> GameOver, queuing the event once
    pub(crate) fn end_run(&mut self, cause: DeathCause) {
        if self.state == SessionState::GameOver {
            return;
        }
        self.state = SessionState::GameOver;
        let score = self.player.score();
        log::info!("Game over ({:?}) with score {}", cause, score);
        self.events.push(GameEvent::GameOverEntered { score, cause });
    }

    /// Generate lanes ahead of the camera, retiring those behind
    pub(crate) fn extend_track(&mut self) -> Result<usize, SimError> {
        self.track
            .advance(&self.config, self.camera.offset(), &mut self.rng)
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lane::LaneType;

    #[test]
    fn test_new_session() {
        let mut session = GameSession::new(WorldConfig::default(), 12345).unwrap();
        assert_eq!(session.state, SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.track.len(), session.config.max_lanes);
        assert_eq!(session.track.get(0).unwrap().lane_type, LaneType::Grass);
        assert_eq!(session.track.get(0).unwrap().row, session.player.pos.y);
        assert_eq!(session.drain_events(), vec![GameEvent::SessionStarted]);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(config, 1),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_end_run_fires_once() {
        let mut session = GameSession::new(WorldConfig::default(), 1).unwrap();
        session.drain_events();
        session.end_run(DeathCause::Drowned);
        session.end_run(DeathCause::HitByCar);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::GameOverEntered { score: 0, cause: DeathCause::Drowned }]
        );
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut session = GameSession::new(WorldConfig::default(), 77).unwrap();
        let first_world: Vec<_> = session.track.iter().cloned().collect();
        session.player.pos.y -= 500;
        session.camera.follow(session.player.pos.y, &session.config);
        session.end_run(DeathCause::HitByCar);
        session.drain_events();

        session.reset().unwrap();
        assert_eq!(session.state, SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.player, PlayerAgent::new(&session.config));
        assert_eq!(session.camera.offset(), 0);
        assert_eq!(session.track.len(), session.config.max_lanes);
        assert_eq!(session.track.get(0).unwrap().lane_type, LaneType::Grass);
        assert_eq!(session.drain_events(), vec![GameEvent::SessionStarted]);

        let second_world: Vec<_> = session.track.iter().cloned().collect();
        assert_ne!(first_world, second_world, "reset should draw a fresh world");
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameSession::new(WorldConfig::default(), 5).unwrap();
        let b = GameSession::new(WorldConfig::default(), 5).unwrap();
        assert!(a.track.iter().eq(b.track.iter()));
    }
}
