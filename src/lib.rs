//! Ferris Road - An endless lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, obstacles, collisions, game state)
//! - `config`: Data-driven world tuning
//! - `error`: Simulation error types
//!
//! Rendering, audio and input devices live outside this crate. The simulation
//! consumes a [`sim::TickInput`] per tick and hands back a [`sim::SceneSnapshot`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::WorldConfig;
pub use error::SimError;

/// Game configuration constants (defaults for [`WorldConfig`])
pub mod consts {
    /// Fixed simulation rate the session is tuned for
    pub const TICK_RATE_HZ: u32 = 60;

    /// Play area dimensions
    pub const PLAY_WIDTH: i32 = 500;
    pub const VIEWPORT_HEIGHT: i32 = 700;
    /// One grid cell; lanes are one cell tall and the player moves one cell per step
    pub const CELL_SIZE: i32 = 50;

    /// Lane window
    pub const MAX_LANES: usize = 15;
    pub const PRE_GENERATE_LINES: i32 = 5;

    /// Run caps (consecutive lanes of one type)
    pub const MAX_RIVER_COUNT: u32 = 2;
    pub const MAX_GRASS_COUNT: u32 = 1;
    pub const MAX_ROAD_COUNT: u32 = 3;

    /// Obstacle speeds (pixels per tick, sign picked per lane)
    pub const CAR_SPEED: i32 = 3;
    pub const LOG_SPEED: i32 = 2;

    /// Obstacle footprints
    pub const CAR_WIDTH: i32 = 100;
    pub const LOG_WIDTH: i32 = 150;

    /// Art variants the presentation layer can pick from
    pub const CAR_VARIANTS: usize = 8;
    pub const GRASS_VARIANTS: usize = 6;
    pub const ROAD_VARIANTS: usize = 2;
    pub const RIVER_VARIANTS: usize = 2;

    /// Resample budget for non-overlapping car placement
    pub const PLACEMENT_RETRIES: u32 = 32;
}

/// Axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0, 0, 50, 50);
        assert!(a.intersects(&Rect::new(49, 0, 50, 50)));
        assert!(a.intersects(&Rect::new(-10, 10, 20, 20)));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 50, 50);
        assert!(!a.intersects(&Rect::new(50, 0, 50, 50)));
        assert!(!a.intersects(&Rect::new(0, 50, 50, 50)));
        assert!(!a.intersects(&Rect::new(-50, 0, 50, 50)));
    }

    #[test]
    fn test_rect_empty_never_intersects() {
        let a = Rect::new(0, 0, 50, 50);
        assert!(!a.intersects(&Rect::new(10, 10, 0, 10)));
    }
}
