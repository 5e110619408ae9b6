//! The controllable crab

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::config::WorldConfig;

/// Held directional keys for one tick (a snapshot, not a queue)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionKeys {
    pub up: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    pub fn any(&self) -> bool {
        self.up || self.left || self.right
    }
}

/// A move the player actually made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Up,
    Left,
    Right,
}

/// Player position, debounce latch and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAgent {
    /// Top-left corner in world pixels
    pub pos: IVec2,
    /// True once every direction key has been released since the last move
    pub can_move: bool,
    /// Forward steps taken this session
    score: u64,
}

impl PlayerAgent {
    pub fn new(config: &WorldConfig) -> Self {
        let (x, y) = config.spawn_position();
        Self {
            pos: IVec2::new(x, y),
            can_move: true,
            score: 0,
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Apply one tick of held keys.
    ///
    /// At most one move is taken per press: Up wins over Left, Left over
    /// Right. Sideways moves that would leave `[0, play_width - cell]` are
    /// dropped without consuming the press. The latch re-arms on the first
    /// tick with no direction held.
    pub fn handle_keys(&mut self, keys: DirectionKeys, config: &WorldConfig) -> Option<Step> {
        let cell = config.cell_size;
        let mut taken = None;

        if self.can_move {
            if keys.up {
                self.pos.y -= cell;
                self.score += 1;
                taken = Some(Step::Up);
            } else if keys.left && self.pos.x - cell >= 0 {
                self.pos.x -= cell;
                taken = Some(Step::Left);
            } else if keys.right && self.pos.x + cell <= config.play_width - cell {
                self.pos.x += cell;
                taken = Some(Step::Right);
            }
            if taken.is_some() {
                self.can_move = false;
            }
        }

        if !keys.any() {
            self.can_move = true;
        }
        taken
    }

    /// Carry the player sideways (log drift). No bounds check.
    pub fn drift(&mut self, dx: i32) {
        self.pos.x += dx;
    }

    /// Collision footprint: one grid cell
    pub fn bounding_box(&self, cell_size: i32) -> Rect {
        Rect::new(self.pos.x, self.pos.y, cell_size, cell_size)
    }

    /// Whether the player is still over the play area horizontally
    pub fn in_bounds(&self, config: &WorldConfig) -> bool {
        self.pos.x >= 0 && self.pos.x <= config.play_width - config.cell_size
    }
}
