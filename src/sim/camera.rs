//! Vertical scroll that only ever moves up

use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraController {
    /// World row drawn at the top of the screen
    offset: i32,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Track the player, keeping `pre_generate_lines` rows of look-ahead.
    /// The offset never increases.
    pub fn follow(&mut self, player_y: i32, config: &WorldConfig) {
        let target = player_y - config.viewport_height + config.cell_size * config.pre_generate_lines;
        self.offset = self.offset.min(target);
    }

    /// Convert a world row to a screen row
    #[inline]
    pub fn to_screen(&self, row: i32) -> i32 {
        row - self.offset
    }

    /// Whether a one-cell strip at `row` shows on screen
    pub fn is_visible(&self, row: i32, config: &WorldConfig) -> bool {
        let screen = self.to_screen(row);
        screen > -config.cell_size && screen < config.viewport_height
    }
}
