//! Moving lane entities (cars and logs)

use serde::{Deserialize, Serialize};

use crate::Rect;

/// What an obstacle is, for collision rules and art selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Road traffic; `variant` picks one of the car sprites
    Car { variant: usize },
    /// Floating platform on a river
    Log,
}

/// A moving entity confined to one lane row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Left edge in world pixels
    pub x: i32,
    /// Row of the owning lane
    pub row: i32,
    /// Signed pixels per tick; never changes after spawn
    speed: i32,
    pub width: i32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: i32, row: i32, speed: i32, width: i32) -> Self {
        Self {
            kind,
            x,
            row,
            speed,
            width,
        }
    }

    #[inline]
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Sprites face the direction of travel; zero speed counts as rightward
    pub fn facing_right(&self) -> bool {
        self.speed >= 0
    }

    /// Advance one tick, wrapping once fully past an edge of the play area
    pub fn advance(&mut self, play_width: i32) {
        self.x += self.speed;
        if self.speed > 0 && self.x > play_width {
            self.x = -self.width;
        } else if self.speed < 0 && self.x < -self.width {
            self.x = play_width;
        }
    }

    /// Collision footprint: full width, one cell tall
    pub fn bounding_box(&self, cell_size: i32) -> Rect {
        Rect::new(self.x, self.row, self.width, cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: i32 = 500;

    /// Closed-form position after `n` ticks under the wrap rule
    fn predicted_x(x0: i32, speed: i32, width: i32, n: u32) -> i32 {
        let s = speed.abs() as i64;
        let (x0, width, w) = (x0 as i64, width as i64, W as i64);
        let n = n as i64;
        if speed > 0 {
            // Ticks until the first wrap, then a fixed period from -width.
            let first = (w - x0).div_euclid(s) + 1;
            if n < first {
                return (x0 + n * s) as i32;
            }
            let period = (w + width).div_euclid(s) + 1;
            let k = (n - first) % period;
            (-width + k * s) as i32
        } else {
            let first = (x0 + width).div_euclid(s) + 1;
            if n < first {
                return (x0 - n * s) as i32;
            }
            let period = (w + width).div_euclid(s) + 1;
            let k = (n - first) % period;
            (w - k * s) as i32
        }
    }

    #[test]
    fn test_rightward_wraps_to_negative_width() {
        let mut car = Obstacle::new(ObstacleKind::Car { variant: 0 }, 499, 0, 3, 100);
        car.advance(W);
        assert_eq!(car.x, -100);
        assert!(car.facing_right());
    }

    #[test]
    fn test_leftward_wraps_to_play_width() {
        let mut log = Obstacle::new(ObstacleKind::Log, -149, 0, -2, 150);
        log.advance(W);
        assert_eq!(log.x, W);
        assert!(!log.facing_right());
    }

    #[test]
    fn test_exact_edge_does_not_wrap() {
        let mut car = Obstacle::new(ObstacleKind::Car { variant: 0 }, 497, 0, 3, 100);
        car.advance(W);
        assert_eq!(car.x, 500);

        let mut log = Obstacle::new(ObstacleKind::Log, -148, 0, -2, 150);
        log.advance(W);
        assert_eq!(log.x, -150);
    }

    #[test]
    fn test_bounding_box_uses_row_and_cell() {
        let log = Obstacle::new(ObstacleKind::Log, 10, -200, 2, 150);
        assert_eq!(log.bounding_box(50), Rect::new(10, -200, 150, 50));
    }

    proptest! {
        #[test]
        fn prop_wrap_matches_prediction(
            x0 in -150i32..=500,
            magnitude in 1i32..=5,
            rightward in any::<bool>(),
            width in 50i32..=150,
            n in 0u32..2000,
        ) {
            // Spawn positions live inside the wrap band for this width.
            prop_assume!(x0 >= -width);
            let speed = if rightward { magnitude } else { -magnitude };
            let mut obstacle = Obstacle::new(ObstacleKind::Log, x0, 0, speed, width);
            for _ in 0..n {
                obstacle.advance(W);
            }
            prop_assert_eq!(obstacle.x, predicted_x(x0, speed, width, n));
            prop_assert_eq!(obstacle.speed(), speed);
        }
    }
}
