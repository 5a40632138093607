//! Deletion zone: free balls whose center enters it are destroyed

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use crate::Vector2;

/// Axis-aligned rectangle, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeletionZone {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DeletionZone {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// `size` x `size` square pinned to the top-right corner of the screen
    pub fn top_right(screen_width: f32, size: f32) -> Self {
        Self::new(screen_width - size, 0.0, size, size)
    }

    pub fn contains_point(&self, p: Vector2) -> bool {
        self.x <= p.x && p.x <= self.x + self.width && self.y <= p.y && p.y <= self.y + self.height
    }

    /// Only free balls count, and only their center (radius is ignored)
    pub fn contains_ball(&self, ball: &Ball) -> bool {
        ball.is_free() && self.contains_point(ball.position)
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Color;

    #[test]
    fn test_top_right() {
        let zone = DeletionZone::top_right(1000.0, 100.0);
        assert_eq!(zone, DeletionZone::new(900.0, 0.0, 100.0, 100.0));
        assert_eq!(zone.center(), Vector2::new(950.0, 50.0));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let zone = DeletionZone::new(10.0, 20.0, 30.0, 40.0);
        assert!(zone.contains_point(Vector2::new(10.0, 20.0)));
        assert!(zone.contains_point(Vector2::new(40.0, 60.0)));
        assert!(!zone.contains_point(Vector2::new(40.01, 30.0)));
        assert!(!zone.contains_point(Vector2::new(9.99, 30.0)));
    }

    #[test]
    fn test_contains_ball_uses_center_and_state() {
        let zone = DeletionZone::new(0.0, 0.0, 100.0, 100.0);
        let mut ball = Ball::new(1, Vector2::new(50.0, 50.0), 20.0, Color::WHITE, Vector2::ZERO);
        assert!(zone.contains_ball(&ball));

        // Overlapping by radius only does not count
        ball.position = Vector2::new(110.0, 50.0);
        assert!(!zone.contains_ball(&ball));

        ball.position = Vector2::new(50.0, 50.0);
        ball.start_absorption(Vector2::ZERO);
        assert!(!zone.contains_ball(&ball));
    }
}
