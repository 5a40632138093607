//! Fixed-capacity inventory of absorbed balls

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use crate::Vector2;
use crate::consts::{SLOT_SPACING, SLOTS_PER_ROW};

/// Default inventory capacity
pub const DEFAULT_CAPACITY: usize = 10;

/// Ordered ball storage. The newest ball is last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    balls: Vec<Ball>,
    max_size: usize,
    /// Screen position of slot 0
    pub position: Vector2,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, Vector2::new(50.0, 50.0))
    }
}

impl Inventory {
    pub fn new(max_size: usize, position: Vector2) -> Self {
        Self {
            balls: Vec::new(),
            max_size,
            position,
        }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn can_add(&self) -> bool {
        self.balls.len() < self.max_size
    }

    pub fn is_full(&self) -> bool {
        !self.can_add()
    }

    /// Screen position of a slot (rows of five, 50px apart)
    pub fn slot_position(&self, slot: usize) -> Vector2 {
        let col = (slot % SLOTS_PER_ROW) as f32;
        let row = (slot / SLOTS_PER_ROW) as f32;
        self.position + Vector2::new(col * SLOT_SPACING, row * SLOT_SPACING)
    }

    /// Store a ball and start its flight to the next free slot.
    ///
    /// Returns the slot index, or gives the ball back when full.
    pub fn add(&mut self, mut ball: Ball) -> Result<usize, Ball> {
        if !self.can_add() {
            return Err(ball);
        }
        let slot = self.balls.len();
        ball.start_absorption(self.slot_position(slot));
        self.balls.push(ball);
        Ok(slot)
    }

    /// Take the ball at `index` out, or `None` if there is no such ball
    pub fn remove(&mut self, index: usize) -> Option<Ball> {
        if index < self.balls.len() {
            Some(self.balls.remove(index))
        } else {
            None
        }
    }

    /// Take the most recently added ball
    pub fn pop(&mut self) -> Option<Ball> {
        self.balls.pop()
    }

    /// First ball whose center is within its own radius of `point`
    pub fn get_ball_at(&self, point: Vector2) -> Option<&Ball> {
        self.balls
            .iter()
            .find(|ball| ball.position.distance(point) <= ball.radius)
    }

    /// Advance the animation of every held ball
    pub fn update(&mut self, dt: f32, width: f32, height: f32) {
        for ball in self.balls.iter_mut() {
            ball.update(dt, width, height);
        }
    }
}
