//! Ball entity: free movement, absorb/release animation, merging
//!
//! Lifecycle:
//! - `Free --start_absorption--> BeingAbsorbed --progress >= 1--> InInventory`
//! - `InInventory --start_release--> BeingReleased --progress <= 0--> Free`
//! - Two `Free` balls that touch merge into a brand new `Free` ball.

use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::consts::*;
use crate::{Vector2, ease_in_out};

/// Ball lifecycle state. Animation data lives inside the variant that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Moving freely in the arena
    Free,
    /// Flying toward an inventory slot
    BeingAbsorbed { target: Vector2, progress: f32 },
    /// Parked at an inventory slot
    InInventory { slot: Vector2 },
    /// Flying back out of the inventory
    BeingReleased { anchor: Vector2, progress: f32 },
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f32,
    pub mass: f32,
    pub color: Color,
    pub state: BallState,
}

impl Ball {
    pub fn new(id: u32, position: Vector2, radius: f32, color: Color, velocity: Vector2) -> Self {
        Self {
            id,
            position,
            velocity,
            radius,
            mass: radius * MASS_PER_RADIUS,
            color,
            state: BallState::Free,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self.state, BallState::Free)
    }

    /// Endpoint of the current animation, if one is running
    pub fn target_position(&self) -> Option<Vector2> {
        match self.state {
            BallState::BeingAbsorbed { target, .. } => Some(target),
            BallState::BeingReleased { anchor, .. } => Some(anchor),
            _ => None,
        }
    }

    /// 0 = fully out in the arena, 1 = fully in the inventory
    pub fn absorption_progress(&self) -> f32 {
        match self.state {
            BallState::Free => 0.0,
            BallState::InInventory { .. } => 1.0,
            BallState::BeingAbsorbed { progress, .. } | BallState::BeingReleased { progress, .. } => {
                progress
            }
        }
    }

    /// Advance by `dt` seconds inside a `width` x `height` arena
    pub fn update(&mut self, dt: f32, width: f32, height: f32) {
        match self.state {
            BallState::Free => self.update_free(dt, width, height),
            BallState::BeingAbsorbed { target, progress } => self.update_absorption(dt, target, progress),
            BallState::BeingReleased { anchor, progress } => self.update_release(dt, anchor, progress),
            BallState::InInventory { .. } => {}
        }
    }

    fn update_free(&mut self, dt: f32, width: f32, height: f32) {
        self.position += self.velocity * dt;

        let r = self.radius;
        if self.position.x <= r || self.position.x >= width - r {
            self.velocity.x *= WALL_BOUNCE;
        }
        if self.position.y <= r || self.position.y >= height - r {
            self.velocity.y *= WALL_BOUNCE;
        }

        // Not f32::clamp: the arena may be narrower than the ball
        self.position.x = self.position.x.min(width - r).max(r);
        self.position.y = self.position.y.min(height - r).max(r);

        self.velocity *= FRICTION;
    }

    fn update_absorption(&mut self, dt: f32, target: Vector2, progress: f32) {
        let progress = (progress + dt * ABSORB_SPEED).min(1.0);
        if progress >= 1.0 {
            self.position = target;
            self.state = BallState::InInventory { slot: target };
        } else {
            // Re-anchored on the current position every step
            self.position += (target - self.position) * ease_in_out(progress);
            self.state = BallState::BeingAbsorbed { target, progress };
        }
    }

    fn update_release(&mut self, dt: f32, anchor: Vector2, progress: f32) {
        let progress = (progress - dt * RELEASE_SPEED).max(0.0);
        if progress <= 0.0 {
            self.state = BallState::Free;
        } else {
            self.position = anchor + (self.position - anchor) * ease_in_out(1.0 - progress);
            self.state = BallState::BeingReleased { anchor, progress };
        }
    }

    /// Begin flying toward `target`
    pub fn start_absorption(&mut self, target: Vector2) {
        self.state = BallState::BeingAbsorbed { target, progress: 0.0 };
    }

    /// Begin flying out from `position` with `velocity`
    pub fn start_release(&mut self, position: Vector2, velocity: Vector2) {
        let anchor = match self.state {
            BallState::InInventory { slot } => slot,
            BallState::BeingAbsorbed { target, .. } => target,
            BallState::BeingReleased { anchor, .. } => anchor,
            BallState::Free => position,
        };
        self.position = position;
        self.velocity = velocity;
        self.state = BallState::BeingReleased { anchor, progress: 1.0 };
    }

    /// Both balls free and distinct
    pub fn can_collide_with(&self, other: &Ball) -> bool {
        self.is_free() && other.is_free() && self.id != other.id
    }

    pub fn collides_with(&self, other: &Ball) -> bool {
        self.can_collide_with(other)
            && self.position.distance(other.position) <= self.radius + other.radius
    }

    /// Combine two balls into a new free ball with id `id`
    pub fn merge_with(&self, other: &Ball, id: u32) -> Ball {
        let position = (self.position + other.position) * 0.5;
        let radius = (self.radius * self.radius + other.radius * other.radius).sqrt() * MERGE_SHRINK;
        let color = Color::mix(self.color, other.color);

        let total_mass = self.mass + other.mass;
        let velocity = (self.velocity * self.mass + other.velocity * other.mass) / total_mass;

        Ball::new(id, position, radius, color, velocity)
    }
}
