//! Simulation core: authoritative game state and external commands
//!
//! A ball lives in exactly one container at a time: the arena list or the
//! inventory. Every command moves balls by value between the two.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::color::Color;
use super::inventory::Inventory;
use super::zone::DeletionZone;
use crate::consts::*;
use crate::settings::SimConfig;
use crate::{Vector2, uniform};

/// Complete simulation state
///
/// `R` is the randomness source used for spawns, colors and release jitter.
/// Seeding it identically and issuing the same commands reproduces a run exactly.
#[derive(Debug, Clone)]
pub struct GameLogic<R = Pcg32> {
    /// Arena balls in insertion order (free or animating out of the inventory)
    pub(crate) balls: Vec<Ball>,
    pub(crate) inventory: Inventory,
    pub(crate) deletion_zone: DeletionZone,
    pub(crate) absorption_radius: f32,
    pub(crate) mouse_position: Vector2,
    pub(crate) screen_width: f32,
    pub(crate) screen_height: f32,
    /// Number of completed `update` calls
    pub(crate) tick_count: u64,
    /// Next entity ID
    pub(crate) next_id: u32,
    pub(crate) rng: R,
}

impl GameLogic<Pcg32> {
    /// Create a simulation driven by a seeded PCG generator
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameLogic<R> {
    /// Create a simulation with an injected randomness source
    ///
    /// The cursor starts at the arena center, which is (400, 300) for the
    /// default 800x600 arena and follows the arena on other sizes.
    pub fn with_rng(config: SimConfig, rng: R) -> Self {
        let width = config.screen_width;
        let height = config.screen_height;
        let mut logic = Self {
            balls: Vec::new(),
            inventory: Inventory::new(
                config.inventory_capacity,
                Vector2::new(config.inventory_origin.0, config.inventory_origin.1),
            ),
            deletion_zone: DeletionZone::top_right(width, config.deletion_zone_size),
            absorption_radius: config.absorption_radius,
            mouse_position: Vector2::new(width / 2.0, height / 2.0),
            screen_width: width,
            screen_height: height,
            tick_count: 0,
            next_id: 1,
            rng,
        };

        for _ in 0..config.initial_balls {
            logic.add_random_ball();
        }

        log::info!(
            "Simulation ready: {}x{} arena, {} balls, inventory capacity {}",
            width,
            height,
            logic.balls.len(),
            logic.inventory.capacity()
        );
        logic
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn deletion_zone(&self) -> &DeletionZone {
        &self.deletion_zone
    }

    pub fn mouse_position(&self) -> Vector2 {
        self.mouse_position
    }

    pub fn absorption_radius(&self) -> f32 {
        self.absorption_radius
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.screen_width, self.screen_height)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Arena balls that are not mid-animation
    pub fn free_ball_count(&self) -> usize {
        self.balls.iter().filter(|b| b.is_free()).count()
    }

    pub fn set_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_position = Vector2::new(x, y);
    }

    /// Place a free ball in the arena, returning its id
    pub fn spawn_ball(&mut self, position: Vector2, radius: f32, color: Color, velocity: Vector2) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, position, radius, color, velocity));
        id
    }

    /// Spawn a random ball inset from the edges. Never fails.
    pub fn add_random_ball(&mut self) -> u32 {
        let x = uniform(&mut self.rng, SPAWN_MARGIN, self.screen_width - SPAWN_MARGIN);
        let y = uniform(&mut self.rng, SPAWN_MARGIN, self.screen_height - SPAWN_MARGIN);
        let radius = uniform(&mut self.rng, SPAWN_MIN_RADIUS, SPAWN_MAX_RADIUS);
        let color = Color::random_vibrant(&mut self.rng);
        let velocity = Vector2::new(
            uniform(&mut self.rng, -SPAWN_MAX_SPEED, SPAWN_MAX_SPEED),
            uniform(&mut self.rng, -SPAWN_MAX_SPEED, SPAWN_MAX_SPEED),
        );
        let id = self.spawn_ball(Vector2::new(x, y), radius, color, velocity);
        log::debug!("Spawned ball {} at ({:.1}, {:.1}) r={:.1}", id, x, y, radius);
        id
    }

    /// Spawn random balls until the arena holds `count`
    pub fn fill_to(&mut self, count: usize) {
        while self.balls.len() < count {
            self.add_random_ball();
        }
    }

    /// Absorb the free ball nearest the cursor, if one is within reach and
    /// the inventory has room. Ties go to the earlier ball.
    pub fn try_absorb_ball(&mut self) -> bool {
        if !self.inventory.can_add() {
            return false;
        }

        let mut closest: Option<(usize, f32)> = None;
        for (index, ball) in self.balls.iter().enumerate() {
            if !ball.is_free() {
                continue;
            }
            let distance = ball.position.distance(self.mouse_position);
            if distance <= self.absorption_radius && closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((index, distance));
            }
        }

        let Some((index, _)) = closest else {
            return false;
        };

        let ball = self.balls.remove(index);
        let id = ball.id;
        match self.inventory.add(ball) {
            Ok(slot) => {
                log::debug!("Absorbing ball {} into slot {}", id, slot);
                true
            }
            Err(ball) => {
                // Capacity was checked above; put it back where it was
                self.balls.insert(index, ball);
                false
            }
        }
    }

    /// Release the newest inventory ball near the cursor.
    ///
    /// `velocity` defaults to a random one when `None`.
    pub fn release_ball(&mut self, velocity: Option<Vector2>) -> bool {
        let Some(mut ball) = self.inventory.pop() else {
            return false;
        };

        let jitter = Vector2::new(
            uniform(&mut self.rng, -RELEASE_JITTER, RELEASE_JITTER),
            uniform(&mut self.rng, -RELEASE_JITTER, RELEASE_JITTER),
        );
        let position = self.mouse_position + jitter;
        let velocity = velocity.unwrap_or_else(|| {
            Vector2::new(
                uniform(&mut self.rng, -RELEASE_MAX_SPEED, RELEASE_MAX_SPEED),
                uniform(&mut self.rng, -RELEASE_MAX_SPEED, RELEASE_MAX_SPEED),
            )
        });

        ball.start_release(position, velocity);
        log::debug!(
            "Releasing ball {} at ({:.1}, {:.1})",
            ball.id,
            position.x,
            position.y
        );
        self.balls.push(ball);
        true
    }
}
