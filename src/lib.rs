//! Marble Mixer - a ball absorb/merge arcade toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, merging, inventory, zones)
//! - `settings`: Data-driven configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{ControlSettings, Settings, SettingsError, SimConfig};
pub use sim::{Ball, BallState, Color, DeletionZone, GameLogic, Inventory};

/// 2D point/displacement used everywhere in the simulation.
///
/// `+`, `-` and `* k` cover add/subtract/scale; `length()`, `normalize_or_zero()`
/// and `distance()` cover magnitude, normalize and distance.
pub type Vector2 = glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Velocity multiplier applied on each axis that touches a wall
    pub const WALL_BOUNCE: f32 = -0.8;
    /// Per-update velocity damping (applied per call, not per second)
    pub const FRICTION: f32 = 0.99;

    /// Absorption progress gained per second
    pub const ABSORB_SPEED: f32 = 3.0;
    /// Release progress lost per second
    pub const RELEASE_SPEED: f32 = 4.0;

    /// Mass per unit of radius
    pub const MASS_PER_RADIUS: f32 = 0.1;
    /// Merged radius = sqrt(r1² + r2²) * MERGE_SHRINK
    pub const MERGE_SHRINK: f32 = 0.8;

    /// Distance between neighbouring inventory slots
    pub const SLOT_SPACING: f32 = 50.0;
    /// Inventory slots per row
    pub const SLOTS_PER_ROW: usize = 5;

    /// Random spawns keep this far from every edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const SPAWN_MIN_RADIUS: f32 = 15.0;
    pub const SPAWN_MAX_RADIUS: f32 = 35.0;
    /// Spawned balls start with a velocity in [-SPAWN_MAX_SPEED, SPAWN_MAX_SPEED] per axis
    pub const SPAWN_MAX_SPEED: f32 = 50.0;

    /// Released balls appear within this many pixels of the cursor on each axis
    pub const RELEASE_JITTER: f32 = 30.0;
    /// Random release velocity bound per axis
    pub const RELEASE_MAX_SPEED: f32 = 100.0;

    /// Per-channel jitter for vibrant colors
    pub const COLOR_JITTER: i32 = 30;
}

/// Smoothstep easing: t²(3 - 2t)
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Uniform sample in `[lo, hi]`, collapsing to `lo` when the range is empty
#[inline]
pub fn uniform<R: rand::Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}
