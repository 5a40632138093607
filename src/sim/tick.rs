//! Per-frame simulation step and the input driver that feeds it
//!
//! Update order is fixed: arena physics and deletion-zone pruning, inventory
//! animation, then merge resolution.

use rand::Rng;

use super::collision::{MergeEvent, resolve_merges};
use super::state::GameLogic;
use crate::Vector2;
use crate::settings::ControlSettings;

impl<R: Rng> GameLogic<R> {
    /// Advance the simulation by `dt` seconds, returning the merges that happened
    pub fn update(&mut self, dt: f32) -> Vec<MergeEvent> {
        let (width, height) = (self.screen_width, self.screen_height);
        let zone = self.deletion_zone;

        self.balls.retain_mut(|ball| {
            ball.update(dt, width, height);
            let doomed = zone.contains_ball(ball);
            if doomed {
                log::debug!("Ball {} entered the deletion zone", ball.id);
            }
            !doomed
        });

        self.inventory.update(dt, width, height);

        let next_id = &mut self.next_id;
        let events = resolve_merges(&mut self.balls, || {
            let id = *next_id;
            *next_id += 1;
            id
        });
        for event in &events {
            log::debug!(
                "Merged balls {} and {} into {}",
                event.first,
                event.second,
                event.merged
            );
        }

        self.tick_count += 1;
        log::trace!(
            "Tick {}: {} arena balls, {} held",
            self.tick_count,
            self.balls.len(),
            self.inventory.len()
        );
        events
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor position in screen space
    pub mouse: Option<Vector2>,
    /// Absorb button held
    pub absorb: bool,
    /// Release button held
    pub release: bool,
    /// Spawn a random ball this frame
    pub spawn: bool,
}

/// Input driver: turns held buttons into rate-limited commands
#[derive(Debug, Clone)]
pub struct Controls {
    settings: ControlSettings,
    absorb_cooldown: f32,
    release_cooldown: f32,
}

impl Controls {
    pub fn new(settings: ControlSettings) -> Self {
        Self {
            settings,
            absorb_cooldown: 0.0,
            release_cooldown: 0.0,
        }
    }

    /// Seconds until absorb / release may fire again
    pub fn cooldowns(&self) -> (f32, f32) {
        (self.absorb_cooldown, self.release_cooldown)
    }

    /// Apply one frame of input, then advance the simulation
    pub fn step<R: Rng>(&mut self, logic: &mut GameLogic<R>, input: &TickInput, dt: f32) -> Vec<MergeEvent> {
        if let Some(mouse) = input.mouse {
            logic.set_mouse_position(mouse.x, mouse.y);
        }

        self.absorb_cooldown = (self.absorb_cooldown - dt).max(0.0);
        self.release_cooldown = (self.release_cooldown - dt).max(0.0);

        if input.absorb && self.absorb_cooldown <= 0.0 && logic.try_absorb_ball() {
            self.absorb_cooldown = self.settings.absorb_cooldown;
        }

        if input.release && self.release_cooldown <= 0.0 && logic.release_ball(None) {
            self.release_cooldown = self.settings.release_cooldown;
        }

        if input.spawn {
            logic.add_random_ball();
        }

        logic.update(dt)
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(ControlSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::{BallState, Color};

    const DT: f32 = 1.0 / 60.0;

    fn empty_logic() -> GameLogic {
        let config = SimConfig {
            initial_balls: 0,
            ..SimConfig::default()
        };
        GameLogic::new(config, 12345)
    }

    #[test]
    fn test_overlapping_pair_merges_on_update() {
        let mut logic = empty_logic();
        let a = logic.spawn_ball(Vector2::new(300.0, 300.0), 20.0, Color::new(255, 0, 0), Vector2::ZERO);
        let b = logic.spawn_ball(Vector2::new(300.0, 300.0), 20.0, Color::new(0, 0, 255), Vector2::ZERO);

        let events = logic.update(DT);
        assert_eq!(events.len(), 1);
        assert_eq!(logic.balls().len(), 1);

        let merged = &logic.balls()[0];
        assert!(merged.id != a && merged.id != b);
        assert!((merged.radius - 800.0_f32.sqrt() * 0.8).abs() < 1e-3);
        assert!((merged.radius - 22.627).abs() < 1e-2);
        assert_eq!(merged.color, Color::new(127, 0, 127));
    }

    #[test]
    fn test_merge_momentum() {
        let mut logic = empty_logic();
        let v1 = Vector2::new(30.0, 10.0);
        let v2 = Vector2::new(-20.0, 40.0);
        logic.spawn_ball(Vector2::new(300.0, 300.0), 30.0, Color::WHITE, v1);
        logic.spawn_ball(Vector2::new(330.0, 300.0), 10.0, Color::WHITE, v2);

        // Physics runs before merging, so take the post-friction velocities
        let (m1, m2) = (3.0, 1.0);
        let expected = (v1 * 0.99 * m1 + v2 * 0.99 * m2) / (m1 + m2);

        logic.update(DT);
        assert_eq!(logic.balls().len(), 1);
        let merged = &logic.balls()[0];
        assert!((merged.velocity - expected).length() < 1e-3);
    }

    #[test]
    fn test_deletion_zone_removes_free_ball() {
        let mut logic = empty_logic();
        logic.spawn_ball(Vector2::new(750.0, 50.0), 10.0, Color::WHITE, Vector2::ZERO);
        logic.spawn_ball(Vector2::new(200.0, 400.0), 10.0, Color::WHITE, Vector2::ZERO);
        logic.update(DT);
        assert_eq!(logic.balls().len(), 1);
        assert_eq!(logic.balls()[0].position, Vector2::new(200.0, 400.0));
    }

    #[test]
    fn test_deletion_zone_spares_animating_ball() {
        let mut logic = empty_logic();
        logic.spawn_ball(Vector2::new(750.0, 50.0), 10.0, Color::WHITE, Vector2::ZERO);
        logic.balls[0].start_release(Vector2::new(750.0, 50.0), Vector2::ZERO);
        logic.update(DT);
        assert_eq!(logic.balls().len(), 1);
        assert!(matches!(logic.balls()[0].state, BallState::BeingReleased { .. }));
    }

    #[test]
    fn test_released_ball_becomes_free() {
        let mut logic = empty_logic();
        logic.spawn_ball(Vector2::new(400.0, 300.0), 20.0, Color::WHITE, Vector2::ZERO);
        assert!(logic.try_absorb_ball());
        for _ in 0..30 {
            logic.update(DT);
        }
        assert!(logic.release_ball(Some(Vector2::ZERO)));
        assert!(matches!(logic.balls()[0].state, BallState::BeingReleased { .. }));

        for _ in 0..30 {
            logic.update(DT);
        }
        assert!(logic.balls()[0].is_free());
        assert_eq!(logic.balls()[0].absorption_progress(), 0.0);
    }

    #[test]
    fn test_tick_count() {
        let mut logic = empty_logic();
        for _ in 0..3 {
            logic.update(DT);
        }
        assert_eq!(logic.tick_count(), 3);
    }

    #[test]
    fn test_controls_cooldown() {
        let mut logic = empty_logic();
        for x in [400.0, 405.0, 410.0] {
            logic.spawn_ball(Vector2::new(x, 300.0), 2.0, Color::WHITE, Vector2::ZERO);
        }

        let mut controls = Controls::default();
        let input = TickInput {
            mouse: Some(Vector2::new(400.0, 300.0)),
            absorb: true,
            ..Default::default()
        };

        controls.step(&mut logic, &input, DT);
        assert_eq!(logic.inventory().len(), 1);

        // 0.2 s cooldown: nothing for the next 11 frames
        for _ in 0..11 {
            controls.step(&mut logic, &input, DT);
        }
        assert_eq!(logic.inventory().len(), 1);

        for _ in 0..2 {
            controls.step(&mut logic, &input, DT);
        }
        assert_eq!(logic.inventory().len(), 2);
    }

    #[test]
    fn test_controls_release_and_spawn() {
        // Zero-size zone so the random spawn cannot land in it
        let config = SimConfig {
            initial_balls: 0,
            deletion_zone_size: 0.0,
            ..SimConfig::default()
        };
        let mut logic = GameLogic::new(config, 12345);
        let mut controls = Controls::default();

        // Nothing held: release fails and leaves no cooldown behind
        let release = TickInput {
            release: true,
            ..Default::default()
        };
        controls.step(&mut logic, &release, DT);
        assert_eq!(controls.cooldowns(), (0.0, 0.0));

        let spawn = TickInput {
            spawn: true,
            ..Default::default()
        };
        controls.step(&mut logic, &spawn, DT);
        assert_eq!(logic.balls().len(), 1);
    }
}
