//! Read-only projection of the simulation for renderers
//!
//! Everything a frame needs, copied out after `update`. Nothing here points
//! back into the simulation, so a renderer cannot mutate core state.

use rand::Rng;
use serde::Serialize;

use super::ball::{Ball, BallState};
use super::color::Color;
use super::state::GameLogic;
use super::zone::DeletionZone;
use crate::Vector2;

/// Inventory icons never draw larger than this
const MAX_ICON_RADIUS: f32 = 15.0;

/// Coarse ball state for drawing decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BallKind {
    Free,
    Absorbing,
    Held,
    Releasing,
}

impl BallKind {
    pub fn of(state: &BallState) -> Self {
        match state {
            BallState::Free => BallKind::Free,
            BallState::BeingAbsorbed { .. } => BallKind::Absorbing,
            BallState::InInventory { .. } => BallKind::Held,
            BallState::BeingReleased { .. } => BallKind::Releasing,
        }
    }
}

/// Expanding/shrinking ring drawn around an animating ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectRing {
    pub radius: f32,
    /// 0-255
    pub alpha: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub id: u32,
    pub position: Vector2,
    pub radius: f32,
    pub color: Color,
    pub highlight: Color,
    pub outline: Color,
    pub kind: BallKind,
    pub progress: f32,
    pub effect: Option<EffectRing>,
}

impl BallView {
    pub fn from_ball(ball: &Ball) -> Self {
        let kind = BallKind::of(&ball.state);
        let progress = ball.absorption_progress();
        Self {
            id: ball.id,
            position: ball.position,
            radius: ball.radius,
            color: ball.color,
            highlight: ball.color.highlight(),
            outline: ball.color.outline(),
            kind,
            progress,
            effect: effect_ring(kind, ball.radius, progress),
        }
    }
}

/// Ring for the absorb/release animation, `None` once it has faded out
pub fn effect_ring(kind: BallKind, radius: f32, progress: f32) -> Option<EffectRing> {
    let (ring_radius, alpha) = match kind {
        BallKind::Absorbing => (radius * (1.5 - progress * 0.5), (100.0 * (1.0 - progress)) as u8),
        BallKind::Releasing => {
            let q = 1.0 - progress;
            (radius * (1.0 + q * 0.8), (80.0 * q) as u8)
        }
        BallKind::Free | BallKind::Held => return None,
    };
    (alpha > 0).then_some(EffectRing {
        radius: ring_radius,
        alpha,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct InventorySlotView {
    pub slot: usize,
    pub id: u32,
    pub color: Color,
    pub icon_radius: f32,
    pub kind: BallKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryView {
    pub capacity: usize,
    pub count: usize,
    pub slots: Vec<InventorySlotView>,
}

/// Full per-frame state for a renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub balls: Vec<BallView>,
    pub inventory: InventoryView,
    pub deletion_zone: DeletionZone,
    /// Where to draw the zone's label
    pub deletion_label: Vector2,
    pub cursor: Vector2,
    pub absorption_radius: f32,
    pub free_balls: usize,
}

impl<R: Rng> GameLogic<R> {
    pub fn snapshot(&self) -> Snapshot {
        let slots = self
            .inventory
            .balls()
            .iter()
            .enumerate()
            .map(|(slot, ball)| InventorySlotView {
                slot,
                id: ball.id,
                color: ball.color,
                icon_radius: (ball.radius * 0.8).floor().min(MAX_ICON_RADIUS),
                kind: BallKind::of(&ball.state),
            })
            .collect();

        Snapshot {
            tick: self.tick_count,
            balls: self.balls.iter().map(BallView::from_ball).collect(),
            inventory: InventoryView {
                capacity: self.inventory.capacity(),
                count: self.inventory.len(),
                slots,
            },
            deletion_zone: self.deletion_zone,
            deletion_label: self.deletion_zone.center(),
            cursor: self.mouse_position,
            absorption_radius: self.absorption_radius,
            free_balls: self.free_ball_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;

    #[test]
    fn test_effect_ring() {
        let ring = effect_ring(BallKind::Absorbing, 20.0, 0.0);
        assert_eq!(ring, Some(EffectRing { radius: 30.0, alpha: 100 }));

        let ring = effect_ring(BallKind::Releasing, 20.0, 0.5).expect("ring while releasing");
        assert!((ring.radius - 28.0).abs() < 1e-4);
        assert_eq!(ring.alpha, 40);

        // Fully faded
        assert_eq!(effect_ring(BallKind::Absorbing, 20.0, 1.0), None);
        assert_eq!(effect_ring(BallKind::Releasing, 20.0, 1.0), None);
        assert_eq!(effect_ring(BallKind::Free, 20.0, 0.0), None);
    }

    #[test]
    fn test_snapshot_contents() {
        let config = SimConfig {
            initial_balls: 0,
            ..SimConfig::default()
        };
        let mut logic = GameLogic::new(config, 5);
        logic.spawn_ball(Vector2::new(400.0, 300.0), 25.0, Color::new(200, 10, 10), Vector2::ZERO);
        logic.spawn_ball(Vector2::new(100.0, 500.0), 12.0, Color::new(10, 10, 200), Vector2::ZERO);
        assert!(logic.try_absorb_ball());

        let snap = logic.snapshot();
        assert_eq!(snap.balls.len(), 1);
        assert_eq!(snap.balls[0].kind, BallKind::Free);
        assert_eq!(snap.balls[0].effect, None);
        assert_eq!(snap.free_balls, 1);

        assert_eq!(snap.inventory.capacity, 10);
        assert_eq!(snap.inventory.count, 1);
        assert_eq!(snap.inventory.slots[0].kind, BallKind::Absorbing);
        assert_eq!(snap.inventory.slots[0].icon_radius, 15.0);
        assert_eq!(snap.deletion_label, Vector2::new(750.0, 50.0));
        assert_eq!(snap.cursor, Vector2::new(400.0, 300.0));
        assert_eq!(snap.absorption_radius, 80.0);

        let json = serde_json::to_string(&snap).expect("snapshot serializes");
        assert!(json.contains("\"deletion_zone\""));
    }
}
