//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected RNG only (seeded `Pcg32` by default)
//! - Stable iteration order (arena insertion order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod color;
pub mod inventory;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod zone;

pub use ball::{Ball, BallState};
pub use collision::{MergeEvent, resolve_merges};
pub use color::{Color, NEAR_WHITE_THRESHOLD};
pub use inventory::{DEFAULT_CAPACITY, Inventory};
pub use snapshot::{BallKind, BallView, EffectRing, InventorySlotView, InventoryView, Snapshot};
pub use state::GameLogic;
pub use tick::{Controls, TickInput};
pub use zone::DeletionZone;
