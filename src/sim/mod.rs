//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied frame time only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod resolve;
pub mod snapshot;
pub mod spawn;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Rect, sprites_collide};
pub use difficulty::Difficulty;
pub use snapshot::{EndScreen, FrameSnapshot, Hud, SpriteDraw};
pub use spawn::Spawner;
pub use sprite::{Sprite, SpriteId, SpriteMask, SpriteSheet};
pub use state::{
    ActiveEffects, Background, Bonus, BonusKind, CarKind, FeedbackTone, FloatingText, FuelKind,
    FuelPickup, GameOverReason, GamePhase, GameState, Obstacle, Vehicle, Viewport,
};
pub use tick::{TickInput, tick};
pub use timers::{TimerBank, TimerId};
