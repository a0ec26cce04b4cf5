//! Per-frame presentation snapshot
//!
//! A read-only, serializable view of everything the renderer needs for one
//! frame. Draw lists are already in paint order.

use serde::Serialize;

use super::sprite::SpriteId;
use super::state::{FloatingText, GameOverReason, GamePhase, GameState, Viewport};
use super::timers::TimerId;
use crate::consts::{FUEL_BAR_FULL, FUEL_LOW_THRESHOLD};

/// A sprite to draw at a screen position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpriteDraw {
    pub sprite: SpriteId,
    pub x: i32,
    pub y: i32,
}

impl SpriteDraw {
    pub fn new(sprite: SpriteId, pos: glam::IVec2) -> Self {
        Self {
            sprite,
            x: pos.x,
            y: pos.y,
        }
    }
}

/// HUD values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    /// Budget minus elapsed whole seconds; may go negative on the final frame
    pub time_left_secs: i64,
    pub fuel: i32,
    /// Fuel bar fill in `[0, 1]`
    pub fuel_fraction: f32,
    pub fuel_low: bool,
    /// Whole seconds of double score left, when active
    pub double_score_secs: Option<i64>,
    /// Whole seconds of shield left, when active
    pub shield_secs: Option<i64>,
}

impl Hud {
    pub fn capture(state: &GameState) -> Self {
        let fuel = state.vehicle.fuel;
        let countdown = |total: i64, id: TimerId| {
            (total - state.timers.elapsed_secs(id) as i64).max(0)
        };
        Self {
            score: state.score,
            time_left_secs: state.time_left_secs(),
            fuel,
            fuel_fraction: (fuel as f32 / FUEL_BAR_FULL as f32).clamp(0.0, 1.0),
            fuel_low: fuel <= FUEL_LOW_THRESHOLD,
            double_score_secs: state
                .effects
                .double_score
                .then(|| countdown(state.tuning.double_score_secs(), TimerId::DoubleScore)),
            shield_secs: state
                .effects
                .shield
                .then(|| countdown(state.tuning.shield_secs(), TimerId::Shield)),
        }
    }
}

/// Everything drawn in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Two road layers
    pub background: [SpriteDraw; 2],
    pub bonuses: Vec<SpriteDraw>,
    pub player: SpriteDraw,
    pub obstacles: Vec<SpriteDraw>,
    pub fuels: Vec<SpriteDraw>,
    pub floating_texts: Vec<FloatingText>,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let bg = &state.background;
        Self {
            frame: state.frame,
            viewport: state.viewport,
            phase: state.phase,
            background: [
                SpriteDraw {
                    sprite: SpriteId::Road,
                    x: 0,
                    y: bg.y1,
                },
                SpriteDraw {
                    sprite: SpriteId::Road,
                    x: 0,
                    y: bg.y2,
                },
            ],
            bonuses: state
                .bonuses
                .iter()
                .map(|b| SpriteDraw::new(b.kind.sprite(), b.pos))
                .collect(),
            player: SpriteDraw::new(state.vehicle.sprite(), state.vehicle.pos),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| SpriteDraw::new(o.sprite(), o.pos))
                .collect(),
            fuels: state
                .fuels
                .iter()
                .map(|f| SpriteDraw::new(f.kind.sprite(), f.pos))
                .collect(),
            floating_texts: state.floating_texts.clone(),
            hud: Hud::capture(state),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }
}

/// One-time end screen contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndScreen {
    pub reason: GameOverReason,
    pub backdrop: SpriteId,
    pub title: &'static str,
    pub score: u64,
}

impl EndScreen {
    /// `None` while the session is still running
    pub fn capture(state: &GameState) -> Option<Self> {
        let reason = state.game_over_reason()?;
        let backdrop = match reason {
            GameOverReason::TimeOut => SpriteId::GameOverTimeout,
            GameOverReason::OutOfFuel => SpriteId::GameOverGeneric,
        };
        Some(Self {
            reason,
            backdrop,
            title: reason.title(),
            score: state.score,
        })
    }
}
