//! Game state and core simulation types
//!
//! Everything one session owns lives in `GameState`: the player's car, the
//! falling entity populations, the timer bank and the bookkeeping the HUD
//! reads. Nothing here touches rendering or input devices.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::sprites_collide;
use super::difficulty::Difficulty;
use super::spawn::Spawner;
use super::sprite::{SpriteId, SpriteSheet};
use super::timers::{TimerBank, TimerId};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::tuning::Tuning;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Elapsed game time ran past the remaining-time budget
    TimeOut,
    /// The car ran dry
    OutOfFuel,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::TimeOut => "Time out",
            GameOverReason::OutOfFuel => "Game over",
        }
    }

    /// End-screen headline
    pub fn title(&self) -> &'static str {
        match self {
            GameOverReason::TimeOut => "OUT OF TIME",
            GameOverReason::OutOfFuel => "GAME OVER",
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Terminal
    GameOver(GameOverReason),
}

/// Selectable car models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CarKind {
    #[default]
    F1,
    Racing,
}

impl CarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarKind::F1 => "F1",
            CarKind::Racing => "Racing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "f1" | "1" => Some(CarKind::F1),
            "racing" | "2" => Some(CarKind::Racing),
            _ => None,
        }
    }

    /// Unknown selections fall back to the default car
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown car type {s:?}, using {}", CarKind::default().as_str());
            CarKind::default()
        })
    }

    pub fn sprite(&self) -> SpriteId {
        match self {
            CarKind::F1 => SpriteId::CarF1,
            CarKind::Racing => SpriteId::CarRacing,
        }
    }
}

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        }
    }
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub kind: CarKind,
    pub pos: IVec2,
    /// Never negative
    pub fuel: i32,
}

impl Vehicle {
    /// Place the car centred at the bottom of the viewport
    pub fn new(kind: CarKind, sprites: &SpriteSheet, viewport: Viewport, tuning: &Tuning) -> Self {
        let sprite = sprites.get(kind.sprite());
        Self {
            kind,
            pos: IVec2::new(
                (viewport.width - sprite.width) / 2,
                viewport.height - sprite.height - tuning.car_bottom_gap,
            ),
            fuel: tuning.starting_fuel.max(0),
        }
    }

    pub fn sprite(&self) -> SpriteId {
        self.kind.sprite()
    }

    /// Steer by `speed` per held key, only while inside `[0, viewport - sprite]`
    pub fn handle_input(&mut self, left: bool, right: bool, speed: i32, max_x: i32) {
        if left && self.pos.x > 0 {
            self.pos.x -= speed;
        }
        if right && self.pos.x < max_x {
            self.pos.x += speed;
        }
    }

    /// Clamp into the playable lane `[margin, width - sprite_width - margin]`
    pub fn stay_on_window(&mut self, viewport_width: i32, sprite_width: i32, margin: i32) {
        if self.pos.x < margin {
            self.pos.x = margin;
        }
        let right = viewport_width - sprite_width - margin;
        if self.pos.x > right {
            self.pos.x = right;
        }
    }

    /// Add fuel. There is no upper bound.
    pub fn refuel(&mut self, amount: i32) {
        self.fuel = self.fuel.saturating_add(amount).max(0);
    }

    /// Remove fuel, flooring at zero
    pub fn burn(&mut self, amount: i32) {
        self.fuel = (self.fuel - amount).max(0);
    }

    pub fn collided_with(&self, sprites: &SpriteSheet, other: SpriteId, other_pos: IVec2) -> bool {
        sprites_collide(
            sprites.get(self.sprite()),
            self.pos,
            sprites.get(other),
            other_pos,
        )
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: IVec2,
    /// Downward pixels per frame, only ever increases
    pub speed: i32,
    /// Sprite variant, `1..=3`
    pub variant: u8,
}

impl Obstacle {
    pub fn sprite(&self) -> SpriteId {
        SpriteId::obstacle(self.variant)
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    /// Speed up by `step`, never past `cap`
    pub fn accelerate(&mut self, step: i32, cap: i32) {
        if self.speed < cap {
            self.speed = (self.speed + step).min(cap);
        }
    }
}

/// Fuel canister sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelKind {
    Small,
    Large,
}

impl FuelKind {
    pub fn refuel_amount(&self, tuning: &Tuning) -> i32 {
        match self {
            FuelKind::Small => tuning.small_refuel,
            FuelKind::Large => tuning.large_refuel,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match self {
            FuelKind::Small => SpriteId::FuelSmall,
            FuelKind::Large => SpriteId::FuelLarge,
        }
    }
}

/// A falling fuel canister
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuelPickup {
    pub id: u32,
    pub pos: IVec2,
    pub kind: FuelKind,
}

/// Bonus item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Double score for a while
    Star,
    /// Flat points
    Coin,
    /// Obstacle hits cost nothing for a while
    Shield,
}

impl BonusKind {
    pub fn sprite(&self) -> SpriteId {
        match self {
            BonusKind::Star => SpriteId::BonusStar,
            BonusKind::Coin => SpriteId::BonusCoin,
            BonusKind::Shield => SpriteId::BonusShield,
        }
    }
}

/// A falling bonus item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bonus {
    pub id: u32,
    pub pos: IVec2,
    pub kind: BonusKind,
}

/// What a floating message is reporting; the renderer picks its colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackTone {
    Penalty,
    Fuel,
    TimeBonus,
    DoubleScore,
    Shield,
    Points,
}

/// Short-lived HUD message that drifts upward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub pos: IVec2,
    pub tone: FeedbackTone,
    /// Remaining lifetime in nominal milliseconds (decays a fixed amount per frame)
    pub lifetime: i32,
}

/// Active buffs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub double_score: bool,
    pub shield: bool,
}

/// Two stacked road layers scrolling down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub y1: i32,
    pub y2: i32,
    pub layer_height: i32,
}

impl Background {
    pub fn new(layer_height: i32) -> Self {
        Self {
            y1: 0,
            y2: -layer_height,
            layer_height,
        }
    }

    pub fn scroll(&mut self, speed: i32, viewport_height: i32) {
        self.y1 += speed;
        self.y2 += speed;
        if self.y1 >= viewport_height {
            self.y1 = self.y2 - self.layer_height;
        }
        if self.y2 >= viewport_height {
            self.y2 = self.y1 - self.layer_height;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub sprites: SpriteSheet,
    pub timers: TimerBank,
    pub spawner: Spawner,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub vehicle: Vehicle,
    /// Active entities, in spawn order (which is also scan order)
    pub obstacles: Vec<Obstacle>,
    pub fuels: Vec<FuelPickup>,
    pub bonuses: Vec<Bonus>,
    pub floating_texts: Vec<FloatingText>,
    pub effects: ActiveEffects,
    /// Points from coins, added on top of the elapsed-seconds base
    pub coin_score: u64,
    /// Displayed score: elapsed whole seconds plus `coin_score`
    pub score: u64,
    /// Seconds of play allowed before time runs out
    pub remaining_time_secs: i64,
    pub background: Background,
    /// Simulated frames (excludes paused frames)
    pub frame: u64,
    /// Quit key seen
    pub quit_requested: bool,
    next_id: u32,
}

impl GameState {
    /// Create a session on the default viewport, balance and sprites
    pub fn new(seed: u64, car: CarKind) -> Self {
        Self::with_config(
            seed,
            car,
            Viewport::default(),
            Tuning::default(),
            SpriteSheet::default(),
        )
    }

    pub fn with_config(
        seed: u64,
        car: CarKind,
        viewport: Viewport,
        tuning: Tuning,
        sprites: SpriteSheet,
    ) -> Self {
        let vehicle = Vehicle::new(car, &sprites, viewport, &tuning);
        let background = Background::new(sprites.road.height);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            spawner: Spawner::new(&tuning),
            difficulty: Difficulty::default(),
            remaining_time_secs: tuning.initial_time_secs,
            tuning,
            sprites,
            timers: TimerBank::new(),
            phase: GamePhase::Playing,
            vehicle,
            obstacles: Vec::new(),
            fuels: Vec::new(),
            bonuses: Vec::new(),
            floating_texts: Vec::new(),
            effects: ActiveEffects::default(),
            coin_score: 0,
            score: 0,
            background,
            frame: 0,
            quit_requested: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whole seconds of unpaused play
    pub fn elapsed_secs(&self) -> u64 {
        self.timers.elapsed_secs(TimerId::Game)
    }

    /// Seconds left on the clock (negative once overrun)
    pub fn time_left_secs(&self) -> i64 {
        self.remaining_time_secs - self.elapsed_secs() as i64
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.phase {
            GamePhase::GameOver(reason) => Some(reason),
            _ => None,
        }
    }

    /// The host should stop driving frames
    pub fn should_exit(&self) -> bool {
        self.quit_requested || self.is_game_over()
    }

    /// Queue a floating message at an offset above the car
    pub fn push_feedback(&mut self, text: String, rise: i32, tone: FeedbackTone) {
        self.floating_texts.push(FloatingText {
            text,
            pos: self.vehicle.pos - IVec2::new(0, rise),
            tone,
            lifetime: self.tuning.floating_text_lifetime,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_starts_centred_at_bottom() {
        let state = GameState::new(1, CarKind::F1);
        // 840 wide, 100x160 car
        assert_eq!(state.vehicle.pos, IVec2::new(370, 650 - 160 - 20));
        assert_eq!(state.vehicle.fuel, 15);
        assert_eq!(state.remaining_time_secs, 15);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_stay_on_window_lane() {
        let mut car = Vehicle {
            kind: CarKind::F1,
            pos: IVec2::new(0, 0),
            fuel: 15,
        };
        car.stay_on_window(840, 100, 180);
        assert_eq!(car.pos.x, 180);
        car.pos.x = 800;
        car.stay_on_window(840, 100, 180);
        assert_eq!(car.pos.x, 560);
    }

    #[test]
    fn test_handle_input_bounds() {
        let mut car = Vehicle {
            kind: CarKind::F1,
            pos: IVec2::new(0, 0),
            fuel: 15,
        };
        car.handle_input(true, false, 7, 740);
        assert_eq!(car.pos.x, 0);
        car.handle_input(false, true, 7, 740);
        assert_eq!(car.pos.x, 7);
        car.pos.x = 740;
        car.handle_input(false, true, 7, 740);
        assert_eq!(car.pos.x, 740);
    }

    #[test]
    fn test_burn_floors_at_zero() {
        let mut car = Vehicle {
            kind: CarKind::Racing,
            pos: IVec2::ZERO,
            fuel: 3,
        };
        car.burn(5);
        assert_eq!(car.fuel, 0);
        car.refuel(10);
        car.refuel(200);
        assert_eq!(car.fuel, 210);
    }

    #[test]
    fn test_obstacle_acceleration_caps() {
        let mut o = Obstacle {
            id: 1,
            pos: IVec2::ZERO,
            speed: 5,
            variant: 1,
        };
        for _ in 0..20 {
            o.accelerate(3, 30);
        }
        assert_eq!(o.speed, 30);
    }

    #[test]
    fn test_car_kind_fallback() {
        assert_eq!(CarKind::parse_or_default("Racing"), CarKind::Racing);
        assert_eq!(CarKind::parse_or_default("2"), CarKind::Racing);
        assert_eq!(CarKind::parse_or_default("tractor"), CarKind::F1);
    }

    #[test]
    fn test_background_wraps() {
        let mut bg = Background::new(650);
        for _ in 0..163 {
            bg.scroll(4, 650);
        }
        // y1 crossed the bottom and was stacked above y2
        assert!(bg.y1 < bg.y2);
        assert_eq!(bg.y2 - bg.y1, 650);
    }
}
