//! Sprite geometry
//!
//! The core never loads images. The host hands it a `SpriteSheet` describing
//! each sprite's size and, optionally, an opacity mask for per-pixel collision.

use serde::{Deserialize, Serialize};

/// Every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    CarF1,
    CarRacing,
    Obstacle1,
    Obstacle2,
    Obstacle3,
    FuelSmall,
    FuelLarge,
    BonusStar,
    BonusShield,
    BonusCoin,
    Road,
    FuelIcon,
    GameOverTimeout,
    GameOverGeneric,
}

impl SpriteId {
    /// Obstacle sprite for a variant index in `1..=3`; out-of-range picks the last one
    pub fn obstacle(variant: u8) -> Self {
        match variant {
            1 => SpriteId::Obstacle1,
            2 => SpriteId::Obstacle2,
            _ => SpriteId::Obstacle3,
        }
    }
}

/// Opacity mask, row-major, `true` = solid pixel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteMask {
    pub width: i32,
    pub height: i32,
    pub solid: Vec<bool>,
}

impl SpriteMask {
    /// Build a mask from an alpha channel; pixels above `threshold` are solid
    pub fn from_alpha(width: i32, height: i32, alpha: &[u8], threshold: u8) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        let solid = (0..len)
            .map(|i| alpha.get(i).is_some_and(|&a| a > threshold))
            .collect();
        Self {
            width,
            height,
            solid,
        }
    }

    /// Whether local pixel (x, y) is solid. Outside the mask is empty.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.solid
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(false)
    }
}

/// Size and optional mask for one sprite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub mask: Option<SpriteMask>,
}

impl Sprite {
    pub const fn sized(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            mask: None,
        }
    }

    pub fn with_mask(mut self, mask: SpriteMask) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// Dimensions of every sprite, keyed by `SpriteId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSheet {
    pub car_f1: Sprite,
    pub car_racing: Sprite,
    pub obstacles: [Sprite; 3],
    pub fuel_small: Sprite,
    pub fuel_large: Sprite,
    pub bonus_star: Sprite,
    pub bonus_shield: Sprite,
    pub bonus_coin: Sprite,
    pub road: Sprite,
    pub fuel_icon: Sprite,
    pub game_over_timeout: Sprite,
    pub game_over_generic: Sprite,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            car_f1: Sprite::sized(100, 160),
            car_racing: Sprite::sized(90, 150),
            obstacles: [
                Sprite::sized(80, 80),
                Sprite::sized(70, 120),
                Sprite::sized(100, 90),
            ],
            fuel_small: Sprite::sized(40, 50),
            fuel_large: Sprite::sized(50, 65),
            bonus_star: Sprite::sized(50, 50),
            bonus_shield: Sprite::sized(50, 55),
            bonus_coin: Sprite::sized(45, 45),
            road: Sprite::sized(840, 650),
            fuel_icon: Sprite::sized(30, 30),
            game_over_timeout: Sprite::sized(840, 650),
            game_over_generic: Sprite::sized(840, 650),
        }
    }
}

impl SpriteSheet {
    pub fn get(&self, id: SpriteId) -> &Sprite {
        match id {
            SpriteId::CarF1 => &self.car_f1,
            SpriteId::CarRacing => &self.car_racing,
            SpriteId::Obstacle1 => &self.obstacles[0],
            SpriteId::Obstacle2 => &self.obstacles[1],
            SpriteId::Obstacle3 => &self.obstacles[2],
            SpriteId::FuelSmall => &self.fuel_small,
            SpriteId::FuelLarge => &self.fuel_large,
            SpriteId::BonusStar => &self.bonus_star,
            SpriteId::BonusShield => &self.bonus_shield,
            SpriteId::BonusCoin => &self.bonus_coin,
            SpriteId::Road => &self.road,
            SpriteId::FuelIcon => &self.fuel_icon,
            SpriteId::GameOverTimeout => &self.game_over_timeout,
            SpriteId::GameOverGeneric => &self.game_over_generic,
        }
    }
}
