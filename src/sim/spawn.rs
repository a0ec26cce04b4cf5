//! Entity spawning
//!
//! Each entity kind has a dedicated timer and an interval. When the timer runs
//! past the interval a new entity drops in just above the top edge and the
//! timer restarts. Spawn rate ignores how many entities are alive, so the
//! off-screen cleanup in `tick` must run every frame.

use glam::IVec2;
use rand::Rng;

use super::sprite::SpriteId;
use super::state::{Bonus, BonusKind, FuelKind, FuelPickup, GameState, Obstacle};
use super::timers::TimerId;
use crate::tuning::Tuning;

/// Current spawn intervals (ms). Obstacle and fuel intervals only shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawner {
    pub obstacle_interval_ms: u64,
    pub fuel_interval_ms: u64,
    pub bonus_interval_ms: u64,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle_interval_ms: tuning.obstacle_interval_ms,
            fuel_interval_ms: tuning.fuel_interval_ms,
            bonus_interval_ms: tuning.bonus_interval_ms,
        }
    }
}

/// Random x for a spawn, uniform in `[margin, width - sprite_width - margin]`.
/// A viewport too narrow for that range collapses to `margin`.
pub fn spawn_x<R: Rng>(rng: &mut R, margin: i32, viewport_width: i32, sprite_width: i32) -> i32 {
    let upper = (viewport_width - sprite_width - margin).max(margin);
    rng.random_range(margin..=upper)
}

/// Map a roll in `0..100` onto a bonus kind using the tuned weights
pub fn roll_bonus_kind(roll: u32, tuning: &Tuning) -> BonusKind {
    if roll < tuning.coin_weight {
        BonusKind::Coin
    } else if roll < tuning.coin_weight + tuning.star_weight {
        BonusKind::Star
    } else {
        BonusKind::Shield
    }
}

/// Spawn an obstacle if its interval has passed. Returns the new obstacle's ID.
pub fn try_spawn_obstacle(state: &mut GameState) -> Option<u32> {
    if state.timers.elapsed(TimerId::ObstacleSpawn) <= state.spawner.obstacle_interval_ms {
        return None;
    }

    let variant: u8 = state.rng.random_range(1..=3);
    let sprite = state.sprites.get(SpriteId::obstacle(variant));
    let (width, height) = (sprite.width, sprite.height);
    let x = spawn_x(
        &mut state.rng,
        state.tuning.spawn_margin,
        state.viewport.width,
        width,
    );

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: IVec2::new(x, -height),
        speed: state.tuning.obstacle_start_speed,
        variant,
    });
    state.timers.reset(TimerId::ObstacleSpawn);
    log::trace!("Spawned obstacle {id} (variant {variant}) at x={x}");
    Some(id)
}

/// Spawn a fuel canister if its interval has passed; small or large with even odds
pub fn try_spawn_fuel(state: &mut GameState) -> bool {
    if state.timers.elapsed(TimerId::FuelSpawn) <= state.spawner.fuel_interval_ms {
        return false;
    }

    let kind = if state.rng.random_bool(0.5) {
        FuelKind::Small
    } else {
        FuelKind::Large
    };
    let sprite = state.sprites.get(kind.sprite());
    let (width, height) = (sprite.width, sprite.height);
    let x = spawn_x(
        &mut state.rng,
        state.tuning.spawn_margin,
        state.viewport.width,
        width,
    );

    let id = state.next_entity_id();
    state.fuels.push(FuelPickup {
        id,
        pos: IVec2::new(x, -height),
        kind,
    });
    state.timers.reset(TimerId::FuelSpawn);
    log::trace!("Spawned {kind:?} fuel {id} at x={x}");
    true
}

/// Spawn a bonus once the game clock passes the gate and its own interval has run
pub fn try_spawn_bonus(state: &mut GameState) -> bool {
    if state.timers.elapsed(TimerId::BonusSpawn) <= state.spawner.bonus_interval_ms
        || state.elapsed_secs() <= state.tuning.bonus_gate_secs
    {
        return false;
    }

    let roll = state.rng.random_range(0..100);
    let kind = roll_bonus_kind(roll, &state.tuning);
    let sprite = state.sprites.get(kind.sprite());
    let (width, height) = (sprite.width, sprite.height);
    let x = spawn_x(
        &mut state.rng,
        state.tuning.bonus_spawn_margin,
        state.viewport.width,
        width,
    );

    let id = state.next_entity_id();
    state.bonuses.push(Bonus {
        id,
        pos: IVec2::new(x, -height),
        kind,
    });
    state.timers.reset(TimerId::BonusSpawn);
    log::trace!("Spawned {kind:?} bonus {id} at x={x}");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CarKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_x_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let x = spawn_x(&mut rng, 200, 840, 80);
            assert!((200..=560).contains(&x));
        }
    }

    #[test]
    fn test_spawn_x_degenerate_viewport() {
        let mut rng = Pcg32::seed_from_u64(7);
        // Sprite wider than the viewport: range collapses to the margin
        assert_eq!(spawn_x(&mut rng, 200, 100, 300), 200);
    }

    #[test]
    fn test_bonus_weights() {
        let t = Tuning::default();
        assert_eq!(roll_bonus_kind(0, &t), BonusKind::Coin);
        assert_eq!(roll_bonus_kind(44, &t), BonusKind::Coin);
        assert_eq!(roll_bonus_kind(45, &t), BonusKind::Star);
        assert_eq!(roll_bonus_kind(74, &t), BonusKind::Star);
        assert_eq!(roll_bonus_kind(75, &t), BonusKind::Shield);
        assert_eq!(roll_bonus_kind(99, &t), BonusKind::Shield);
    }

    #[test]
    fn test_obstacle_waits_for_interval() {
        let mut state = GameState::new(3, CarKind::F1);
        state.timers.advance(1000);
        assert_eq!(try_spawn_obstacle(&mut state), None);
        state.timers.advance(1);
        let id = try_spawn_obstacle(&mut state).unwrap();
        let o = &state.obstacles[0];
        assert_eq!(o.id, id);
        assert_eq!(o.speed, 5);
        assert!((1..=3).contains(&o.variant));
        assert_eq!(o.pos.y, -state.sprites.get(o.sprite()).height);
        assert_eq!(state.timers.elapsed(TimerId::ObstacleSpawn), 0);
    }

    #[test]
    fn test_bonus_gated_on_game_time() {
        let mut state = GameState::new(3, CarKind::F1);
        // Bonus timer past 8s but game clock reset to just 5s
        state.timers.advance(9000);
        state.timers.reset(TimerId::Game);
        state.timers.advance(5999);
        assert!(!try_spawn_bonus(&mut state));
        state.timers.advance(1);
        assert!(try_spawn_bonus(&mut state));
        let b = &state.bonuses[0];
        assert!((180..=840 - 180 - state.sprites.get(b.kind.sprite()).width).contains(&b.pos.x));
    }

    #[test]
    fn test_fuel_kinds_are_mixed() {
        let mut state = GameState::new(11, CarKind::F1);
        for _ in 0..200 {
            state.timers.advance(2501);
            assert!(try_spawn_fuel(&mut state));
        }
        let small = state
            .fuels
            .iter()
            .filter(|f| f.kind == FuelKind::Small)
            .count();
        assert!(small > 50 && small < 150, "small fuel count {small}");
    }
}
