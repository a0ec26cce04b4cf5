//! Collision and effect resolution
//!
//! Moves each falling population one frame, tests it against the car and
//! applies the outcome: fuel penalties, refuels, time bonuses, score and
//! buffs. Obstacles survive a hit; fuel and bonuses are consumed.

use super::state::{BonusKind, FeedbackTone, FuelKind, GameState};
use super::timers::TimerId;

/// Move obstacles and apply hit penalties.
///
/// When `surge` is set every obstacle except `fresh` speeds up one step.
/// Returns the number of penalties applied (0 or 1 per frame given the cooldown).
pub fn advance_obstacles(state: &mut GameState, surge: bool, fresh: Option<u32>) -> u32 {
    let mut hits = 0;
    for i in 0..state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        obstacle.advance();
        if surge && Some(obstacle.id) != fresh {
            obstacle.accelerate(
                state.tuning.obstacle_speed_step,
                state.tuning.obstacle_max_speed,
            );
        }

        let (sprite, pos) = (obstacle.sprite(), obstacle.pos);
        if state.vehicle.collided_with(&state.sprites, sprite, pos)
            && !state.effects.shield
            && state.timers.elapsed(TimerId::HitCooldown) >= state.tuning.hit_cooldown_ms
        {
            let penalty = state.tuning.hit_penalty;
            state.vehicle.burn(penalty);
            state.push_feedback(format!("-{penalty} Fuel"), 20, FeedbackTone::Penalty);
            state.timers.reset(TimerId::HitCooldown);
            log::trace!("Hit obstacle {}, fuel now {}", state.obstacles[i].id, state.vehicle.fuel);
            hits += 1;
        }
    }
    hits
}

/// Move fuel canisters and consume the first one touching the car.
///
/// Scanning stops at the consumed canister, so later canisters hold still
/// for that frame. Floating texts age afterwards.
pub fn advance_fuels(state: &mut GameState) -> Option<FuelKind> {
    let mut consumed = None;
    for i in 0..state.fuels.len() {
        let speed = state.tuning.fuel_speed;
        let fuel = &mut state.fuels[i];
        fuel.pos.y += speed;
        let (kind, pos) = (fuel.kind, fuel.pos);

        if state.vehicle.collided_with(&state.sprites, kind.sprite(), pos) {
            let added = kind.refuel_amount(&state.tuning);
            state.vehicle.refuel(added);

            let bonus = state.tuning.time_bonus_for(added);
            state.remaining_time_secs += bonus;

            state.push_feedback(format!("+{added} Fuel"), 20, FeedbackTone::Fuel);
            state.push_feedback(format!("+{bonus}s"), 40, FeedbackTone::TimeBonus);
            state.fuels.remove(i);
            log::trace!("Picked up {kind:?} fuel: +{added} fuel, +{bonus}s");
            consumed = Some(kind);
            break;
        }
    }

    age_floating_texts(state);
    consumed
}

/// Drift floating texts up one pixel and burn a fixed slice of lifetime
pub fn age_floating_texts(state: &mut GameState) {
    let decay = state.tuning.floating_text_decay;
    for text in &mut state.floating_texts {
        text.lifetime -= decay;
        text.pos.y -= 1;
    }
    state.floating_texts.retain(|t| t.lifetime > 0);
}

/// Move bonuses, apply any the car touches, then expire finished buffs
pub fn advance_bonuses(state: &mut GameState) {
    let speed = state.tuning.bonus_speed;
    let mut i = 0;
    while i < state.bonuses.len() {
        let bonus = &mut state.bonuses[i];
        bonus.pos.y += speed;
        let (kind, pos) = (bonus.kind, bonus.pos);

        if state.vehicle.collided_with(&state.sprites, kind.sprite(), pos) {
            state.bonuses.remove(i);
            apply_bonus(state, kind);
            continue;
        }
        i += 1;
    }

    expire_buffs(state);
}

/// Apply a collected bonus
pub fn apply_bonus(state: &mut GameState, kind: BonusKind) {
    match kind {
        BonusKind::Star => {
            state.effects.double_score = true;
            state.timers.reset(TimerId::DoubleScore);
            let secs = state.tuning.double_score_secs();
            state.push_feedback(
                format!("Double Score ({secs}s)"),
                30,
                FeedbackTone::DoubleScore,
            );
            log::debug!("Double score active");
        }
        BonusKind::Shield => {
            state.effects.shield = true;
            state.timers.reset(TimerId::Shield);
            let secs = state.tuning.shield_secs();
            state.push_feedback(format!("Shield ({secs}s)"), 30, FeedbackTone::Shield);
            log::debug!("Shield active");
        }
        BonusKind::Coin => {
            let gain = state.tuning.coin_gain(state.effects.double_score);
            state.coin_score += gain;
            state.push_feedback(format!("+{gain} Points"), 30, FeedbackTone::Points);
            log::trace!("Coin +{gain}");
        }
    }
}

/// Switch off buffs whose duration timer has run out
pub fn expire_buffs(state: &mut GameState) {
    if state.effects.double_score
        && state.timers.elapsed(TimerId::DoubleScore) >= state.tuning.double_score_ms
    {
        state.effects.double_score = false;
        log::debug!("Double score expired");
    }
    if state.effects.shield && state.timers.elapsed(TimerId::Shield) >= state.tuning.shield_ms {
        state.effects.shield = false;
        log::debug!("Shield expired");
    }
}

/// Drop every entity that has fallen below the viewport
pub fn cleanup_offscreen(state: &mut GameState) {
    let bottom = state.viewport.height;
    state.obstacles.retain(|o| o.pos.y <= bottom);
    state.fuels.retain(|f| f.pos.y <= bottom);
    state.bonuses.retain(|b| b.pos.y <= bottom);
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::sim::state::{Bonus, CarKind, FuelPickup, Obstacle};

    fn state_with_cooldown_elapsed() -> GameState {
        let mut state = GameState::new(5, CarKind::F1);
        state.timers.advance(1000);
        state
    }

    fn obstacle_on_car(state: &mut GameState) -> u32 {
        let id = state.next_entity_id();
        let pos = state.vehicle.pos - IVec2::new(0, 5);
        state.obstacles.push(Obstacle {
            id,
            pos,
            speed: 5,
            variant: 1,
        });
        id
    }

    #[test]
    fn test_hit_penalty_and_cooldown() {
        let mut state = state_with_cooldown_elapsed();
        obstacle_on_car(&mut state);
        obstacle_on_car(&mut state);

        assert_eq!(advance_obstacles(&mut state, false, None), 1);
        assert_eq!(state.vehicle.fuel, 10);
        assert_eq!(state.floating_texts[0].text, "-5 Fuel");
        // Obstacles survive the hit
        assert_eq!(state.obstacles.len(), 2);

        state.timers.advance(799);
        for o in &mut state.obstacles {
            o.pos = state.vehicle.pos;
        }
        assert_eq!(advance_obstacles(&mut state, false, None), 0);
        state.timers.advance(1);
        for o in &mut state.obstacles {
            o.pos = state.vehicle.pos;
        }
        assert_eq!(advance_obstacles(&mut state, false, None), 1);
        assert_eq!(state.vehicle.fuel, 5);
    }

    #[test]
    fn test_shield_blocks_penalty() {
        let mut state = state_with_cooldown_elapsed();
        state.effects.shield = true;
        obstacle_on_car(&mut state);
        assert_eq!(advance_obstacles(&mut state, false, None), 0);
        assert_eq!(state.vehicle.fuel, 15);
    }

    #[test]
    fn test_surge_skips_fresh_obstacle() {
        let mut state = GameState::new(5, CarKind::F1);
        for (id, x) in [(100, 0), (101, 0)] {
            state.obstacles.push(Obstacle {
                id,
                pos: IVec2::new(x, -500),
                speed: 5,
                variant: 2,
            });
        }
        advance_obstacles(&mut state, true, Some(101));
        assert_eq!(state.obstacles[0].speed, 8);
        assert_eq!(state.obstacles[1].speed, 5);
        assert_eq!(state.obstacles[1].pos.y, -495);
    }

    #[test]
    fn test_only_one_fuel_per_frame() {
        let mut state = GameState::new(5, CarKind::F1);
        for kind in [FuelKind::Small, FuelKind::Large] {
            let id = state.next_entity_id();
            let pos = state.vehicle.pos;
            state.fuels.push(FuelPickup { id, pos, kind });
        }

        assert_eq!(advance_fuels(&mut state), Some(FuelKind::Small));
        assert_eq!(state.fuels.len(), 1);
        assert_eq!(state.vehicle.fuel, 20);
        assert_eq!(state.remaining_time_secs, 18);
        // The large canister behind it did not move this frame
        assert_eq!(state.fuels[0].pos, state.vehicle.pos);
        let texts: Vec<_> = state.floating_texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["+5 Fuel", "+3s"]);

        assert_eq!(advance_fuels(&mut state), Some(FuelKind::Large));
        assert_eq!(state.vehicle.fuel, 30);
        assert_eq!(state.remaining_time_secs, 24);
    }

    #[test]
    fn test_floating_text_ages_out() {
        let mut state = GameState::new(5, CarKind::F1);
        state.push_feedback("hello".to_string(), 0, FeedbackTone::Points);
        let start_y = state.floating_texts[0].pos.y;
        for _ in 0..62 {
            age_floating_texts(&mut state);
        }
        // 1000 - 62 * 16 = 8
        assert_eq!(state.floating_texts[0].lifetime, 8);
        assert_eq!(state.floating_texts[0].pos.y, start_y - 62);
        age_floating_texts(&mut state);
        assert!(state.floating_texts.is_empty());
    }

    #[test]
    fn test_coin_respects_double_score() {
        let mut state = GameState::new(5, CarKind::F1);
        apply_bonus(&mut state, BonusKind::Coin);
        assert_eq!(state.coin_score, 100);
        apply_bonus(&mut state, BonusKind::Star);
        apply_bonus(&mut state, BonusKind::Coin);
        assert_eq!(state.coin_score, 300);
    }

    #[test]
    fn test_buffs_expire() {
        let mut state = GameState::new(5, CarKind::F1);
        apply_bonus(&mut state, BonusKind::Star);
        apply_bonus(&mut state, BonusKind::Shield);
        state.timers.advance(4999);
        expire_buffs(&mut state);
        assert!(state.effects.shield && state.effects.double_score);
        state.timers.advance(1);
        expire_buffs(&mut state);
        assert!(!state.effects.shield);
        assert!(state.effects.double_score);
        state.timers.advance(5000);
        expire_buffs(&mut state);
        assert!(!state.effects.double_score);
    }

    #[test]
    fn test_bonus_collected_and_removed() {
        let mut state = GameState::new(5, CarKind::F1);
        let pos = state.vehicle.pos;
        state.bonuses.push(Bonus {
            id: 1,
            pos,
            kind: BonusKind::Shield,
        });
        state.bonuses.push(Bonus {
            id: 2,
            pos: IVec2::new(0, -300),
            kind: BonusKind::Coin,
        });
        advance_bonuses(&mut state);
        assert!(state.effects.shield);
        assert_eq!(state.bonuses.len(), 1);
        assert_eq!(state.bonuses[0].pos.y, -297);
    }

    #[test]
    fn test_cleanup_offscreen() {
        let mut state = GameState::new(5, CarKind::F1);
        state.obstacles.push(Obstacle {
            id: 1,
            pos: IVec2::new(0, 651),
            speed: 5,
            variant: 1,
        });
        state.obstacles.push(Obstacle {
            id: 2,
            pos: IVec2::new(0, 650),
            speed: 5,
            variant: 1,
        });
        cleanup_offscreen(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, 2);
    }
}
