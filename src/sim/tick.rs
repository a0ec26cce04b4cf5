//! Per-frame simulation step
//!
//! One call advances the session by one frame in a fixed order: input, lane
//! clamp, difficulty, spawns, obstacles, fuel, bonuses, cleanup, background,
//! timeout, fuel drain, game-over check and score.

use super::resolve::{advance_bonuses, advance_fuels, advance_obstacles, cleanup_offscreen};
use super::spawn::{try_spawn_bonus, try_spawn_fuel, try_spawn_obstacle};
use super::state::{GameOverReason, GamePhase, GameState};
use super::timers::TimerId;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Steer left (held)
    pub left: bool,
    /// Steer right (held)
    pub right: bool,
    /// Pause toggle (just pressed)
    pub pause: bool,
    /// Quit (held)
    pub quit: bool,
}

/// Advance the game state by one frame of `dt_ms` host milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    if state.is_game_over() {
        return;
    }

    if input.quit {
        state.quit_requested = true;
        return;
    }

    // Handle pause toggle; the whole timer bank pauses together
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.timers.pause_all();
                log::debug!("Paused at {}ms", state.timers.elapsed(TimerId::Game));
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.timers.resume_all();
                log::debug!("Resumed");
            }
            GamePhase::GameOver(_) => {}
        }
    }

    state.timers.advance(dt_ms);

    if state.phase != GamePhase::Playing {
        return;
    }
    state.frame += 1;

    steer(state, input);
    adjust_difficulty(state);

    let fresh = try_spawn_obstacle(state);
    try_spawn_fuel(state);
    try_spawn_bonus(state);

    // Live obstacles all speed up on the frame the obstacle timer fires
    advance_obstacles(state, fresh.is_some(), fresh);
    advance_fuels(state);
    advance_bonuses(state);
    cleanup_offscreen(state);

    let scroll = state.tuning.background_scroll;
    let height = state.viewport.height;
    state.background.scroll(scroll, height);

    apply_timeout_rule(state);
    apply_fuel_drain_rule(state);
    if state.vehicle.fuel <= 0 {
        state.phase = GamePhase::GameOver(GameOverReason::OutOfFuel);
    }

    state.score = state.elapsed_secs() + state.coin_score;

    if let Some(reason) = state.game_over_reason() {
        log::info!(
            "{} after {}s, final score {}",
            reason.as_str(),
            state.elapsed_secs(),
            state.score
        );
    }
}

/// Raw steering, then the lane clamp
fn steer(state: &mut GameState, input: &TickInput) {
    let sprite_width = state.sprites.get(state.vehicle.sprite()).width;
    let max_x = state.viewport.width - sprite_width;
    state
        .vehicle
        .handle_input(input.left, input.right, state.tuning.car_speed, max_x);
    state
        .vehicle
        .stay_on_window(state.viewport.width, sprite_width, state.tuning.lane_margin);
}

fn adjust_difficulty(state: &mut GameState) {
    let elapsed = state.elapsed_secs();
    state
        .difficulty
        .adjust(elapsed, &mut state.spawner, &state.tuning);
}

/// Running past the time budget ends the session
fn apply_timeout_rule(state: &mut GameState) {
    if state.elapsed_secs() as i64 > state.remaining_time_secs {
        state.phase = GamePhase::GameOver(GameOverReason::TimeOut);
    }
}

/// Burn a fixed amount of fuel each drain period
fn apply_fuel_drain_rule(state: &mut GameState) {
    if state.timers.elapsed(TimerId::FuelDrain) >= state.tuning.fuel_drain_every_ms {
        state.vehicle.burn(state.tuning.fuel_drain_amount);
        state.timers.reset(TimerId::FuelDrain);
    }
}
