//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a config file can
//! rebalance a session without touching the core.

use serde::{Deserialize, Serialize};

/// Gameplay constants. Times are milliseconds unless the name says seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Starting remaining-time budget
    pub initial_time_secs: i64,
    /// Fuel the vehicle starts with
    pub starting_fuel: i32,

    // === Vehicle ===
    /// Horizontal step per frame while a steering key is held
    pub car_speed: i32,
    /// Distance kept from both window edges by the lane clamp
    pub lane_margin: i32,
    /// Gap between the car's bottom edge and the window bottom
    pub car_bottom_gap: i32,

    // === Spawning ===
    pub obstacle_interval_ms: u64,
    pub obstacle_interval_min_ms: u64,
    pub fuel_interval_ms: u64,
    pub fuel_interval_min_ms: u64,
    pub bonus_interval_ms: u64,
    /// Bonuses only spawn once this many whole game seconds have passed
    pub bonus_gate_secs: u64,
    /// Horizontal margin for obstacle and fuel spawns
    pub spawn_margin: i32,
    /// Horizontal margin for bonus spawns
    pub bonus_spawn_margin: i32,
    /// Bonus roll weights, out of 100
    pub coin_weight: u32,
    pub star_weight: u32,

    // === Difficulty ===
    pub difficulty_period_secs: u64,
    pub difficulty_factor: f64,
    pub obstacle_start_speed: i32,
    pub obstacle_speed_step: i32,
    pub obstacle_max_speed: i32,

    // === Entities ===
    pub fuel_speed: i32,
    pub bonus_speed: i32,
    pub small_refuel: i32,
    pub large_refuel: i32,

    // === Effects ===
    pub hit_penalty: i32,
    pub hit_cooldown_ms: u64,
    pub small_time_bonus_secs: i64,
    pub large_time_bonus_secs: i64,
    /// Refuel amounts at or above this grant the large time bonus
    pub large_time_bonus_threshold: i32,
    pub double_score_ms: u64,
    pub shield_ms: u64,
    pub coin_points: u64,

    // === Resource drain ===
    pub fuel_drain_every_ms: u64,
    pub fuel_drain_amount: i32,

    // === Presentation ===
    pub floating_text_lifetime: i32,
    pub floating_text_decay: i32,
    pub background_scroll: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_time_secs: 15,
            starting_fuel: 15,

            car_speed: 7,
            lane_margin: 180,
            car_bottom_gap: 20,

            obstacle_interval_ms: 1000,
            obstacle_interval_min_ms: 500,
            fuel_interval_ms: 2500,
            fuel_interval_min_ms: 1500,
            bonus_interval_ms: 8000,
            bonus_gate_secs: 5,
            spawn_margin: 200,
            bonus_spawn_margin: 180,
            coin_weight: 45,
            star_weight: 30,

            difficulty_period_secs: 10,
            difficulty_factor: 0.95,
            obstacle_start_speed: 5,
            obstacle_speed_step: 3,
            obstacle_max_speed: 30,

            fuel_speed: 5,
            bonus_speed: 3,
            small_refuel: 5,
            large_refuel: 10,

            hit_penalty: 5,
            hit_cooldown_ms: 800,
            small_time_bonus_secs: 3,
            large_time_bonus_secs: 6,
            large_time_bonus_threshold: 10,
            double_score_ms: 10_000,
            shield_ms: 5_000,
            coin_points: 100,

            fuel_drain_every_ms: 1000,
            fuel_drain_amount: 2,

            floating_text_lifetime: 1000,
            floating_text_decay: 16,
            background_scroll: 4,
        }
    }
}

impl Tuning {
    /// Time bonus (seconds) granted for a fuel pickup of the given refuel amount
    pub fn time_bonus_for(&self, refuel: i32) -> i64 {
        if refuel >= self.large_time_bonus_threshold {
            self.large_time_bonus_secs
        } else {
            self.small_time_bonus_secs
        }
    }

    /// Points a coin grants, doubled while double-score is active
    pub fn coin_gain(&self, doubled: bool) -> u64 {
        if doubled {
            self.coin_points * 2
        } else {
            self.coin_points
        }
    }

    /// Buff duration in whole seconds, for HUD countdowns
    pub fn double_score_secs(&self) -> i64 {
        (self.double_score_ms / 1000) as i64
    }

    pub fn shield_secs(&self) -> i64 {
        (self.shield_ms / 1000) as i64
    }
}
