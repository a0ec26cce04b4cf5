//! Difficulty ramp
//!
//! Every `difficulty_period_secs` of game time the obstacle and fuel spawn
//! intervals shrink by `difficulty_factor`, down to their floors. The ramp is a
//! one-way ratchet and fires at most once per qualifying second.

use super::spawn::Spawner;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Difficulty {
    /// Game second the ratchet last fired on
    last_ratchet_sec: Option<u64>,
}

impl Difficulty {
    /// Tighten spawn intervals if `elapsed_secs` is a fresh period boundary.
    /// Returns true when the ratchet fired.
    pub fn adjust(&mut self, elapsed_secs: u64, spawner: &mut Spawner, tuning: &Tuning) -> bool {
        let period = tuning.difficulty_period_secs.max(1);
        if elapsed_secs == 0
            || elapsed_secs % period != 0
            || self.last_ratchet_sec == Some(elapsed_secs)
        {
            return false;
        }
        self.last_ratchet_sec = Some(elapsed_secs);

        spawner.obstacle_interval_ms = shrink(
            spawner.obstacle_interval_ms,
            tuning.difficulty_factor,
            tuning.obstacle_interval_min_ms,
        );
        spawner.fuel_interval_ms = shrink(
            spawner.fuel_interval_ms,
            tuning.difficulty_factor,
            tuning.fuel_interval_min_ms,
        );
        log::debug!(
            "Difficulty at {}s: obstacle every {}ms, fuel every {}ms",
            elapsed_secs,
            spawner.obstacle_interval_ms,
            spawner.fuel_interval_ms
        );
        true
    }
}

/// Scale an interval down, truncating to whole ms, never below `floor` and never up
fn shrink(interval: u64, factor: f64, floor: u64) -> u64 {
    let scaled = (interval as f64 * factor.clamp(0.0, 1.0)) as u64;
    scaled.max(floor).min(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_boundary() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        let mut difficulty = Difficulty::default();

        assert!(!difficulty.adjust(0, &mut spawner, &tuning));
        assert!(!difficulty.adjust(9, &mut spawner, &tuning));
        assert!(difficulty.adjust(10, &mut spawner, &tuning));
        assert!(!difficulty.adjust(10, &mut spawner, &tuning));
        assert_eq!(spawner.obstacle_interval_ms, 950);
        assert_eq!(spawner.fuel_interval_ms, 2375);

        assert!(difficulty.adjust(20, &mut spawner, &tuning));
        assert_eq!(spawner.obstacle_interval_ms, 902);
        assert_eq!(spawner.fuel_interval_ms, 2256);
    }

    #[test]
    fn test_floors_hold() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        let mut difficulty = Difficulty::default();
        for sec in (10..=2000).step_by(10) {
            difficulty.adjust(sec, &mut spawner, &tuning);
        }
        assert_eq!(spawner.obstacle_interval_ms, 500);
        assert_eq!(spawner.fuel_interval_ms, 1500);
    }

    #[test]
    fn test_shrink_never_grows() {
        assert_eq!(shrink(400, 0.95, 500), 400);
        assert_eq!(shrink(1000, 1.5, 500), 1000);
    }
}
