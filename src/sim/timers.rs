//! Timer bank
//!
//! Logical elapsed-time counters driven by the host's frame clock. The bank
//! owns a single monotonic clock; each timer remembers when it was last reset
//! and how long it has spent paused since then. Pausing and resuming always
//! apply to every timer at once.

use std::collections::BTreeMap;

/// Named timers used by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerId {
    /// Absolute game clock (score, timeout, difficulty)
    Game,
    ObstacleSpawn,
    FuelSpawn,
    FuelDrain,
    /// Time since the last registered obstacle hit
    HitCooldown,
    BonusSpawn,
    DoubleScore,
    Shield,
}

impl TimerId {
    pub const ALL: [TimerId; 8] = [
        TimerId::Game,
        TimerId::ObstacleSpawn,
        TimerId::FuelSpawn,
        TimerId::FuelDrain,
        TimerId::HitCooldown,
        TimerId::BonusSpawn,
        TimerId::DoubleScore,
        TimerId::Shield,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Counter {
    /// Clock value at the last reset
    start: u64,
    /// Paused time accumulated since the last reset
    paused_total: u64,
}

/// A set of pausable elapsed-time counters sharing one clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerBank {
    now: u64,
    /// Clock value when the bank was paused
    paused_at: Option<u64>,
    counters: BTreeMap<TimerId, Counter>,
}

impl Default for TimerBank {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerBank {
    /// Create a bank with every timer started at zero
    pub fn new() -> Self {
        let counters = TimerId::ALL
            .iter()
            .map(|&id| (id, Counter::default()))
            .collect();
        Self {
            now: 0,
            paused_at: None,
            counters,
        }
    }

    /// Advance the shared clock. Paused timers do not accumulate.
    pub fn advance(&mut self, dt_ms: u64) {
        self.now = self.now.saturating_add(dt_ms);
    }

    /// Current clock value (including paused time)
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Pause every timer. No-op when already paused.
    pub fn pause_all(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.now);
        }
    }

    /// Resume every timer, crediting the paused span to each one
    pub fn resume_all(&mut self) {
        if let Some(at) = self.paused_at.take() {
            let span = self.now - at;
            for counter in self.counters.values_mut() {
                counter.paused_total += span;
            }
        }
    }

    /// Milliseconds elapsed on `id` since its last reset, excluding paused time
    pub fn elapsed(&self, id: TimerId) -> u64 {
        let counter = self.counters.get(&id).copied().unwrap_or_default();
        let end = self.paused_at.unwrap_or(self.now);
        end.saturating_sub(counter.start)
            .saturating_sub(counter.paused_total)
    }

    /// Whole seconds elapsed on `id`
    pub fn elapsed_secs(&self, id: TimerId) -> u64 {
        self.elapsed(id) / 1000
    }

    /// Restart `id` from zero. While paused the timer restarts at the pause
    /// point, so the paused span credited on resume cancels out.
    pub fn reset(&mut self, id: TimerId) {
        let start = self.paused_at.unwrap_or(self.now);
        self.counters.insert(
            id,
            Counter {
                start,
                paused_total: 0,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_reset() {
        let mut bank = TimerBank::new();
        bank.advance(1500);
        assert_eq!(bank.elapsed(TimerId::Game), 1500);
        assert_eq!(bank.elapsed_secs(TimerId::Game), 1);

        bank.reset(TimerId::ObstacleSpawn);
        bank.advance(250);
        assert_eq!(bank.elapsed(TimerId::ObstacleSpawn), 250);
        assert_eq!(bank.elapsed(TimerId::Game), 1750);
    }

    #[test]
    fn test_pause_freezes_all_timers() {
        let mut bank = TimerBank::new();
        bank.advance(400);
        bank.pause_all();
        bank.advance(10_000);
        for id in TimerId::ALL {
            assert_eq!(bank.elapsed(id), 400, "{id:?} moved while paused");
        }
        bank.resume_all();
        bank.advance(100);
        for id in TimerId::ALL {
            assert_eq!(bank.elapsed(id), 500);
        }
    }

    #[test]
    fn test_reset_while_paused() {
        let mut bank = TimerBank::new();
        bank.advance(300);
        bank.pause_all();
        bank.advance(700);
        bank.reset(TimerId::HitCooldown);
        bank.advance(200);
        assert_eq!(bank.elapsed(TimerId::HitCooldown), 0);
        bank.resume_all();
        bank.advance(50);
        assert_eq!(bank.elapsed(TimerId::HitCooldown), 50);
        assert_eq!(bank.elapsed(TimerId::Game), 350);
    }

    #[test]
    fn test_double_pause_is_idempotent() {
        let mut bank = TimerBank::new();
        bank.advance(100);
        bank.pause_all();
        bank.advance(100);
        bank.pause_all();
        bank.advance(100);
        bank.resume_all();
        bank.resume_all();
        assert_eq!(bank.elapsed(TimerId::Game), 100);
    }
}
