//! System health and its time-driven decay.
//!
//! Decay is a fixed-interval timer: [`HealthTracker::advance`] accumulates
//! elapsed milliseconds and reports how many whole intervals have passed,
//! carrying the remainder forward. Each elapsed interval is one decay step of
//! `rate * damaged_pipes`. Decay magnitude is independent of how the caller
//! slices time into frames.

use serde::{Deserialize, Serialize};

use crate::config::{HealthThresholds, SimulationConfig};
use crate::fixed::{Fixed64, HEALTH_MAX, HEALTH_MIN, Millis, clamp_health};

/// Coarse classification of a health value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Healthy,
    Warning,
    Critical,
}

/// Owns the health scalar and the decay clock.
#[derive(Debug, Clone)]
pub struct HealthTracker {
    health: Fixed64,
    thresholds: HealthThresholds,
    decay_rate: Fixed64,
    repair_bonus: Fixed64,
    decay_interval: Millis,
    /// Time since the last decay step. Always below `decay_interval`
    /// between calls.
    accumulator: Millis,
    /// Total simulated time since the session started.
    elapsed: Millis,
}

impl HealthTracker {
    pub fn new(
        initial_health: Fixed64,
        thresholds: HealthThresholds,
        decay_rate: Fixed64,
        repair_bonus: Fixed64,
        decay_interval: Millis,
    ) -> Self {
        Self {
            health: clamp_health(initial_health),
            thresholds,
            decay_rate,
            repair_bonus,
            decay_interval: decay_interval.max(1),
            accumulator: 0,
            elapsed: 0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.initial_health,
            config.health_thresholds,
            config.health_deterioration_rate,
            config.repair_health_bonus,
            config.decay_interval,
        )
    }

    pub fn health(&self) -> Fixed64 {
        self.health
    }

    pub fn repair_bonus(&self) -> Fixed64 {
        self.repair_bonus
    }

    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    /// Time carried toward the next decay step.
    pub fn accumulator(&self) -> Millis {
        self.accumulator
    }

    /// Accumulate `dt` and return the number of whole decay intervals that
    /// elapsed. The caller applies one [`apply_decay`](Self::apply_decay)
    /// per reported step.
    pub fn advance(&mut self, dt: Millis) -> u64 {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.accumulator = self.accumulator.saturating_add(dt);
        let steps = self.accumulator / self.decay_interval;
        self.accumulator %= self.decay_interval;
        steps
    }

    /// Apply one decay step for `damaged_pipes` damaged pipes. Returns the
    /// damage dealt (zero when nothing is damaged).
    pub fn apply_decay(&mut self, damaged_pipes: usize) -> Fixed64 {
        let damage = self.decay_rate.saturating_mul_int(damaged_pipes as i64);
        if damage > Fixed64::ZERO {
            self.health = clamp_health(self.health.saturating_sub(damage));
        }
        damage
    }

    /// Advance the clock and apply every decay step that came due, assuming
    /// the damaged pipe count holds for the whole span. Returns steps run.
    pub fn tick(&mut self, dt: Millis, damaged_pipes: usize) -> u64 {
        let steps = self.advance(dt);
        for _ in 0..steps {
            if self.health == HEALTH_MIN {
                break;
            }
            self.apply_decay(damaged_pipes);
        }
        steps
    }

    /// Raise health by `bonus`, capped at 100.
    pub fn apply_repair_bonus(&mut self, bonus: Fixed64) {
        self.health = clamp_health(self.health.saturating_add(bonus).min(HEALTH_MAX));
    }

    pub fn classify(&self, health: Fixed64) -> HealthBand {
        if health <= self.thresholds.critical {
            HealthBand::Critical
        } else if health <= self.thresholds.warning {
            HealthBand::Warning
        } else {
            HealthBand::Healthy
        }
    }

    /// Band of the current health.
    pub fn band(&self) -> HealthBand {
        self.classify(self.health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(v: i32) -> Fixed64 {
        Fixed64::from_num(v)
    }

    fn tracker(initial: i32, rate: i32) -> HealthTracker {
        HealthTracker::new(
            f(initial),
            HealthThresholds {
                warning: f(50),
                critical: f(25),
            },
            f(rate),
            f(10),
            3000,
        )
    }

    #[test]
    fn no_decay_before_interval() {
        let mut t = tracker(80, 2);
        assert_eq!(t.tick(2999, 2), 0);
        assert_eq!(t.health(), f(80));
        assert_eq!(t.accumulator(), 2999);
    }

    #[test]
    fn decay_example_from_two_damaged_pipes() {
        let mut t = tracker(80, 2);
        t.tick(3000, 2);
        assert_eq!(t.health(), f(76));
        t.tick(1500, 2);
        assert_eq!(t.health(), f(76));
        t.tick(1500, 2);
        assert_eq!(t.health(), f(72));
    }

    #[test]
    fn sliced_ticks_match_single_tick() {
        let mut sliced = tracker(80, 3);
        let mut whole = tracker(80, 3);
        for _ in 0..3 {
            sliced.tick(1000, 1);
        }
        whole.tick(3000, 1);
        assert_eq!(sliced.health(), whole.health());
        assert_eq!(sliced.accumulator(), whole.accumulator());
    }

    #[test]
    fn irregular_deltas_fire_once_per_interval() {
        let mut t = tracker(80, 1);
        let mut steps = 0;
        for dt in [16, 17, 2000, 900, 67, 1, 3000, 2999] {
            steps += t.tick(dt, 1);
        }
        // 9000 ms total
        assert_eq!(steps, 3);
        assert_eq!(t.health(), f(77));
        assert_eq!(t.accumulator(), 0);
        assert_eq!(t.elapsed(), 9000);
    }

    #[test]
    fn long_delta_runs_multiple_steps() {
        let mut t = tracker(80, 2);
        assert_eq!(t.tick(7500, 1), 2);
        assert_eq!(t.health(), f(76));
        assert_eq!(t.accumulator(), 1500);
    }

    #[test]
    fn zero_damaged_pipes_consumes_interval() {
        let mut t = tracker(80, 2);
        assert_eq!(t.tick(3000, 0), 1);
        assert_eq!(t.health(), f(80));
        assert_eq!(t.accumulator(), 0);
    }

    #[test]
    fn decay_clamps_at_zero() {
        let mut t = tracker(3, 2);
        t.tick(3000, 5);
        assert_eq!(t.health(), Fixed64::ZERO);
        t.tick(30_000, 5);
        assert_eq!(t.health(), Fixed64::ZERO);
    }

    #[test]
    fn huge_delta_stops_decaying_at_zero() {
        let mut t = tracker(10, 2);
        assert_eq!(t.tick(u64::MAX, 1), u64::MAX / 3000);
        assert_eq!(t.health(), Fixed64::ZERO);
        assert_eq!(t.accumulator(), u64::MAX % 3000);
    }

    #[test]
    fn repair_bonus_caps_at_hundred() {
        let mut t = tracker(95, 2);
        t.apply_repair_bonus(f(10));
        assert_eq!(t.health(), HEALTH_MAX);
    }

    #[test]
    fn repair_bonus_adds_exactly() {
        let mut t = tracker(40, 2);
        t.apply_repair_bonus(t.repair_bonus());
        assert_eq!(t.health(), f(50));
    }

    #[test]
    fn classify_bounds_are_inclusive() {
        let t = tracker(80, 2);
        assert_eq!(t.classify(f(25)), HealthBand::Critical);
        assert_eq!(t.classify(f(0)), HealthBand::Critical);
        assert_eq!(t.classify(Fixed64::from_num(25.5)), HealthBand::Warning);
        assert_eq!(t.classify(f(50)), HealthBand::Warning);
        assert_eq!(t.classify(Fixed64::from_num(50.25)), HealthBand::Healthy);
        assert_eq!(t.classify(f(100)), HealthBand::Healthy);
    }

    #[test]
    fn initial_health_is_clamped() {
        let t = tracker(150, 2);
        assert_eq!(t.health(), HEALTH_MAX);
    }
}
