//! Timing profiles for the rolling animation schedule

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scheduler::RollToken;

/// Timing profile for rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RollTimingProfile {
    /// Normal presentation timing
    #[default]
    Normal,
    /// Fast mode for impatient rooms
    Turbo,
    /// Instant (no delays, for testing)
    Instant,
    /// Custom timing values
    Custom,
}

/// Detailed roll timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollTimingConfig {
    /// Profile type
    pub profile: RollTimingProfile,

    /// Cadence of display re-samples while rolling (ms)
    pub tick_interval_ms: f64,

    /// Minimum total roll duration (ms, inclusive)
    pub min_roll_duration_ms: f64,

    /// Maximum total roll duration (ms, exclusive)
    pub max_roll_duration_ms: f64,

    /// Celebration duration after the result is revealed (ms)
    pub celebration_duration_ms: f64,
}

impl RollTimingConfig {
    /// Normal presentation timing
    pub fn normal() -> Self {
        Self {
            profile: RollTimingProfile::Normal,
            tick_interval_ms: 50.0,
            min_roll_duration_ms: 2500.0,
            max_roll_duration_ms: 3500.0,
            celebration_duration_ms: 3000.0,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: RollTimingProfile::Turbo,
            tick_interval_ms: 25.0,
            min_roll_duration_ms: 800.0,
            max_roll_duration_ms: 1200.0,
            celebration_duration_ms: 1000.0,
        }
    }

    /// Instant mode (zero delays, for testing)
    pub fn instant() -> Self {
        Self {
            profile: RollTimingProfile::Instant,
            tick_interval_ms: 0.0,
            min_roll_duration_ms: 0.0,
            max_roll_duration_ms: 0.0,
            celebration_duration_ms: 0.0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: RollTimingProfile) -> Self {
        match profile {
            RollTimingProfile::Normal => Self::normal(),
            RollTimingProfile::Turbo => Self::turbo(),
            RollTimingProfile::Instant => Self::instant(),
            RollTimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: RollTimingProfile::Custom,
            tick_interval_ms: self.tick_interval_ms * factor,
            min_roll_duration_ms: self.min_roll_duration_ms * factor,
            max_roll_duration_ms: self.max_roll_duration_ms * factor,
            celebration_duration_ms: self.celebration_duration_ms * factor,
        }
    }
}

impl Default for RollTimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

/// Schedule for one roll, produced at draw start
///
/// The host drives presentation from this: one display re-sample per tick
/// time, one stop callback at `stop_time_ms()`. The token must be handed
/// back to `DrawEngine::finish_roll` so stale stops are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollPlan {
    /// Token for the stop callback
    pub token: RollToken,
    /// Display re-sample cadence (ms)
    pub tick_interval_ms: f64,
    /// Total roll duration (ms), randomized per roll
    pub duration_ms: f64,
}

impl RollPlan {
    /// Build a plan with a duration drawn uniformly from the config window
    pub(crate) fn generate<R: Rng + ?Sized>(
        token: RollToken,
        config: &RollTimingConfig,
        rng: &mut R,
    ) -> Self {
        let duration_ms = if config.max_roll_duration_ms > config.min_roll_duration_ms {
            rng.random_range(config.min_roll_duration_ms..config.max_roll_duration_ms)
        } else {
            config.min_roll_duration_ms
        };
        Self {
            token,
            tick_interval_ms: config.tick_interval_ms,
            duration_ms,
        }
    }

    /// Number of display ticks before the stop signal
    pub fn tick_count(&self) -> u32 {
        if self.tick_interval_ms <= 0.0 || self.duration_ms <= 0.0 {
            0
        } else {
            (self.duration_ms / self.tick_interval_ms).floor() as u32
        }
    }

    /// Tick timestamps (ms from roll start), in order
    pub fn tick_times(&self) -> Vec<f64> {
        (1..=self.tick_count())
            .map(|i| i as f64 * self.tick_interval_ms)
            .collect()
    }

    /// When the stop callback fires (ms from roll start)
    pub fn stop_time_ms(&self) -> f64 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_timing_profiles() {
        let normal = RollTimingConfig::normal();
        let turbo = RollTimingConfig::turbo();

        assert!(turbo.min_roll_duration_ms < normal.min_roll_duration_ms);
        assert!(turbo.tick_interval_ms < normal.tick_interval_ms);
        assert_eq!(RollTimingConfig::instant().min_roll_duration_ms, 0.0);
    }

    #[test]
    fn test_plan_duration_within_window() {
        let config = RollTimingConfig::normal();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let plan = RollPlan::generate(RollToken(1), &config, &mut rng);
            assert!(plan.duration_ms >= config.min_roll_duration_ms);
            assert!(plan.duration_ms < config.max_roll_duration_ms);
        }
    }

    #[test]
    fn test_instant_plan_has_no_ticks() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = RollPlan::generate(RollToken(1), &RollTimingConfig::instant(), &mut rng);
        assert_eq!(plan.tick_count(), 0);
        assert!(plan.tick_times().is_empty());
        assert_eq!(plan.stop_time_ms(), 0.0);
    }

    #[test]
    fn test_tick_times_are_monotonic() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = RollPlan::generate(RollToken(1), &RollTimingConfig::normal(), &mut rng);

        let ticks = plan.tick_times();
        assert_eq!(ticks.len() as u32, plan.tick_count());
        for pair in ticks.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(ticks.last().copied().unwrap_or(0.0) <= plan.duration_ms);
    }

    #[test]
    fn test_scaled_config() {
        let half = RollTimingConfig::normal().scaled(0.5);
        assert_eq!(half.profile, RollTimingProfile::Custom);
        assert_eq!(half.min_roll_duration_ms, 1250.0);
        assert_eq!(half.tick_interval_ms, 25.0);
    }
}
