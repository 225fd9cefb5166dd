//! Adaptive Render-Pass Governor
//!
//! A small hysteresis filter that turns a stream of frame deltas into
//! discrete quality steps. Frames shorter than [`PassGovernor::short_threshold`]
//! build a "fast" streak, frames longer than [`PassGovernor::long_threshold`]
//! build a "slow" streak, and either streak reaching
//! [`PassGovernor::streak_budget`] of accumulated time proposes a step up or
//! down. A single outlier frame resets the opposite streak, so one long
//! frame never downgrades quality on its own; deltas between the two
//! thresholds are neutral and touch neither accumulator.

/// Lowest render-pass level.
pub const MIN_RENDER_PASSES: u32 = 1;
/// Highest render-pass level.
pub const MAX_RENDER_PASSES: u32 = 3;

/// A proposed quality-level transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStep {
    Up,
    Down,
}

impl LevelStep {
    /// Applies this step to a level, clamped to
    /// `[MIN_RENDER_PASSES, MAX_RENDER_PASSES]`.
    #[must_use]
    pub fn apply(self, level: u32) -> u32 {
        match self {
            Self::Up => (level + 1).min(MAX_RENDER_PASSES),
            Self::Down => level.saturating_sub(1).max(MIN_RENDER_PASSES),
        }
    }
}

/// Frame-timing accumulator state. Time units are milliseconds.
#[derive(Debug, Clone)]
pub struct PassGovernor {
    /// Deltas below this are counted as fast frames.
    pub short_threshold: f64,
    /// Deltas above this are counted as slow frames.
    pub long_threshold: f64,
    /// Accumulated streak time required to propose a step.
    pub streak_budget: f64,

    sum_fast: f64,
    sum_slow: f64,
}

impl Default for PassGovernor {
    fn default() -> Self {
        Self::new()
    }
}

impl PassGovernor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            short_threshold: 40.0,
            long_threshold: 100.0,
            streak_budget: 1000.0,
            sum_fast: 0.0,
            sum_slow: 0.0,
        }
    }

    /// Classifies one frame delta into the accumulators.
    ///
    /// A fast frame breaks any slow streak and vice versa; neutral deltas
    /// leave both accumulators untouched.
    pub fn record(&mut self, delta: f64) {
        if delta < self.short_threshold {
            self.sum_fast += delta;
            self.sum_slow = 0.0;
        }

        if delta > self.long_threshold {
            self.sum_slow += delta;
            self.sum_fast = 0.0;
        }
    }

    /// Returns a proposed step if either streak has filled its budget.
    ///
    /// The filled accumulator is reset regardless of whether the caller can
    /// actually move the level, so a saturated level does not accumulate
    /// indefinitely. The two streaks are mutually exclusive by construction:
    /// at most one can be at budget.
    pub fn take_step(&mut self) -> Option<LevelStep> {
        if self.sum_fast >= self.streak_budget {
            self.sum_fast = 0.0;
            return Some(LevelStep::Up);
        }

        if self.sum_slow >= self.streak_budget {
            self.sum_slow = 0.0;
            return Some(LevelStep::Down);
        }

        None
    }

    #[inline]
    #[must_use]
    pub fn sum_fast(&self) -> f64 {
        self.sum_fast
    }

    #[inline]
    #[must_use]
    pub fn sum_slow(&self) -> f64 {
        self.sum_slow
    }
}
