//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per fixed
//! update.  `SimClock` maps ticks to simulated seconds:
//!
//!   elapsed_secs = tick * fixed_dt_secs
//!
//! Day and night are measured in whole ticks (`DayCycle`), so time-of-day
//! queries are exact integer arithmetic with no floating-point drift.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Index of a fixed update, counted from 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub fixed_dt_secs: f32,
    /// The tick about to be processed.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(fixed_dt_secs: f32) -> Self {
        Self { fixed_dt_secs, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Simulated seconds covered by the ticks processed so far.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * f64::from(self.fixed_dt_secs)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── DayCycle ──────────────────────────────────────────────────────────────────

/// Alternating day and night phases, day first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayCycle {
    pub day_ticks: u64,
    pub night_ticks: u64,
}

impl Default for DayCycle {
    /// Ten seconds of day followed by five seconds of night at 60 ticks/s.
    fn default() -> Self {
        Self {
            day_ticks:   600,
            night_ticks: 300,
        }
    }
}

impl DayCycle {
    #[inline]
    pub fn period(&self) -> u64 {
        self.day_ticks + self.night_ticks
    }

    /// `true` while `tick` falls in the day phase of its cycle.
    ///
    /// A cycle with no night is always day; a cycle with no day is always
    /// night.
    pub fn is_day(&self, tick: Tick) -> bool {
        match (self.day_ticks, self.night_ticks) {
            (_, 0) => true,
            (0, _) => false,
            _ => tick.0 % self.period() < self.day_ticks,
        }
    }

    #[inline]
    pub fn is_night(&self, tick: Tick) -> bool {
        !self.is_day(tick)
    }
}
