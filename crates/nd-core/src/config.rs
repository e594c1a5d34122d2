//! Run configuration.
//!
//! All structs implement `Default` with the values the colony was tuned
//! with.  With the `serde` feature enabled they deserialize from JSON; any
//! field left out of the document keeps its default.

use crate::error::{NdError, NdResult};
use crate::time::{DayCycle, SimClock, Tick};

// ── DistanceMetric ────────────────────────────────────────────────────────────

/// How A* measures the length of a graph edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceMetric {
    /// `sqrt` Euclidean length.
    #[default]
    Exact,
    /// Euclidean length through the bit-level inverse square root.
    FastInverseSqrt,
}

// ── NavConfig ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Path requests served per fixed update.
    pub max_paths_per_update: usize,

    /// Open-set size above which the priority queue drops its last leaf.
    pub open_set_capacity: usize,

    pub distance_metric: DistanceMetric,

    /// Edge-length multiplier when entering a ROAD cell.
    pub road_cost_factor: f32,

    /// Edge-length multiplier when entering a NORMAL cell.
    pub normal_cost_factor: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            max_paths_per_update: 10,
            open_set_capacity:    128,
            distance_metric:      DistanceMetric::Exact,
            road_cost_factor:     1.0,
            normal_cost_factor:   1.0,
        }
    }
}

// ── DwarfConfig ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DwarfConfig {
    /// World units per second along a path.
    pub speed: f32,

    /// A waypoint closer than this is considered reached.
    pub stopping_distance: f32,
}

impl Default for DwarfConfig {
    fn default() -> Self {
        Self {
            speed:             200.0,
            stopping_distance: 10.0,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// `SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total fixed updates to simulate.
    pub total_ticks: u64,

    /// Simulated seconds per fixed update.
    pub fixed_dt_secs: f32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    pub day: DayCycle,
    pub nav: NavConfig,
    pub dwarf: DwarfConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:           3_600,
            fixed_dt_secs:         1.0 / 60.0,
            seed:                  0,
            output_interval_ticks: 60,
            day:                   DayCycle::default(),
            nav:                   NavConfig::default(),
            dwarf:                 DwarfConfig::default(),
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.fixed_dt_secs)
    }

    /// Check the values other crates rely on being positive.
    ///
    /// Returns `NdError::Config` describing the first problem found.
    pub fn validate(&self) -> NdResult<()> {
        let fail = |msg: String| -> NdResult<()> { Err(NdError::Config(msg)) };
        if !(self.fixed_dt_secs > 0.0) {
            return fail(format!("fixed_dt_secs must be positive, got {}", self.fixed_dt_secs));
        }
        if self.nav.max_paths_per_update == 0 {
            return fail("nav.max_paths_per_update must be at least 1".into());
        }
        if self.nav.open_set_capacity == 0 {
            return fail("nav.open_set_capacity must be at least 1".into());
        }
        if !(self.nav.road_cost_factor > 0.0) || !(self.nav.normal_cost_factor > 0.0) {
            return fail("nav cost factors must be positive".into());
        }
        if self.dwarf.speed < 0.0 || self.dwarf.stopping_distance < 0.0 {
            return fail("dwarf speed and stopping_distance must not be negative".into());
        }
        Ok(())
    }
}
