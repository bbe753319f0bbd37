//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick advances the
//! world by `dt` seconds supplied by the clock.  `SimClock` holds a fixed
//! `dt_secs` for the common case; hosts with a variable frame time pass
//! their own `dt` to `TrafficSim::step` and the clock accumulates it.

use std::fmt;

use crate::{CoreError, CoreResult, LaneSelection};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and the simulated seconds elapsed so far.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Default seconds per tick, used by `TrafficSim::run`.
    pub dt_secs: f32,
    /// The current tick, advanced once per processed tick.
    pub current_tick: Tick,
    /// Simulated seconds elapsed (sum of every `dt` actually applied).
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new(dt_secs: f32) -> Self {
        Self {
            dt_secs,
            current_tick: Tick::ZERO,
            elapsed_secs: 0.0,
        }
    }

    /// Advance the clock by one tick of length `dt`.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_tick = self.current_tick.offset(1);
        self.elapsed_secs += dt as f64;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically part of a scenario file loaded by `npc-sim` and passed to the
/// simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds per tick for `run`.  Default: 1/60.
    pub dt_secs: f32,

    /// Total ticks to simulate with `run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Emit a snapshot to the observer every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Random or deterministic choice of next lanes, spawn lanes and profiles.
    pub lane_selection: LaneSelection,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_secs:               1.0 / 60.0,
            total_ticks:           3_600,
            seed:                  0,
            num_threads:           None,
            output_interval_ticks: 60,
            lane_selection:        LaneSelection::Random,
        }
    }
}

impl SimConfig {
    /// The tick at which `run` ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt_secs)
    }

    /// Reject values the tick loop cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.dt_secs.is_finite() || self.dt_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "dt_secs must be a positive finite number, got {}",
                self.dt_secs
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
