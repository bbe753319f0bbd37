//! Deterministic per-vehicle and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each vehicle gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR ((slot << 32 | generation) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive handles uniformly across the seed space.  A
//! recycled arena slot gets a fresh stream because its generation changed.
//!
//! Next-lane choices draw from the vehicle's own RNG, so the outcome does not
//! depend on the order in which vehicles are updated (sequential or Rayon).
//! The spawner draws from the single [`SimRng`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VehicleId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── LaneSelection ─────────────────────────────────────────────────────────────

/// How the pipeline and the spawner choose among candidates (successor lanes,
/// spawnable lanes, vehicle profiles).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LaneSelection {
    /// Uniformly at random from the injected RNG.
    #[default]
    Random,
    /// Always the first candidate.  Deterministic debug mode.
    First,
}

impl LaneSelection {
    /// Pick an index in `0..len`, or `None` if `len == 0`.
    #[inline]
    pub fn pick(self, len: usize, rng: &mut SmallRng) -> Option<usize> {
        match (self, len) {
            (_, 0) => None,
            (LaneSelection::First, _) => Some(0),
            (LaneSelection::Random, n) => Some(rng.gen_range(0..n)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LaneSelection::Random => "random",
            LaneSelection::First  => "first",
        }
    }
}

impl std::fmt::Display for LaneSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG.
///
/// Stored in a parallel `Vec<AgentRng>` alongside the arena slots so the
/// pipeline can hold `&mut` to a vehicle's RNG next to `&mut` to its record.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a vehicle handle.
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let key = ((vehicle.slot as u64) << 32) | vehicle.generation as u64;
        let seed = global_seed ^ key.wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Pick an index in `0..len` according to `selection`.
    #[inline]
    pub fn pick(&mut self, selection: LaneSelection, len: usize) -> Option<usize> {
        selection.pick(len, &mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (spawn lane and profile
/// choice).
///
/// Used only in the single-threaded population phase.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn pick(&mut self, selection: LaneSelection, len: usize) -> Option<usize> {
        selection.pick(len, &mut self.0)
    }
}
