//! Simulation observer trait for progress reporting and data collection.

use npc_agent::{VehicleAgent, VehicleStore};
use npc_behavior::BehaviorError;
use npc_core::{Tick, VehicleId};

/// Counters for one processed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    /// Live vehicles after the spawn phase.
    pub live: usize,
    pub spawned: usize,
    pub despawned: usize,
    /// `true` if the spawner stopped early on an occupied spawn point.
    pub spawn_blocked: bool,
    /// Vehicles whose pipeline returned an error.
    pub faults: usize,
    /// Seconds simulated by this tick.
    pub dt_secs: f32,
}

/// Callbacks invoked by [`TrafficSim`][crate::TrafficSim] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} vehicles", stats.live);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the snapshot is taken.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the spawn phase of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called for each vehicle the spawner placed this tick.
    fn on_spawn(&mut self, _tick: Tick, _vehicle: VehicleId, _agent: &VehicleAgent) {}

    /// Called for each vehicle removed this tick, with its final state.
    fn on_despawn(&mut self, _tick: Tick, _vehicle: VehicleId, _agent: &VehicleAgent) {}

    /// Called when a vehicle's pipeline fails.  The vehicle stays in the
    /// world; the rest of the tick proceeds normally.
    fn on_agent_fault(&mut self, _tick: Tick, _vehicle: VehicleId, _error: &BehaviorError) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to every vehicle.
    fn on_snapshot(&mut self, _tick: Tick, _vehicles: &VehicleStore) {}

    /// Called once after the final tick of [`run`][crate::TrafficSim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
