//! The `TrafficSim` struct and its tick loop.

use tracing::{error, info};

use npc_agent::{Pose, VehicleAgent, VehicleRngs, VehicleStore};
use npc_behavior::{
    BehaviorError, TickContext, TrafficSignal, TrafficSnapshot, YieldPhaseSource, run_pipeline,
};
use npc_core::{AgentRng, SimClock, SimConfig, Tick, VehicleId};
use npc_lane::LaneGraph;
use npc_population::{RTreeOccupancy, SpawnOutcome, Spawner, despawn_flagged};

use crate::{SimObserver, SimResult, TickStats};

// ── TrafficSim ────────────────────────────────────────────────────────────────

/// The NPC traffic simulation.
///
/// Each tick runs, in this fixed order:
///
/// 1. **Snapshot**: copy every live vehicle's lane and pose.
/// 2. **Pipeline** (optionally parallel with the `parallel` feature):
///    cognition → decision → control → pose apply for every live vehicle.
///    Cross-vehicle reads use the snapshot only.
/// 3. **Despawn**: remove vehicles flagged this tick.
/// 4. **Spawn**: top the population up toward its target.
///
/// Steps 3 and 4 are sequential and are the only writers of the live count.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct TrafficSim {
    pub config: SimConfig,

    /// Current tick and elapsed simulated seconds.
    pub clock: SimClock,

    /// Static lane graph, read-only for the whole run.
    pub graph: LaneGraph,

    pub vehicles: VehicleStore,

    /// Per-vehicle RNGs, separated for the split-borrow pattern.
    pub rngs: VehicleRngs,

    pub spawner: Spawner,

    pub(crate) signal: Box<dyn TrafficSignal>,
    pub(crate) yielding: Box<dyn YieldPhaseSource>,
    pub(crate) snapshot: TrafficSnapshot,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl TrafficSim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()` with the configured
    /// fixed `dt_secs`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            ticks = self.config.total_ticks,
            dt = self.config.dt_secs,
            seed = self.config.seed,
            "simulation start"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.process_tick(self.config.dt_secs, observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            tick = %self.clock.current_tick,
            live = self.vehicles.len(),
            spawned = self.spawner.total_spawned(),
            "simulation end"
        );
        Ok(())
    }

    /// Run exactly `n` fixed-`dt` ticks from the current position (ignores
    /// `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_tick(self.config.dt_secs, observer);
        }
        Ok(())
    }

    /// Run one tick of caller-supplied length, for hosts with a variable
    /// frame time.
    pub fn step<O: SimObserver>(&mut self, dt: f32, observer: &mut O) -> SimResult<TickStats> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(crate::SimError::Config(format!("invalid dt {dt}")));
        }
        Ok(self.process_tick(dt, observer))
    }

    /// Pose published by `vehicle` at the end of its last pipeline run.
    pub fn pose(&self, vehicle: VehicleId) -> Option<&Pose> {
        self.vehicles.pose(vehicle)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, dt: f32, observer: &mut O) -> TickStats {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: snapshot ─────────────────────────────────────────────
        self.snapshot.refresh(&self.vehicles);

        // ── Phase 2: behavior pipeline ────────────────────────────────────
        let faults = self.run_pipelines(now, dt);
        for (vehicle, err) in &faults {
            error!(%vehicle, tick = %now, error = %err, "behavior pipeline fault");
            observer.on_agent_fault(now, *vehicle, err);
        }

        // ── Phase 3: despawn ──────────────────────────────────────────────
        let despawned = match despawn_flagged(&mut self.vehicles) {
            Ok(removed) => removed,
            Err(e) => {
                error!(tick = %now, error = %e, "despawn failed");
                Vec::new()
            }
        };
        for (vehicle, agent) in &despawned {
            observer.on_despawn(now, *vehicle, agent);
        }

        // ── Phase 4: spawn ────────────────────────────────────────────────
        //
        // Occupancy is built after the despawn so freed spawn points count as
        // clear this tick.
        let mut occupancy = RTreeOccupancy::from_store(&self.vehicles);
        let outcomes = self
            .spawner
            .spawn_tick(&mut self.vehicles, &mut self.rngs, &self.graph, &mut occupancy)
            .unwrap_or_else(|e| {
                error!(tick = %now, error = %e, "spawn failed");
                Vec::new()
            });
        let mut spawned = 0;
        let mut spawn_blocked = false;
        for outcome in outcomes {
            match outcome {
                SpawnOutcome::Spawned(vehicle) => {
                    spawned += 1;
                    if let Some(agent) = self.vehicles.get(vehicle) {
                        observer.on_spawn(now, vehicle, agent);
                    }
                }
                SpawnOutcome::Blocked { .. } => spawn_blocked = true,
            }
        }

        let stats = TickStats {
            live: self.vehicles.len(),
            spawned,
            despawned: despawned.len(),
            spawn_blocked,
            faults: faults.len(),
            dt_secs: dt,
        };
        observer.on_tick_end(now, &stats);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.vehicles);
        }

        self.clock.advance(dt);
        stats
    }

    /// Run the pipeline for every live vehicle and collect the failures in
    /// slot order.
    fn run_pipelines(&mut self, now: Tick, dt: f32) -> Vec<(VehicleId, BehaviorError)> {
        self.rngs.ensure_slots(&self.vehicles);

        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = TickContext::new(now, dt, &self.graph, &self.snapshot)
            .with_lane_selection(self.config.lane_selection)
            .with_signal(self.signal.as_ref())
            .with_yielding(self.yielding.as_ref());
        let (generations, agents, poses) = self.vehicles.columns_mut();
        let rngs = self.rngs.as_mut_slice();

        #[cfg(not(feature = "parallel"))]
        {
            agents
                .iter_mut()
                .zip(poses.iter_mut())
                .zip(rngs.iter_mut())
                .enumerate()
                .filter_map(|(slot, ((agent, pose), rng))| {
                    step_slot(slot, generations, agent, pose, rng, &ctx)
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut work = || {
                agents
                    .par_iter_mut()
                    .zip(poses.par_iter_mut())
                    .zip(rngs.par_iter_mut())
                    .enumerate()
                    .filter_map(|(slot, ((agent, pose), rng))| {
                        step_slot(slot, generations, agent, pose, rng, &ctx)
                    })
                    .collect::<Vec<_>>()
            };
            match &self.pool {
                Some(pool) => pool.install(work),
                None => work(),
            }
        }
    }
}

/// Pipeline for one arena slot; `Some` only on failure.
#[inline]
fn step_slot(
    slot:        usize,
    generations: &[u32],
    agent:       &mut Option<VehicleAgent>,
    pose:        &mut Pose,
    rng:         &mut AgentRng,
    ctx:         &TickContext<'_>,
) -> Option<(VehicleId, BehaviorError)> {
    let agent = agent.as_mut()?;
    let id = VehicleId::new(slot as u32, generations[slot]);
    run_pipeline(id, agent, pose, rng, ctx).err().map(|e| (id, e))
}
