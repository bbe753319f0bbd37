//! Spawner: tops the live population up to its target.

use tracing::debug;

use npc_agent::{VehicleAgent, VehicleRngs, VehicleStore};
use npc_core::geom::yaw_toward;
use npc_core::{LaneId, LaneSelection, ProfileId, SimRng, VehicleId};
use npc_lane::LaneGraph;

use crate::{OccupancyOracle, PopulationError, PopulationResult, SpawnerConfig};

/// Clearance kept around a spawn point on top of the vehicle's half length.
pub const SPAWN_CLEARANCE: f32 = 2.0;

/// Result of one spawn attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(VehicleId),
    /// The spawn point was occupied.  Retried on a later tick.
    Blocked { lane: LaneId, profile: ProfileId },
}

/// Long-lived spawner state: config, its own RNG stream and the lifetime
/// spawn count.
pub struct Spawner {
    config: SpawnerConfig,
    rng: SimRng,
    selection: LaneSelection,
    total_spawned: u64,
}

impl Spawner {
    pub fn new(config: SpawnerConfig, rng: SimRng, selection: LaneSelection) -> Self {
        Self { config, rng, selection, total_spawned: 0 }
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn set_target_population(&mut self, target: usize) {
        self.config.target_population = target;
    }

    /// Vehicles spawned over the whole run.
    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// `true` once `maximum_spawns` has been used up.
    pub fn exhausted(&self) -> bool {
        self.config.maximum_spawns.is_some_and(|max| self.total_spawned >= max)
    }

    /// Spawn until the target is reached, the lifetime cap is hit, or a spawn
    /// point is blocked.  Returns every attempt made, the blocked one last.
    pub fn spawn_tick(
        &mut self,
        store:     &mut VehicleStore,
        rngs:      &mut VehicleRngs,
        graph:     &LaneGraph,
        occupancy: &mut dyn OccupancyOracle,
    ) -> PopulationResult<Vec<SpawnOutcome>> {
        let mut outcomes = Vec::new();
        while self.config.enabled
            && store.len() < self.config.target_population
            && !self.exhausted()
        {
            let outcome = self.try_spawn(store, rngs, graph, occupancy)?;
            outcomes.push(outcome);
            if let SpawnOutcome::Blocked { lane, profile } = outcome {
                debug!(%lane, %profile, live = store.len(), "spawn blocked");
                break;
            }
        }
        Ok(outcomes)
    }

    /// One attempt: pick a profile and a lane, check the spawn point, place
    /// the vehicle at the lane's first waypoint facing its second.
    pub fn try_spawn(
        &mut self,
        store:     &mut VehicleStore,
        rngs:      &mut VehicleRngs,
        graph:     &LaneGraph,
        occupancy: &mut dyn OccupancyOracle,
    ) -> PopulationResult<SpawnOutcome> {
        let p = self
            .rng
            .pick(self.selection, self.config.profiles.len())
            .ok_or_else(|| PopulationError::Config("no vehicle profiles".into()))?;
        let l = self
            .rng
            .pick(self.selection, self.config.lanes.len())
            .ok_or_else(|| PopulationError::Config("no spawnable lanes".into()))?;

        let profile_id = ProfileId(p as u16);
        let profile = &self.config.profiles[p];
        let lane = graph.lane(self.config.lanes[l])?;

        let start = lane.start();
        let next = lane.waypoints[1];
        if !occupancy.is_clear(start, SPAWN_CLEARANCE + profile.bounds.half_length()) {
            return Ok(SpawnOutcome::Blocked { lane: lane.id, profile: profile_id });
        }

        let mut agent = VehicleAgent::new(
            profile_id,
            profile.config,
            profile.bounds,
            lane.id,
            start,
            yaw_toward(start, next),
            next,
        );
        agent.cognition.is_turning = lane.turn_direction.is_turn();

        let id = store.spawn(agent);
        rngs.reseed(id);
        occupancy.occupy(start);
        self.total_spawned += 1;
        debug!(vehicle = %id, lane = %lane.id, profile = %profile.name, "spawned");
        Ok(SpawnOutcome::Spawned(id))
    }
}
