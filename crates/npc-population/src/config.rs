//! Spawner configuration.

use npc_agent::{VehicleBounds, VehicleConfig};
use npc_core::LaneId;
use npc_lane::LaneGraph;

use crate::{PopulationError, PopulationResult};

/// One spawnable vehicle type: body bounds plus dynamics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: VehicleConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounds: VehicleBounds,
}

impl VehicleProfile {
    pub fn new(name: impl Into<String>, config: VehicleConfig, bounds: VehicleBounds) -> Self {
        Self { name: name.into(), config, bounds }
    }
}

/// What the spawner keeps alive and where it may put it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnerConfig {
    /// Live vehicle count the spawner tops up to.
    pub target_population: usize,

    /// Lifetime cap on spawns.  `None` keeps spawning forever.
    pub maximum_spawns: Option<u64>,

    pub enabled: bool,

    /// Lanes a vehicle may be spawned at the start of.
    pub lanes: Vec<LaneId>,

    pub profiles: Vec<VehicleProfile>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            target_population: 0,
            maximum_spawns:    None,
            enabled:           true,
            lanes:             Vec::new(),
            profiles:          Vec::new(),
        }
    }
}

impl SpawnerConfig {
    /// Check the config against `graph`.
    ///
    /// An enabled spawner with a non-zero target needs at least one lane and
    /// one profile, and every spawnable lane must exist.
    pub fn validate(&self, graph: &LaneGraph) -> PopulationResult<()> {
        for &lane in &self.lanes {
            graph.lane(lane)?;
        }
        if !self.enabled || self.target_population == 0 {
            return Ok(());
        }
        if self.lanes.is_empty() {
            return Err(PopulationError::Config("no spawnable lanes".into()));
        }
        if self.profiles.is_empty() {
            return Err(PopulationError::Config("no vehicle profiles".into()));
        }
        Ok(())
    }
}
