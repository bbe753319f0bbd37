//! JSON scenario loader.
//!
//! # Format
//!
//! ```json
//! {
//!   "sim":     { "dt_secs": 0.05, "total_ticks": 1200, "seed": 7 },
//!   "spawner": {
//!     "target_population": 3,
//!     "lanes": [1],
//!     "profiles": [{ "name": "sedan" }]
//!   },
//!   "lanes": [
//!     { "id": 1, "waypoints": [[0,0,0],[0,0,50]], "speed_limit": 13.9,
//!       "successors": [2] },
//!     { "name": "lanelet.2", "waypoints": [[0,0,50],[10,0,60]],
//!       "speed_limit": 8.0, "turn_direction": "right", "intersection": true }
//!   ]
//! }
//! ```
//!
//! Every lane carries either a numeric `id` or an authored `name` of the form
//! `<prefix>.<int>` (see [`npc_lane::parse_lane_id`]); `id` wins when both are
//! present.  `sim` and `spawner` fall back to their defaults when omitted.

use std::path::Path;

use serde::Deserialize;

use npc_core::{LaneId, SimConfig, Vec3};
use npc_lane::{Lane, LaneGraph, LaneGraphBuilder, TurnDirection, parse_lane_id};
use npc_population::SpawnerConfig;

use crate::{SimBuilder, SimError, SimResult};

// ── JSON records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScenarioRecord {
    #[serde(default)]
    sim:     SimConfig,
    #[serde(default)]
    spawner: SpawnerConfig,
    lanes:   Vec<LaneRecord>,
}

#[derive(Deserialize)]
struct LaneRecord {
    id:             Option<u32>,
    name:           Option<String>,
    waypoints:      Vec<[f32; 3]>,
    speed_limit:    f32,
    #[serde(default)]
    turn_direction: TurnDirection,
    #[serde(default)]
    intersection:   bool,
    #[serde(default)]
    successors:     Vec<u32>,
    #[serde(default)]
    stop_line:      Option<[f32; 3]>,
}

impl LaneRecord {
    fn lane_id(&self, position: usize) -> SimResult<LaneId> {
        if let Some(id) = self.id {
            return Ok(LaneId(id));
        }
        match &self.name {
            Some(name) => parse_lane_id(name).ok_or_else(|| {
                SimError::Scenario(format!("lane #{position}: cannot parse id from name {name:?}"))
            }),
            None => Err(SimError::Scenario(format!("lane #{position} has neither id nor name"))),
        }
    }

    fn into_lane(self, position: usize) -> SimResult<Lane> {
        let id = self.lane_id(position)?;
        Ok(Lane {
            id,
            waypoints:      self.waypoints.into_iter().map(Vec3::from).collect(),
            speed_limit:    self.speed_limit,
            turn_direction: self.turn_direction,
            intersection:   self.intersection,
            successors:     self.successors.into_iter().map(LaneId).collect(),
            stop_line:      self.stop_line.map(Vec3::from),
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// A fully parsed scenario: run config, spawner config and lane graph.
pub struct Scenario {
    pub sim:     SimConfig,
    pub spawner: SpawnerConfig,
    pub graph:   LaneGraph,
}

impl Scenario {
    /// Hand the scenario to a [`SimBuilder`] for further customisation.
    pub fn into_builder(self) -> SimBuilder {
        SimBuilder::new(self.sim, self.graph).spawner(self.spawner)
    }
}

/// Parse a scenario from a JSON string.
///
/// # Errors
///
/// - [`SimError::Json`] for malformed JSON or wrongly typed fields.
/// - [`SimError::Scenario`] for a lane without a usable id.
/// - [`SimError::Lane`] for lane-graph validation failures (too few
///   waypoints, bad speed limit, duplicate id).
pub fn parse_scenario_json(json: &str) -> SimResult<Scenario> {
    let record: ScenarioRecord = serde_json::from_str(json)?;

    let mut builder = LaneGraphBuilder::with_capacity(record.lanes.len());
    for (position, lane) in record.lanes.into_iter().enumerate() {
        builder.push_lane(lane.into_lane(position)?);
    }
    let graph = builder.build()?;

    Ok(Scenario { sim: record.sim, spawner: record.spawner, graph })
}

/// Load a scenario from a JSON file.
pub fn load_scenario_json(path: &Path) -> SimResult<Scenario> {
    let text = std::fs::read_to_string(path)?;
    parse_scenario_json(&text)
}
