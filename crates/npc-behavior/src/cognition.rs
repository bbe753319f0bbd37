//! Cognition: advance the waypoint cursor and pick the next lane.

use tracing::trace;

use npc_agent::VehicleAgent;
use npc_core::geom::planar_distance;
use npc_core::{AgentRng, LaneSelection};
use npc_lane::{Lane, LaneGraph};

use crate::{BehaviorResult, TickContext};

/// Advance `agent`'s waypoint cursor once its target is within reach.
///
/// The target counts as reached when the planar distance from the vehicle
/// centre to it is no more than the front-bumper offset.  At the end of a
/// lane a successor is chosen; if there is none the vehicle is flagged for
/// despawn.
pub fn cognition(
    agent: &mut VehicleAgent,
    rng:   &mut AgentRng,
    ctx:   &TickContext<'_>,
) -> BehaviorResult<()> {
    if agent.should_despawn {
        return Ok(());
    }

    let distance = planar_distance(agent.control.position, agent.decision.target);
    if distance > agent.bounds.front.z {
        return Ok(());
    }

    let lane = ctx.graph.lane(agent.cognition.lane)?;
    if agent.cognition.waypoint_index >= lane.last_index() {
        match choose_next_lane(ctx.graph, lane, ctx.lane_selection, rng) {
            Some(next) => {
                trace!(from = %lane.id, to = %next.id, "lane change");
                agent.cognition.lane = next.id;
                agent.cognition.waypoint_index = 1;
                agent.cognition.is_turning = next.turn_direction.is_turn();
                agent.decision.target = next.waypoints[1];
            }
            None => agent.should_despawn = true,
        }
    } else {
        agent.cognition.waypoint_index += 1;
        agent.decision.target = lane.waypoints[agent.cognition.waypoint_index];
    }
    Ok(())
}

/// Successor of `lane` to continue on, or `None` at a dead end.
///
/// A successor id absent from the graph is treated the same as a dead end.
pub fn choose_next_lane<'g>(
    graph:     &'g LaneGraph,
    lane:      &Lane,
    selection: LaneSelection,
    rng:       &mut AgentRng,
) -> Option<&'g Lane> {
    let i = rng.pick(selection, lane.successors.len())?;
    let id = lane.successors[i];
    let next = graph.get(id);
    if next.is_none() {
        trace!(lane = %lane.id, missing = %id, "chosen successor not in graph");
    }
    next
}
