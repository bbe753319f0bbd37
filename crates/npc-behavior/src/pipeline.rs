//! The four pipeline steps in order, for one vehicle.

use npc_agent::{Pose, VehicleAgent};
use npc_core::{AgentRng, VehicleId};

use crate::{BehaviorResult, TickContext, cognition, control, decision};

/// Publish the vehicle's control state as its host-visible pose.
#[inline]
pub fn apply_pose(agent: &VehicleAgent, pose: &mut Pose) {
    if agent.should_despawn {
        return;
    }
    *pose = agent.pose();
}

/// Run cognition, decision, control and pose apply for one vehicle.
///
/// A vehicle flagged for despawn (before or during this call) is left
/// untouched from that point on.  On error the vehicle keeps whatever the
/// completed steps wrote.
pub fn run_pipeline(
    id:    VehicleId,
    agent: &mut VehicleAgent,
    pose:  &mut Pose,
    rng:   &mut AgentRng,
    ctx:   &TickContext<'_>,
) -> BehaviorResult<()> {
    if agent.should_despawn {
        return Ok(());
    }
    cognition::cognition(agent, rng, ctx)?;
    decision::decision(id, agent, ctx)?;
    control::control(agent, ctx)?;
    apply_pose(agent, pose);
    Ok(())
}
