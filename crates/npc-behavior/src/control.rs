//! Control: integrate speed, yaw rate and position for one tick.

use npc_agent::{SpeedMode, VehicleAgent, VehicleConfig};
use npc_core::geom::{forward, signed_angle_deg};

use crate::{BehaviorResult, TickContext};

/// `(target speed, rate)` for `mode` on a lane limited to `speed_limit`.
#[inline]
pub fn speed_target(mode: SpeedMode, config: &VehicleConfig, speed_limit: f32) -> (f32, f32) {
    match mode {
        SpeedMode::Normal       => (speed_limit, config.acceleration),
        SpeedMode::Slow         => (config.slow_speed.min(speed_limit), config.deceleration),
        SpeedMode::Stop         => (0.0, config.deceleration),
        SpeedMode::SuddenStop   => (0.0, config.sudden_deceleration),
        SpeedMode::AbsoluteStop => (0.0, config.absolute_deceleration),
    }
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Apply the decided speed mode and steer toward the target.
///
/// Order: speed ramp, yaw-rate smoothing, then pose integration with the new
/// speed and yaw.  The vertical coordinate snaps to the target's.
pub fn control(agent: &mut VehicleAgent, ctx: &TickContext<'_>) -> BehaviorResult<()> {
    if agent.should_despawn {
        return Ok(());
    }
    let dt = ctx.dt;
    let speed_limit = ctx.graph.lane(agent.cognition.lane)?.speed_limit;
    let cfg = agent.config;

    let (target_speed, rate) = speed_target(agent.decision.speed_mode, &cfg, speed_limit);
    let speed = move_towards(agent.control.speed, target_speed, rate.max(0.0) * dt).max(0.0);
    agent.control.speed = speed;

    let to_target = agent.decision.target - agent.front_bumper();
    let angle = signed_angle_deg(agent.forward(), to_target);
    let desired = angle * speed * cfg.yaw_rate_multiplier;
    let t = (cfg.yaw_rate_smoothing * dt).clamp(0.0, 1.0);
    agent.control.yaw_rate += (desired - agent.control.yaw_rate) * t;

    let yaw = (agent.control.yaw + agent.control.yaw_rate * dt).rem_euclid(360.0);
    agent.control.yaw = yaw;
    agent.control.position += forward(yaw) * speed * dt;
    agent.control.position.y = agent.decision.target.y;
    Ok(())
}
