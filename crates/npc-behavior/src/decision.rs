//! Decision: stopping-distance arithmetic and speed-mode selection.
//!
//! Every obstruction is reduced to a distance ahead of the front bumper.  The
//! smallest of them (the binding distance) is compared against the stopping
//! distances for each braking level, tightest first.

use npc_agent::{SpeedMode, VehicleAgent, VehicleConfig};
use npc_core::geom::signed_longitudinal;
use npc_core::{UNBOUNDED, VehicleId};

use crate::{BehaviorResult, TickContext};

/// Extra distance kept behind the vehicle ahead.
pub const FRONT_VEHICLE_GAP: f32 = 4.0;

const ABSOLUTE_STOP_MARGIN: f32 = 1.0;
const SUDDEN_STOP_MARGIN: f32 = 2.0;
const STOP_MARGIN: f32 = 3.0;
const SLOW_DOWN_MARGIN: f32 = 4.0;

/// Distance needed to brake from `speed` to zero at `deceleration`.
///
/// `UNBOUNDED` for non-positive decelerations or non-finite results; never
/// negative.
#[inline]
pub fn stopping_distance(speed: f32, deceleration: f32) -> f32 {
    if deceleration.is_nan() || deceleration <= 0.0 {
        return UNBOUNDED;
    }
    let d = speed * speed / (2.0 * deceleration);
    if d.is_finite() { d.max(0.0) } else { UNBOUNDED }
}

#[inline]
fn plus(d: f32, margin: f32) -> f32 {
    if d >= UNBOUNDED { UNBOUNDED } else { d + margin }
}

// ── StoppingDistances ─────────────────────────────────────────────────────────

/// The four thresholds speed-mode selection compares against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StoppingDistances {
    pub absolute: f32,
    pub sudden: f32,
    pub normal: f32,
    pub slow: f32,
}

impl StoppingDistances {
    pub fn new(speed: f32, config: &VehicleConfig) -> Self {
        let normal = plus(stopping_distance(speed, config.deceleration), STOP_MARGIN);
        Self {
            absolute: plus(stopping_distance(speed, config.absolute_deceleration), ABSOLUTE_STOP_MARGIN),
            sudden:   plus(stopping_distance(speed, config.sudden_deceleration), SUDDEN_STOP_MARGIN),
            normal,
            slow:     plus(normal, SLOW_DOWN_MARGIN),
        }
    }

    /// Tightest mode whose threshold `binding` falls within.
    pub fn select(&self, binding: f32, is_turning: bool) -> SpeedMode {
        if binding <= self.absolute {
            SpeedMode::AbsoluteStop
        } else if binding <= self.sudden {
            SpeedMode::SuddenStop
        } else if binding <= self.normal {
            SpeedMode::Stop
        } else if binding <= self.slow || is_turning {
            SpeedMode::Slow
        } else {
            SpeedMode::Normal
        }
    }
}

// ── Obstruction distances ─────────────────────────────────────────────────────

/// Stopping constraint from the nearest vehicle ahead.
///
/// The front vehicle is the snapshot vehicle on the same lane or on one of
/// its successors whose centre lies nearest ahead of this vehicle's centre.
/// The constraint is the clearance from this front bumper to its back bumper
/// minus [`FRONT_VEHICLE_GAP`].  A result below `-FRONT_VEHICLE_GAP` (its
/// back is behind our front) imposes no constraint, even if a farther
/// vehicle would.
pub fn front_vehicle_distance(
    id:    VehicleId,
    agent: &VehicleAgent,
    ctx:   &TickContext<'_>,
) -> BehaviorResult<f32> {
    let lane = agent.cognition.lane;
    let successors = ctx.graph.successors(lane)?;
    let position = agent.control.position;
    let forward = agent.forward();
    let front = agent.front_bumper();

    let nearest = std::iter::once(lane)
        .chain(successors.iter().copied())
        .flat_map(|l| ctx.snapshot.on_lane(l))
        .filter(|other| other.id != id)
        .map(|other| (signed_longitudinal(position, forward, other.position), other))
        .filter(|&(ahead, _)| ahead > 0.0)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let Some((_, other)) = nearest else {
        return Ok(UNBOUNDED);
    };
    let distance = signed_longitudinal(front, forward, other.back_bumper) - FRONT_VEHICLE_GAP;
    if distance < -FRONT_VEHICLE_GAP {
        return Ok(UNBOUNDED);
    }
    Ok(distance)
}

/// Stopping constraint from a blocking yield phase: signed distance from the
/// front bumper to the yield point along the heading.
pub fn yield_distance(agent: &VehicleAgent) -> f32 {
    if !agent.decision.yield_phase.is_blocking() {
        return UNBOUNDED;
    }
    signed_longitudinal(agent.front_bumper(), agent.forward(), agent.decision.yield_point)
}

// ── Decision step ─────────────────────────────────────────────────────────────

/// Refresh the yield phase, then recompute the speed mode from scratch.
pub fn decision(
    id:    VehicleId,
    agent: &mut VehicleAgent,
    ctx:   &TickContext<'_>,
) -> BehaviorResult<()> {
    if agent.should_despawn {
        return Ok(());
    }

    if let Some((phase, point)) = ctx.yielding.update(id, agent, ctx.graph) {
        agent.decision.yield_phase = phase;
        agent.decision.yield_point = point;
    }

    let distances = StoppingDistances::new(agent.control.speed, &agent.config);
    let front = front_vehicle_distance(id, agent, ctx)?;
    let signal = ctx.signal.stop_distance(id, agent, ctx.graph);
    let yielding = yield_distance(agent);
    let binding = front.min(signal).min(yielding);

    agent.decision.front_vehicle_distance = front;
    agent.decision.is_stopped_by_front_vehicle = front <= distances.normal;
    agent.decision.speed_mode = distances.select(binding, agent.cognition.is_turning);
    Ok(())
}
