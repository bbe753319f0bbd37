//! Mutable per-vehicle state, grouped by the pipeline step that writes it.

use glam::{Quat, Vec3};

use npc_core::geom::{forward, local_to_world, rotation};
use npc_core::{LaneId, ProfileId, UNBOUNDED};

use crate::{VehicleBounds, VehicleConfig};

// ── SpeedMode ─────────────────────────────────────────────────────────────────

/// Discrete throttle/brake regime, recomputed from scratch every tick.
///
/// Variants are ordered from loosest to tightest.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SpeedMode {
    #[default]
    Normal,
    Slow,
    Stop,
    SuddenStop,
    AbsoluteStop,
}

impl SpeedMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SpeedMode::Normal       => "NORMAL",
            SpeedMode::Slow         => "SLOW",
            SpeedMode::Stop         => "STOP",
            SpeedMode::SuddenStop   => "SUDDEN_STOP",
            SpeedMode::AbsoluteStop => "ABSOLUTE_STOP",
        }
    }
}

impl std::fmt::Display for SpeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── YieldPhase ────────────────────────────────────────────────────────────────

/// Right-of-way negotiation state at an intersection.
///
/// The pipeline only consumes the phase; transitions come from a
/// `YieldPhaseSource` collaborator.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum YieldPhase {
    #[default]
    None,
    EnteringIntersection,
    AtIntersection,
    IntersectionBlocked,
    LeftHandRuleEnteringIntersection,
    LeftHandRuleAtIntersection,
    LanesRulesEnteringIntersection,
    LanesRulesAtIntersection,
    ForcingPriority,
}

impl YieldPhase {
    /// `true` if the vehicle must hold at its yield point.
    #[inline]
    pub fn is_blocking(self) -> bool {
        !matches!(
            self,
            YieldPhase::None | YieldPhase::EnteringIntersection | YieldPhase::AtIntersection
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            YieldPhase::None                             => "NONE",
            YieldPhase::EnteringIntersection             => "ENTERING_INTERSECTION",
            YieldPhase::AtIntersection                   => "AT_INTERSECTION",
            YieldPhase::IntersectionBlocked              => "INTERSECTION_BLOCKED",
            YieldPhase::LeftHandRuleEnteringIntersection => "LEFT_HAND_RULE_ENTERING_INTERSECTION",
            YieldPhase::LeftHandRuleAtIntersection       => "LEFT_HAND_RULE_AT_INTERSECTION",
            YieldPhase::LanesRulesEnteringIntersection   => "LANES_RULES_ENTERING_INTERSECTION",
            YieldPhase::LanesRulesAtIntersection         => "LANES_RULES_AT_INTERSECTION",
            YieldPhase::ForcingPriority                  => "FORCING_PRIORITY",
        }
    }
}

impl std::fmt::Display for YieldPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Step outputs ──────────────────────────────────────────────────────────────

/// Written by cognition: where on the lane graph the vehicle is.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CognitionState {
    pub lane: LaneId,
    /// Index of the waypoint currently targeted on `lane`.
    pub waypoint_index: usize,
    pub is_turning: bool,
}

/// Written by decision: what to aim at and how hard to brake.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionState {
    pub target: Vec3,
    pub speed_mode: SpeedMode,
    pub yield_phase: YieldPhase,
    pub yield_point: Vec3,
    /// Stopping constraint from the vehicle ahead; `UNBOUNDED` if none.
    pub front_vehicle_distance: f32,
    pub is_stopped_by_front_vehicle: bool,
}

/// Written by control: kinematic state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlState {
    pub position: Vec3,
    /// Heading in degrees, see `npc_core::geom`.
    pub yaw: f32,
    /// Always `>= 0`.
    pub speed: f32,
    /// Degrees per second.
    pub yaw_rate: f32,
}

// ── VehicleAgent ──────────────────────────────────────────────────────────────

/// Complete state of one NPC vehicle.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleAgent {
    pub profile: ProfileId,
    pub config: VehicleConfig,
    pub bounds: VehicleBounds,
    pub cognition: CognitionState,
    pub decision: DecisionState,
    pub control: ControlState,
    /// Once set, the pipeline leaves the vehicle alone and the despawner
    /// removes it at the end of the tick.
    pub should_despawn: bool,
}

impl VehicleAgent {
    /// A freshly spawned vehicle: stationary at `position` facing `yaw`,
    /// cursor at waypoint 0 of `lane`, aiming at `target`, yield phase NONE
    /// and no vehicle ahead.  `is_turning` starts `false`.
    pub fn new(
        profile: ProfileId,
        config: VehicleConfig,
        bounds: VehicleBounds,
        lane: LaneId,
        position: Vec3,
        yaw: f32,
        target: Vec3,
    ) -> Self {
        Self {
            profile,
            config,
            bounds,
            cognition: CognitionState { lane, waypoint_index: 0, is_turning: false },
            decision: DecisionState {
                target,
                speed_mode: SpeedMode::Normal,
                yield_phase: YieldPhase::None,
                yield_point: Vec3::ZERO,
                front_vehicle_distance: UNBOUNDED,
                is_stopped_by_front_vehicle: false,
            },
            control: ControlState { position, yaw, speed: 0.0, yaw_rate: 0.0 },
            should_despawn: false,
        }
    }

    /// Unit forward vector for the current yaw.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        forward(self.control.yaw)
    }

    /// World-space front-bumper centre.
    #[inline]
    pub fn front_bumper(&self) -> Vec3 {
        local_to_world(self.control.position, self.control.yaw, self.bounds.front)
    }

    /// World-space back-bumper centre.
    #[inline]
    pub fn back_bumper(&self) -> Vec3 {
        local_to_world(self.control.position, self.control.yaw, self.bounds.back)
    }

    /// Published pose for the current control state.
    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(self.control.position, self.control.yaw)
    }
}

// ── Pose ──────────────────────────────────────────────────────────────────────

/// The host-visible transform of a vehicle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, yaw_deg: f32) -> Self {
        Self { position, rotation: rotation(yaw_deg) }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Quat::IDENTITY }
    }
}
