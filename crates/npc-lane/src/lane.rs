//! A single directed lane.

use npc_core::{LaneId, Vec3};

/// Turn classification of a lane, as authored.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnDirection {
    Straight,
    Left,
    Right,
    #[default]
    Unknown,
}

impl TurnDirection {
    /// `true` for lanes that bend through an intersection.  Vehicles on them
    /// never drive faster than SLOW.
    #[inline]
    pub fn is_turn(self) -> bool {
        matches!(self, TurnDirection::Left | TurnDirection::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TurnDirection::Straight => "straight",
            TurnDirection::Left     => "left",
            TurnDirection::Right    => "right",
            TurnDirection::Unknown  => "unknown",
        }
    }
}

/// Directed polyline of waypoints with a speed limit and outgoing edges.
///
/// Waypoints are ordered along the direction of travel.  The first waypoint
/// of a successor lane is expected to coincide with this lane's last one.
#[derive(Debug, Clone)]
pub struct Lane {
    pub id: LaneId,

    /// World-space polyline, at least two points.
    pub waypoints: Vec<Vec3>,

    /// Speed limit in world units per second.
    pub speed_limit: f32,

    pub turn_direction: TurnDirection,

    /// `true` if the lane lies inside an intersection.
    pub intersection: bool,

    /// Outgoing lanes in authored order.  Empty = dead end.
    pub successors: Vec<LaneId>,

    /// Authored stop-line position, if the lane ends at one.  Carried for the
    /// traffic-signal collaborator; the core never reads it.
    pub stop_line: Option<Vec3>,
}

impl Lane {
    #[inline]
    pub fn start(&self) -> Vec3 {
        self.waypoints[0]
    }

    /// Index of the final waypoint.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }
}
