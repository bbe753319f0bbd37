//! Lane graph representation and builder.
//!
//! # Data layout
//!
//! Lanes are stored densely in a `Vec<Lane>` in insertion order.  A
//! `FxHashMap<LaneId, u32>` maps scenario lane ids to their dense position,
//! so every lookup the pipeline performs per vehicle per tick is O(1) and no
//! lookup ever scans the lane list.

use rustc_hash::FxHashMap;
use tracing::warn;

use npc_core::{LaneId, Vec3};

use crate::{Lane, LaneError, LaneResult, TurnDirection};

// ── LaneGraph ─────────────────────────────────────────────────────────────────

/// Directed lane graph.  Immutable once built; use [`LaneGraphBuilder`].
pub struct LaneGraph {
    lanes: Vec<Lane>,
    index: FxHashMap<LaneId, u32>,
}

impl LaneGraph {
    /// A graph with no lanes.
    pub fn empty() -> Self {
        Self { lanes: Vec::new(), index: FxHashMap::default() }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: LaneId) -> bool {
        self.index.contains_key(&id)
    }

    /// Look up a lane, `None` if the id is unknown.
    #[inline]
    pub fn get(&self, id: LaneId) -> Option<&Lane> {
        self.index.get(&id).map(|&i| &self.lanes[i as usize])
    }

    /// Look up a lane.  An unknown id is a hard configuration fault.
    #[inline]
    pub fn lane(&self, id: LaneId) -> LaneResult<&Lane> {
        self.get(id).ok_or(LaneError::LaneNotFound(id))
    }

    /// Outgoing lane ids of `id`, in authored order.
    #[inline]
    pub fn successors(&self, id: LaneId) -> LaneResult<&[LaneId]> {
        self.lane(id).map(|l| l.successors.as_slice())
    }

    /// Waypoint polyline of `id`.
    #[inline]
    pub fn waypoints(&self, id: LaneId) -> LaneResult<&[Vec3]> {
        self.lane(id).map(|l| l.waypoints.as_slice())
    }

    /// All lanes in insertion order.
    pub fn lanes(&self) -> impl Iterator<Item = &Lane> + '_ {
        self.lanes.iter()
    }

    /// Every `(lane, successor)` pair whose successor is not in the graph.
    pub fn dangling_successors(&self) -> Vec<(LaneId, LaneId)> {
        self.lanes
            .iter()
            .flat_map(|l| {
                l.successors
                    .iter()
                    .filter(|s| !self.contains(**s))
                    .map(move |&s| (l.id, s))
            })
            .collect()
    }
}

// ── LaneGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`LaneGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use npc_core::{LaneId, Vec3};
/// use npc_lane::{LaneGraphBuilder, TurnDirection};
///
/// let mut b = LaneGraphBuilder::new();
/// b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)], 12.0);
/// b.add_lane(LaneId(2), vec![Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 10.0)], 8.0)
///     .turn_direction = TurnDirection::Left;
/// b.connect(LaneId(1), LaneId(2));
/// let graph = b.build().unwrap();
/// assert_eq!(graph.successors(LaneId(1)).unwrap(), &[LaneId(2)]);
/// ```
pub struct LaneGraphBuilder {
    lanes: Vec<Lane>,
}

impl LaneGraphBuilder {
    pub fn new() -> Self {
        Self { lanes: Vec::new() }
    }

    pub fn with_capacity(lanes: usize) -> Self {
        Self { lanes: Vec::with_capacity(lanes) }
    }

    /// Add a straight-classified, non-intersection lane with no successors
    /// and return it for further field edits.
    pub fn add_lane(&mut self, id: LaneId, waypoints: Vec<Vec3>, speed_limit: f32) -> &mut Lane {
        self.lanes.push(Lane {
            id,
            waypoints,
            speed_limit,
            turn_direction: TurnDirection::Straight,
            intersection: false,
            successors: Vec::new(),
            stop_line: None,
        });
        let last = self.lanes.len() - 1;
        &mut self.lanes[last]
    }

    /// Add a fully specified lane.
    pub fn push_lane(&mut self, lane: Lane) {
        self.lanes.push(lane);
    }

    /// Append `to` to the successor list of `from`.
    ///
    /// Edges to lanes added later are fine.  If `from` was never added the
    /// edge is dropped with a warning.
    pub fn connect(&mut self, from: LaneId, to: LaneId) {
        match self.lanes.iter_mut().rev().find(|l| l.id == from) {
            Some(lane) => lane.successors.push(to),
            None => warn!(%from, %to, "edge from unknown lane ignored"),
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Validate and index the lanes.
    ///
    /// Fails on duplicate ids, lanes with fewer than two waypoints and
    /// negative or non-finite speed limits.  Successors that name a lane
    /// absent from the graph are kept but logged: at runtime they behave as
    /// "no next lane".
    pub fn build(self) -> LaneResult<LaneGraph> {
        let mut index = FxHashMap::with_capacity_and_hasher(self.lanes.len(), Default::default());

        for (i, lane) in self.lanes.iter().enumerate() {
            if lane.waypoints.len() < 2 {
                return Err(LaneError::TooFewWaypoints {
                    id:    lane.id,
                    count: lane.waypoints.len(),
                });
            }
            if !lane.speed_limit.is_finite() || lane.speed_limit < 0.0 {
                return Err(LaneError::InvalidSpeedLimit {
                    id:    lane.id,
                    limit: lane.speed_limit,
                });
            }
            if index.insert(lane.id, i as u32).is_some() {
                return Err(LaneError::DuplicateLane(lane.id));
            }
        }

        let graph = LaneGraph { lanes: self.lanes, index };
        for (lane, missing) in graph.dangling_successors() {
            warn!(%lane, %missing, "successor lane not in graph; treated as dead end");
        }
        Ok(graph)
    }
}

impl Default for LaneGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
