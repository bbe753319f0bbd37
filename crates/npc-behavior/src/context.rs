//! Read-only state shared by every pipeline call within one tick.

use npc_core::{LaneSelection, Tick};
use npc_lane::LaneGraph;

use crate::{NoTrafficLight, NoYielding, TrafficSignal, TrafficSnapshot, YieldPhaseSource};

/// Everything the pipeline may read besides the vehicle it is updating.
///
/// Built once per tick by `npc-sim` and shared immutably across all vehicle
/// updates, sequential or parallel.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    pub tick: Tick,
    /// Seconds simulated by this tick.
    pub dt: f32,
    pub graph: &'a LaneGraph,
    pub snapshot: &'a TrafficSnapshot,
    /// Next-lane choice policy.
    pub lane_selection: LaneSelection,
    pub signal: &'a dyn TrafficSignal,
    pub yielding: &'a dyn YieldPhaseSource,
}

impl<'a> TickContext<'a> {
    /// Context with random lane selection, no traffic lights and no yielding.
    pub fn new(tick: Tick, dt: f32, graph: &'a LaneGraph, snapshot: &'a TrafficSnapshot) -> Self {
        Self {
            tick,
            dt,
            graph,
            snapshot,
            lane_selection: LaneSelection::Random,
            signal: &NoTrafficLight,
            yielding: &NoYielding,
        }
    }

    pub fn with_lane_selection(mut self, selection: LaneSelection) -> Self {
        self.lane_selection = selection;
        self
    }

    pub fn with_signal(mut self, signal: &'a dyn TrafficSignal) -> Self {
        self.signal = signal;
        self
    }

    pub fn with_yielding(mut self, yielding: &'a dyn YieldPhaseSource) -> Self {
        self.yielding = yielding;
        self
    }
}
