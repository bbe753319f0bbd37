//! Synthetic town lane graph.
//!
//! A one-way ring road around a 100 m block (+z is north):
//!
//! | Lanes        | Role                                          |
//! |--------------|-----------------------------------------------|
//! | 1, 3, 5, 7   | East, north, west and south ring streets      |
//! | 2, 4, 6, 8   | Corner lanes joining consecutive streets      |
//! | 9            | North exit leaving the end of street 3        |
//! | 10           | West exit leaving the end of street 5         |
//!
//! Both exits are dead ends, so vehicles that take them despawn and the
//! spawner replaces them.

use glam::Vec3;

use npc_core::LaneId;
use npc_lane::{LaneGraph, LaneGraphBuilder, LaneResult, TurnDirection};

const STREET_LIMIT: f32 = 13.9;
const CORNER_LIMIT: f32 = 6.0;

/// Lanes the spawner may use: the two long ring straights.
pub const SPAWN_LANES: [LaneId; 2] = [LaneId(1), LaneId(5)];

fn p(x: f32, z: f32) -> Vec3 {
    Vec3::new(x, 0.0, z)
}

fn street(b: &mut LaneGraphBuilder, id: u32, from: Vec3, to: Vec3) {
    b.add_lane(LaneId(id), vec![from, from.lerp(to, 0.5), to], STREET_LIMIT);
}

fn corner(b: &mut LaneGraphBuilder, id: u32, from: Vec3, via: Vec3, to: Vec3) {
    let lane = b.add_lane(LaneId(id), vec![from, via, to], CORNER_LIMIT);
    lane.turn_direction = TurnDirection::Left;
    lane.intersection = true;
}

/// Build the ring-road town.
pub fn build_town() -> LaneResult<LaneGraph> {
    let mut b = LaneGraphBuilder::with_capacity(10);

    street(&mut b, 1, p(5.0, 0.0), p(95.0, 0.0));
    corner(&mut b, 2, p(95.0, 0.0), p(98.5, 1.5), p(100.0, 5.0));
    street(&mut b, 3, p(100.0, 5.0), p(100.0, 95.0));
    corner(&mut b, 4, p(100.0, 95.0), p(98.5, 98.5), p(95.0, 100.0));
    street(&mut b, 5, p(95.0, 100.0), p(5.0, 100.0));
    corner(&mut b, 6, p(5.0, 100.0), p(1.5, 98.5), p(0.0, 95.0));
    street(&mut b, 7, p(0.0, 95.0), p(0.0, 5.0));
    corner(&mut b, 8, p(0.0, 5.0), p(1.5, 1.5), p(5.0, 0.0));

    // Exits leave the ring and end.
    street(&mut b, 9, p(100.0, 95.0), p(100.0, 160.0));
    street(&mut b, 10, p(5.0, 100.0), p(-60.0, 100.0));

    for (from, to) in [(1, 2), (2, 3), (3, 4), (3, 9), (4, 5), (5, 6), (5, 10), (6, 7), (7, 8), (8, 1)] {
        b.connect(LaneId(from), LaneId(to));
    }
    b.build()
}
