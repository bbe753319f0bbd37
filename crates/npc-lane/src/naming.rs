//! Lane ids from authored lane names.
//!
//! Authoring tools name lane objects `<prefix>.<integer>`, for example
//! `TrafficLane.214`.  The integer suffix is the lane id.

use npc_core::LaneId;

/// Extract the lane id from a `<prefix>.<integer>` name.
///
/// Returns `None` if there is no `.` or the part after the first `.` is not
/// an unsigned integer.
pub fn parse_lane_id(name: &str) -> Option<LaneId> {
    let (_, rest) = name.split_once('.')?;
    let digits = rest.split('.').next()?;
    digits.trim().parse::<u32>().ok().map(LaneId)
}
