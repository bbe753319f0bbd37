//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

const SNAPSHOT_HEADER: [&str; 12] = [
    "tick", "slot", "generation", "lane", "waypoint_index", "x", "y", "z", "yaw", "speed",
    "speed_mode", "yield_phase",
];

const SUMMARY_HEADER: [&str; 7] =
    ["tick", "elapsed_secs", "live", "spawned", "despawned", "faults", "spawn_blocked"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.slot.to_string(),
                row.generation.to_string(),
                row.lane.to_string(),
                row.waypoint_index.to_string(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                format!("{:.3}", row.z),
                format!("{:.2}", row.yaw),
                format!("{:.3}", row.speed),
                row.speed_mode.to_owned(),
                row.yield_phase.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.4}", row.elapsed_secs),
            row.live.to_string(),
            row.spawned.to_string(),
            row.despawned.to_string(),
            row.faults.to_string(),
            (row.spawn_blocked as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
