//! Integration tests for npc-output.

use crate::row::{TickSummaryRow, VehicleSnapshotRow};

fn snap_row(slot: u32, tick: u64) -> VehicleSnapshotRow {
    VehicleSnapshotRow {
        tick,
        slot,
        generation:     0,
        lane:           slot + 10,
        waypoint_index: 1,
        x:              slot as f32,
        y:              0.0,
        z:              2.5,
        yaw:            90.0,
        speed:          4.25,
        speed_mode:     "normal",
        yield_phase:    "none",
    }
}

fn summary_row(tick: u64) -> TickSummaryRow {
    TickSummaryRow {
        tick,
        elapsed_secs:  tick as f64 * 0.5,
        live:          3,
        spawned:       1,
        despawned:     0,
        faults:        0,
        spawn_blocked: true,
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::{snap_row, summary_row};
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("vehicle_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[..4], ["tick", "slot", "generation", "lane"]);
        assert_eq!(headers.last().map(String::as_str), Some("yield_phase"));

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            ["tick", "elapsed_secs", "live", "spawned", "despawned", "faults", "spawn_blocked"]
        );
    }

    #[test]
    fn csv_snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "5");      // tick
        assert_eq!(&rows[1][1], "1");      // slot
        assert_eq!(&rows[2][3], "12");     // lane
        assert_eq!(&rows[0][7], "2.500");  // z
        assert_eq!(&rows[0][10], "normal");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "1.5000");
        assert_eq!(&rows[0][6], "1"); // spawn_blocked
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_directory_is_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use glam::Vec3;
    use tempfile::TempDir;

    use npc_agent::{VehicleBounds, VehicleConfig};
    use npc_core::{LaneId, LaneSelection, SimConfig};
    use npc_lane::LaneGraphBuilder;
    use npc_population::{SpawnerConfig, VehicleProfile};
    use npc_sim::SimBuilder;

    use crate::{
        CsvWriter, OutputError, OutputResult, OutputWriter, SimOutputObserver, TickSummaryRow,
        VehicleSnapshotRow,
    };

    fn sim(total_ticks: u64, interval: u64) -> npc_sim::TrafficSim {
        let mut b = LaneGraphBuilder::new();
        b.add_lane(LaneId(1), vec![Vec3::ZERO, Vec3::new(40.0, 0.0, 0.0)], 10.0);
        let config = SimConfig {
            dt_secs:               0.1,
            total_ticks,
            seed:                  1,
            num_threads:           Some(1),
            output_interval_ticks: interval,
            lane_selection:        LaneSelection::First,
        };
        let spawner = SpawnerConfig {
            target_population: 1,
            lanes: vec![LaneId(1)],
            profiles: vec![VehicleProfile::new(
                "car",
                VehicleConfig::default(),
                VehicleBounds::default(),
            )],
            ..SpawnerConfig::default()
        };
        SimBuilder::new(config, b.build().unwrap()).spawner(spawner).build().unwrap()
    }

    #[test]
    fn integration_csv() {
        let mut sim = sim(6, 2);
        let dir = TempDir::new().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Snapshots at ticks 0, 2 and 4, one vehicle each.
        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[2][0], "4");
        assert_eq!(&rows[0][3], "1");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][3], "1", "spawned on the first tick");
        assert_eq!(&rows[5][1], "0.6000");
    }

    /// Fails every call with a numbered error.
    #[derive(Default)]
    struct Failing {
        calls: usize,
    }

    impl Failing {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(std::io::Error::other(format!("failure {}", self.calls)).into())
        }
    }

    impl OutputWriter for Failing {
        fn write_snapshots(&mut self, _rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
            self.fail()
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.fail()
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.fail()
        }
    }

    #[test]
    fn first_error_kept() {
        let mut sim = sim(3, 1);
        let mut obs = SimOutputObserver::new(Failing::default());
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().unwrap();
        assert!(matches!(&err, OutputError::Io(e) if e.to_string() == "failure 1"));
        assert!(obs.take_error().is_none());
        assert!(obs.into_writer().calls > 1);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::{snap_row, summary_row};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("traffic.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1), snap_row(1, 1), snap_row(2, 1)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("traffic.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM vehicle_snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);

        let mode: String = conn
            .query_row("SELECT speed_mode FROM vehicle_snapshots WHERE slot = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(mode, "normal");
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("traffic.db")).unwrap();
        let (elapsed, live, blocked): (f64, i64, i64) = conn
            .query_row(
                "SELECT elapsed_secs, live, spawn_blocked FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(elapsed, 3.5);
        assert_eq!(live, 3);
        assert_eq!(blocked, 1);
    }
}
