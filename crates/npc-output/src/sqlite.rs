//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `traffic.db` file in the configured output directory with
//! two tables: `vehicle_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `traffic.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("traffic.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS vehicle_snapshots (
                 tick           INTEGER NOT NULL,
                 slot           INTEGER NOT NULL,
                 generation     INTEGER NOT NULL,
                 lane           INTEGER NOT NULL,
                 waypoint_index INTEGER NOT NULL,
                 x              REAL    NOT NULL,
                 y              REAL    NOT NULL,
                 z              REAL    NOT NULL,
                 yaw            REAL    NOT NULL,
                 speed          REAL    NOT NULL,
                 speed_mode     TEXT    NOT NULL,
                 yield_phase    TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick          INTEGER PRIMARY KEY,
                 elapsed_secs  REAL    NOT NULL,
                 live          INTEGER NOT NULL,
                 spawned       INTEGER NOT NULL,
                 despawned     INTEGER NOT NULL,
                 faults        INTEGER NOT NULL,
                 spawn_blocked INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicle_snapshots \
                 (tick, slot, generation, lane, waypoint_index, x, y, z, yaw, speed, \
                  speed_mode, yield_phase) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.slot,
                    row.generation,
                    row.lane,
                    row.waypoint_index,
                    row.x as f64,
                    row.y as f64,
                    row.z as f64,
                    row.yaw as f64,
                    row.speed as f64,
                    row.speed_mode,
                    row.yield_phase,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_secs, live, spawned, despawned, faults, spawn_blocked) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick as i64,
                row.elapsed_secs,
                row.live as i64,
                row.spawned as i64,
                row.despawned as i64,
                row.faults as i64,
                row.spawn_blocked,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
