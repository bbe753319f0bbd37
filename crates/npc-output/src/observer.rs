//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use npc_agent::VehicleStore;
use npc_core::Tick;
use npc_sim::{SimObserver, TickStats};

use crate::row::{TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes vehicle snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// `SimObserver` methods return nothing, so writer errors are stored and
/// must be checked with [`take_error`][Self::take_error] after the run.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:       W,
    elapsed_secs: f64,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, elapsed_secs: 0.0, last_error: None }
    }

    /// Take the stored write error, if any.  Only the first error is kept.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.elapsed_secs += stats.dt_secs as f64;
        let row = TickSummaryRow {
            tick:          tick.0,
            elapsed_secs:  self.elapsed_secs,
            live:          stats.live as u64,
            spawned:       stats.spawned as u64,
            despawned:     stats.despawned as u64,
            faults:        stats.faults as u64,
            spawn_blocked: stats.spawn_blocked,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, vehicles: &VehicleStore) {
        let rows: Vec<VehicleSnapshotRow> = vehicles
            .iter()
            .map(|(id, agent)| VehicleSnapshotRow::new(tick, id, agent))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
