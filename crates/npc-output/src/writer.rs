//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write a batch of vehicle snapshots.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
