//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `dwarf_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{DwarfSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub const SNAPSHOT_HEADER: [&str; 10] = [
    "dwarf_id", "tick", "x", "y", "path_state", "waypoints_left", "bt_node", "sleeping", "inside", "carried",
];

pub const SUMMARY_HEADER: [&str; 8] = [
    "tick", "elapsed_secs", "stepped", "sleeping", "completed", "paths_served", "moved", "arrived",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (truncating) the two CSV files in `dir` and write the headers.
    /// `dir` is created if missing.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("dwarf_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[DwarfSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.dwarf_id.to_string(),
                row.tick.to_string(),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                row.path_state.to_string(),
                row.waypoints_left.to_string(),
                row.bt_node.to_string(),
                (row.sleeping as u8).to_string(),
                row.inside.to_string(),
                row.carried.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.4}", row.elapsed_secs),
            row.stepped.to_string(),
            row.sleeping.to_string(),
            row.completed.to_string(),
            row.paths_served.to_string(),
            row.moved.to_string(),
            row.arrived.to_string(),
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
