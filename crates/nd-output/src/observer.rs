//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use nd_agent::DwarfStore;
use nd_behavior::BehaviorTree;
use nd_core::{SimConfig, Tick};
use nd_sim::{SimObserver, TickStats};

use crate::row::{DwarfSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes dwarf snapshots and tick summaries to any
/// [`OutputWriter`].
///
/// `SimObserver` methods return nothing, so the first write error is kept
/// and later writes are still attempted.  Check
/// [`take_error`][Self::take_error] after `sim.run()` returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    fixed_dt_secs: f32,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            fixed_dt_secs: config.fixed_dt_secs,
            last_error:    None,
        }
    }

    /// Take the stored write error, if any.
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
        let row = TickSummaryRow {
            tick:         tick.0,
            elapsed_secs: tick.0 as f64 * self.fixed_dt_secs as f64,
            stepped:      stats.behavior.stepped as u64,
            sleeping:     stats.behavior.sleeping as u64,
            completed:    stats.behavior.completed as u64,
            paths_served: stats.colony.paths_served as u64,
            moved:        stats.colony.moved as u64,
            arrived:      stats.colony.arrived as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, dwarves: &DwarfStore, behavior: &BehaviorTree) {
        let rows: Vec<DwarfSnapshotRow> = dwarves
            .live_ids()
            .map(|a| {
                let i = a.index();
                DwarfSnapshotRow {
                    dwarf_id:       a.0,
                    tick:           tick.0,
                    x:              dwarves.position[i].x,
                    y:              dwarves.position[i].y,
                    path_state:     dwarves.path_state[i],
                    waypoints_left: dwarves.path[i].len() as u32,
                    bt_node:        behavior.current_node(a).map_or(u32::MAX, |n| n.0),
                    sleeping:       behavior.is_sleeping(a),
                    inside:         dwarves.inside[i].0,
                    carried:        dwarves.carried[i],
                }
            })
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
