//! Tests for nd-output.

#[cfg(test)]
mod csv_tests {
    use nd_agent::PathState;
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::{DwarfSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(dwarf_id: u32, tick: u64) -> DwarfSnapshotRow {
        DwarfSnapshotRow {
            dwarf_id,
            tick,
            x:              dwarf_id as f32 * 32.0 + 16.0,
            y:              16.0,
            path_state:     PathState::Ready,
            waypoints_left: 3,
            bt_node:        2,
            sleeping:       false,
            inside:         u32::MAX,
            carried:        0,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            elapsed_secs: tick as f64 * 0.5,
            stepped:      4,
            sleeping:     1,
            completed:    0,
            paths_served: 2,
            moved:        3,
            arrived:      1,
        }
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("dwarf_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("run").join("1");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(headers(&dir, "dwarf_snapshots.csv"), SNAPSHOT_HEADER);
        assert_eq!(headers(&dir, "tick_summaries.csv"), SUMMARY_HEADER);
    }

    #[test]
    fn snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("dwarf_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][2], "48.00");
        assert_eq!(&rows[0][4], "ready");
        assert_eq!(&rows[0][7], "0");
        assert_eq!(&rows[0][8], "4294967295");
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "1.5000");
        assert_eq!(&rows[0][5], "2");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use nd_behavior::{Destination, LeafKind, NodeSpec, TreeDef};
    use nd_core::SimConfig;
    use nd_sim::SimBuilder;
    use nd_spatial::{CostClass, CostMap, MapLayout};

    use crate::{CsvWriter, SimOutputObserver};

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            total_ticks:           6,
            seed:                  1,
            output_interval_ticks: 2,
            ..SimConfig::default()
        };
        let layout = MapLayout::orthogonal(32.0, 32.0);
        let tree = TreeDef::from_spec(&NodeSpec::sequence(vec![
            NodeSpec::leaf(LeafKind::FindPathTo(Destination::Random)),
            NodeSpec::leaf(LeafKind::WaitForPath),
            NodeSpec::leaf(LeafKind::MoveTo),
        ]))
        .unwrap();
        let mut sim = SimBuilder::from_cost_map(config.clone(), &CostMap::new(3, 3, CostClass::Normal), layout, tree)
            .dwarves_at((0..3).map(|i| layout.cell_center(i, i)))
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Snapshots at ticks 0, 2, 4 for 3 dwarves.
        let mut rdr = csv::Reader::from_path(dir.path().join("dwarf_snapshots.csv")).unwrap();
        assert_eq!(rdr.records().count(), 9);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6);
    }
}
