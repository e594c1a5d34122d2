//! Integration tests for nd-sim.

use nd_agent::DwarfStore;
use nd_behavior::{BehaviorTree, Destination, LeafKind, NodeSpec, NodeStatus, TreeDef};
use nd_core::{AgentId, BuildingId, SimConfig, Tick, Vec2};
use nd_spatial::{CostClass, CostMap, MapLayout};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, TickStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        total_ticks,
        seed: 42,
        output_interval_ticks: 10,
        ..SimConfig::default()
    }
}

fn layout() -> MapLayout {
    MapLayout::orthogonal(32.0, 32.0)
}

fn cell(row: usize, col: usize) -> Vec2 {
    layout().cell_center(row, col)
}

fn open_map(rows: usize, cols: usize) -> CostMap {
    CostMap::new(rows, cols, CostClass::Normal)
}

fn leaf(kind: LeafKind) -> NodeSpec {
    NodeSpec::leaf(kind)
}

fn wander_tree() -> TreeDef {
    TreeDef::from_spec(&NodeSpec::repeater(
        0,
        NodeSpec::sequence(vec![
            leaf(LeafKind::FindPathTo(Destination::Random)),
            leaf(LeafKind::WaitForPath),
            leaf(LeafKind::MoveTo),
        ]),
    ))
    .unwrap()
}

fn go_home_tree() -> TreeDef {
    TreeDef::from_spec(&NodeSpec::sequence(vec![
        leaf(LeafKind::SetDwelling),
        leaf(LeafKind::FindPathTo(Destination::Dwelling)),
        leaf(LeafKind::WaitForPath),
        leaf(LeafKind::MoveTo),
        leaf(LeafKind::EnterDwelling),
    ]))
    .unwrap()
}

#[derive(Default)]
struct Recorder {
    starts: u64,
    ends: u64,
    snapshots: Vec<Tick>,
    completed: usize,
    finished: Option<Tick>,
    positions: Vec<Vec<Vec2>>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }

    fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
        self.ends += 1;
        self.completed += stats.behavior.completed;
    }

    fn on_snapshot(&mut self, tick: Tick, dwarves: &DwarfStore, _behavior: &BehaviorTree) {
        self.snapshots.push(tick);
        self.positions.push(dwarves.position.clone());
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        assert!(self.finished.is_none(), "on_sim_end called twice");
        self.finished = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_dwarves_and_buildings() {
        let sim = SimBuilder::from_cost_map(test_config(10), &open_map(4, 4), layout(), wander_tree())
            .dwelling(cell(0, 0), 2)
            .working_place(cell(3, 3), 1, true, 7)
            .dwarves_at([cell(1, 1), cell(2, 2)])
            .build()
            .unwrap();
        assert_eq!(sim.manager.dwarves.live_count(), 2);
        assert_eq!(sim.behavior.len(), 2);
        assert_eq!(sim.manager.buildings.len(), 2);
        assert_eq!(sim.manager.buildings.get(BuildingId(1)).unwrap().stock, 7);
        assert_eq!(sim.now(), Tick(0));
    }

    #[test]
    fn invalid_config_errors() {
        let mut cfg = test_config(10);
        cfg.fixed_dt_secs = 0.0;
        let result = SimBuilder::from_cost_map(cfg, &open_map(2, 2), layout(), wander_tree()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn task_with_unknown_building_errors() {
        let result = SimBuilder::from_cost_map(test_config(10), &open_map(2, 2), layout(), wander_tree())
            .dwelling(cell(0, 0), 1)
            .inventory_task(BuildingId(0), BuildingId(3), 1)
            .build();
        assert!(matches!(result, Err(SimError::Colony(_))));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn run_calls_every_hook() {
        let mut sim = SimBuilder::from_cost_map(test_config(25), &open_map(3, 3), layout(), wander_tree())
            .dwarves_at([cell(0, 0)])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.starts, 25);
        assert_eq!(rec.ends, 25);
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(10), Tick(20)]);
        assert_eq!(rec.finished, Some(Tick(25)));
        assert_eq!(sim.now(), Tick(25));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let mut cfg = test_config(5);
        cfg.output_interval_ticks = 0;
        let mut sim = SimBuilder::from_cost_map(cfg, &open_map(2, 2), layout(), wander_tree())
            .dwarves_at([cell(0, 0)])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.snapshots.is_empty());
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = SimBuilder::from_cost_map(test_config(3), &open_map(2, 2), layout(), wander_tree())
            .build()
            .unwrap();
        sim.run_ticks(7, &mut NoopObserver).unwrap();
        assert_eq!(sim.now(), Tick(7));
    }

    #[test]
    fn dwarves_go_home() {
        let mut sim = SimBuilder::from_cost_map(test_config(600), &open_map(6, 6), layout(), go_home_tree())
            .dwelling(cell(5, 5), 2)
            .dwarves_at([cell(0, 0), cell(0, 5), cell(5, 0)])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let home = BuildingId(0);
        let housed: Vec<AgentId> = (0..3u32)
            .map(AgentId)
            .filter(|&a| sim.manager.dwarves.inside[a.index()] == home)
            .collect();
        assert_eq!(housed, vec![AgentId(0), AgentId(1)]);
        assert_eq!(sim.behavior.last_result(AgentId(0)), Some(NodeStatus::Success));
        // The third dwarf finds no free dwelling and fails every pass.
        assert_eq!(sim.behavior.last_result(AgentId(2)), Some(NodeStatus::Fail));
        assert_eq!(sim.manager.buildings.get(home).unwrap().occupants, 2);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = || {
            let mut sim = SimBuilder::from_cost_map(test_config(200), &open_map(5, 5), layout(), wander_tree())
                .dwarves_at([cell(0, 0), cell(4, 4), cell(2, 2)])
                .build()
                .unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec).unwrap();
            rec.positions
        };
        let a = run();
        assert_eq!(a, run());
        assert_ne!(a.first(), a.last(), "dwarves never moved");
    }

    #[test]
    fn spawned_dwarf_starts_at_root() {
        let mut sim = SimBuilder::from_cost_map(test_config(100), &open_map(4, 4), layout(), wander_tree())
            .dwarves_at([cell(0, 0), cell(1, 1)])
            .build()
            .unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        sim.destroy_dwarf(AgentId(1)).unwrap();
        assert!(sim.destroy_dwarf(AgentId(1)).is_err());

        let again = sim.spawn_dwarf(cell(3, 3));
        assert_eq!(again, AgentId(1));
        assert_eq!(sim.behavior.current_node(again), Some(sim.behavior.tree().root()));
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert!(sim.manager.dwarves.is_live(again));
    }
}
