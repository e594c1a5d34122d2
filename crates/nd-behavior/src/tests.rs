//! Unit tests for nd-behavior.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use nd_core::{AgentId, BtNodeId, BuildingId, Vec2};

use crate::{
    BehaviorError, BehaviorTree, BtTickStats, Destination, DwarfWorld, Flow, LeafKind, NodeKind,
    NodeSpec, NodeStatus, NodeType, TreeBuilder, TreeDef, load_tree_str,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// World whose answers are plain fields and which counts every call.
#[derive(Default)]
struct MockWorld {
    live: Vec<bool>,
    calls: RefCell<HashMap<&'static str, u32>>,
    has_job: bool,
    static_job: bool,
    day: bool,
    dwelling: Option<BuildingId>,
    dwelling_pos: Option<Vec2>,
    has_path: bool,
    at_destination: bool,
    stock: u32,
    wake_ups: Vec<AgentId>,
    destinations: Vec<(AgentId, Vec2)>,
}

impl MockWorld {
    fn with_agents(n: usize) -> Self {
        Self { live: vec![true; n], ..Self::default() }
    }

    fn hit(&self, name: &'static str) {
        *self.calls.borrow_mut().entry(name).or_insert(0) += 1;
    }

    fn calls(&self, name: &'static str) -> u32 {
        self.calls.borrow().get(name).copied().unwrap_or(0)
    }
}

impl DwarfWorld for MockWorld {
    fn agent_count(&self) -> usize { self.live.len() }
    fn is_live(&self, agent: AgentId) -> bool { self.live.get(agent.index()).copied().unwrap_or(false) }
    fn drain_wake_ups(&mut self, woken: &mut Vec<AgentId>) { woken.append(&mut self.wake_ups) }

    fn has_path(&self, _: AgentId) -> bool { self.hit("has_path"); self.has_path }
    fn is_at_destination(&self, _: AgentId) -> bool { self.hit("is_at_destination"); self.at_destination }
    fn add_path_following(&mut self, _: AgentId) { self.hit("add_path_following") }
    fn add_find_random_path(&mut self, _: AgentId) -> bool { self.hit("add_find_random_path"); true }
    fn add_find_path_to_destination(&mut self, agent: AgentId, destination: Vec2) {
        self.hit("add_find_path_to_destination");
        self.destinations.push((agent, destination));
    }
    fn add_inventory_task_path_to_giver(&mut self, _: AgentId) -> bool { self.hit("to_giver"); false }
    fn add_inventory_task_path_to_receiver(&mut self, _: AgentId) -> bool { self.hit("to_receiver"); false }

    fn dwelling(&self, _: AgentId) -> Option<BuildingId> { self.hit("dwelling"); self.dwelling }
    fn dwelling_position(&self, _: AgentId) -> Option<Vec2> { self.dwelling_pos }
    fn assign_dwelling(&mut self, _: AgentId) -> bool {
        self.hit("assign_dwelling");
        self.dwelling = Some(BuildingId(0));
        true
    }
    fn enter_dwelling(&mut self, _: AgentId) -> bool { self.hit("enter_dwelling"); true }
    fn exit_dwelling(&mut self, _: AgentId) -> bool { self.hit("exit_dwelling"); true }

    fn has_job(&self, _: AgentId) -> bool { self.hit("has_job"); self.has_job }
    fn has_static_job(&self, _: AgentId) -> bool { self.hit("has_static_job"); self.static_job }
    fn assign_job(&mut self, _: AgentId) -> bool { self.hit("assign_job"); true }
    fn working_place_position(&self, _: AgentId) -> Option<Vec2> { None }
    fn enter_working_place(&mut self, _: AgentId) -> bool { true }
    fn exit_working_place(&mut self, _: AgentId) -> bool { true }

    fn ask_inventory_task(&mut self, _: AgentId) -> bool { false }
    fn take_resources(&mut self, _: AgentId) -> bool {
        self.hit("take_resources");
        if self.stock == 0 {
            return false;
        }
        self.stock -= 1;
        true
    }
    fn put_resources(&mut self, _: AgentId) -> bool { false }

    fn is_day_time(&self) -> bool { self.hit("is_day_time"); self.day }
    fn is_night_time(&self) -> bool { !self.day }
}

fn leaf(kind: LeafKind) -> NodeSpec {
    NodeSpec::leaf(kind)
}

fn engine(spec: NodeSpec) -> BehaviorTree {
    BehaviorTree::new(Arc::new(TreeDef::from_spec(&spec).unwrap()))
}

/// Update until agent 0 completes a pass.  Returns the number of ticks.
fn run_pass(bt: &mut BehaviorTree, world: &mut MockWorld, max_ticks: usize) -> usize {
    for tick in 1..=max_ticks {
        let stats = bt.update(world);
        if stats.completed > 0 {
            return tick;
        }
    }
    panic!("no pass completed in {max_ticks} ticks");
}

// ── Tree building ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tree_tests {
    use super::*;

    #[test]
    fn from_spec_flattens_depth_first() {
        let tree = TreeDef::from_spec(&NodeSpec::sequence(vec![
            NodeSpec::inverter(leaf(LeafKind::HasJob)),
            leaf(LeafKind::IsDayTime),
        ]))
        .unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root(), BtNodeId(0));
        assert_eq!(tree.node(BtNodeId(0)).kind.children(), &[BtNodeId(1), BtNodeId(3)]);
        assert_eq!(tree.node(BtNodeId(2)).parent, BtNodeId(1));
        assert!(!tree.node(BtNodeId(0)).parent.is_valid());
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn slots_are_per_node() {
        let tree = TreeDef::from_spec(&NodeSpec::sequence(vec![
            NodeSpec::selector(vec![leaf(LeafKind::HasJob)]),
            NodeSpec::repeater(2, NodeSpec::repeater(3, leaf(LeafKind::HasJob))),
        ]))
        .unwrap();
        assert_eq!(tree.composite_slots(), 2);
        assert_eq!(tree.repeater_slots(), 2);
        let slots: Vec<u32> = tree
            .nodes()
            .iter()
            .filter_map(|n| match n.kind {
                NodeKind::Repeater { slot, .. } => Some(slot),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![0, 1]);
    }

    #[test]
    fn builder_rejects_second_root() {
        let mut b = TreeBuilder::new();
        b.root(NodeType::Sequence).unwrap();
        assert!(matches!(b.root(NodeType::Selector), Err(BehaviorError::Config(_))));
    }

    #[test]
    fn builder_rejects_leaf_parent() {
        let mut b = TreeBuilder::new();
        let root = b.root(NodeType::Leaf(LeafKind::HasJob)).unwrap();
        assert!(matches!(
            b.child(root, NodeType::Sequence),
            Err(BehaviorError::Malformed { .. })
        ));
    }

    #[test]
    fn builder_rejects_second_decorator_child() {
        let mut b = TreeBuilder::new();
        let root = b.root(NodeType::Inverter).unwrap();
        b.child(root, NodeType::Leaf(LeafKind::HasJob)).unwrap();
        assert!(b.child(root, NodeType::Leaf(LeafKind::HasJob)).is_err());
    }

    #[test]
    fn builder_rejects_missing_parent() {
        let mut b = TreeBuilder::new();
        b.root(NodeType::Sequence).unwrap();
        assert!(b.child(BtNodeId(9), NodeType::Succeeder).is_err());
    }

    #[test]
    fn build_rejects_childless_nodes() {
        assert!(matches!(TreeBuilder::new().build(), Err(BehaviorError::Config(_))));

        let mut b = TreeBuilder::new();
        b.root(NodeType::Selector).unwrap();
        assert!(matches!(b.build(), Err(BehaviorError::Malformed { node: BtNodeId(0), .. })));

        let mut b = TreeBuilder::new();
        let root = b.root(NodeType::Sequence).unwrap();
        b.child(root, NodeType::Repeater { limit: 2 }).unwrap();
        assert!(matches!(b.build(), Err(BehaviorError::Malformed { node: BtNodeId(1), .. })));
    }

    #[test]
    fn node_type_names() {
        assert_eq!(NodeType::Sequence.name(), "SequenceComposite");
        assert_eq!(NodeType::Repeater { limit: 0 }.name(), "RepeaterDecorator");
        assert_eq!(NodeType::Leaf(LeafKind::MoveTo).name(), "MoveToLeaf");
        assert_eq!(
            LeafKind::from_name("FindPathToLeaf", Some(Destination::Dwelling)),
            Some(LeafKind::FindPathTo(Destination::Dwelling))
        );
        assert_eq!(LeafKind::from_name("FindPathToLeaf", None), None);
        assert_eq!(LeafKind::from_name("NopeLeaf", None), None);
        assert_eq!(Destination::from_name("WORKING_PLACE"), Some(Destination::WorkingPlace));
        assert_eq!(Destination::from_code(4), Some(Destination::InventoryTaskReceiver));
    }
}

// ── Composites ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod composite_tests {
    use super::*;

    #[test]
    fn sequence_stops_at_first_fail() {
        let mut bt = engine(NodeSpec::sequence(vec![
            leaf(LeafKind::HasJob),
            leaf(LeafKind::IsDayTime),
            leaf(LeafKind::HasStaticJob),
        ]));
        let mut world = MockWorld { has_job: true, day: true, static_job: false, ..MockWorld::with_agents(1) };

        let ticks = run_pass(&mut bt, &mut world, 20);
        assert_eq!(ticks, 7);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Fail));
        assert_eq!(world.calls("has_job"), 1);
        assert_eq!(world.calls("is_day_time"), 1);
        assert_eq!(world.calls("has_static_job"), 1);
        assert_eq!(bt.current_node(AgentId(0)), Some(BtNodeId(0)));
        assert_eq!(bt.flow(AgentId(0)), Some(Flow::Down));
    }

    #[test]
    fn sequence_succeeds_after_last_child() {
        let mut bt = engine(NodeSpec::sequence(vec![leaf(LeafKind::HasJob), leaf(LeafKind::IsDayTime)]));
        let mut world = MockWorld { has_job: true, day: true, ..MockWorld::with_agents(1) };
        run_pass(&mut bt, &mut world, 20);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
    }

    #[test]
    fn selector_stops_at_first_success() {
        let mut bt = engine(NodeSpec::selector(vec![
            leaf(LeafKind::HasStaticJob),
            leaf(LeafKind::HasJob),
            leaf(LeafKind::AssignJob),
        ]));
        let mut world = MockWorld { has_job: true, static_job: false, ..MockWorld::with_agents(1) };

        run_pass(&mut bt, &mut world, 20);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
        assert_eq!(world.calls("has_static_job"), 1);
        assert_eq!(world.calls("has_job"), 1);
        assert_eq!(world.calls("assign_job"), 0);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let mut bt = engine(NodeSpec::selector(vec![leaf(LeafKind::HasStaticJob), leaf(LeafKind::HasJob)]));
        let mut world = MockWorld::with_agents(1);
        run_pass(&mut bt, &mut world, 20);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Fail));
    }

    #[test]
    fn nested_composites_keep_separate_cursors() {
        // Sequence[Selector[F, S], S]
        let mut bt = engine(NodeSpec::sequence(vec![
            NodeSpec::selector(vec![leaf(LeafKind::HasStaticJob), leaf(LeafKind::HasJob)]),
            leaf(LeafKind::IsDayTime),
        ]));
        let mut world = MockWorld { has_job: true, day: true, ..MockWorld::with_agents(1) };
        run_pass(&mut bt, &mut world, 30);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
        assert_eq!(world.calls("is_day_time"), 1);
    }

    #[test]
    fn agent_restarts_after_pass() {
        let mut bt = engine(NodeSpec::sequence(vec![leaf(LeafKind::HasJob)]));
        let mut world = MockWorld { has_job: true, ..MockWorld::with_agents(1) };
        run_pass(&mut bt, &mut world, 10);
        run_pass(&mut bt, &mut world, 10);
        assert_eq!(world.calls("has_job"), 2);
        assert_eq!(bt.runs(AgentId(0)), 2);
    }
}

// ── Decorators ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod decorator_tests {
    use super::*;

    #[test]
    fn repeater_enters_child_limit_times() {
        let mut bt = engine(NodeSpec::repeater(3, leaf(LeafKind::HasJob)));
        let mut world = MockWorld { has_job: true, ..MockWorld::with_agents(1) };

        run_pass(&mut bt, &mut world, 20);
        assert_eq!(world.calls("has_job"), 3);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
        assert_eq!(bt.states().repeater_counter[0][0], 0);
    }

    #[test]
    fn repeater_counts_failures_too() {
        let mut bt = engine(NodeSpec::repeater(2, leaf(LeafKind::HasJob)));
        let mut world = MockWorld::with_agents(1);
        run_pass(&mut bt, &mut world, 20);
        assert_eq!(world.calls("has_job"), 2);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
    }

    #[test]
    fn unlimited_repeater_never_completes() {
        let mut bt = engine(NodeSpec::repeater(0, leaf(LeafKind::HasJob)));
        let mut world = MockWorld::with_agents(1);
        for _ in 0..50 {
            assert_eq!(bt.update(&mut world).completed, 0);
        }
        assert!(world.calls("has_job") >= 20);
    }

    #[test]
    fn repeat_until_fail_stops_on_fail() {
        let mut bt = engine(NodeSpec::repeat_until_fail(leaf(LeafKind::TakeResources)));
        let mut world = MockWorld { stock: 2, ..MockWorld::with_agents(1) };
        run_pass(&mut bt, &mut world, 30);
        assert_eq!(world.calls("take_resources"), 3);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
    }

    #[test]
    fn inverter_flips() {
        let mut bt = engine(NodeSpec::inverter(leaf(LeafKind::HasJob)));
        let mut world = MockWorld { has_job: true, ..MockWorld::with_agents(1) };
        run_pass(&mut bt, &mut world, 10);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Fail));
    }

    #[test]
    fn succeeder_always_succeeds() {
        let mut bt = engine(NodeSpec::succeeder(leaf(LeafKind::HasJob)));
        let mut world = MockWorld::with_agents(1);
        run_pass(&mut bt, &mut world, 10);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
    }
}

// ── Leaves and engine ─────────────────────────────────────────────────────────

#[cfg(test)]
mod engine_tests {
    use super::*;

    #[test]
    fn waiting_leaf_stays_running() {
        let mut bt = engine(NodeSpec::sequence(vec![leaf(LeafKind::WaitDayTime)]));
        let mut world = MockWorld { day: false, ..MockWorld::with_agents(1) };
        for _ in 0..5 {
            assert_eq!(bt.update(&mut world).completed, 0);
        }
        assert_eq!(bt.current_node(AgentId(0)), Some(BtNodeId(1)));
        assert_eq!(bt.status(AgentId(0)), Some(NodeStatus::Running));

        world.day = true;
        let ticks = run_pass(&mut bt, &mut world, 5);
        assert_eq!(ticks, 2);
    }

    #[test]
    fn wait_for_path_sleeps_until_woken() {
        let mut bt = engine(NodeSpec::sequence(vec![
            leaf(LeafKind::FindPathTo(Destination::Random)),
            leaf(LeafKind::WaitForPath),
            leaf(LeafKind::MoveTo),
        ]));
        let mut world = MockWorld::with_agents(1);
        let a = AgentId(0);

        for _ in 0..4 {
            bt.update(&mut world);
        }
        assert!(bt.is_sleeping(a));
        assert_eq!(world.calls("add_find_random_path"), 1);

        let stats = bt.update(&mut world);
        assert_eq!(stats, BtTickStats { stepped: 0, sleeping: 1, completed: 0 });
        assert_eq!(world.calls("has_path"), 1);

        world.has_path = true;
        world.wake_ups.push(a);
        bt.update(&mut world);
        assert!(!bt.is_sleeping(a));

        bt.update(&mut world); // into MoveTo
        bt.update(&mut world); // walking
        assert_eq!(world.calls("add_path_following"), 1);

        world.at_destination = true;
        run_pass(&mut bt, &mut world, 5);
        assert_eq!(bt.last_result(a), Some(NodeStatus::Success));
    }

    #[test]
    fn find_path_to_known_and_unknown_destinations() {
        let mut bt = engine(NodeSpec::selector(vec![
            leaf(LeafKind::FindPathTo(Destination::Dwelling)),
            leaf(LeafKind::FindPathTo(Destination::InventoryTaskGiver)),
        ]));
        let mut world = MockWorld::with_agents(1);
        run_pass(&mut bt, &mut world, 10);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Fail));
        assert_eq!(world.calls("to_giver"), 1);

        world.dwelling_pos = Some(Vec2::new(3.0, 4.0));
        run_pass(&mut bt, &mut world, 10);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
        assert_eq!(world.destinations, vec![(AgentId(0), Vec2::new(3.0, 4.0))]);
    }

    #[test]
    fn set_dwelling_then_has_dwelling() {
        let mut bt = engine(NodeSpec::sequence(vec![
            leaf(LeafKind::SetDwelling),
            leaf(LeafKind::HasDwelling),
        ]));
        let mut world = MockWorld::with_agents(1);
        run_pass(&mut bt, &mut world, 10);
        assert_eq!(bt.last_result(AgentId(0)), Some(NodeStatus::Success));
        assert_eq!(world.calls("assign_dwelling"), 1);
    }

    #[test]
    fn dead_agents_are_skipped() {
        let mut bt = engine(NodeSpec::sequence(vec![leaf(LeafKind::HasJob)]));
        let mut world = MockWorld { live: vec![true, false, true], ..MockWorld::default() };
        let stats = bt.update(&mut world);
        assert_eq!(bt.len(), 3);
        assert_eq!(stats.stepped, 2);
        assert_eq!(bt.current_node(AgentId(1)), Some(BtNodeId(0)));
        assert_eq!(bt.current_node(AgentId(2)), Some(BtNodeId(1)));
    }

    #[test]
    fn agents_step_independently() {
        let mut bt = engine(NodeSpec::sequence(vec![leaf(LeafKind::HasJob), leaf(LeafKind::HasJob)]));
        let mut world = MockWorld { has_job: true, ..MockWorld::with_agents(1) };
        bt.update(&mut world);
        bt.update(&mut world);
        world.live.push(true);
        bt.update(&mut world);
        assert_eq!(bt.current_node(AgentId(0)), Some(BtNodeId(2)));
        assert_eq!(bt.current_node(AgentId(1)), Some(BtNodeId(1)));
    }

    #[test]
    fn reset_agent_returns_to_root() {
        let mut bt = engine(NodeSpec::repeater(5, leaf(LeafKind::HasJob)));
        let mut world = MockWorld::with_agents(1);
        for _ in 0..4 {
            bt.update(&mut world);
        }
        assert_ne!(bt.states().repeater_counter[0][0], 0);
        bt.sleep(AgentId(0));
        bt.reset_agent(AgentId(0));
        assert_eq!(bt.current_node(AgentId(0)), Some(BtNodeId(0)));
        assert_eq!(bt.flow(AgentId(0)), Some(Flow::Down));
        assert_eq!(bt.states().repeater_counter[0][0], 0);
        assert!(!bt.is_sleeping(AgentId(0)));
        assert_eq!(bt.last_result(AgentId(0)), None);
    }

    #[test]
    fn set_tree_restarts_everyone() {
        let mut bt = engine(NodeSpec::sequence(vec![leaf(LeafKind::HasJob)]));
        let mut world = MockWorld::with_agents(2);
        bt.update(&mut world);
        bt.set_tree(Arc::new(
            TreeDef::from_spec(&NodeSpec::repeater(2, NodeSpec::selector(vec![leaf(LeafKind::HasJob)]))).unwrap(),
        ));
        assert_eq!(bt.len(), 2);
        assert_eq!(bt.states().active_child.len(), 1);
        assert_eq!(bt.states().repeater_counter.len(), 1);
        assert_eq!(bt.current_node(AgentId(1)), Some(BtNodeId(0)));
        run_pass(&mut bt, &mut world, 20);
    }

    #[test]
    fn out_of_range_queries_are_none() {
        let bt = engine(leaf(LeafKind::HasJob));
        assert_eq!(bt.current_node(AgentId(5)), None);
        assert_eq!(bt.last_result(AgentId(5)), None);
        assert!(!bt.is_sleeping(AgentId(5)));
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Write;

    use super::*;
    use crate::load_tree_json;

    const WANDER: &str = r#"{ "rootNode": [
        { "type": 4, "name": "RepeaterDecorator", "childs": [
            { "type": 2, "name": "SequenceComposite", "childs": [
                { "type": 1, "name": "FindPathToLeaf", "destination": "Random" },
                { "type": 1, "name": "WaitForPathLeaf" },
                { "type": 1, "name": "MoveToLeaf" }
            ] }
        ] }
    ] }"#;

    #[test]
    fn loads_nested_tree() {
        let tree = load_tree_str(WANDER).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.node(tree.root()).kind.node_type(), NodeType::Repeater { limit: 0 });
        assert_eq!(
            tree.node(BtNodeId(2)).kind,
            NodeKind::Leaf(LeafKind::FindPathTo(Destination::Random))
        );
    }

    #[test]
    fn accepts_names_codes_and_children_alias() {
        let json = r#"{ "rootNode": [
            { "type": "composite", "name": "SelectorComposite", "children": [
                { "name": "FindPathToLeaf", "destination": 1 },
                { "type": "Decorator", "name": "RepeaterDecorator", "limit": 4,
                  "childs": [ { "name": "HasJobLeaf" } ] }
            ] } ] }"#;
        let tree = load_tree_str(json).unwrap();
        assert_eq!(tree.node(BtNodeId(1)).kind, NodeKind::Leaf(LeafKind::FindPathTo(Destination::Dwelling)));
        assert_eq!(tree.node(BtNodeId(2)).kind.node_type(), NodeType::Repeater { limit: 4 });
    }

    #[test]
    fn empty_root_is_rejected() {
        assert!(matches!(load_tree_str(r#"{ "rootNode": [] }"#), Err(BehaviorError::Config(_))));
    }

    #[test]
    fn bad_json_is_rejected() {
        assert!(matches!(load_tree_str("{ rootNode"), Err(BehaviorError::Json(_))));
        assert!(matches!(load_tree_str(r#"{ "nodes": [] }"#), Err(BehaviorError::Json(_))));
    }

    #[test]
    fn unknown_name_reports_path() {
        let json = r#"{ "rootNode": [ { "name": "SequenceComposite", "childs": [
            { "name": "HasJobLeaf" }, { "name": "DanceLeaf" } ] } ] }"#;
        match load_tree_str(json) {
            Err(BehaviorError::UnknownNode { name, at, .. }) => {
                assert_eq!(name, "DanceLeaf");
                assert_eq!(at, "rootNode[0].childs[1]");
            }
            other => panic!("expected UnknownNode, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_are_reported() {
        let json = r#"{ "rootNode": [ { "type": 1 } ] }"#;
        assert!(matches!(load_tree_str(json), Err(BehaviorError::MissingField { field: "name", .. })));

        let json = r#"{ "rootNode": [ { "name": "FindPathToLeaf" } ] }"#;
        assert!(matches!(
            load_tree_str(json),
            Err(BehaviorError::MissingField { field: "destination", .. })
        ));
    }

    #[test]
    fn group_mismatch_is_rejected() {
        let json = r#"{ "rootNode": [ { "type": 2, "name": "HasJobLeaf" } ] }"#;
        assert!(matches!(load_tree_str(json), Err(BehaviorError::UnknownNode { group: "composite", .. })));
        let json = r#"{ "rootNode": [ { "type": 3, "name": "HasJobLeaf" } ] }"#;
        assert!(matches!(load_tree_str(json), Err(BehaviorError::Config(_))));
    }

    #[test]
    fn shape_errors_are_rejected() {
        let two = r#"{ "rootNode": [ { "name": "InverterDecorator", "childs": [
            { "name": "HasJobLeaf" }, { "name": "HasJobLeaf" } ] } ] }"#;
        assert!(matches!(load_tree_str(two), Err(BehaviorError::Config(_))));

        let none = r#"{ "rootNode": [ { "name": "SequenceComposite" } ] }"#;
        assert!(matches!(load_tree_str(none), Err(BehaviorError::Malformed { .. })));

        let leafy = r#"{ "rootNode": [ { "name": "HasJobLeaf", "childs": [ { "name": "HasJobLeaf" } ] } ] }"#;
        assert!(matches!(load_tree_str(leafy), Err(BehaviorError::Config(_))));
    }

    #[test]
    fn extra_roots_are_ignored() {
        let json = r#"{ "rootNode": [ { "name": "HasJobLeaf" }, { "name": "MoveToLeaf" } ] }"#;
        let tree = load_tree_str(json).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).kind, NodeKind::Leaf(LeafKind::HasJob));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WANDER.as_bytes()).unwrap();
        let tree = load_tree_json(file.path()).unwrap();
        assert_eq!(tree.len(), 5);

        let missing = file.path().with_extension("missing");
        assert!(matches!(load_tree_json(&missing), Err(BehaviorError::Io(_))));
    }
}
