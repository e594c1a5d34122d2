//! The interpreter: one tree transition per live, awake agent per tick.

use std::sync::Arc;

use nd_core::{AgentId, BtNodeId};

use crate::leaf::{run_leaf, LeafOutcome};
use crate::node::NodeKind;
use crate::state::AgentStates;
use crate::status::{Flow, NodeStatus};
use crate::tree::TreeDef;
use crate::world::DwarfWorld;

/// Counts from one [`BehaviorTree::update`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BtTickStats {
    /// Agents that made a transition.
    pub stepped: usize,
    /// Live agents skipped because they were asleep.
    pub sleeping: usize,
    /// Agents whose root reported a result this tick.
    pub completed: usize,
}

/// A shared tree plus the interpreter state of every agent.
pub struct BehaviorTree {
    tree: Arc<TreeDef>,
    state: AgentStates,
    woken: Vec<AgentId>,
}

impl BehaviorTree {
    pub fn new(tree: Arc<TreeDef>) -> Self {
        let state = AgentStates::for_tree(&tree);
        Self { tree, state, woken: Vec::new() }
    }

    /// Swap the tree.  Every agent restarts at the new root.
    pub fn set_tree(&mut self, tree: Arc<TreeDef>) {
        self.state.reshape(&tree);
        self.tree = tree;
    }

    #[inline]
    pub fn tree(&self) -> &Arc<TreeDef> {
        &self.tree
    }

    #[inline]
    pub fn states(&self) -> &AgentStates {
        &self.state
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Make room for `count` agents.  Never shrinks.
    pub fn resize(&mut self, count: usize) {
        self.state.grow(count);
    }

    /// Restart one agent at the root with cleared counters.
    pub fn reset_agent(&mut self, agent: AgentId) {
        self.state.reset(agent);
    }

    pub fn sleep(&mut self, agent: AgentId) {
        if let Some(s) = self.state.sleeping.get_mut(agent.index()) {
            *s = true;
        }
    }

    pub fn wake(&mut self, agent: AgentId) {
        if let Some(s) = self.state.sleeping.get_mut(agent.index()) {
            *s = false;
        }
    }

    pub fn is_sleeping(&self, agent: AgentId) -> bool {
        self.state.sleeping.get(agent.index()).copied().unwrap_or(false)
    }

    pub fn current_node(&self, agent: AgentId) -> Option<BtNodeId> {
        self.state.current_node.get(agent.index()).copied()
    }

    pub fn flow(&self, agent: AgentId) -> Option<Flow> {
        self.state.flow.get(agent.index()).copied()
    }

    /// Outcome of the last node the agent finished, or `Running` while it
    /// descends or waits on a leaf.
    pub fn status(&self, agent: AgentId) -> Option<NodeStatus> {
        self.state.previous_status.get(agent.index()).copied()
    }

    /// Result of the agent's last complete pass through the tree.
    pub fn last_result(&self, agent: AgentId) -> Option<NodeStatus> {
        self.state.last_result.get(agent.index()).copied().flatten()
    }

    /// Completed passes since the agent was last reset.
    pub fn runs(&self, agent: AgentId) -> u32 {
        self.state.runs.get(agent.index()).copied().unwrap_or(0)
    }

    /// Wake whoever the world reports, then move every live, awake agent
    /// by one transition in index order.
    pub fn update<W: DwarfWorld + ?Sized>(&mut self, world: &mut W) -> BtTickStats {
        self.resize(world.agent_count());

        let mut woken = std::mem::take(&mut self.woken);
        woken.clear();
        world.drain_wake_ups(&mut woken);
        for &agent in &woken {
            self.wake(agent);
        }
        self.woken = woken;

        let mut stats = BtTickStats::default();
        let tree = &*self.tree;
        for i in 0..self.state.len() {
            let agent = AgentId(i as u32);
            if !world.is_live(agent) {
                continue;
            }
            if self.state.sleeping[i] {
                stats.sleeping += 1;
                continue;
            }
            stats.stepped += 1;
            if step(tree, &mut self.state, world, i).is_some() {
                stats.completed += 1;
            }
        }
        stats
    }
}

/// One transition for agent `i`.  Returns the pass result if the root
/// reported this tick.
fn step<W: DwarfWorld + ?Sized>(
    tree: &TreeDef,
    state: &mut AgentStates,
    world: &mut W,
    i: usize,
) -> Option<NodeStatus> {
    let id = state.current_node[i];
    let flow = state.flow[i];
    let previous = state.previous_status[i];

    match &tree.node(id).kind {
        NodeKind::Sequence { children, slot } => match flow {
            Flow::Down => {
                state.active_child[*slot as usize][i] = 0;
                state.descend(i, children[0]);
                None
            }
            Flow::Up if previous == NodeStatus::Fail => state.ascend(tree, i, id, NodeStatus::Fail),
            Flow::Up => next_child(tree, state, i, id, children, *slot as usize, NodeStatus::Success),
        },

        NodeKind::Selector { children, slot } => match flow {
            Flow::Down => {
                state.active_child[*slot as usize][i] = 0;
                state.descend(i, children[0]);
                None
            }
            Flow::Up if previous == NodeStatus::Success => state.ascend(tree, i, id, NodeStatus::Success),
            Flow::Up => next_child(tree, state, i, id, children, *slot as usize, NodeStatus::Fail),
        },

        NodeKind::Repeater { child, limit, slot } => {
            let counter = &mut state.repeater_counter[*slot as usize][i];
            match flow {
                Flow::Down => {
                    *counter = 0;
                    state.descend(i, *child);
                    None
                }
                Flow::Up => {
                    *counter += 1;
                    if *limit > 0 && *counter >= *limit {
                        *counter = 0;
                        state.ascend(tree, i, id, NodeStatus::Success)
                    } else {
                        state.descend(i, *child);
                        None
                    }
                }
            }
        }

        NodeKind::RepeatUntilFail { child } => match flow {
            Flow::Up if previous == NodeStatus::Fail => state.ascend(tree, i, id, NodeStatus::Success),
            _ => {
                state.descend(i, *child);
                None
            }
        },

        NodeKind::Inverter { child } => match flow {
            Flow::Down => {
                state.descend(i, *child);
                None
            }
            Flow::Up => state.ascend(tree, i, id, previous.inverted()),
        },

        NodeKind::Succeeder { child } => match flow {
            Flow::Down => {
                state.descend(i, *child);
                None
            }
            Flow::Up => state.ascend(tree, i, id, NodeStatus::Success),
        },

        NodeKind::Leaf(leaf) => {
            let outcome = run_leaf(*leaf, AgentId(i as u32), world);
            if outcome == LeafOutcome::Sleep {
                state.sleeping[i] = true;
            }
            match outcome.finished() {
                Some(status) => state.ascend(tree, i, id, status),
                None => {
                    state.previous_status[i] = NodeStatus::Running;
                    None
                }
            }
        }
    }
}

/// Advance a composite past a child that reported `continue_on`.  After the
/// last child the composite reports `continue_on` itself.
fn next_child(
    tree: &TreeDef,
    state: &mut AgentStates,
    i: usize,
    id: BtNodeId,
    children: &[BtNodeId],
    slot: usize,
    continue_on: NodeStatus,
) -> Option<NodeStatus> {
    let next = state.active_child[slot][i] as usize + 1;
    if next < children.len() {
        state.active_child[slot][i] = next as u32;
        state.descend(i, children[next]);
        None
    } else {
        state.ascend(tree, i, id, continue_on)
    }
}
