//! Per-agent interpreter state, one `Vec` per field, indexed by `AgentId`.

use nd_core::{AgentId, BtNodeId};

use crate::status::{Flow, NodeStatus};
use crate::tree::TreeDef;

/// Structure-of-Arrays interpreter state.
///
/// All per-agent `Vec`s have exactly `len()` entries.  Counter arrays are
/// indexed `[slot][agent]`, where the slot comes from the owning node.
#[derive(Clone, Debug, Default)]
pub struct AgentStates {
    pub current_node: Vec<BtNodeId>,
    pub flow: Vec<Flow>,
    pub previous_status: Vec<NodeStatus>,
    /// Outcome of the agent's last complete pass through the tree.
    pub last_result: Vec<Option<NodeStatus>>,
    /// Completed passes since the slot was last reset.
    pub runs: Vec<u32>,
    pub sleeping: Vec<bool>,
    /// `[composite slot][agent]` index of the child being run.
    pub active_child: Vec<Vec<u32>>,
    /// `[repeater slot][agent]` completed iterations.
    pub repeater_counter: Vec<Vec<u32>>,
    root: BtNodeId,
}

impl AgentStates {
    /// Empty state shaped for `tree`.
    pub fn for_tree(tree: &TreeDef) -> Self {
        let mut states = Self::default();
        states.reshape(tree);
        states
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.current_node.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current_node.is_empty()
    }

    /// Grow to `count` agents; never shrinks.  New agents start at the root,
    /// flowing down.
    pub fn grow(&mut self, count: usize) {
        if count <= self.len() {
            return;
        }
        self.current_node.resize(count, self.root);
        self.flow.resize(count, Flow::Down);
        self.previous_status.resize(count, NodeStatus::Running);
        self.last_result.resize(count, None);
        self.runs.resize(count, 0);
        self.sleeping.resize(count, false);
        for slot in self.active_child.iter_mut().chain(self.repeater_counter.iter_mut()) {
            slot.resize(count, 0);
        }
    }

    /// Put one agent back to its initial values, e.g. when its slot is
    /// recycled for a new dwarf.
    pub fn reset(&mut self, agent: AgentId) {
        let i = agent.index();
        if i >= self.len() {
            self.grow(i + 1);
            return;
        }
        self.current_node[i] = self.root;
        self.flow[i] = Flow::Down;
        self.previous_status[i] = NodeStatus::Running;
        self.last_result[i] = None;
        self.runs[i] = 0;
        self.sleeping[i] = false;
        for slot in self.active_child.iter_mut().chain(self.repeater_counter.iter_mut()) {
            slot[i] = 0;
        }
    }

    /// Match the counter arrays to `tree` and reset every agent.
    pub fn reshape(&mut self, tree: &TreeDef) {
        let len = self.len();
        self.root = tree.root();
        self.active_child = vec![vec![0; len]; tree.composite_slots() as usize];
        self.repeater_counter = vec![vec![0; len]; tree.repeater_slots() as usize];
        for i in 0..len {
            self.reset(AgentId(i as u32));
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Move agent `i` into `child` as a fresh entry.
    #[inline]
    pub(crate) fn descend(&mut self, i: usize, child: BtNodeId) {
        self.current_node[i] = child;
        self.flow[i] = Flow::Down;
        self.previous_status[i] = NodeStatus::Running;
    }

    /// Report `status` from node `from` to its parent.  From the root this
    /// completes the pass: the result is recorded and the agent restarts at
    /// the root next tick.  Returns the result of a completed pass.
    #[inline]
    pub(crate) fn ascend(&mut self, tree: &TreeDef, i: usize, from: BtNodeId, status: NodeStatus) -> Option<NodeStatus> {
        let parent = tree.node(from).parent;
        self.previous_status[i] = status;
        if parent.is_valid() {
            self.current_node[i] = parent;
            self.flow[i] = Flow::Up;
            None
        } else {
            self.current_node[i] = self.root;
            self.flow[i] = Flow::Down;
            self.last_result[i] = Some(status);
            self.runs[i] = self.runs[i].saturating_add(1);
            Some(status)
        }
    }
}
