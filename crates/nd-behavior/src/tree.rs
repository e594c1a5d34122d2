//! The shared, immutable node arena.

use nd_core::BtNodeId;

use crate::node::{Node, NodeKind, NodeSpec, NodeType};
use crate::{BehaviorError, BehaviorResult};

/// A validated behavior tree.
///
/// Nodes live in one `Vec`; children and parent are indices into it.  The
/// root is always `BtNodeId(0)`.  Every composite has at least one child and
/// every decorator exactly one, which the interpreter relies on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeDef {
    nodes: Vec<Node>,
    composite_slots: u32,
    repeater_slots: u32,
}

impl TreeDef {
    /// Flatten a nested description.
    pub fn from_spec(spec: &NodeSpec) -> BehaviorResult<Self> {
        let mut builder = TreeBuilder::new();
        let root = builder.root(spec.node_type)?;
        add_children(&mut builder, root, &spec.children)?;
        builder.build()
    }

    #[inline]
    pub fn root(&self) -> BtNodeId {
        BtNodeId(0)
    }

    /// # Panics
    /// Panics if `id` is not in this tree.
    #[inline]
    pub fn node(&self, id: BtNodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get(&self, id: BtNodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of composites, i.e. active-child slots per agent.
    #[inline]
    pub fn composite_slots(&self) -> u32 {
        self.composite_slots
    }

    /// Number of repeaters, i.e. counter slots per agent.
    #[inline]
    pub fn repeater_slots(&self) -> u32 {
        self.repeater_slots
    }

    /// Edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        (0..self.nodes.len())
            .map(|i| {
                let mut d = 0;
                let mut cur = self.nodes[i].parent;
                while cur.is_valid() {
                    d += 1;
                    cur = self.nodes[cur.index()].parent;
                }
                d
            })
            .max()
            .unwrap_or(0)
    }
}

fn add_children(builder: &mut TreeBuilder, parent: BtNodeId, children: &[NodeSpec]) -> BehaviorResult<()> {
    for spec in children {
        let id = builder.child(parent, spec.node_type)?;
        add_children(builder, id, &spec.children)?;
    }
    Ok(())
}

// ── TreeBuilder ───────────────────────────────────────────────────────────────

/// Incremental arena construction: a root, then children under existing
/// nodes, then [`build`](Self::build) to validate.
#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    composite_slots: u32,
    repeater_slots: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root.  May only be called once.
    pub fn root(&mut self, node_type: NodeType) -> BehaviorResult<BtNodeId> {
        if !self.nodes.is_empty() {
            return Err(BehaviorError::Config("tree already has a root".into()));
        }
        let kind = self.make_kind(node_type);
        self.nodes.push(Node { kind, parent: BtNodeId::INVALID });
        Ok(BtNodeId(0))
    }

    /// Append a child under `parent`.  Composites take any number of
    /// children, decorators exactly one, leaves none.
    pub fn child(&mut self, parent: BtNodeId, node_type: NodeType) -> BehaviorResult<BtNodeId> {
        let Some(parent_node) = self.nodes.get(parent.index()) else {
            return Err(malformed(parent, "parent does not exist"));
        };
        match &parent_node.kind {
            NodeKind::Leaf(leaf) => {
                return Err(malformed(parent, format!("{} cannot have children", leaf.name())));
            }
            NodeKind::Repeater { child, .. }
            | NodeKind::RepeatUntilFail { child }
            | NodeKind::Inverter { child }
            | NodeKind::Succeeder { child }
                if child.is_valid() =>
            {
                return Err(malformed(parent, "decorator already has a child"));
            }
            _ => {}
        }

        let id = BtNodeId(self.nodes.len() as u32);
        let kind = self.make_kind(node_type);
        self.nodes.push(Node { kind, parent });

        match &mut self.nodes[parent.index()].kind {
            NodeKind::Sequence { children, .. } | NodeKind::Selector { children, .. } => children.push(id),
            NodeKind::Repeater { child, .. }
            | NodeKind::RepeatUntilFail { child }
            | NodeKind::Inverter { child }
            | NodeKind::Succeeder { child } => *child = id,
            NodeKind::Leaf(_) => unreachable!("leaf parents are rejected above"),
        }
        Ok(id)
    }

    /// Check every composite has children and every decorator a child.
    pub fn build(self) -> BehaviorResult<TreeDef> {
        if self.nodes.is_empty() {
            return Err(BehaviorError::Config("tree has no root".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            let id = BtNodeId(i as u32);
            match &node.kind {
                NodeKind::Sequence { children, .. } | NodeKind::Selector { children, .. }
                    if children.is_empty() =>
                {
                    return Err(malformed(id, "composite has no children"));
                }
                NodeKind::Repeater { child, .. }
                | NodeKind::RepeatUntilFail { child }
                | NodeKind::Inverter { child }
                | NodeKind::Succeeder { child }
                    if !child.is_valid() =>
                {
                    return Err(malformed(id, "decorator has no child"));
                }
                _ => {}
            }
        }
        Ok(TreeDef {
            nodes: self.nodes,
            composite_slots: self.composite_slots,
            repeater_slots: self.repeater_slots,
        })
    }

    fn make_kind(&mut self, node_type: NodeType) -> NodeKind {
        match node_type {
            NodeType::Sequence => NodeKind::Sequence { children: Vec::new(), slot: self.next_composite() },
            NodeType::Selector => NodeKind::Selector { children: Vec::new(), slot: self.next_composite() },
            NodeType::Repeater { limit } => {
                let slot = self.repeater_slots;
                self.repeater_slots += 1;
                NodeKind::Repeater { child: BtNodeId::INVALID, limit, slot }
            }
            NodeType::RepeatUntilFail => NodeKind::RepeatUntilFail { child: BtNodeId::INVALID },
            NodeType::Inverter => NodeKind::Inverter { child: BtNodeId::INVALID },
            NodeType::Succeeder => NodeKind::Succeeder { child: BtNodeId::INVALID },
            NodeType::Leaf(leaf) => NodeKind::Leaf(leaf),
        }
    }

    fn next_composite(&mut self) -> u32 {
        let slot = self.composite_slots;
        self.composite_slots += 1;
        slot
    }
}

fn malformed(node: BtNodeId, reason: impl Into<String>) -> BehaviorError {
    BehaviorError::Malformed { node, reason: reason.into() }
}
