//! Node vocabulary.
//!
//! The node set is closed: composites, decorators and a fixed list of colony
//! leaves.  [`NodeKind`] is the arena form with child links resolved to
//! [`BtNodeId`]s; [`NodeType`] is the same thing before linking, and
//! [`NodeSpec`] is a nested description that [`TreeDef::from_spec`]
//! flattens.
//!
//! [`TreeDef::from_spec`]: crate::TreeDef::from_spec

use nd_core::BtNodeId;

// ── Destination ───────────────────────────────────────────────────────────────

/// Target of a `FindPathTo` leaf.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Any walkable position, drawn from the dwarf's RNG.
    Random,
    Dwelling,
    WorkingPlace,
    InventoryTaskGiver,
    InventoryTaskReceiver,
}

impl Destination {
    pub const ALL: [Destination; 5] = [
        Destination::Random,
        Destination::Dwelling,
        Destination::WorkingPlace,
        Destination::InventoryTaskGiver,
        Destination::InventoryTaskReceiver,
    ];

    /// Numeric code used in tree files (declaration order, from 0).
    pub fn from_code(code: u8) -> Option<Destination> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Destination::Random                => "Random",
            Destination::Dwelling              => "Dwelling",
            Destination::WorkingPlace          => "WorkingPlace",
            Destination::InventoryTaskGiver    => "InventoryTaskGiver",
            Destination::InventoryTaskReceiver => "InventoryTaskReceiver",
        }
    }

    /// Accepts [`name`](Self::name) as well as the SCREAMING_SNAKE form
    /// (`"WORKING_PLACE"`).
    pub fn from_name(name: &str) -> Option<Destination> {
        let squashed: String = name.chars().filter(|c| *c != '_').collect();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(&squashed))
    }
}

// ── LeafKind ──────────────────────────────────────────────────────────────────

/// Every leaf the colony knows.  Each makes one call into
/// [`DwarfWorld`](crate::DwarfWorld).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// RUNNING (asleep) until the requested path has been delivered.
    WaitForPath,
    /// SUCCESS once the path has been walked, RUNNING while walking.
    MoveTo,
    FindPathTo(Destination),

    HasDwelling,
    SetDwelling,
    EnterDwelling,
    ExitDwelling,

    HasJob,
    HasStaticJob,
    AssignJob,
    EnterWorkingPlace,
    ExitWorkingPlace,

    IsDayTime,
    IsNightTime,
    /// RUNNING until day.
    WaitDayTime,
    /// RUNNING until night.
    WaitNightTime,

    AskInventoryTask,
    TakeResources,
    PutResources,
}

impl LeafKind {
    /// Name used in tree files.
    pub fn name(self) -> &'static str {
        match self {
            LeafKind::WaitForPath       => "WaitForPathLeaf",
            LeafKind::MoveTo            => "MoveToLeaf",
            LeafKind::FindPathTo(_)     => "FindPathToLeaf",
            LeafKind::HasDwelling       => "HasDwellingLeaf",
            LeafKind::SetDwelling       => "SetDwellingLeaf",
            LeafKind::EnterDwelling     => "EnterDwellingLeaf",
            LeafKind::ExitDwelling      => "ExitDwellingLeaf",
            LeafKind::HasJob            => "HasJobLeaf",
            LeafKind::HasStaticJob      => "HasStaticJobLeaf",
            LeafKind::AssignJob         => "AssignJobLeaf",
            LeafKind::EnterWorkingPlace => "EnterWorkingPlaceLeaf",
            LeafKind::ExitWorkingPlace  => "ExitWorkingPlaceLeaf",
            LeafKind::IsDayTime         => "IsDayTimeLeaf",
            LeafKind::IsNightTime       => "IsNightTimeLeaf",
            LeafKind::WaitDayTime       => "WaitDayTimeLeaf",
            LeafKind::WaitNightTime     => "WaitNightTimeLeaf",
            LeafKind::AskInventoryTask  => "AskInventoryTaskLeaf",
            LeafKind::TakeResources     => "TakeResourcesLeaf",
            LeafKind::PutResources      => "PutResourcesLeaf",
        }
    }

    /// Leaf for a file name.  `FindPathToLeaf` needs `destination`; every
    /// other leaf ignores it.  `None` for an unknown name or a
    /// `FindPathToLeaf` without destination.
    pub fn from_name(name: &str, destination: Option<Destination>) -> Option<LeafKind> {
        let leaf = match name {
            "WaitForPathLeaf"       => LeafKind::WaitForPath,
            "MoveToLeaf"            => LeafKind::MoveTo,
            "FindPathToLeaf"        => LeafKind::FindPathTo(destination?),
            "HasDwellingLeaf"       => LeafKind::HasDwelling,
            "SetDwellingLeaf"       => LeafKind::SetDwelling,
            "EnterDwellingLeaf"     => LeafKind::EnterDwelling,
            "ExitDwellingLeaf"      => LeafKind::ExitDwelling,
            "HasJobLeaf"            => LeafKind::HasJob,
            "HasStaticJobLeaf"      => LeafKind::HasStaticJob,
            "AssignJobLeaf"         => LeafKind::AssignJob,
            "EnterWorkingPlaceLeaf" => LeafKind::EnterWorkingPlace,
            "ExitWorkingPlaceLeaf"  => LeafKind::ExitWorkingPlace,
            "IsDayTimeLeaf"         => LeafKind::IsDayTime,
            "IsNightTimeLeaf"       => LeafKind::IsNightTime,
            "WaitDayTimeLeaf"       => LeafKind::WaitDayTime,
            "WaitNightTimeLeaf"     => LeafKind::WaitNightTime,
            "AskInventoryTaskLeaf"  => LeafKind::AskInventoryTask,
            "TakeResourcesLeaf"     => LeafKind::TakeResources,
            "PutResourcesLeaf"      => LeafKind::PutResources,
            _ => return None,
        };
        Some(leaf)
    }
}

// ── NodeGroup ─────────────────────────────────────────────────────────────────

/// Coarse node family.  The discriminants are the `type` codes of tree files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeGroup {
    Leaf = 1,
    Composite = 2,
    Decorator = 4,
}

impl NodeGroup {
    pub fn from_code(code: u8) -> Option<NodeGroup> {
        match code {
            1 => Some(NodeGroup::Leaf),
            2 => Some(NodeGroup::Composite),
            4 => Some(NodeGroup::Decorator),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<NodeGroup> {
        match name.to_ascii_lowercase().as_str() {
            "leaf" => Some(NodeGroup::Leaf),
            "composite" => Some(NodeGroup::Composite),
            "decorator" => Some(NodeGroup::Decorator),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeGroup::Leaf => "leaf",
            NodeGroup::Composite => "composite",
            NodeGroup::Decorator => "decorator",
        }
    }
}

// ── NodeType / NodeKind ───────────────────────────────────────────────────────

/// A node before it is linked into an arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeType {
    Sequence,
    Selector,
    /// Re-enters its child `limit` times; `0` repeats forever.
    Repeater { limit: u32 },
    RepeatUntilFail,
    Inverter,
    Succeeder,
    Leaf(LeafKind),
}

impl NodeType {
    pub fn group(self) -> NodeGroup {
        match self {
            NodeType::Sequence | NodeType::Selector => NodeGroup::Composite,
            NodeType::Repeater { .. }
            | NodeType::RepeatUntilFail
            | NodeType::Inverter
            | NodeType::Succeeder => NodeGroup::Decorator,
            NodeType::Leaf(_) => NodeGroup::Leaf,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeType::Sequence         => "SequenceComposite",
            NodeType::Selector         => "SelectorComposite",
            NodeType::Repeater { .. }  => "RepeaterDecorator",
            NodeType::RepeatUntilFail  => "RepeatUntilFailDecorator",
            NodeType::Inverter         => "InverterDecorator",
            NodeType::Succeeder        => "SucceederDecorator",
            NodeType::Leaf(leaf)       => leaf.name(),
        }
    }
}

/// A linked arena node.
///
/// `slot` indexes the per-agent counter arrays in
/// [`AgentStates`](crate::AgentStates); each composite has its own
/// active-child slot and each repeater its own counter slot, so nested
/// nodes never share a counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Sequence { children: Vec<BtNodeId>, slot: u32 },
    Selector { children: Vec<BtNodeId>, slot: u32 },
    Repeater { child: BtNodeId, limit: u32, slot: u32 },
    RepeatUntilFail { child: BtNodeId },
    Inverter { child: BtNodeId },
    Succeeder { child: BtNodeId },
    Leaf(LeafKind),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Sequence { .. } => NodeType::Sequence,
            NodeKind::Selector { .. } => NodeType::Selector,
            NodeKind::Repeater { limit, .. } => NodeType::Repeater { limit: *limit },
            NodeKind::RepeatUntilFail { .. } => NodeType::RepeatUntilFail,
            NodeKind::Inverter { .. } => NodeType::Inverter,
            NodeKind::Succeeder { .. } => NodeType::Succeeder,
            NodeKind::Leaf(leaf) => NodeType::Leaf(*leaf),
        }
    }

    /// Child links in order.
    pub fn children(&self) -> &[BtNodeId] {
        match self {
            NodeKind::Sequence { children, .. } | NodeKind::Selector { children, .. } => children,
            NodeKind::Repeater { child, .. }
            | NodeKind::RepeatUntilFail { child }
            | NodeKind::Inverter { child }
            | NodeKind::Succeeder { child } => std::slice::from_ref(child),
            NodeKind::Leaf(_) => &[],
        }
    }
}

/// One arena entry.  `parent` is `BtNodeId::INVALID` for the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: BtNodeId,
}

// ── NodeSpec ──────────────────────────────────────────────────────────────────

/// Nested, unlinked tree description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSpec {
    pub node_type: NodeType,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(node_type: NodeType, children: Vec<NodeSpec>) -> Self {
        Self { node_type, children }
    }

    pub fn sequence(children: Vec<NodeSpec>) -> Self {
        Self::new(NodeType::Sequence, children)
    }

    pub fn selector(children: Vec<NodeSpec>) -> Self {
        Self::new(NodeType::Selector, children)
    }

    pub fn repeater(limit: u32, child: NodeSpec) -> Self {
        Self::new(NodeType::Repeater { limit }, vec![child])
    }

    pub fn repeat_until_fail(child: NodeSpec) -> Self {
        Self::new(NodeType::RepeatUntilFail, vec![child])
    }

    pub fn inverter(child: NodeSpec) -> Self {
        Self::new(NodeType::Inverter, vec![child])
    }

    pub fn succeeder(child: NodeSpec) -> Self {
        Self::new(NodeType::Succeeder, vec![child])
    }

    pub fn leaf(kind: LeafKind) -> Self {
        Self::new(NodeType::Leaf(kind), Vec::new())
    }
}
