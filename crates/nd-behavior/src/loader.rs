//! JSON tree files.
//!
//! ```json
//! { "rootNode": [
//!     { "type": 2, "name": "SequenceComposite", "childs": [
//!         { "type": 1, "name": "FindPathToLeaf", "destination": "Random" },
//!         { "type": 1, "name": "WaitForPathLeaf" },
//!         { "type": 1, "name": "MoveToLeaf" } ] } ] }
//! ```
//!
//! `type` is the group code (leaf 1, composite 2, decorator 4) or its name
//! and may be omitted.  `children` is accepted for `childs`.
//! `RepeaterDecorator` takes an optional `limit` (0 = forever) and
//! `FindPathToLeaf` a required `destination`, by name or code.

use std::path::Path;

use serde::Deserialize;

use crate::node::{Destination, LeafKind, NodeGroup, NodeSpec, NodeType};
use crate::tree::TreeDef;
use crate::{BehaviorError, BehaviorResult};

#[derive(Debug, Deserialize)]
struct TreeFile {
    #[serde(rename = "rootNode")]
    root_node: Vec<NodeRecord>,
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    #[serde(rename = "type", default)]
    group: Option<CodeOrName>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "children")]
    childs: Vec<NodeRecord>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    destination: Option<CodeOrName>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CodeOrName {
    Code(u8),
    Name(String),
}

impl std::fmt::Display for CodeOrName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeOrName::Code(c) => write!(f, "{c}"),
            CodeOrName::Name(n) => f.write_str(n),
        }
    }
}

/// Load and validate a tree file.
pub fn load_tree_json(path: &Path) -> BehaviorResult<TreeDef> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        log::error!("cannot read behavior tree {}: {e}", path.display());
        BehaviorError::Io(e)
    })?;
    let tree = load_tree_str(&text)?;
    log::info!(
        "loaded behavior tree {} ({} nodes, depth {})",
        path.display(),
        tree.len(),
        tree.depth()
    );
    Ok(tree)
}

/// Parse and validate a tree from JSON text.
pub fn load_tree_str(json: &str) -> BehaviorResult<TreeDef> {
    parse(json).inspect_err(|e| log::error!("rejected behavior tree: {e}"))
}

fn parse(json: &str) -> BehaviorResult<TreeDef> {
    let file: TreeFile = serde_json::from_str(json)?;
    let mut roots = file.root_node.into_iter();
    let Some(root) = roots.next() else {
        return Err(BehaviorError::Config("rootNode is empty".into()));
    };
    let extra = roots.count();
    if extra > 0 {
        log::warn!("behavior tree has {} extra root nodes; using the first", extra);
    }
    let spec = to_spec(root, "rootNode[0]".to_string())?;
    TreeDef::from_spec(&spec)
}

fn to_spec(record: NodeRecord, at: String) -> BehaviorResult<NodeSpec> {
    let group = match &record.group {
        None => None,
        Some(CodeOrName::Code(code)) => Some(
            NodeGroup::from_code(*code)
                .ok_or_else(|| BehaviorError::Config(format!("{at}: unknown node type code {code}")))?,
        ),
        Some(CodeOrName::Name(name)) => Some(
            NodeGroup::from_name(name)
                .ok_or_else(|| BehaviorError::Config(format!("{at}: unknown node type {name:?}")))?,
        ),
    };
    let Some(name) = record.name.as_deref() else {
        return Err(BehaviorError::MissingField { at, field: "name" });
    };

    let node_type = match name {
        "SequenceComposite" => NodeType::Sequence,
        "SelectorComposite" => NodeType::Selector,
        "RepeaterDecorator" => NodeType::Repeater { limit: record.limit.unwrap_or(0) },
        "RepeatUntilFailDecorator" => NodeType::RepeatUntilFail,
        "InverterDecorator" => NodeType::Inverter,
        "SucceederDecorator" => NodeType::Succeeder,
        _ => NodeType::Leaf(leaf_kind(name, record.destination.as_ref(), &at, group)?),
    };

    if let Some(group) = group.filter(|g| *g != node_type.group()) {
        return Err(BehaviorError::UnknownNode { group: group.label(), name: name.to_string(), at });
    }

    match node_type.group() {
        NodeGroup::Leaf if !record.childs.is_empty() => {
            return Err(BehaviorError::Config(format!("{at}: leaf {name} cannot have children")));
        }
        NodeGroup::Decorator if record.childs.len() > 1 => {
            return Err(BehaviorError::Config(format!(
                "{at}: decorator {name} has {} children, expected 1",
                record.childs.len()
            )));
        }
        _ => {}
    }

    let children = record
        .childs
        .into_iter()
        .enumerate()
        .map(|(k, child)| to_spec(child, format!("{at}.childs[{k}]")))
        .collect::<BehaviorResult<Vec<_>>>()?;
    Ok(NodeSpec::new(node_type, children))
}

fn leaf_kind(
    name: &str,
    destination: Option<&CodeOrName>,
    at: &str,
    group: Option<NodeGroup>,
) -> BehaviorResult<LeafKind> {
    let destination = match destination {
        None => None,
        Some(CodeOrName::Code(code)) => Some(Destination::from_code(*code).ok_or_else(|| {
            BehaviorError::Config(format!("{at}: unknown destination code {code}"))
        })?),
        Some(CodeOrName::Name(d)) => Some(Destination::from_name(d).ok_or_else(|| {
            BehaviorError::Config(format!("{at}: unknown destination {d:?}"))
        })?),
    };
    match LeafKind::from_name(name, destination) {
        Some(leaf) => Ok(leaf),
        None if name == "FindPathToLeaf" => {
            Err(BehaviorError::MissingField { at: at.to_string(), field: "destination" })
        }
        None => Err(BehaviorError::UnknownNode {
            group: group.unwrap_or(NodeGroup::Leaf).label(),
            name: name.to_string(),
            at: at.to_string(),
        }),
    }
}
