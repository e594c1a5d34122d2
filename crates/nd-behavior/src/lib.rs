//! `nd-behavior`: data-oriented behavior trees for thousands of dwarves.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                           |
//! |-------------|--------------------------------------------------------------------|
//! | [`node`]    | `NodeKind`, `LeafKind`, `Destination`, `NodeType`, `NodeSpec`      |
//! | [`tree`]    | `TreeDef` (shared arena), `TreeBuilder`                            |
//! | [`status`]  | `NodeStatus`, `Flow`                                               |
//! | [`state`]   | `AgentStates`: per-agent SoA interpreter state                    |
//! | [`world`]   | `DwarfWorld`: collaborator consulted by leaves                    |
//! | [`leaf`]    | leaf dispatch onto `DwarfWorld`                                    |
//! | [`engine`]  | `BehaviorTree`: one transition per agent per tick                 |
//! | [`loader`]  | `load_tree_json`, `load_tree_str`                                  |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                               |
//!
//! # Design notes
//!
//! One `TreeDef` is shared by every agent and never mutated while running.
//! Each agent is an instruction pointer (`current_node`) plus a direction
//! (`flow`) and the outcome of the last node that finished
//! (`previous_status`), stored in parallel arrays indexed by `AgentId`.
//!
//! A tick moves every agent by exactly one edge of the tree: into a child,
//! back up to the parent, or nowhere for a leaf that is still running.
//! Nothing recurses and nothing allocates per tick, so a frame costs the
//! same whether an agent is deep in a branch or at the root.

pub mod engine;
pub mod error;
pub mod leaf;
pub mod loader;
pub mod node;
pub mod state;
pub mod status;
pub mod tree;
pub mod world;

#[cfg(test)]
mod tests;

pub use engine::{BehaviorTree, BtTickStats};
pub use error::{BehaviorError, BehaviorResult};
pub use loader::{load_tree_json, load_tree_str};
pub use node::{Destination, LeafKind, Node, NodeGroup, NodeKind, NodeSpec, NodeType};
pub use state::AgentStates;
pub use status::{Flow, NodeStatus};
pub use tree::{TreeBuilder, TreeDef};
pub use world::DwarfWorld;
