//! `nd-sim`: fixed-timestep loop for the Nastrond colony.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Clock    : the manager learns the tick (time of day).
//!   ② Behavior : BehaviorTree::update: wake delivered dwarves, then one
//!                tree transition per live, awake dwarf.  Leaves only
//!                enqueue path requests and path following.
//!   ③ Colony   : DwarfManager::fixed_update: serve at most
//!                `nav.max_paths_per_update` path requests, then move the
//!                dwarves whose MoveTo leaf ran.
//!   ④ Observe  : tick summary every tick, dwarf snapshot every
//!                `output_interval_ticks`.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nd_behavior::load_tree_json;
//! use nd_sim::{NoopObserver, SimBuilder};
//!
//! let tree = load_tree_json(Path::new("trees/worker.json"))?;
//! let mut sim = SimBuilder::new(config, graph, tree)
//!     .dwelling(home, 4)
//!     .dwarves_at(spawn_points)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, TickStats};
