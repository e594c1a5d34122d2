//! `nd-colony`: the world dwarves live in.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`buildings`] | `BuildingRegistry`: dwellings, working places, stock           |
//! | [`tasks`]     | `InventoryTask`, `TaskBoard`: hauling jobs between buildings   |
//! | [`movement`]  | `follow_paths`: per-tick waypoint following                    |
//! | [`manager`]   | `DwarfManager`: owns everything, implements `DwarfWorld`       |
//! | [`error`]     | `ColonyError`, `ColonyResult<T>`                                |
//!
//! # Tick model
//!
//! The behavior tree runs first and only *enqueues* work: path requests go
//! to the [`PathRequestQueue`][nd_spatial::PathRequestQueue] and `MoveTo`
//! leaves add their dwarf to this tick's following batch.
//! [`DwarfManager::fixed_update`] then serves a bounded number of path
//! requests, wakes the dwarves whose paths arrived, and moves the batch.

pub mod buildings;
pub mod error;
pub mod manager;
pub mod movement;
pub mod tasks;


pub use buildings::{Building, BuildingKind, BuildingRegistry};
pub use error::{ColonyError, ColonyResult};
pub use manager::{ColonyTickStats, DwarfManager};
pub use movement::{follow_paths, MoveStats};
pub use tasks::{InventoryTask, TaskBoard};
