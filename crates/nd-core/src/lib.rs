//! `nd-core`: foundational types for the Nastrond colony simulation.
//!
//! This crate is a dependency of every other `nd-*` crate.  It has no `nd-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `GraphNodeId`, `BtNodeId`, `BuildingId`        |
//! | [`geo`]         | `Vec2`, fast inverse square root                          |
//! | [`time`]        | `Tick`, `SimClock`, `DayCycle`                            |
//! | [`config`]      | `SimConfig`, `NavConfig`, `DwarfConfig`, `DistanceMetric` |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`error`]       | `NdError`, `NdResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DistanceMetric, DwarfConfig, NavConfig, SimConfig};
pub use error::{NdError, NdResult};
pub use geo::Vec2;
pub use ids::{AgentId, BtNodeId, BuildingId, GraphNodeId};
pub use rng::{AgentRng, SimRng};
pub use time::{DayCycle, SimClock, Tick};
