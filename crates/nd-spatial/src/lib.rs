//! `nd-spatial`: navigation grid, A* pathfinding and path request dispatch.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                   |
//! |--------------------|------------------------------------------------------------|
//! | [`priority_queue`] | `HeapPriorityQueue`, `VectorCompleteTree`                  |
//! | [`cost_map`]       | `CostClass`, `CostMap`, `load_cost_map_csv`                |
//! | [`layout`]         | `MapLayout` (orthogonal / isometric basis vectors)         |
//! | [`graph`]          | `NavigationGraph`, `GraphNode`                             |
//! | [`pathfinder`]     | `Pathfinder` trait, `Path`, `AStarPathfinder`              |
//! | [`request`]        | `PathRequestQueue`, `PathRequest`, `PathSink`              |
//! | [`error`]          | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod cost_map;
pub mod error;
pub mod graph;
pub mod layout;
pub mod pathfinder;
pub mod priority_queue;
pub mod request;


pub use cost_map::{CostClass, CostMap, load_cost_map_csv, load_cost_map_reader};
pub use error::{SpatialError, SpatialResult};
pub use graph::{GraphNode, NavigationGraph};
pub use layout::MapLayout;
pub use pathfinder::{AStarPathfinder, Path, Pathfinder, SearchParams};
pub use priority_queue::{DEFAULT_CAPACITY, HeapPriorityQueue, VectorCompleteTree};
pub use request::{PathRequest, PathRequestQueue, PathSink};
