//! `nd-agent`: Structure-of-Arrays dwarf storage.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `DwarfStore` (SoA arrays), `AgentRngs`, `PathState`       |
//! | [`builder`]     | `DwarfStoreBuilder` (fluent construction)                 |
//!
//! Dead dwarves are not compacted: their slot keeps its index, is marked not
//! live, and is handed out again by the next spawn.  Systems iterating the
//! store skip slots that are not live.

pub mod builder;
pub mod store;


pub use builder::DwarfStoreBuilder;
pub use store::{AgentRngs, DwarfStore, PathState};
