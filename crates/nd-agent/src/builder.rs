//! Fluent builder for constructing `DwarfStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use nd_agent::DwarfStoreBuilder;
//! use nd_core::Vec2;
//!
//! let (store, rngs) = DwarfStoreBuilder::new(/*seed=*/ 42)
//!     .dwarf_at(Vec2::new(16.0, 16.0))
//!     .dwarf_at(Vec2::new(48.0, 16.0))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(),  2);
//! ```

use nd_core::Vec2;

use crate::{AgentRngs, DwarfStore};

/// Fluent builder for [`DwarfStore`] + [`AgentRngs`].
pub struct DwarfStoreBuilder {
    seed: u64,
    capacity: usize,
    positions: Vec<Vec2>,
}

impl DwarfStoreBuilder {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            capacity: 0,
            positions: Vec::new(),
        }
    }

    /// Reserve room for `capacity` slots so later spawns do not reallocate.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Spawn one dwarf at `position` when the store is built.
    pub fn dwarf_at(mut self, position: Vec2) -> Self {
        self.positions.push(position);
        self
    }

    /// Spawn one dwarf at each of `positions`, in order.
    pub fn dwarves_at(mut self, positions: impl IntoIterator<Item = Vec2>) -> Self {
        self.positions.extend(positions);
        self
    }

    /// Construct `DwarfStore` and `AgentRngs`.  Dwarf `i` gets `AgentId(i)`.
    pub fn build(self) -> (DwarfStore, AgentRngs) {
        let mut store = DwarfStore::with_capacity(self.capacity.max(self.positions.len()));
        for pos in self.positions {
            store.spawn(pos);
        }
        let rngs = AgentRngs::new(store.count, self.seed);
        (store, rngs)
    }
}
