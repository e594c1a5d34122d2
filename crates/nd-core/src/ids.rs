//! Typed indices.
//!
//! Every id is a `u32` slot into some dense array: the dwarf store, the
//! navigation grid, a tree arena or the building registry.  `u32::MAX` is
//! reserved as `INVALID` and is what `Default` returns, so an unset field
//! never aliases slot 0.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($tag, "#{}"), self.0)
                } else {
                    f.write_str(concat!($tag, "#-"))
                }
            }
        }
    };
}

typed_id! {
    /// Dwarf slot.  Slots are recycled after despawn.
    pub struct AgentId, "dwarf";
}

typed_id! {
    /// Grid cell, `row * cols + col`.
    pub struct GraphNodeId, "cell";
}

typed_id! {
    /// Node of a behavior-tree arena.
    pub struct BtNodeId, "bt";
}

typed_id! {
    /// Dwelling or working place.
    pub struct BuildingId, "building";
}
