//! Seeded random streams.
//!
//! Every dwarf slot draws from its own `SmallRng`, seeded with
//!
//!   global_seed XOR (slot * 0x9e37_79b9_7f4a_7c15)
//!
//! Wander destinations therefore do not depend on how many numbers other
//! dwarves drew first, and a recycled slot replays a fresh dwarf's stream.
//! [`SimRng`] is the single stream used for world generation.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Vec2};

const SLOT_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// One dwarf's stream.  Lives in a `Vec` parallel to the dwarf store.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ u64::from(agent.0).wrapping_mul(SLOT_MIX);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// A point drawn uniformly from the box spanned by `lo` and `hi`
    /// (inclusive).  Used to pick wander destinations.
    pub fn point_in(&mut self, lo: Vec2, hi: Vec2) -> Vec2 {
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        Vec2::new(self.0.gen_range(lo.x..=hi.x), self.0.gen_range(lo.y..=hi.y))
    }
}

/// World-generation stream: map features, spawn scatter.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// A `(row, col)` strictly inside a `rows × cols` grid, skipping the
    /// one-cell border.  Needs at least a 3×3 grid.
    pub fn interior_cell(&mut self, rows: usize, cols: usize) -> (usize, usize) {
        (self.0.gen_range(1..rows - 1), self.0.gen_range(1..cols - 1))
    }
}
