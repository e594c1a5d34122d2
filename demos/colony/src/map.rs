//! Seeded cave map for the colony demo.
//!
//! A 32×32 grid of NORMAL rock floor bordered by solid wall, with a ROAD
//! cross through the middle and a scatter of solid boulders.  Building
//! sites sit on the road so they are always reachable.

use nd_core::SimRng;
use nd_spatial::{CostClass, CostMap};

pub const ROWS: usize = 32;
pub const COLS: usize = 32;
pub const TILE: f32 = 32.0;

/// Cells kept free of boulders: dwellings, then working places.
pub const SITES: [(usize, usize); 5] = [
    (4, 16),  // north hall
    (27, 16), // south hall
    (16, 4),  // forge
    (16, 27), // mine
    (16, 16), // storehouse
];

const BOULDERS: usize = 60;

pub fn build_cost_map(seed: u64) -> CostMap {
    let mut map = CostMap::new(ROWS, COLS, CostClass::Normal);

    for i in 0..ROWS {
        map.set(i, 0, CostClass::Solid);
        map.set(i, COLS - 1, CostClass::Solid);
    }
    for j in 0..COLS {
        map.set(0, j, CostClass::Solid);
        map.set(ROWS - 1, j, CostClass::Solid);
    }

    let mut rng = SimRng::new(seed);
    for _ in 0..BOULDERS {
        let (row, col) = rng.interior_cell(ROWS, COLS);
        map.set(row, col, CostClass::Solid);
    }

    // Roads are laid last so boulders never cut them.
    for i in 1..ROWS - 1 {
        map.set(i, COLS / 2, CostClass::Road);
    }
    for j in 1..COLS - 1 {
        map.set(ROWS / 2, j, CostClass::Road);
    }
    for &(row, col) in &SITES {
        map.set(row, col, CostClass::Road);
    }
    map
}
