//! Plain data row types written by output backends.

use nd_agent::PathState;

/// One live dwarf at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwarfSnapshotRow {
    pub dwarf_id:       u32,
    pub tick:           u64,
    pub x:              f32,
    pub y:              f32,
    pub path_state:     PathState,
    pub waypoints_left: u32,
    /// Behavior-tree node the dwarf is at.
    pub bt_node:        u32,
    pub sleeping:       bool,
    /// Building the dwarf is inside; `u32::MAX` when outdoors.
    pub inside:         u32,
    pub carried:        u32,
}

/// Counts for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    pub stepped:      u64,
    pub sleeping:     u64,
    pub completed:    u64,
    pub paths_served: u64,
    pub moved:        u64,
    pub arrived:      u64,
}
