//! Waypoint following.

use nd_agent::DwarfStore;
use nd_core::{AgentId, DistanceMetric, Vec2};

/// Counts from one [`follow_paths`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveStats {
    pub moved: usize,
    /// Dwarves that reached the last waypoint of their path.
    pub arrived: usize,
}

/// Move every dwarf in `batch` up to `step` world units toward its next
/// waypoint.  A waypoint within `stopping_distance` after the move is
/// consumed.  Dwarves with no waypoint left are not moved.
pub fn follow_paths(
    dwarves: &mut DwarfStore,
    batch: &[AgentId],
    step: f32,
    stopping_distance: f32,
    metric: DistanceMetric,
) -> MoveStats {
    let mut stats = MoveStats::default();
    for &agent in batch {
        if !dwarves.is_live(agent) {
            continue;
        }
        let Some(target) = dwarves.next_waypoint(agent) else { continue };
        let i = agent.index();

        let pos = step_toward(dwarves.position[i], target, step, metric);
        dwarves.position[i] = pos;
        stats.moved += 1;

        if length(target - pos, metric) <= stopping_distance {
            dwarves.path[i].pop();
            if dwarves.path[i].is_empty() {
                stats.arrived += 1;
            }
        }
    }
    stats
}

fn step_toward(from: Vec2, to: Vec2, step: f32, metric: DistanceMetric) -> Vec2 {
    let delta = to - from;
    let dist = length(delta, metric);
    if dist <= step || dist == 0.0 {
        to
    } else {
        from + delta * (step / dist)
    }
}

#[inline]
fn length(v: Vec2, metric: DistanceMetric) -> f32 {
    match metric {
        DistanceMetric::Exact => v.length(),
        DistanceMetric::FastInverseSqrt => v.fast_length(),
    }
}
