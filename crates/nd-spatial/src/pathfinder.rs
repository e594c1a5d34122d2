//! Pathfinding trait and the default A* implementation.
//!
//! # Pluggability
//!
//! [`PathRequestQueue`](crate::PathRequestQueue) is generic over
//! [`Pathfinder`], so a different search can be dropped in without touching
//! the request plumbing.
//!
//! # Costs
//!
//! Edge cost is the world-space length between cell centres, scaled by the
//! terrain factor of the cell being entered.  The heuristic is octile grid
//! distance scaled by the graph's step unit and the cheapest terrain factor,
//! plus a small tie-breaker proportional to how far a cell strays from the
//! straight origin→goal line.  Among equally short paths this favours the
//! one hugging that line.

use nd_core::{DistanceMetric, GraphNodeId, NavConfig, Vec2};

use crate::cost_map::CostClass;
use crate::graph::NavigationGraph;
use crate::priority_queue::{DEFAULT_CAPACITY, HeapPriorityQueue};
use crate::{SpatialError, SpatialResult};

/// Orthogonal step weight.
const HEURISTIC_1: f32 = 1.0;
/// Diagonal step weight.
const HEURISTIC_2: f32 = std::f32::consts::SQRT_2;

const UNVISITED: f32 = f32::MAX;

// ── Path ──────────────────────────────────────────────────────────────────────

/// A found path, origin first.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<GraphNodeId>,
    /// Centre of each node in `nodes`.
    pub waypoints: Vec<Vec2>,
    /// Summed edge cost.
    pub cost: f32,
}

impl Path {
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path search over a [`NavigationGraph`].
///
/// Takes `&mut self` so implementations can keep scratch buffers between
/// queries.
pub trait Pathfinder: Send {
    /// Path between two graph nodes.
    ///
    /// `from == to` yields a single-node path.  An unreachable `to` yields
    /// [`SpatialError::NoPath`].
    fn find_path(
        &mut self,
        graph: &NavigationGraph,
        from: GraphNodeId,
        to: GraphNodeId,
    ) -> SpatialResult<Path>;

    /// Path between the walkable nodes nearest to two world positions.
    fn find_path_between(
        &mut self,
        graph: &NavigationGraph,
        origin: Vec2,
        destination: Vec2,
    ) -> SpatialResult<Path> {
        let (from, to) = graph
            .nearest_pair(origin, destination)
            .ok_or(SpatialError::EmptyGraph)?;
        self.find_path(graph, from, to)
    }
}

// ── SearchParams ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct SearchParams {
    pub metric: DistanceMetric,
    pub road_factor: f32,
    pub normal_factor: f32,
    /// Weight of the off-line deviation term.  0 disables tie-breaking.
    pub tie_breaker: f32,
    pub open_set_capacity: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            metric:            DistanceMetric::Exact,
            road_factor:       1.0,
            normal_factor:     1.0,
            tie_breaker:       0.001,
            open_set_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl From<&NavConfig> for SearchParams {
    fn from(cfg: &NavConfig) -> Self {
        Self {
            metric:            cfg.distance_metric,
            road_factor:       cfg.road_cost_factor,
            normal_factor:     cfg.normal_cost_factor,
            open_set_capacity: cfg.open_set_capacity,
            ..Self::default()
        }
    }
}

impl SearchParams {
    #[inline]
    fn terrain_factor(&self, cost: CostClass) -> f32 {
        match cost {
            CostClass::Road => self.road_factor,
            CostClass::Normal | CostClass::Solid => self.normal_factor,
        }
    }

    #[inline]
    fn length(&self, d: Vec2) -> f32 {
        match self.metric {
            DistanceMetric::Exact => d.length(),
            DistanceMetric::FastInverseSqrt => d.fast_length(),
        }
    }
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* with flat per-node scratch arrays reused across queries.
///
/// Only entries written during a query are reset afterwards, so a query's
/// cleanup cost is proportional to the area it explored rather than the
/// whole map.
pub struct AStarPathfinder {
    params: SearchParams,
    open: HeapPriorityQueue,
    cost_so_far: Vec<f32>,
    came_from: Vec<GraphNodeId>,
    touched: Vec<GraphNodeId>,
}

impl Default for AStarPathfinder {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

/// Per-query constants for the heuristic.
struct Target {
    goal_row: f32,
    goal_col: f32,
    /// Origin offset from the goal, in cells.
    line_dx: f32,
    line_dy: f32,
    line_len: f32,
    scale: f32,
}

impl AStarPathfinder {
    pub fn new(params: SearchParams) -> Self {
        let open = HeapPriorityQueue::new(params.open_set_capacity.max(1));
        Self {
            params,
            open,
            cost_so_far: Vec::new(),
            came_from: Vec::new(),
            touched: Vec::new(),
        }
    }

    pub fn from_config(cfg: &NavConfig) -> Self {
        Self::new(SearchParams::from(cfg))
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Entries the open set has dropped over this pathfinder's lifetime.
    pub fn evicted(&self) -> u64 {
        self.open.evicted()
    }

    fn prepare(&mut self, node_count: usize) {
        if self.cost_so_far.len() != node_count {
            self.cost_so_far = vec![UNVISITED; node_count];
            self.came_from = vec![GraphNodeId::INVALID; node_count];
        }
    }

    fn reset(&mut self) {
        for id in self.touched.drain(..) {
            self.cost_so_far[id.index()] = UNVISITED;
            self.came_from[id.index()] = GraphNodeId::INVALID;
        }
        self.open.clear();
    }

    fn target(&self, graph: &NavigationGraph, from: GraphNodeId, to: GraphNodeId) -> Target {
        let (goal_row, goal_col) = graph.coords(to);
        let (origin_row, origin_col) = graph.coords(from);
        let line_dx = (origin_col as f32 - goal_col as f32).abs();
        let line_dy = (origin_row as f32 - goal_row as f32).abs();
        let min_factor = self.params.road_factor.min(self.params.normal_factor);
        Target {
            goal_row: goal_row as f32,
            goal_col: goal_col as f32,
            line_dx,
            line_dy,
            line_len: (line_dx * line_dx + line_dy * line_dy).sqrt().max(1.0),
            scale: graph.step_unit() * min_factor,
        }
    }

    fn heuristic(&self, graph: &NavigationGraph, node: GraphNodeId, t: &Target) -> f32 {
        let (row, col) = graph.coords(node);
        let dx = (col as f32 - t.goal_col).abs();
        let dy = (row as f32 - t.goal_row).abs();
        let octile = HEURISTIC_1 * (dx + dy) + (HEURISTIC_2 - 2.0 * HEURISTIC_1) * dx.min(dy);
        let cross = (dx * t.line_dy - t.line_dx * dy).abs();
        (octile + self.params.tie_breaker * cross / t.line_len) * t.scale
    }

    fn search(&mut self, graph: &NavigationGraph, from: GraphNodeId, to: GraphNodeId) -> usize {
        let target = self.target(graph, from, to);
        let mut expanded = 0;

        self.cost_so_far[from.index()] = 0.0;
        self.came_from[from.index()] = from;
        self.touched.push(from);
        self.open.insert(from.0, 0.0);

        while let Some(raw) = self.open.pop_min() {
            let current = GraphNodeId(raw);
            if current == to {
                break;
            }
            expanded += 1;

            let current_cost = self.cost_so_far[current.index()];
            let current_pos = graph.pos(current);

            for &next in graph.neighbors(current) {
                let node = &graph.nodes()[next.index()];
                let edge = self.params.length(node.pos - current_pos)
                    * self.params.terrain_factor(node.cost);
                let new_cost = current_cost + edge;

                let known = self.cost_so_far[next.index()];
                if new_cost < known {
                    if known == UNVISITED {
                        self.touched.push(next);
                    }
                    self.cost_so_far[next.index()] = new_cost;
                    self.came_from[next.index()] = current;
                    let priority = new_cost + self.heuristic(graph, next, &target);
                    self.open.insert(next.0, priority);
                }
            }
        }
        expanded
    }

    fn reconstruct(&self, graph: &NavigationGraph, from: GraphNodeId, to: GraphNodeId) -> Path {
        let mut nodes = vec![to];
        let mut current = to;
        while current != from {
            current = self.came_from[current.index()];
            nodes.push(current);
        }
        nodes.reverse();
        let waypoints = nodes.iter().map(|&id| graph.pos(id)).collect();
        Path {
            nodes,
            waypoints,
            cost: self.cost_so_far[to.index()],
        }
    }
}

impl Pathfinder for AStarPathfinder {
    fn find_path(
        &mut self,
        graph: &NavigationGraph,
        from: GraphNodeId,
        to: GraphNodeId,
    ) -> SpatialResult<Path> {
        for id in [from, to] {
            if !graph.contains(id) {
                return Err(SpatialError::NodeNotFound(id));
            }
        }
        if !graph.is_walkable(from) || !graph.is_walkable(to) {
            return Err(SpatialError::NoPath { from, to });
        }
        if from == to {
            return Ok(Path { nodes: vec![from], waypoints: vec![graph.pos(from)], cost: 0.0 });
        }

        self.prepare(graph.node_count());
        let expanded = self.search(graph, from, to);

        let result = if self.cost_so_far[to.index()] < UNVISITED {
            Ok(self.reconstruct(graph, from, to))
        } else {
            Err(SpatialError::NoPath { from, to })
        };
        log::trace!(
            "A* {from} -> {to}: expanded {expanded}, touched {}, found {}",
            self.touched.len(),
            result.is_ok()
        );

        self.reset();
        result
    }
}
