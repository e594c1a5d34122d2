//! Grid navigation graph.
//!
//! # Construction
//!
//! One [`GraphNode`] per cost-map cell, in row-major order, so
//! `GraphNodeId(row * cols + col)`.  For each non-solid cell the 8 surrounding
//! cells are scanned:
//!
//! - out-of-bounds and solid cells are skipped;
//! - cardinal neighbours are linked;
//! - a diagonal neighbour is linked only when both orthogonal cells flanking
//!   the move are non-solid, so paths never cut a solid corner.
//!
//! Solid cells keep a node (ids stay dense) but have no neighbours.  The rule
//! is symmetric, so `a` lists `b` exactly when `b` lists `a`.
//!
//! # Nearest-node queries
//!
//! `nearest_walkable` is a linear scan over walkable nodes.  Requests are
//! rate-limited per tick, so a spatial index has not been worth its upkeep.

use nd_core::{GraphNodeId, Vec2};

use crate::cost_map::{CostClass, CostMap};
use crate::layout::MapLayout;

/// One cell of the navigation grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub cost: CostClass,
    /// Linked cells, in scan order (row offset, then column offset).
    pub neighbors: Vec<GraphNodeId>,
    /// World-space centre of the cell.
    pub pos: Vec2,
}

#[derive(Clone, Debug)]
pub struct NavigationGraph {
    nodes: Vec<GraphNode>,
    rows: usize,
    cols: usize,
    layout: MapLayout,
    step_unit: f32,
    walkable: usize,
}

impl NavigationGraph {
    /// Build a graph from `map`, placing cells with `layout`.
    pub fn build(map: &CostMap, layout: MapLayout) -> Self {
        let (rows, cols) = (map.rows(), map.cols());
        let mut nodes = Vec::with_capacity(rows * cols);
        let mut walkable = 0;

        for row in 0..rows {
            for col in 0..cols {
                let cost = map.get(row, col);
                let neighbors = if cost.is_solid() {
                    Vec::new()
                } else {
                    walkable += 1;
                    scan_neighbors(map, row, col)
                };
                nodes.push(GraphNode {
                    cost,
                    neighbors,
                    pos: layout.cell_center(row, col),
                });
            }
        }

        log::debug!(
            "built {rows}x{cols} navigation graph: {walkable} walkable, {} edges",
            nodes.iter().map(|n| n.neighbors.len()).sum::<usize>()
        );

        Self {
            nodes,
            rows,
            cols,
            layout,
            step_unit: layout.step_unit(),
            walkable,
        }
    }

    /// Replace every node from a new cost map, keeping the layout.
    /// Node ids from the previous graph are invalidated.
    pub fn rebuild(&mut self, map: &CostMap) {
        *self = Self::build(map, self.layout);
    }

    // ── Shape ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn walkable_count(&self) -> usize {
        self.walkable
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    /// See [`MapLayout::step_unit`].
    #[inline]
    pub fn step_unit(&self) -> f32 {
        self.step_unit
    }

    // ── Node access ───────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: GraphNodeId) -> bool {
        id.index() < self.nodes.len()
    }

    #[inline]
    pub fn node(&self, id: GraphNodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    #[inline]
    pub fn neighbors(&self, id: GraphNodeId) -> &[GraphNodeId] {
        &self.nodes[id.index()].neighbors
    }

    #[inline]
    pub fn pos(&self, id: GraphNodeId) -> Vec2 {
        self.nodes[id.index()].pos
    }

    #[inline]
    pub fn cost(&self, id: GraphNodeId) -> CostClass {
        self.nodes[id.index()].cost
    }

    #[inline]
    pub fn is_walkable(&self, id: GraphNodeId) -> bool {
        self.node(id).is_some_and(|n| !n.cost.is_solid())
    }

    /// `true` if `b` is in `a`'s neighbour list.
    pub fn has_edge(&self, a: GraphNodeId, b: GraphNodeId) -> bool {
        self.node(a).is_some_and(|n| n.neighbors.contains(&b))
    }

    #[inline]
    pub fn id_at(&self, row: usize, col: usize) -> GraphNodeId {
        GraphNodeId((row * self.cols + col) as u32)
    }

    /// `(row, col)` of a node.
    #[inline]
    pub fn coords(&self, id: GraphNodeId) -> (usize, usize) {
        (id.index() / self.cols, id.index() % self.cols)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Walkable node whose centre is closest to `pos`.  Ties go to the lower
    /// id.  `None` if nothing is walkable.
    pub fn nearest_walkable(&self, pos: Vec2) -> Option<GraphNodeId> {
        let mut best: Option<(GraphNodeId, f32)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.cost.is_solid() {
                continue;
            }
            let d = node.pos.distance_sq(pos);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((GraphNodeId(i as u32), d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Nearest walkable nodes to `origin` and `destination` in one pass.
    pub fn nearest_pair(&self, origin: Vec2, destination: Vec2) -> Option<(GraphNodeId, GraphNodeId)> {
        let mut best_origin: Option<(GraphNodeId, f32)> = None;
        let mut best_dest: Option<(GraphNodeId, f32)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.cost.is_solid() {
                continue;
            }
            let id = GraphNodeId(i as u32);
            let d_origin = node.pos.distance_sq(origin);
            if best_origin.is_none_or(|(_, bd)| d_origin < bd) {
                best_origin = Some((id, d_origin));
            }
            let d_dest = node.pos.distance_sq(destination);
            if best_dest.is_none_or(|(_, bd)| d_dest < bd) {
                best_dest = Some((id, d_dest));
            }
        }
        Some((best_origin?.0, best_dest?.0))
    }

    /// Axis-aligned box around every walkable node centre.
    pub fn walkable_bounds(&self) -> Option<(Vec2, Vec2)> {
        self.nodes
            .iter()
            .filter(|n| !n.cost.is_solid())
            .fold(None, |acc, n| match acc {
                None => Some((n.pos, n.pos)),
                Some((lo, hi)) => Some((lo.min(n.pos), hi.max(n.pos))),
            })
    }
}

fn scan_neighbors(map: &CostMap, row: usize, col: usize) -> Vec<GraphNodeId> {
    let (r, c) = (row as i64, col as i64);
    let cols = map.cols() as i64;
    let mut out = Vec::with_capacity(8);

    for dr in -1..=1_i64 {
        for dc in -1..=1_i64 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (nr, nc) = (r + dr, c + dc);
            if map.get_checked(nr, nc).is_solid() {
                continue;
            }
            let diagonal = dr != 0 && dc != 0;
            if diagonal && (map.get_checked(r + dr, c).is_solid() || map.get_checked(r, c + dc).is_solid()) {
                continue;
            }
            out.push(GraphNodeId((nr * cols + nc) as u32));
        }
    }
    out
}
