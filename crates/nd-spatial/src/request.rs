//! Per-tick bounded path request dispatcher.
//!
//! Agents call [`PathRequestQueue::ask_for_path`] whenever they like; the
//! expensive search runs only in [`PathRequestQueue::update`], which serves
//! at most `max_per_update` requests per call, oldest first.  A request that
//! has waited behind `k` others is served within `k / max_per_update + 1`
//! updates.

use std::collections::VecDeque;

use nd_core::{AgentId, NavConfig, Vec2};

use crate::cost_map::CostMap;
use crate::graph::NavigationGraph;
use crate::pathfinder::{AStarPathfinder, Pathfinder};
use crate::SpatialError;

/// A queued request, created by `ask_for_path` and consumed by `update`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathRequest {
    pub agent: AgentId,
    pub origin: Vec2,
    pub destination: Vec2,
}

/// Receiver of computed paths.
pub trait PathSink {
    /// `waypoints` run origin→destination.  An empty list means no path
    /// could be found; the consumer must treat it as "nowhere to walk".
    fn set_path(&mut self, agent: AgentId, waypoints: Vec<Vec2>);
}

impl<F: FnMut(AgentId, Vec<Vec2>)> PathSink for F {
    fn set_path(&mut self, agent: AgentId, waypoints: Vec<Vec2>) {
        self(agent, waypoints)
    }
}

pub struct PathRequestQueue<P: Pathfinder = AStarPathfinder> {
    graph: NavigationGraph,
    pathfinder: P,
    waiting: VecDeque<PathRequest>,
    max_per_update: usize,
    served: u64,
    failed: u64,
}

impl PathRequestQueue<AStarPathfinder> {
    /// Queue backed by an [`AStarPathfinder`] configured from `cfg`.
    pub fn from_config(graph: NavigationGraph, cfg: &NavConfig) -> Self {
        Self::new(graph, AStarPathfinder::from_config(cfg), cfg.max_paths_per_update)
    }
}

impl<P: Pathfinder> PathRequestQueue<P> {
    /// `max_per_update` is clamped to at least 1.
    pub fn new(graph: NavigationGraph, pathfinder: P, max_per_update: usize) -> Self {
        Self {
            graph,
            pathfinder,
            waiting: VecDeque::new(),
            max_per_update: max_per_update.max(1),
            served: 0,
            failed: 0,
        }
    }

    /// Enqueue a request.  Never searches.
    pub fn ask_for_path(&mut self, agent: AgentId, origin: Vec2, destination: Vec2) {
        self.waiting.push_back(PathRequest { agent, origin, destination });
    }

    /// Serve up to `max_per_update` requests in arrival order, handing each
    /// result to `sink`.  Returns the number served; an empty queue returns
    /// 0 without touching anything.
    pub fn update<S: PathSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let budget = self.max_per_update.min(self.waiting.len());
        for _ in 0..budget {
            let Some(req) = self.waiting.pop_front() else { break };
            let waypoints = match self.pathfinder.find_path_between(&self.graph, req.origin, req.destination) {
                Ok(path) => path.waypoints,
                Err(SpatialError::NoPath { from, to }) => {
                    log::debug!("{}: no path from {from} to {to}", req.agent);
                    self.failed += 1;
                    Vec::new()
                }
                Err(e) => {
                    log::warn!("{}: path request failed: {e}", req.agent);
                    self.failed += 1;
                    Vec::new()
                }
            };
            sink.set_path(req.agent, waypoints);
            self.served += 1;
        }
        budget
    }

    /// Requests still waiting.
    #[inline]
    pub fn pending(&self) -> usize {
        self.waiting.len()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn waiting(&self) -> impl Iterator<Item = &PathRequest> {
        self.waiting.iter()
    }

    #[inline]
    pub fn max_per_update(&self) -> usize {
        self.max_per_update
    }

    /// Requests served since construction, including failures.
    #[inline]
    pub fn served_total(&self) -> u64 {
        self.served
    }

    /// Served requests that produced no path.
    #[inline]
    pub fn failed_total(&self) -> u64 {
        self.failed
    }

    #[inline]
    pub fn graph(&self) -> &NavigationGraph {
        &self.graph
    }

    pub fn pathfinder(&self) -> &P {
        &self.pathfinder
    }

    /// Rebuild the graph from a new cost map.  Queued requests are kept;
    /// they carry positions, not node ids.
    pub fn rebuild(&mut self, map: &CostMap) {
        self.graph.rebuild(map);
    }
}
