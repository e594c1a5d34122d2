//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use nd_behavior::{BehaviorTree, TreeDef};
use nd_colony::DwarfManager;
use nd_core::{BuildingId, NdError, SimConfig, Vec2};
use nd_spatial::{CostMap, MapLayout, NavigationGraph};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, timestep, seed, navigation and dwarf tuning
/// - [`NavigationGraph`]: or a [`CostMap`] via [`from_cost_map`](Self::from_cost_map)
/// - [`TreeDef`]: the tree every dwarf runs
///
/// # Optional inputs
///
/// | Method                     | Default          |
/// |----------------------------|------------------|
/// | `.dwelling(pos, cap)`      | no dwellings     |
/// | `.working_place(..)`       | no working places|
/// | `.inventory_task(..)`      | empty task board |
/// | `.dwarves_at(iter)`        | no dwarves       |
///
/// Buildings get ids in the order they are added, dwellings and working
/// places sharing one sequence starting at `BuildingId(0)`.
pub struct SimBuilder {
    config: SimConfig,
    graph: NavigationGraph,
    tree: Arc<TreeDef>,
    buildings: Vec<BuildingSpec>,
    tasks: Vec<(BuildingId, BuildingId, u32)>,
    dwarves: Vec<Vec2>,
}

enum BuildingSpec {
    Dwelling { position: Vec2, capacity: u32 },
    WorkingPlace { position: Vec2, capacity: u32, static_job: bool, stock: u32 },
}

impl SimBuilder {
    pub fn new(config: SimConfig, graph: NavigationGraph, tree: impl Into<Arc<TreeDef>>) -> Self {
        Self {
            config,
            graph,
            tree: tree.into(),
            buildings: Vec::new(),
            tasks: Vec::new(),
            dwarves: Vec::new(),
        }
    }

    /// Build the navigation graph from `map` laid out with `layout`.
    pub fn from_cost_map(config: SimConfig, map: &CostMap, layout: MapLayout, tree: impl Into<Arc<TreeDef>>) -> Self {
        Self::new(config, NavigationGraph::build(map, layout), tree)
    }

    pub fn dwelling(mut self, position: Vec2, capacity: u32) -> Self {
        self.buildings.push(BuildingSpec::Dwelling { position, capacity });
        self
    }

    /// A working place starting with `stock` resource units.
    pub fn working_place(mut self, position: Vec2, capacity: u32, static_job: bool, stock: u32) -> Self {
        self.buildings.push(BuildingSpec::WorkingPlace { position, capacity, static_job, stock });
        self
    }

    pub fn inventory_task(mut self, giver: BuildingId, receiver: BuildingId, quantity: u32) -> Self {
        self.tasks.push((giver, receiver, quantity));
        self
    }

    pub fn dwarves_at(mut self, positions: impl IntoIterator<Item = Vec2>) -> Self {
        self.dwarves.extend(positions);
        self
    }

    /// Validate the configuration, place buildings and dwarves, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate().map_err(|e| {
            log::error!("{e}");
            match e {
                NdError::Config(msg) => SimError::Config(msg),
                other => SimError::Config(other.to_string()),
            }
        })?;
        if self.graph.walkable_count() == 0 {
            log::warn!("navigation graph has no walkable cell; every path request will fail");
        }

        let mut manager = DwarfManager::new(self.graph, &self.config);
        for spec in self.buildings {
            match spec {
                BuildingSpec::Dwelling { position, capacity } => {
                    manager.buildings.add_dwelling(position, capacity);
                }
                BuildingSpec::WorkingPlace { position, capacity, static_job, stock } => {
                    let id = manager.buildings.add_working_place(position, capacity, static_job);
                    if let Some(b) = manager.buildings.get_mut(id) {
                        b.stock = stock;
                    }
                }
            }
        }
        for (giver, receiver, quantity) in self.tasks {
            manager.post_inventory_task(giver, receiver, quantity)?;
        }
        for position in self.dwarves {
            manager.spawn_dwarf(position);
        }

        let mut behavior = BehaviorTree::new(self.tree);
        behavior.resize(manager.dwarves.count);

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            manager,
            behavior,
        })
    }
}
