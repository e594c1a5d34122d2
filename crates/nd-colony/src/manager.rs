//! `DwarfManager`: owns the dwarves and everything they interact with.

use nd_agent::{AgentRngs, DwarfStore, DwarfStoreBuilder, PathState};
use nd_behavior::DwarfWorld;
use nd_core::{AgentId, BuildingId, DayCycle, DistanceMetric, DwarfConfig, SimConfig, Tick, Vec2};
use nd_spatial::{CostMap, NavigationGraph, PathRequestQueue, PathSink};

use crate::buildings::{Building, BuildingKind, BuildingRegistry};
use crate::movement::{follow_paths, MoveStats};
use crate::tasks::{InventoryTask, TaskBoard};
use crate::{ColonyError, ColonyResult};

/// Counts from one [`DwarfManager::fixed_update`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ColonyTickStats {
    pub paths_served: usize,
    pub moved: usize,
    pub arrived: usize,
}

pub struct DwarfManager {
    pub dwarves: DwarfStore,
    pub rngs: AgentRngs,
    pub buildings: BuildingRegistry,
    pub tasks: TaskBoard,

    paths: PathRequestQueue,
    day: DayCycle,
    now: Tick,
    dwarf_cfg: DwarfConfig,
    metric: DistanceMetric,
    fixed_dt_secs: f32,

    /// Path requests still queued per dwarf slot.  Only the last one to be
    /// served is installed.
    outstanding: Vec<u32>,
    /// Task each dwarf is currently carrying out.
    assigned_task: Vec<Option<InventoryTask>>,
    /// Dwarves whose `MoveTo` leaf ran this tick.
    following: Vec<AgentId>,
    wake_ups: Vec<AgentId>,
}

impl DwarfManager {
    /// Empty colony on `graph`.
    pub fn new(graph: NavigationGraph, cfg: &SimConfig) -> Self {
        let (dwarves, rngs) = DwarfStoreBuilder::new(cfg.seed).build();
        Self {
            dwarves,
            rngs,
            buildings: BuildingRegistry::new(),
            tasks: TaskBoard::new(),
            paths: PathRequestQueue::from_config(graph, &cfg.nav),
            day: cfg.day,
            now: Tick::ZERO,
            dwarf_cfg: cfg.dwarf.clone(),
            metric: cfg.nav.distance_metric,
            fixed_dt_secs: cfg.fixed_dt_secs,
            outstanding: Vec::new(),
            assigned_task: Vec::new(),
            following: Vec::new(),
            wake_ups: Vec::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    pub fn spawn_dwarf(&mut self, position: Vec2) -> AgentId {
        let agent = self.dwarves.spawn(position);
        self.rngs.reseed(agent);
        let len = self.dwarves.count;
        self.outstanding.resize(len, 0);
        self.assigned_task.resize(len, None);
        self.assigned_task[agent.index()] = None;
        log::debug!("spawned {agent} at ({:.1}, {:.1})", position.x, position.y);
        agent
    }

    /// Remove a dwarf, giving back its building slots and reposting any task
    /// it was carrying out.  Its queued path requests are discarded on
    /// delivery.
    pub fn destroy_dwarf(&mut self, agent: AgentId) -> ColonyResult<()> {
        if !self.dwarves.is_live(agent) {
            return Err(ColonyError::DeadDwarf(agent));
        }
        let i = agent.index();
        let inside = self.dwarves.inside[i];
        if inside.is_valid() {
            self.buildings.exit(inside);
        }
        for building in [self.dwarves.dwelling[i], self.dwarves.working_place[i]] {
            if building.is_valid() {
                self.buildings.release(building);
            }
        }
        if let Some(task) = self.assigned_task[i].take() {
            self.tasks.repost(task);
        }
        self.dwarves.despawn(agent);
        log::debug!("destroyed {agent}");
        Ok(())
    }

    pub fn post_inventory_task(&mut self, giver: BuildingId, receiver: BuildingId, quantity: u32) -> ColonyResult<()> {
        for id in [giver, receiver] {
            if self.buildings.get(id).is_none() {
                return Err(ColonyError::UnknownBuilding(id));
            }
        }
        if giver == receiver {
            return Err(ColonyError::SelfDelivery(giver));
        }
        self.tasks.post(InventoryTask { giver, receiver, quantity });
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    #[inline]
    pub fn graph(&self) -> &NavigationGraph {
        self.paths.graph()
    }

    #[inline]
    pub fn path_queue(&self) -> &PathRequestQueue {
        &self.paths
    }

    pub fn assigned_task(&self, agent: AgentId) -> Option<InventoryTask> {
        self.assigned_task.get(agent.index()).copied().flatten()
    }

    /// Swap the walkable map, e.g. after construction.  Queued requests are
    /// served against the new graph.
    pub fn rebuild_map(&mut self, map: &CostMap) {
        self.paths.rebuild(map);
        log::info!("navigation graph rebuilt: {} walkable cells", self.paths.graph().walkable_count());
    }

    // ── Per tick ──────────────────────────────────────────────────────────

    /// Set the clock leaves read time of day from.  Called before the
    /// behavior tree runs so both see the same tick.
    pub fn set_now(&mut self, tick: Tick) {
        self.now = tick;
    }

    /// Serve queued path requests, wake the dwarves that got one, and move
    /// every dwarf whose `MoveTo` leaf ran this tick.
    pub fn fixed_update(&mut self, tick: Tick) -> ColonyTickStats {
        self.now = tick;

        let mut delivery = PathDelivery {
            dwarves: &mut self.dwarves,
            outstanding: &mut self.outstanding,
            woken: &mut self.wake_ups,
        };
        let paths_served = self.paths.update(&mut delivery);

        let MoveStats { moved, arrived } = follow_paths(
            &mut self.dwarves,
            &self.following,
            self.dwarf_cfg.speed * self.fixed_dt_secs,
            self.dwarf_cfg.stopping_distance,
            self.metric,
        );
        self.following.clear();

        ColonyTickStats { paths_served, moved, arrived }
    }

    /// Queue a path from the dwarf's position to `destination`.
    fn request_path(&mut self, agent: AgentId, destination: Vec2) {
        let i = agent.index();
        self.dwarves.mark_path_pending(agent);
        self.outstanding[i] += 1;
        self.paths.ask_for_path(agent, self.dwarves.position[i], destination);
    }

    fn home(&self, agent: AgentId) -> Option<(BuildingId, &Building)> {
        self.buildings.lookup(&self.dwarves.dwelling, agent)
    }

    fn work(&self, agent: AgentId) -> Option<(BuildingId, &Building)> {
        self.buildings.lookup(&self.dwarves.working_place, agent)
    }

    /// Entering the building the dwarf is already in succeeds without
    /// counting it twice.
    fn enter(&mut self, agent: AgentId, building: BuildingId) -> bool {
        let i = agent.index();
        if !building.is_valid() {
            return false;
        }
        if self.dwarves.inside[i] == building {
            return true;
        }
        if self.dwarves.inside[i].is_valid() || !self.buildings.enter(building) {
            return false;
        }
        self.dwarves.inside[i] = building;
        true
    }

    fn exit(&mut self, agent: AgentId, building: BuildingId) -> bool {
        let i = agent.index();
        if !building.is_valid() || self.dwarves.inside[i] != building || !self.buildings.exit(building) {
            return false;
        }
        self.dwarves.inside[i] = BuildingId::INVALID;
        true
    }

    fn task_path(&mut self, agent: AgentId, endpoint: fn(&InventoryTask) -> BuildingId) -> bool {
        let Some(task) = self.assigned_task(agent) else { return false };
        let Some(pos) = self.buildings.get(endpoint(&task)).map(|b| b.position) else {
            return false;
        };
        self.request_path(agent, pos);
        true
    }
}

/// Installs served paths into the store.  Borrows only the store and two
/// side arrays so the queue can be borrowed mutably at the same time.
struct PathDelivery<'a> {
    dwarves: &'a mut DwarfStore,
    outstanding: &'a mut [u32],
    woken: &'a mut Vec<AgentId>,
}

impl PathSink for PathDelivery<'_> {
    fn set_path(&mut self, agent: AgentId, waypoints: Vec<Vec2>) {
        let Some(left) = self.outstanding.get_mut(agent.index()) else { return };
        *left = left.saturating_sub(1);
        if *left > 0
            || !self.dwarves.is_live(agent)
            || self.dwarves.path_state[agent.index()] != PathState::Pending
        {
            return;
        }
        self.dwarves.set_path(agent, waypoints);
        self.woken.push(agent);
    }
}

// ── DwarfWorld ────────────────────────────────────────────────────────────────

impl DwarfWorld for DwarfManager {
    fn agent_count(&self) -> usize {
        self.dwarves.count
    }

    fn is_live(&self, agent: AgentId) -> bool {
        self.dwarves.is_live(agent)
    }

    fn drain_wake_ups(&mut self, woken: &mut Vec<AgentId>) {
        woken.append(&mut self.wake_ups);
    }

    fn has_path(&self, agent: AgentId) -> bool {
        self.dwarves.has_path(agent)
    }

    fn is_at_destination(&self, agent: AgentId) -> bool {
        self.dwarves.is_at_destination(agent)
    }

    fn add_path_following(&mut self, agent: AgentId) {
        self.following.push(agent);
    }

    fn add_find_random_path(&mut self, agent: AgentId) -> bool {
        let Some((lo, hi)) = self.paths.graph().walkable_bounds() else {
            log::warn!("{agent}: no walkable cell to wander to");
            return false;
        };
        let destination = self.rngs.get_mut(agent).point_in(lo, hi);
        self.request_path(agent, destination);
        true
    }

    fn add_find_path_to_destination(&mut self, agent: AgentId, destination: Vec2) {
        self.request_path(agent, destination);
    }

    fn add_inventory_task_path_to_giver(&mut self, agent: AgentId) -> bool {
        self.task_path(agent, |t| t.giver)
    }

    fn add_inventory_task_path_to_receiver(&mut self, agent: AgentId) -> bool {
        self.task_path(agent, |t| t.receiver)
    }

    // ── Dwelling ──────────────────────────────────────────────────────────

    fn dwelling(&self, agent: AgentId) -> Option<BuildingId> {
        self.home(agent).map(|(id, _)| id)
    }

    fn dwelling_position(&self, agent: AgentId) -> Option<Vec2> {
        self.home(agent).map(|(_, b)| b.position)
    }

    fn assign_dwelling(&mut self, agent: AgentId) -> bool {
        if self.dwelling(agent).is_some() {
            return true;
        }
        match self.buildings.reserve(Building::is_dwelling) {
            Some(id) => {
                self.dwarves.dwelling[agent.index()] = id;
                log::debug!("{agent} moved into {id}");
                true
            }
            None => false,
        }
    }

    fn enter_dwelling(&mut self, agent: AgentId) -> bool {
        let home = self.dwarves.dwelling[agent.index()];
        self.enter(agent, home)
    }

    fn exit_dwelling(&mut self, agent: AgentId) -> bool {
        let home = self.dwarves.dwelling[agent.index()];
        self.exit(agent, home)
    }

    // ── Work ──────────────────────────────────────────────────────────────

    fn has_job(&self, agent: AgentId) -> bool {
        self.work(agent).is_some()
    }

    fn has_static_job(&self, agent: AgentId) -> bool {
        self.work(agent)
            .is_some_and(|(_, b)| b.kind == BuildingKind::WorkingPlace { static_job: true })
    }

    fn assign_job(&mut self, agent: AgentId) -> bool {
        if self.has_job(agent) {
            return true;
        }
        match self.buildings.reserve(Building::is_working_place) {
            Some(id) => {
                self.dwarves.working_place[agent.index()] = id;
                log::debug!("{agent} got a job at {id}");
                true
            }
            None => false,
        }
    }

    fn working_place_position(&self, agent: AgentId) -> Option<Vec2> {
        self.work(agent).map(|(_, b)| b.position)
    }

    fn enter_working_place(&mut self, agent: AgentId) -> bool {
        let work = self.dwarves.working_place[agent.index()];
        self.enter(agent, work)
    }

    fn exit_working_place(&mut self, agent: AgentId) -> bool {
        let work = self.dwarves.working_place[agent.index()];
        self.exit(agent, work)
    }

    // ── Inventory tasks ───────────────────────────────────────────────────

    fn ask_inventory_task(&mut self, agent: AgentId) -> bool {
        let slot = &mut self.assigned_task[agent.index()];
        if slot.is_some() {
            return true;
        }
        *slot = self.tasks.take();
        slot.is_some()
    }

    fn take_resources(&mut self, agent: AgentId) -> bool {
        let i = agent.index();
        let Some(task) = self.assigned_task[i] else { return false };
        let Some(giver) = self.buildings.get_mut(task.giver) else { return false };
        let wanted = task.quantity.saturating_sub(self.dwarves.carried[i]);
        let moved = wanted.min(giver.stock);
        if moved == 0 {
            return false;
        }
        giver.stock -= moved;
        self.dwarves.carried[i] += moved;
        true
    }

    fn put_resources(&mut self, agent: AgentId) -> bool {
        let i = agent.index();
        let Some(task) = self.assigned_task[i] else { return false };
        let carried = self.dwarves.carried[i];
        if carried == 0 {
            return false;
        }
        let Some(receiver) = self.buildings.get_mut(task.receiver) else { return false };
        receiver.stock += carried;
        self.dwarves.carried[i] = 0;
        self.assigned_task[i] = None;
        log::debug!("{agent} delivered {carried} to {}", task.receiver);
        true
    }

    // ── Time of day ───────────────────────────────────────────────────────

    fn is_day_time(&self) -> bool {
        self.day.is_day(self.now)
    }

    fn is_night_time(&self) -> bool {
        self.day.is_night(self.now)
    }
}
