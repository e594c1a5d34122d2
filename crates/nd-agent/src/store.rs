//! Core dwarf storage: `DwarfStore` (SoA data) and `AgentRngs` (per-dwarf RNG).
//!
//! RNGs live outside the store so a system can hold `&mut AgentRngs` while
//! reading positions out of `&DwarfStore`.

use nd_core::{AgentId, AgentRng, BuildingId, Vec2};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-dwarf deterministic RNG state, parallel to [`DwarfStore`].
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    seed: u64,
}

impl AgentRngs {
    /// Allocate and seed `count` per-dwarf RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner, seed: global_seed }
    }

    /// Mutable reference to one dwarf's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    /// Give `agent` a freshly seeded RNG, growing the array if the slot is new.
    pub fn reseed(&mut self, agent: AgentId) {
        while self.inner.len() <= agent.index() {
            let next = AgentId(self.inner.len() as u32);
            self.inner.push(AgentRng::new(self.seed, next));
        }
        self.inner[agent.index()] = AgentRng::new(self.seed, agent);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── PathState ─────────────────────────────────────────────────────────────────

/// Where a dwarf stands with respect to its current path request.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathState {
    /// No request made since spawn.
    #[default]
    None,
    /// A request is queued and no result has been delivered yet.
    Pending,
    /// A result was delivered.  The waypoint list may be empty.
    Ready,
}

impl std::fmt::Display for PathState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PathState::None    => "none",
            PathState::Pending => "pending",
            PathState::Ready   => "ready",
        })
    }
}

// ── DwarfStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all dwarf state.
///
/// Every `Vec` field has exactly `count` elements and `AgentId` is the index
/// into all of them.  Slots whose `live` flag is `false` hold stale data and
/// must not be read.
pub struct DwarfStore {
    /// Number of slots, live or not.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub live: Vec<bool>,

    pub position: Vec<Vec2>,

    /// Remaining waypoints, stored last-to-first so the next one is popped
    /// from the back.
    pub path: Vec<Vec<Vec2>>,

    pub path_state: Vec<PathState>,

    // ── Colony assignments ────────────────────────────────────────────────
    pub dwelling: Vec<BuildingId>,

    pub working_place: Vec<BuildingId>,

    /// Building the dwarf is currently inside.  `INVALID` when outdoors.
    pub inside: Vec<BuildingId>,

    /// Resource units being carried between buildings.
    pub carried: Vec<u32>,

    free_slots: Vec<AgentId>,
}

impl DwarfStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            count:         0,
            live:          Vec::with_capacity(capacity),
            position:      Vec::with_capacity(capacity),
            path:          Vec::with_capacity(capacity),
            path_state:    Vec::with_capacity(capacity),
            dwelling:      Vec::with_capacity(capacity),
            working_place: Vec::with_capacity(capacity),
            inside:        Vec::with_capacity(capacity),
            carried:       Vec::with_capacity(capacity),
            free_slots:    Vec::new(),
        }
    }

    /// `true` if there are no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of live dwarves.
    pub fn live_count(&self) -> usize {
        self.count - self.free_slots.len()
    }

    #[inline]
    pub fn is_live(&self, agent: AgentId) -> bool {
        self.live.get(agent.index()).copied().unwrap_or(false)
    }

    /// Iterator over every slot in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Iterator over live dwarves in ascending index order.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|a| self.live[a.index()])
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Place a new dwarf at `position`, reusing the most recently freed slot
    /// if there is one.  Every field of the slot is reset.
    pub fn spawn(&mut self, position: Vec2) -> AgentId {
        if let Some(agent) = self.free_slots.pop() {
            let i = agent.index();
            self.live[i] = true;
            self.position[i] = position;
            self.path[i].clear();
            self.path_state[i] = PathState::None;
            self.dwelling[i] = BuildingId::INVALID;
            self.working_place[i] = BuildingId::INVALID;
            self.inside[i] = BuildingId::INVALID;
            self.carried[i] = 0;
            return agent;
        }

        let agent = AgentId(self.count as u32);
        self.live.push(true);
        self.position.push(position);
        self.path.push(Vec::new());
        self.path_state.push(PathState::None);
        self.dwelling.push(BuildingId::INVALID);
        self.working_place.push(BuildingId::INVALID);
        self.inside.push(BuildingId::INVALID);
        self.carried.push(0);
        self.count += 1;
        agent
    }

    /// Mark `agent` dead.  Its arrays are left as they are until the slot is
    /// reused.  Returns `false` if the slot was not live.
    pub fn despawn(&mut self, agent: AgentId) -> bool {
        if !self.is_live(agent) {
            return false;
        }
        self.live[agent.index()] = false;
        self.free_slots.push(agent);
        true
    }

    // ── Path helpers ──────────────────────────────────────────────────────

    /// Drop any current path and mark a request as outstanding.
    pub fn mark_path_pending(&mut self, agent: AgentId) {
        let i = agent.index();
        self.path[i].clear();
        self.path_state[i] = PathState::Pending;
    }

    /// Install a delivered path given in origin→destination order.
    pub fn set_path(&mut self, agent: AgentId, waypoints: Vec<Vec2>) {
        let i = agent.index();
        let mut reversed = waypoints;
        reversed.reverse();
        self.path[i] = reversed;
        self.path_state[i] = PathState::Ready;
    }

    #[inline]
    pub fn has_path(&self, agent: AgentId) -> bool {
        self.path_state[agent.index()] == PathState::Ready
    }

    /// `true` once a delivered path has been walked to its end.
    #[inline]
    pub fn is_at_destination(&self, agent: AgentId) -> bool {
        let i = agent.index();
        self.path_state[i] == PathState::Ready && self.path[i].is_empty()
    }

    #[inline]
    pub fn next_waypoint(&self, agent: AgentId) -> Option<Vec2> {
        self.path[agent.index()].last().copied()
    }

    /// Remaining waypoints, next one first.
    pub fn remaining_waypoints(&self, agent: AgentId) -> impl Iterator<Item = Vec2> + '_ {
        self.path[agent.index()].iter().rev().copied()
    }
}
