//! The collaborator behavior-tree leaves act on.

use nd_core::{AgentId, BuildingId, Vec2};

/// Everything leaves may ask of the world.
///
/// Every call is synchronous and must not block.  Methods returning `bool`
/// report whether the action took place (or the query holds); the leaf maps
/// `true` to SUCCESS and `false` to FAIL.  Requests that complete later
/// (paths, movement) are enqueued here and observed on later ticks through
/// [`has_path`](Self::has_path) and
/// [`is_at_destination`](Self::is_at_destination).
pub trait DwarfWorld {
    // ── Population ────────────────────────────────────────────────────────

    /// Length of the agent array, live or not.
    fn agent_count(&self) -> usize;

    /// `false` for removed agents; they are skipped without being stepped.
    fn is_live(&self, agent: AgentId) -> bool;

    /// Move agents that must be woken this tick into `woken`.  Agents sleep
    /// after a `WaitForPath` leaf finds no path yet, and the world wakes
    /// them when one is delivered.
    fn drain_wake_ups(&mut self, woken: &mut Vec<AgentId>);

    // ── Paths and movement ────────────────────────────────────────────────

    /// A requested path has been delivered (possibly empty).
    fn has_path(&self, agent: AgentId) -> bool;

    /// The delivered path has been walked to its end.
    fn is_at_destination(&self, agent: AgentId) -> bool;

    /// Move `agent` along its path during this tick's world update.
    fn add_path_following(&mut self, agent: AgentId);

    /// Request a path to a random reachable position.
    fn add_find_random_path(&mut self, agent: AgentId) -> bool;

    /// Request a path to `destination`.
    fn add_find_path_to_destination(&mut self, agent: AgentId, destination: Vec2);

    /// Request a path to the giver of the agent's inventory task.
    fn add_inventory_task_path_to_giver(&mut self, agent: AgentId) -> bool;

    /// Request a path to the receiver of the agent's inventory task.
    fn add_inventory_task_path_to_receiver(&mut self, agent: AgentId) -> bool;

    // ── Dwelling ──────────────────────────────────────────────────────────

    fn dwelling(&self, agent: AgentId) -> Option<BuildingId>;

    fn dwelling_position(&self, agent: AgentId) -> Option<Vec2>;

    /// Reserve a free dwelling slot for `agent`.
    fn assign_dwelling(&mut self, agent: AgentId) -> bool;

    fn enter_dwelling(&mut self, agent: AgentId) -> bool;

    fn exit_dwelling(&mut self, agent: AgentId) -> bool;

    // ── Work ──────────────────────────────────────────────────────────────

    fn has_job(&self, agent: AgentId) -> bool;

    /// The agent's job is at a building it stays in while working.
    fn has_static_job(&self, agent: AgentId) -> bool;

    /// Reserve a free job slot for `agent`.
    fn assign_job(&mut self, agent: AgentId) -> bool;

    fn working_place_position(&self, agent: AgentId) -> Option<Vec2>;

    fn enter_working_place(&mut self, agent: AgentId) -> bool;

    fn exit_working_place(&mut self, agent: AgentId) -> bool;

    // ── Inventory tasks ───────────────────────────────────────────────────

    /// Take the next open inventory task, if any.
    fn ask_inventory_task(&mut self, agent: AgentId) -> bool;

    fn take_resources(&mut self, agent: AgentId) -> bool;

    fn put_resources(&mut self, agent: AgentId) -> bool;

    // ── Time of day ───────────────────────────────────────────────────────

    fn is_day_time(&self) -> bool;

    fn is_night_time(&self) -> bool;
}
