//! The `Sim` struct and its tick loop.

use nd_behavior::{BehaviorTree, BtTickStats};
use nd_colony::{ColonyTickStats, DwarfManager};
use nd_core::{AgentId, SimClock, SimConfig, Tick, Vec2};

use crate::{SimObserver, SimResult};

/// What one tick did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub behavior: BtTickStats,
    pub colony: ColonyTickStats,
}

/// The main simulation runner.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, seed, timestep, …).
    pub config: SimConfig,

    pub clock: SimClock,

    /// Dwarves, buildings, path queue.  Implements `DwarfWorld`.
    pub manager: DwarfManager,

    /// One shared tree, one interpreter state per dwarf slot.
    pub behavior: BehaviorTree,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        log::info!(
            "running {} dwarves from {} to {}",
            self.manager.dwarves.live_count(),
            self.clock.current_tick,
            self.config.end_tick()
        );
        let mut completed = 0usize;
        while self.clock.current_tick < self.config.end_tick() {
            completed += self.step(observer).behavior.completed;
        }
        observer.on_sim_end(self.clock.current_tick);
        log::info!(
            "finished at {}: {} tree passes, {} paths served ({} failed)",
            self.clock,
            completed,
            self.manager.path_queue().served_total(),
            self.manager.path_queue().failed_total()
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Add a dwarf mid-run.  A recycled slot starts the tree from the root.
    pub fn spawn_dwarf(&mut self, position: Vec2) -> AgentId {
        let agent = self.manager.spawn_dwarf(position);
        self.behavior.reset_agent(agent);
        agent
    }

    pub fn destroy_dwarf(&mut self, agent: AgentId) -> SimResult<()> {
        self.manager.destroy_dwarf(agent)?;
        Ok(())
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> TickStats {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let stats = self.process_tick(now);
        observer.on_tick_end(now, &stats);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.manager.dwarves, &self.behavior);
        }
        self.clock.advance();
        stats
    }

    fn process_tick(&mut self, now: Tick) -> TickStats {
        self.manager.set_now(now);
        let behavior = self.behavior.update(&mut self.manager);
        let colony = self.manager.fixed_update(now);
        TickStats { behavior, colony }
    }
}
