//! colony: a small Nastrond dwarf colony.
//!
//! Twelve dwarves share one behavior tree (`trees/worker.json`).  At night
//! they walk home; by day they either take a static job at the forge, haul
//! ore from the mine to the storehouse, or wander the cave.  Pass a JSON
//! `SimConfig` path (e.g. `demos/colony/config.json`) as the first argument
//! to override the built-in tuning.

mod map;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use nd_agent::DwarfStore;
use nd_behavior::{BehaviorTree, load_tree_str};
use nd_core::{BuildingId, DayCycle, SimConfig, Tick, Vec2};
use nd_output::{CsvWriter, OutputWriter, SimOutputObserver};
use nd_sim::{SimBuilder, SimObserver, TickStats};
use nd_spatial::{MapLayout, NavigationGraph};

use map::{SITES, TILE, build_cost_map};

// ── Constants ─────────────────────────────────────────────────────────────────

const DWARF_COUNT:           usize = 12;
const SEED:                  u64   = 7;
const TOTAL_TICKS:           u64   = 5_400; // three day/night cycles at 60 ticks/s
const OUTPUT_INTERVAL_TICKS: u64   = 60;    // one snapshot per simulated second
const HAUL_TRIPS:            usize = 6;
const HAUL_QUANTITY:         u32   = 5;
const OUTPUT_DIR:            &str  = "output/colony";

const WORKER_TREE: &str = include_str!("../trees/worker.json");

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    tree_passes:   usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, tree_passes: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.tree_passes += stats.behavior.completed;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, dwarves: &DwarfStore, behavior: &BehaviorTree) {
        self.snapshot_rows += dwarves.live_count();
        self.inner.on_snapshot(tick, dwarves, behavior);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn default_config() -> SimConfig {
    let mut config = SimConfig {
        total_ticks:           TOTAL_TICKS,
        seed:                  SEED,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        day:                   DayCycle { day_ticks: 1_200, night_ticks: 600 },
        ..SimConfig::default()
    };
    config.nav.road_cost_factor = 0.5;
    config
}

fn load_config(path: &str) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {path}"))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {path}"))?;
    log::info!("loaded config from {path}");
    Ok(config)
}

fn site(graph: &NavigationGraph, index: usize) -> Vec2 {
    let (row, col) = SITES[index];
    graph.pos(graph.id_at(row, col))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => default_config(),
    };

    println!("=== colony: Nastrond dwarves ===");
    println!(
        "Dwarves: {DWARF_COUNT}  |  Ticks: {}  |  Seed: {}",
        config.total_ticks, config.seed
    );
    println!();

    // 1. Cave map and navigation graph.
    let cost_map = build_cost_map(config.seed);
    let graph = NavigationGraph::build(&cost_map, MapLayout::orthogonal(TILE, TILE));
    println!(
        "Cave map: {}×{} cells, {} walkable",
        graph.rows(),
        graph.cols(),
        graph.walkable_count()
    );

    // 2. Behavior tree.
    let tree = load_tree_str(WORKER_TREE).context("loading trees/worker.json")?;
    println!("Worker tree: {} nodes, depth {}", tree.len(), tree.depth());

    // 3. Buildings.  Ids follow insertion order.
    let north_hall = site(&graph, 0);
    let south_hall = site(&graph, 1);
    let forge = site(&graph, 2);
    let mine = site(&graph, 3);
    let storehouse = site(&graph, 4);
    let (mine_id, storehouse_id) = (BuildingId(3), BuildingId(4));

    // 4. Dwarves start around the central crossing.
    let centre = storehouse;
    let spawn_points: Vec<Vec2> = (0..DWARF_COUNT)
        .map(|i| {
            let offset = (i as f32 - DWARF_COUNT as f32 / 2.0) * TILE * 0.5;
            Vec2::new(centre.x + offset, centre.y)
        })
        .collect();

    // 5. Build sim.
    let mut builder = SimBuilder::new(config.clone(), graph, tree)
        .dwelling(north_hall, 6)
        .dwelling(south_hall, 6)
        .working_place(forge, 3, true, 0)
        .working_place(mine, 4, false, HAUL_TRIPS as u32 * HAUL_QUANTITY)
        .working_place(storehouse, 4, false, 0);
    for _ in 0..HAUL_TRIPS {
        builder = builder.inventory_task(mine_id, storehouse_id, HAUL_QUANTITY);
    }
    let mut sim = builder.dwarves_at(spawn_points).build()?;

    // 6. Set up output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let inner_obs = SimOutputObserver::new(writer, &config);
    let mut obs = CountingObserver::new(inner_obs);

    // 7. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 8. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  dwarf_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!("  tree passes         : {}", obs.tree_passes);
    println!(
        "  paths served        : {} ({} failed)",
        sim.manager.path_queue().served_total(),
        sim.manager.path_queue().failed_total()
    );
    let stock = |id: BuildingId| sim.manager.buildings.get(id).map_or(0, |b| b.stock);
    println!(
        "  ore                 : mine {}  storehouse {}",
        stock(mine_id),
        stock(storehouse_id)
    );
    println!();

    // 9. Final dwarf table.
    println!("{:<9} {:>8} {:>8} {:<12} {:>7} {:>5}", "Dwarf", "X", "Y", "Inside", "Carried", "Runs");
    println!("{}", "-".repeat(55));
    let dwarves = &sim.manager.dwarves;
    for agent in dwarves.live_ids() {
        let i = agent.index();
        let pos = dwarves.position[i];
        println!(
            "{:<9} {:>8.1} {:>8.1} {:<12} {:>7} {:>5}",
            agent.to_string(),
            pos.x,
            pos.y,
            dwarves.inside[i].to_string(),
            dwarves.carried[i],
            sim.behavior.runs(agent)
        );
    }

    Ok(())
}
