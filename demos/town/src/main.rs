//! town — smallest runnable NPC traffic demo.
//!
//! Keeps a population of cars circulating on a synthetic ring-road town (or
//! a JSON scenario given with `--scenario`) and writes vehicle snapshots and
//! per-tick summaries as CSV.
//!
//! Logging follows `RUST_LOG`, e.g. `RUST_LOG=npc_population=debug`.

mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use npc_agent::{VehicleAgent, VehicleBounds, VehicleConfig, VehicleStore};
use npc_core::{LaneSelection, SimConfig, Tick, VehicleId};
use npc_output::{CsvWriter, OutputWriter, SimOutputObserver};
use npc_population::{SpawnerConfig, VehicleProfile};
use npc_sim::{SimBuilder, SimObserver, TickStats, load_scenario_json};

use network::{SPAWN_LANES, build_town};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "town", about = "NPC background traffic on a small synthetic town")]
struct Args {
    /// JSON scenario to run instead of the built-in town.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulated seconds.
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 0.05)]
    dt: f32,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Live vehicles to keep on the road.
    #[arg(long, default_value_t = 12)]
    population: usize,

    /// Always take the first successor lane instead of a random one.
    #[arg(long)]
    first: bool,

    /// Snapshot every N ticks (0 disables snapshots).
    #[arg(long, default_value_t = 20)]
    snapshot_every: u64,

    /// Pipeline worker threads (default: all logical cores).
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, default_value = "output/town")]
    out: PathBuf,
}

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    spawned:       usize,
    despawned:     usize,
    faults:        usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, spawned: 0, despawned: 0, faults: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.faults += stats.faults;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_spawn(&mut self, _tick: Tick, _vehicle: VehicleId, _agent: &VehicleAgent) {
        self.spawned += 1;
    }

    fn on_despawn(&mut self, _tick: Tick, _vehicle: VehicleId, _agent: &VehicleAgent) {
        self.despawned += 1;
    }

    fn on_snapshot(&mut self, tick: Tick, vehicles: &VehicleStore) {
        self.snapshot_rows += vehicles.len();
        self.inner.on_snapshot(tick, vehicles);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn profiles() -> Vec<VehicleProfile> {
    vec![
        VehicleProfile::new("sedan", VehicleConfig::default(), VehicleBounds::from_length(4.5, 1.8)),
        VehicleProfile::new(
            "van",
            VehicleConfig { acceleration: 2.0, slow_speed: 4.0, ..VehicleConfig::default() },
            VehicleBounds::from_length(5.5, 2.0),
        ),
        VehicleProfile::new(
            "hatchback",
            VehicleConfig { acceleration: 3.5, ..VehicleConfig::default() },
            VehicleBounds::from_length(3.9, 1.7),
        ),
    ]
}

fn builder(args: &Args) -> Result<SimBuilder> {
    let total_ticks = (args.seconds / args.dt).ceil() as u64;
    let lane_selection = if args.first { LaneSelection::First } else { LaneSelection::Random };

    if let Some(path) = &args.scenario {
        let mut scenario = load_scenario_json(path)
            .with_context(|| format!("loading scenario {}", path.display()))?;
        scenario.sim.num_threads = args.threads.or(scenario.sim.num_threads);
        return Ok(scenario.into_builder());
    }

    let config = SimConfig {
        dt_secs: args.dt,
        total_ticks,
        seed: args.seed,
        num_threads: args.threads,
        output_interval_ticks: args.snapshot_every,
        lane_selection,
    };
    let spawner = SpawnerConfig {
        target_population: args.population,
        lanes: SPAWN_LANES.to_vec(),
        profiles: profiles(),
        ..SpawnerConfig::default()
    };
    Ok(SimBuilder::new(config, build_town()?).spawner(spawner))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut sim = builder(&args)?.build()?;
    info!(
        lanes = sim.graph.lane_count(),
        ticks = sim.config.total_ticks,
        target = sim.spawner.config().target_population,
        "town ready"
    );

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let writer = CsvWriter::new(&args.out)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  spawned {}  despawned {}  faults {}", obs.spawned, obs.despawned, obs.faults);
    println!("  vehicle_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv    : {} rows", obs.summary_rows);
    println!();

    println!("{:<14} {:<6} {:<8} {:>8} {:>8} {:<14}", "Vehicle", "Lane", "Mode", "Speed", "Yaw", "Position");
    println!("{}", "-".repeat(64));
    for (id, a) in sim.vehicles.iter() {
        let p = a.control.position;
        println!(
            "{:<14} {:<6} {:<8} {:>8.2} {:>8.1} ({:.1}, {:.1})",
            id.to_string(),
            a.cognition.lane.0,
            a.decision.speed_mode.as_str(),
            a.control.speed,
            a.control.yaw,
            p.x,
            p.z,
        );
    }

    Ok(())
}
