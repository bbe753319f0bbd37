//! Fluent builder for constructing a [`TrafficSim`].

use tracing::info;

use npc_agent::{VehicleRngs, VehicleStore};
use npc_behavior::{NoTrafficLight, NoYielding, TrafficSignal, TrafficSnapshot, YieldPhaseSource};
use npc_core::{SimConfig, SimRng};
use npc_lane::LaneGraph;
use npc_population::{Spawner, SpawnerConfig};

use crate::{SimResult, TrafficSim};

/// Stream offset of the spawner's RNG within the run's master seed.
const SPAWNER_STREAM: u64 = 1;

/// Fluent builder for [`TrafficSim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: dt, total ticks, seed, lane selection, …
/// - [`LaneGraph`]: from [`npc_lane::LaneGraphBuilder`] or a scenario file
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                 |
/// |-------------------|-----------------------------------------|
/// | `.spawner(c)`     | `SpawnerConfig::default()` (target 0)   |
/// | `.signal(s)`      | `NoTrafficLight`                        |
/// | `.yielding(y)`    | `NoYielding`                            |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, graph)
///     .spawner(spawner_config)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    graph:    LaneGraph,
    spawner:  SpawnerConfig,
    signal:   Box<dyn TrafficSignal>,
    yielding: Box<dyn YieldPhaseSource>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, graph: LaneGraph) -> Self {
        Self {
            config,
            graph,
            spawner:  SpawnerConfig::default(),
            signal:   Box::new(NoTrafficLight),
            yielding: Box::new(NoYielding),
        }
    }

    /// Population target, spawnable lanes and vehicle profiles.
    pub fn spawner(mut self, spawner: SpawnerConfig) -> Self {
        self.spawner = spawner;
        self
    }

    /// Traffic-light collaborator consulted during decision.
    pub fn signal(mut self, signal: impl TrafficSignal + 'static) -> Self {
        self.signal = Box::new(signal);
        self
    }

    /// Yield-phase producer consulted during decision.
    pub fn yielding(mut self, yielding: impl YieldPhaseSource + 'static) -> Self {
        self.yielding = Box::new(yielding);
        self
    }

    /// Validate inputs, derive the RNG streams and return a ready-to-run
    /// [`TrafficSim`].
    pub fn build(self) -> SimResult<TrafficSim> {
        self.config.validate()?;
        self.spawner.validate(&self.graph)?;

        let mut master = SimRng::new(self.config.seed);
        let spawner = Spawner::new(
            self.spawner,
            master.child(SPAWNER_STREAM),
            self.config.lane_selection,
        );

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| crate::SimError::Config(e.to_string()))?,
            ),
            None => None,
        };

        info!(
            lanes = self.graph.lane_count(),
            target = spawner.config().target_population,
            selection = %self.config.lane_selection,
            "simulation built"
        );

        Ok(TrafficSim {
            clock:    self.config.make_clock(),
            rngs:     VehicleRngs::new(self.config.seed),
            config:   self.config,
            graph:    self.graph,
            vehicles: VehicleStore::new(),
            spawner,
            signal:   self.signal,
            yielding: self.yielding,
            snapshot: TrafficSnapshot::new(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
