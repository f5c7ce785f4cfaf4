//! Simulation driver: seed, step, stop.
//!
//! A [`Simulation`] owns one grid with its links, rules and region. All
//! state changes happen through `reset`, `step`, `toggle_neighborhood`,
//! `regenerate_rules` and `block`; a step is never partially visible.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::config::SimConfig;
use crate::error::GrowthError;
use crate::state::{Phase, SimulationState, StepReport, StopReason};

use super::accounting;
use super::grid::{Cell, Coord, Dims, Grid};
use super::links::LinkSet;
use super::region::{extract_region, Bounds, Region};
use super::rules::{BirthCounts, RuleTable, Rules};
use super::seed::{self, SeedPattern, SeedSnapshot};
use super::stepping::{collect_births, CountSource};
use super::topology::{Neighborhood, Topology};

pub struct Simulation {
    config: SimConfig,
    grid: Grid,
    /// Built at every reset, rebuilt on toggle.
    links: Option<LinkSet>,
    rules: Rules,
    region: Region,
    phase: Phase,
    neighborhood: Neighborhood,
    generation: u64,
    /// Write layer of a layered run; always 0 otherwise.
    layer: usize,
    seed: SeedSnapshot,
    rng: ChaCha12Rng,
    thread_pool: rayon::ThreadPool,
}

fn build_pool(threads: usize) -> Result<rayon::ThreadPool, GrowthError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .or_else(|_| rayon::ThreadPoolBuilder::new().num_threads(1).build())
        .map_err(|_| GrowthError::InvalidConfig("could not start worker threads"))
}

fn rules_for(config: &SimConfig) -> Rules {
    match config.topology {
        Topology::Hex2D => Rules::Counts(BirthCounts::from_counts(&config.hex_birth)),
        Topology::Layered2D => Rules::Counts(BirthCounts::from_counts(&config.layered_birth)),
        Topology::Cubic3D => Rules::Table(RuleTable::generate(
            config.rule_seed,
            config.von_neumann_probability,
            config.moore_probability,
        )),
    }
}

impl Simulation {
    /// Validate `config`, allocate the grid and plant the configured seed.
    pub fn new(config: SimConfig) -> Result<Self, GrowthError> {
        if let Err(err) = config.validate() {
            warn!("configuration rejected: {err}");
            return Err(err);
        }

        let topology = config.topology;
        let grid = Grid::new(topology, config.grid_size);
        let region = Region::centered(topology, grid.dims());
        let mut sim = Simulation {
            grid,
            links: None,
            rules: rules_for(&config),
            region,
            phase: Phase::Seeded,
            neighborhood: config.neighborhood,
            generation: 0,
            layer: 0,
            seed: SeedSnapshot::default(),
            rng: ChaCha12Rng::seed_from_u64(config.rng_seed),
            thread_pool: build_pool(config.threads)?,
            config,
        };

        let (seed_size, pattern, neighborhood) = (
            sim.config.seed_size,
            sim.config.seed_pattern.clone(),
            sim.config.neighborhood,
        );
        sim.reset(seed_size, pattern, neighborhood)?;
        Ok(sim)
    }

    /// Start a fresh run. The rule table is kept. On error nothing changes.
    pub fn reset(
        &mut self,
        seed_size: usize,
        pattern: SeedPattern,
        neighborhood: Neighborhood,
    ) -> Result<SimulationState, GrowthError> {
        let topology = self.topology();
        if let Err(err) = seed::validate(&pattern, topology, self.dims(), seed_size) {
            warn!("reset rejected: {err}");
            return Err(err);
        }

        self.grid.clear();
        for obstacle in &self.config.obstacles {
            for c in obstacle.iter() {
                self.grid.freeze(c);
            }
        }
        let planted = seed::plant(&mut self.grid, &pattern, seed_size, &mut self.rng);

        self.neighborhood = neighborhood;
        self.links = Some(LinkSet::build(&self.grid, neighborhood));
        self.layer = if topology == Topology::Layered2D { 1 } else { 0 };
        self.generation = 0;
        self.region = Region::around_live(&self.grid);
        self.refresh_activity();
        self.seed = self.capture_seed();
        self.phase = Phase::Seeded;

        self.config.seed_size = seed_size;
        self.config.seed_pattern = pattern;
        self.config.neighborhood = neighborhood;

        info!(
            "reset {topology:?} grid {}: {planted} seed cells, {neighborhood:?}",
            self.config.grid_size
        );
        Ok(self.state())
    }

    /// Advance one generation. After a stop this returns the same reason
    /// with no births and changes nothing.
    pub fn step(&mut self) -> StepReport {
        if self.phase.is_stopped() {
            return self.report(0);
        }
        if self.edge_reached() {
            return self.stop(StopReason::GridEdge);
        }

        let Some(links) = self.links.as_ref() else {
            panic!("neighbour links used before construction");
        };
        let (scan, source) = match self.topology() {
            Topology::Layered2D => (
                self.region.bounds().with_layers(self.layer, self.layer),
                CountSource::Below,
            ),
            _ => (self.region.bounds(), CountSource::Own),
        };
        let births = collect_births(
            &self.grid,
            &self.rules,
            links.neighborhood(),
            scan,
            source,
            &self.thread_pool,
        );
        if births.is_empty() {
            return self.stop(StopReason::Stagnation);
        }

        for &idx in &births {
            self.grid.birth_at(idx);
            self.region.include(self.grid.coord_of(idx));
        }
        if self.topology() == Topology::Layered2D {
            self.layer += 1;
        }
        self.refresh_activity();
        self.generation += 1;
        self.phase = Phase::Running;

        let report = self.report(births.len());
        debug!(
            "generation {}: {} births, region {:?}..{:?}",
            self.generation,
            report.births,
            report.region.lo,
            report.region.hi
        );
        report
    }

    /// Switch Von Neumann and Moore. Links and counts are rebuilt at once;
    /// the phase is untouched.
    pub fn toggle_neighborhood(&mut self) -> Neighborhood {
        self.neighborhood = self.neighborhood.toggled();
        self.links = Some(LinkSet::build(&self.grid, self.neighborhood));
        self.refresh_activity();
        self.config.neighborhood = self.neighborhood;
        info!("neighbourhood now {:?}", self.neighborhood);
        self.neighborhood
    }

    /// Draw new cubic rule tables from `seed`. The current run should be
    /// reset afterwards.
    pub fn regenerate_rules(&mut self, seed: u64) -> Result<(), GrowthError> {
        let topology = self.topology();
        if topology != Topology::Cubic3D {
            let err = GrowthError::Unsupported {
                operation: "rule regeneration",
                topology,
            };
            warn!("{err}");
            return Err(err);
        }
        self.config.rule_seed = seed;
        self.rules = rules_for(&self.config);
        info!("rule tables regenerated from seed {seed}");
        Ok(())
    }

    /// Freeze the inclusive box between `a` and `b` now and at every later
    /// reset. Live cells stay alive.
    pub fn block(&mut self, a: Coord, b: Coord) -> Result<(), GrowthError> {
        if !self.grid.in_bounds(a) || !self.grid.in_bounds(b) {
            let err = GrowthError::InvalidConfig("obstacle box must lie inside the grid");
            warn!("{err}");
            return Err(err);
        }
        let obstacle = crate::config::obstacle(a, b);
        for c in obstacle.iter() {
            self.grid.freeze(c);
        }
        self.config.obstacles.push(obstacle);
        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn topology(&self) -> Topology {
        self.grid.topology()
    }

    pub fn dims(&self) -> Dims {
        self.grid.dims()
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Successful steps since the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn live_cells(&self) -> usize {
        self.grid.live_cells()
    }

    /// Box holding every live cell. On layered grids it spans the grown
    /// layers.
    pub fn region(&self) -> Bounds {
        match self.topology() {
            Topology::Layered2D => self.region.bounds().with_layers(0, self.layer - 1),
            _ => self.region.bounds(),
        }
    }

    pub fn seed_snapshot(&self) -> &SeedSnapshot {
        &self.seed
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn rule_table(&self) -> Result<&RuleTable, GrowthError> {
        match &self.rules {
            Rules::Table(table) => Ok(table),
            Rules::Counts(_) => Err(GrowthError::Unsupported {
                operation: "rule table export",
                topology: self.topology(),
            }),
        }
    }

    /// # Panics
    /// If `coord` lies outside the grid.
    pub fn cell(&self, coord: Coord) -> &Cell {
        self.grid.cell(coord)
    }

    pub fn mark_rendered(&mut self, coord: Coord) {
        self.grid.set_rendered(coord, true);
    }

    /// Live cells not yet marked rendered, in scan order.
    pub fn unrendered_live_cells(&self) -> Vec<Coord> {
        self.live_coords()
            .filter(|&c| !self.grid.cell(c).rendered)
            .collect()
    }

    /// Live cells in scan order.
    pub fn live_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.region()
            .iter()
            .filter(move |&c| self.grid.cell(c).alive)
    }

    pub fn state(&self) -> SimulationState {
        SimulationState {
            live_cells: self.live_cells(),
            region: self.region(),
            neighborhood: self.neighborhood,
            phase: self.phase,
        }
    }

    fn edge_reached(&self) -> bool {
        match self.topology() {
            Topology::Layered2D => self.layer + 1 >= self.dims().height,
            _ => self.region.reached_edge(),
        }
    }

    fn refresh_activity(&mut self) {
        let Some(links) = self.links.as_ref() else {
            panic!("neighbour links used before construction");
        };
        let bounds = self.region();
        accounting::refresh(&mut self.grid, links, bounds, &self.thread_pool);
    }

    /// Live cells strictly inside the region, layer 0 on 2D lattices.
    fn capture_seed(&self) -> SeedSnapshot {
        let interior = self.region.interior();
        let extent = interior.extent();
        let mut cells = vec![0u8; extent.volume()];
        extract_region(&self.grid, interior, &mut cells);
        SeedSnapshot {
            origin: if interior.is_empty() {
                Coord::default()
            } else {
                interior.lo
            },
            extent,
            cells,
        }
    }

    fn stop(&mut self, reason: StopReason) -> StepReport {
        self.phase = Phase::Stopped(reason);
        info!(
            "stopped after {} generations: {reason:?}, {} live cells",
            self.generation,
            self.live_cells()
        );
        self.report(0)
    }

    fn report(&self, births: usize) -> StepReport {
        let stop_reason = self.phase.stop_reason();
        StepReport {
            births,
            region: self.region(),
            stopped: self.phase.is_stopped(),
            stop_reason,
        }
    }
}
