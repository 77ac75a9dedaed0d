//! The simulation engine: state machine and two-pass tick.
//!
//! One tick runs to completion inside a single frame callback; there is no
//! overlap between ticks and no locking. The tick first evaluates every
//! organism against start-of-tick state (movement, reproduction and death
//! decisions collected into scratch lists), then applies removals and
//! births in a separate phase. Mutating the store mid-iteration would skip
//! or double-visit organisms, so the store is never touched during the
//! evaluation pass.

use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use super::environment::EnvironmentalFactors;
use super::error::SimulationError;
use super::organism::Organism;
use super::organism_type::OrganismType;
use super::params::{Bounds, MAX_MAX_POPULATION, MAX_SPEED, MIN_MAX_POPULATION, MIN_SPEED, Params};
use super::pool::OrganismPool;
use super::population::Population;
use super::rng::create_rng;
use super::spatial::SpatialIndex;
use super::stats::{RateCounter, SimulationStats};

/// Engine run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Accepting placement clicks; not ticking.
    Placement,
    /// Ticking on the scheduler.
    Running,
    /// Ticking suspended, state retained.
    Paused,
    /// An apply-phase fault was detected; refuses ticks until `reset()`.
    Faulted,
}

/// Orchestrates the population through ticks, placements, and control
/// operations. Owns the store, the pool, the RNG, and the statistics;
/// external collaborators only ever see snapshots.
#[derive(Debug)]
pub struct Engine {
    params: Params,
    bounds: Bounds,
    state: EngineState,
    speed_multiplier: f32,
    current_type: Arc<OrganismType>,
    environment: EnvironmentalFactors,
    population: Population,
    pool: OrganismPool,
    rng: StdRng,
    stats: SimulationStats,
    birth_rate: RateCounter,
    death_rate: RateCounter,
    // Scratch buffers reused across ticks.
    death_flags: Vec<bool>,
    newborns: Vec<(f32, f32, Arc<OrganismType>)>,
}

impl Engine {
    /// Creates an engine for the given canvas and initial species.
    ///
    /// Fails fast on a degenerate canvas or invalid parameters: the
    /// simulation cannot exist without a renderable surface.
    pub fn new(
        bounds: Bounds,
        initial_type: Arc<OrganismType>,
        params: Params,
    ) -> Result<Self, SimulationError> {
        if !bounds.width.is_finite()
            || !bounds.height.is_finite()
            || bounds.width <= 0.0
            || bounds.height <= 0.0
        {
            return Err(SimulationError::InvalidConfig(
                "canvas bounds must be positive and finite",
            ));
        }
        initial_type.validate()?;
        params.validate()?;

        let pool = OrganismPool::new(params.pool_prefill, Arc::clone(&initial_type));
        let rng = create_rng(params.rng_seed);

        info!(
            width = bounds.width,
            height = bounds.height,
            initial_type = %initial_type.name,
            "engine constructed"
        );

        Ok(Self {
            params,
            bounds,
            state: EngineState::Placement,
            speed_multiplier: MIN_SPEED,
            current_type: initial_type,
            environment: EnvironmentalFactors::default(),
            population: Population::new(),
            pool,
            rng,
            stats: SimulationStats::default(),
            birth_rate: RateCounter::default(),
            death_rate: RateCounter::default(),
            death_flags: Vec::new(),
            newborns: Vec::new(),
        })
    }

    /// Starts ticking. From placement mode with an empty canvas this seeds
    /// a small default population first; from paused it resumes.
    pub fn start(&mut self) {
        match self.state {
            EngineState::Placement => {
                if self.population.is_empty() {
                    self.seed_default_population();
                }
                self.state = EngineState::Running;
                info!(population = self.population.len(), "simulation started");
            }
            EngineState::Paused => {
                self.state = EngineState::Running;
                info!("simulation resumed");
            }
            EngineState::Running | EngineState::Faulted => {}
        }
    }

    /// Suspends ticking; all state is retained and elapsed time freezes.
    pub fn pause(&mut self) {
        if self.state == EngineState::Running {
            self.state = EngineState::Paused;
            info!(elapsed = self.stats.elapsed_time, "simulation paused");
        }
    }

    /// Clears everything and returns to placement mode. Idempotent: a
    /// second reset observes the same empty state. Also the only way out
    /// of the faulted state.
    pub fn reset(&mut self) {
        let released = self.population.drain_into(&mut self.pool);
        self.stats = SimulationStats::default();
        self.birth_rate.reset();
        self.death_rate.reset();
        self.state = EngineState::Placement;
        info!(released, "simulation reset");
    }

    /// Clears the population and the generation counter without changing
    /// the run/placement mode. Cumulative birth/death totals and elapsed
    /// time survive, matching the distinction from `reset()`.
    pub fn clear(&mut self) {
        let released = self.population.drain_into(&mut self.pool);
        self.stats.generation = 0;
        self.stats.population = 0;
        self.stats.average_age = 0.0;
        self.stats.oldest_age = 0.0;
        info!(released, "population cleared");
    }

    /// Sets the speed multiplier (1-10). Out-of-range values are rejected
    /// and the last valid setting stays in effect.
    pub fn set_speed(&mut self, multiplier: f32) -> Result<(), SimulationError> {
        if !multiplier.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&multiplier) {
            return Err(SimulationError::SpeedOutOfRange(multiplier));
        }
        self.speed_multiplier = multiplier;
        Ok(())
    }

    /// Sets the population cap (1-5000), trimming immediately if the live
    /// population already exceeds the new cap.
    pub fn set_max_population(&mut self, cap: usize) -> Result<(), SimulationError> {
        if !(MIN_MAX_POPULATION..=MAX_MAX_POPULATION).contains(&cap) {
            return Err(SimulationError::PopulationOutOfRange(cap));
        }
        self.params.max_population = cap;
        let trimmed = self.population.trim_to(cap, &mut self.pool);
        if trimmed > 0 {
            self.stats.total_deaths += trimmed;
            self.death_rate.record(trimmed);
            self.stats.population = self.population.len();
            debug!(trimmed, cap, "population trimmed to new cap");
        }
        Ok(())
    }

    /// Selects the species used for subsequent placements and seeding.
    pub fn set_organism_type(&mut self, kind: Arc<OrganismType>) -> Result<(), SimulationError> {
        kind.validate()?;
        self.current_type = kind;
        Ok(())
    }

    /// Replaces the environmental factors, clamping each into `[0, 1]`.
    pub fn set_environment(&mut self, environment: EnvironmentalFactors) {
        self.environment = environment.clamped();
    }

    /// Places one organism of the current type at canvas coordinates.
    ///
    /// Accepted only in placement mode and below the cap; returns whether
    /// the organism was placed. Clicks while running are ignored.
    pub fn place_organism(&mut self, x: f32, y: f32) -> bool {
        if self.state != EngineState::Placement {
            return false;
        }
        if self.population.len() >= self.params.max_population {
            debug!("placement ignored: population at cap");
            return false;
        }
        let kind = Arc::clone(&self.current_type);
        let mut organism = self.pool.acquire();
        organism.initialize(x, y, kind, self.bounds);
        self.population.push(organism);
        self.stats.population = self.population.len();
        true
    }

    /// Advances the simulation by one tick while running; otherwise a
    /// no-op. See the module docs for the two-pass structure.
    pub fn update(&mut self, dt: f32) -> Result<(), SimulationError> {
        if self.state != EngineState::Running {
            return Ok(());
        }
        if !dt.is_finite() || dt <= 0.0 {
            warn!(dt, "ignoring tick with unusable delta time");
            return Ok(());
        }

        let dt = dt * self.speed_multiplier;
        self.stats.elapsed_time += dt;

        // Index positions from the start of the tick, so no organism's
        // crowding query observes another's mid-tick movement.
        self.population.refresh_columns(self.params.columnar_threshold);
        let index = SpatialIndex::build(&self.population);

        let growth_env = self.environment.growth_modifier();
        let death_env = self.environment.death_modifier();

        let count = self.population.len();
        self.death_flags.clear();
        self.death_flags.resize(count, false);
        self.newborns.clear();

        // Evaluation pass: every organism is visited exactly once; the
        // store itself is not mutated until the apply phase.
        for (i, organism) in self.population.as_mut_slice().iter_mut().enumerate() {
            if !organism.is_coherent() {
                warn!(
                    index = i,
                    x = organism.x,
                    y = organism.y,
                    age = organism.age,
                    "skipping incoherent organism for this tick"
                );
                continue;
            }

            let (start_x, start_y) = (organism.x, organism.y);
            organism.update(dt, self.bounds, self.params.walk_speed, &mut self.rng);

            let neighbors =
                index.count_within(start_x, start_y, self.params.crowd_radius, i);
            let crowding =
                1.0 - (neighbors as f32 / self.params.crowd_limit as f32).min(1.0);

            // Reproduction and death use independent draws, and a parent
            // that dies this tick still leaves its offspring behind.
            if organism.can_reproduce(&self.params, growth_env * crowding, &mut self.rng) {
                let (x, y) = organism.reproduce(&self.params, self.bounds, &mut self.rng);
                self.newborns.push((x, y, Arc::clone(&organism.kind)));
            }
            if organism.should_die(&self.params, death_env, &mut self.rng) {
                self.death_flags[i] = true;
            }
        }

        // Apply phase: removals first, then births up to the cap.
        let deaths = self
            .population
            .remove_flagged(&self.death_flags, &mut self.pool);
        self.stats.total_deaths += deaths;
        self.death_rate.record(deaths);

        let mut newborns = std::mem::take(&mut self.newborns);
        let mut births = 0;
        for (x, y, kind) in newborns.drain(..) {
            if self.population.len() >= self.params.max_population {
                // Over-cap newborns are discarded; nothing was acquired,
                // so pool capacity is unaffected.
                continue;
            }
            let mut organism = self.pool.acquire();
            organism.initialize(x, y, kind, self.bounds);
            self.population.push(organism);
            births += 1;
        }
        self.newborns = newborns;
        self.stats.total_births += births;
        self.stats.generation += births as u32;
        self.birth_rate.record(births);

        if self.population.len() > self.params.max_population {
            self.state = EngineState::Faulted;
            error!(
                population = self.population.len(),
                cap = self.params.max_population,
                "population cap violated after apply phase"
            );
            return Err(SimulationError::TickFault(
                "population cap violated after apply phase",
            ));
        }

        self.refresh_derived_stats(dt);
        Ok(())
    }

    /// Current statistics snapshot; safe to hand to external systems.
    pub fn stats(&self) -> SimulationStats {
        let mut stats = self.stats.clone();
        stats.population = self.population.len();
        stats
    }

    /// Defensive copy of the live population for external readers.
    pub fn organisms(&self) -> Vec<Organism> {
        self.population.snapshot()
    }

    /// Borrow of the live population for the in-crate renderer.
    pub fn organisms_ref(&self) -> &[Organism] {
        self.population.as_slice()
    }

    /// Current run mode.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f32 {
        self.speed_multiplier
    }

    /// Current population cap.
    pub fn max_population(&self) -> usize {
        self.params.max_population
    }

    /// Species used for placements and seeding.
    pub fn current_type(&self) -> &Arc<OrganismType> {
        &self.current_type
    }

    /// Canvas bounds the simulation runs inside.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Tunable parameters currently in effect.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The object pool, exposed read-only for diagnostics.
    pub fn pool(&self) -> &OrganismPool {
        &self.pool
    }

    fn seed_default_population(&mut self) {
        let count = self.params.seed_count.min(self.params.max_population);
        for _ in 0..count {
            let kind = Arc::clone(&self.current_type);
            let (x, y) = self.random_position(kind.size);
            let mut organism = self.pool.acquire();
            organism.initialize(x, y, kind, self.bounds);
            self.population.push(organism);
        }
        self.stats.population = self.population.len();
        debug!(count, "seeded default population");
    }

    fn random_position(&mut self, radius: f32) -> (f32, f32) {
        let x = if self.bounds.width > 2.0 * radius {
            self.rng.random_range(radius..self.bounds.width - radius)
        } else {
            self.bounds.width / 2.0
        };
        let y = if self.bounds.height > 2.0 * radius {
            self.rng.random_range(radius..self.bounds.height - radius)
        } else {
            self.bounds.height / 2.0
        };
        (x, y)
    }

    fn refresh_derived_stats(&mut self, dt: f32) {
        self.stats.population = self.population.len();

        let mut total_age = 0.0;
        let mut oldest = 0.0f32;
        for organism in self.population.as_slice() {
            total_age += organism.age;
            oldest = oldest.max(organism.age);
        }
        self.stats.average_age = if self.population.is_empty() {
            0.0
        } else {
            total_age / self.population.len() as f32
        };
        self.stats.oldest_age = oldest;

        self.birth_rate.advance(dt);
        self.death_rate.advance(dt);
        self.stats.births_per_sec = self.birth_rate.rate();
        self.stats.deaths_per_sec = self.death_rate.rate();
    }
}

// Anomaly isolation and the faulted transition cannot be reached through
// the public surface (placements and births only ever produce finite,
// in-cap organisms), so these tests inject the corrupt state directly.
#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn test_engine(max_population: usize) -> Engine {
        let kind = OrganismType {
            name: "Test".into(),
            color: "#38bdf8".into(),
            size: 4.0,
            growth_rate: 0.0,
            death_rate: 0.0,
            max_age: 1_000.0,
            description: String::new(),
        }
        .shared()
        .unwrap();
        let params = Params {
            max_population,
            rng_seed: Some(7),
            ..Params::default()
        };
        let bounds = Bounds {
            width: 800.0,
            height: 600.0,
        };
        Engine::new(bounds, kind, params).unwrap()
    }

    fn raw_organism(engine: &Engine, x: f32, y: f32) -> Organism {
        Organism {
            x,
            y,
            age: 0.0,
            kind: Arc::clone(&engine.current_type),
            reproduced: false,
        }
    }

    #[test]
    fn test_incoherent_organism_skipped_for_tick() {
        let mut engine = test_engine(100);
        let healthy = raw_organism(&engine, 100.0, 100.0);
        let corrupt = raw_organism(&engine, f32::NAN, 50.0);
        let trailing = raw_organism(&engine, 200.0, 200.0);
        engine.population.push(healthy);
        engine.population.push(corrupt);
        engine.population.push(trailing);
        engine.state = EngineState::Running;

        assert!(engine.update(1.0).is_ok());

        // The corrupt organism is neither aged nor removed; the tick
        // continues for the rest of the population.
        let organisms = engine.population.as_slice();
        assert_eq!(organisms.len(), 3);
        assert_eq!(organisms[0].age, 1.0);
        assert!(organisms[1].x.is_nan());
        assert_eq!(organisms[1].age, 0.0);
        assert_eq!(organisms[2].age, 1.0);
        assert_eq!(engine.stats().total_deaths, 0);
        assert_eq!(engine.state(), EngineState::Running);
    }

    #[test]
    fn test_cap_violation_faults_until_reset() {
        let mut engine = test_engine(4);
        for i in 0..6 {
            let organism = raw_organism(&engine, 50.0 + i as f32 * 20.0, 50.0);
            engine.population.push(organism);
        }
        engine.state = EngineState::Running;

        let err = engine.update(1.0);
        assert!(matches!(err, Err(SimulationError::TickFault(_))));
        assert_eq!(engine.state(), EngineState::Faulted);

        // Faulted refuses further ticks: elapsed time stays frozen.
        let elapsed = engine.stats().elapsed_time;
        assert!(engine.update(1.0).is_ok());
        assert_eq!(engine.stats().elapsed_time, elapsed);
        engine.start();
        assert_eq!(engine.state(), EngineState::Faulted);

        engine.reset();
        assert_eq!(engine.state(), EngineState::Placement);
        assert_eq!(engine.stats().population, 0);
    }
}
