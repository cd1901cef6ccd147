use ::rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, EvolutionConfig, SimConfig, FITNESS_GATE_WEIGHT};
use crate::genome::Genome;
use crate::sensory::{self, VehicleRays};
use crate::track::Track;
use crate::vehicle::{palette_color, Vehicle, VehicleStatus};

/// Cross-generation memory besides the surviving genome.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionState {
    pub best_fitness_ever: i64,
    pub stagnant_generations: u32,
    /// Length offspring genomes are padded to.
    pub target_genome_length: usize,
}

impl EvolutionState {
    pub fn new(config: &EvolutionConfig) -> Self {
        Self {
            best_fitness_ever: -1,
            stagnant_generations: 0,
            target_genome_length: config.target_genome_length,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MutationRates {
    /// Rate for genes past the elite's proven prefix (before per-vehicle spreading).
    pub novel: f32,
    /// Rate inside the proven prefix.
    pub preserved: f32,
}

/// Stagnation-adaptive mutation rates.
pub fn mutation_rates(stagnant_generations: u32, config: &EvolutionConfig) -> MutationRates {
    let mut novel =
        config.base_mutation_rate + stagnant_generations as f32 * config.mutation_increment;
    if stagnant_generations >= 1 {
        novel += config.stagnation_bump;
    }
    let preserved = if stagnant_generations > 1 {
        config.preserved_mutation_rate_stagnant
    } else {
        config.preserved_mutation_rate
    };
    MutationRates {
        novel: novel.min(config.max_mutation_rate),
        preserved,
    }
}

/// Rate for offspring `index` (1-based after the elite) in a population of `count`.
/// Rises linearly from `novel` so the last vehicle mutates at `max`.
pub fn offspring_mutation_rate(index: usize, count: usize, novel: f32, max: f32) -> f32 {
    if count <= 1 {
        return novel.min(max);
    }
    let step = (max - novel) / (count - 1) as f32;
    (novel + index as f32 * step).min(max)
}

/// Gates dominate; ticks spent break ties.
pub fn fitness(score: u32, ticks_alive: u32) -> i64 {
    score as i64 * FITNESS_GATE_WEIGHT - ticks_alive as i64
}

/// What happened at a generation rollover.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationSummary {
    /// The generation that just ended.
    pub generation: u32,
    pub best_index: usize,
    pub best_score: u32,
    pub best_distance: f32,
    pub best_ticks_alive: u32,
    pub best_collided: bool,
    pub fitness: i64,
    pub improved: bool,
    pub stagnant_generations: u32,
    pub mutation_rate: f32,
    pub preserved_mutation_rate: f32,
    pub collision_point: usize,
    pub genome_length: usize,
    pub ticks: u64,
    pub forced: bool,
}

/// Owns the track, the population and the generational algorithm.
pub struct Evolution {
    pub config: SimConfig,
    pub track: Track,
    pub population: Vec<Vehicle>,
    pub state: EvolutionState,
    pub rng: ChaCha8Rng,
    pub generation: u32,
    pub generation_ticks: u64,
    pub tick_count: u64,
    pub show_rays: bool,
    pub last_rays: Vec<Option<VehicleRays>>,
}

impl Evolution {
    /// First generation: random genomes of the initial length.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let genomes = (0..config.evolution.population_size)
            .map(|_| Genome::random(config.evolution.initial_genome_length, &mut rng))
            .collect();
        let state = EvolutionState::new(&config.evolution);
        Self::build(config, genomes, state, rng)
    }

    /// Resume from arbitrary prior state with the given genomes as the current population.
    pub fn from_state(
        config: SimConfig,
        genomes: Vec<Genome>,
        state: EvolutionState,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if genomes.len() != config.evolution.population_size {
            return Err(ConfigError::InvalidConfig(
                "genome count must match the configured population size",
            ));
        }
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::build(config, genomes, state, rng)
    }

    fn build(
        config: SimConfig,
        genomes: Vec<Genome>,
        state: EvolutionState,
        rng: ChaCha8Rng,
    ) -> Result<Self, ConfigError> {
        let track = Track::new(&config.track)?;
        let pose = track.start_pose();
        let population = genomes
            .into_iter()
            .enumerate()
            .map(|(i, genome)| Vehicle::new(genome, pose, &config.handling, palette_color(i)))
            .collect();

        debug!(seed = config.seed, gates = track.gate_count(), "race track built");

        Ok(Self {
            config,
            track,
            population,
            state,
            rng,
            generation: 1,
            generation_ticks: 0,
            tick_count: 0,
            show_rays: false,
            last_rays: Vec::new(),
        })
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn active_count(&self) -> usize {
        self.population.iter().filter(|v| v.is_active()).count()
    }

    pub fn is_generation_over(&self) -> bool {
        self.population
            .iter()
            .all(|v| !v.is_active() || v.has_collided())
    }

    /// Step every active vehicle once. Rolls the generation over when every vehicle has
    /// finished or the tick cap is hit, returning that rollover's summary.
    pub fn tick(&mut self) -> Option<GenerationSummary> {
        let driver = &self.config.driver;
        let handling = &self.config.handling;
        for vehicle in self.population.iter_mut() {
            vehicle.step(&self.track, driver, handling);
        }

        if self.show_rays {
            self.last_rays = self
                .population
                .iter()
                .map(|v| {
                    v.is_active()
                        .then(|| sensory::cast_rays(&self.track, v.pos, v.heading, driver))
                })
                .collect();
        }

        self.generation_ticks += 1;
        self.tick_count += 1;

        if self.is_generation_over() {
            return Some(self.advance_generation(false));
        }
        if self.generation_ticks >= self.config.evolution.max_generation_ticks {
            warn!(
                generation = self.generation,
                active = self.active_count(),
                ticks = self.generation_ticks,
                "generation tick cap reached"
            );
            return Some(self.advance_generation(false));
        }
        None
    }

    /// Roll over immediately, whether or not the generation has finished.
    pub fn reset_generation(&mut self) -> GenerationSummary {
        self.advance_generation(true)
    }

    /// Vehicle indices ranked by (score, distance) descending. Ties keep population order.
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.population.len()).collect();
        order.sort_by(|&a, &b| {
            let (va, vb) = (&self.population[a], &self.population[b]);
            vb.score
                .cmp(&va.score)
                .then(vb.distance_traveled.total_cmp(&va.distance_traveled))
        });
        order
    }

    fn advance_generation(&mut self, forced: bool) -> GenerationSummary {
        let cfg = self.config.evolution.clone();
        let best_index = self.ranking()[0];
        let best = &self.population[best_index];

        let best_fitness = fitness(best.score, best.ticks_alive);
        let improved = best_fitness > self.state.best_fitness_ever;
        if improved {
            self.state.best_fitness_ever = best_fitness;
            self.state.stagnant_generations = 0;
        } else {
            self.state.stagnant_generations += 1;
        }
        let rates = mutation_rates(self.state.stagnant_generations, &cfg);

        // Prefix of the best genome that was actually driven.
        let collision_point = match best.status() {
            VehicleStatus::Collided => best.cursor,
            VehicleStatus::GenomeExhausted => {
                self.state.target_genome_length = (self.state.target_genome_length
                    + cfg.genome_growth)
                    .min(cfg.max_genome_length);
                best.genome.len()
            }
            VehicleStatus::Active => best.genome.len(),
        };

        let summary = GenerationSummary {
            generation: self.generation,
            best_index,
            best_score: best.score,
            best_distance: best.distance_traveled,
            best_ticks_alive: best.ticks_alive,
            best_collided: best.has_collided(),
            fitness: best_fitness,
            improved,
            stagnant_generations: self.state.stagnant_generations,
            mutation_rate: rates.novel,
            preserved_mutation_rate: rates.preserved,
            collision_point,
            genome_length: self.state.target_genome_length,
            ticks: self.generation_ticks,
            forced,
        };

        let elite = best.genome.truncated(collision_point);
        let genomes = self.breed(&elite, collision_point, rates, &cfg);

        let pose = self.track.start_pose();
        self.population = genomes
            .into_iter()
            .enumerate()
            .map(|(i, genome)| {
                Vehicle::new(genome, pose, &self.config.handling, palette_color(i))
            })
            .collect();

        info!(
            generation = summary.generation,
            best_score = summary.best_score,
            best_distance = %format!("{:.2}", summary.best_distance),
            fitness = summary.fitness,
            stagnant = summary.stagnant_generations,
            mutation_rate = summary.mutation_rate,
            genome_length = summary.genome_length,
            forced,
            "generation complete"
        );

        self.generation += 1;
        self.generation_ticks = 0;
        self.last_rays.clear();
        summary
    }

    /// Elite first, unmutated; the rest pad the elite to the target length and mutate with
    /// rates spread from `rates.novel` up to the max across the population.
    fn breed(
        &mut self,
        elite: &Genome,
        collision_point: usize,
        rates: MutationRates,
        cfg: &EvolutionConfig,
    ) -> Vec<Genome> {
        let count = self.population.len();
        let mut genomes = Vec::with_capacity(count);
        genomes.push(elite.clone());

        for i in 1..count {
            let rate = offspring_mutation_rate(i, count, rates.novel, cfg.max_mutation_rate);
            let mut child = elite.clone();
            child.pad_random(self.state.target_genome_length, &mut self.rng);
            genomes.push(child.mutate(collision_point, rates.preserved, rate, &mut self.rng));
        }
        genomes
    }
}
