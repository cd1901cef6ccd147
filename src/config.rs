// All tunable simulation constants in one place.

use thiserror::Error;

// Screen
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

// Track
pub const TRACK_MARGIN: f32 = 60.0;
pub const TRACK_WIDTH_FACTOR: f32 = 2.5;
pub const BOUNDARY_SAMPLES: usize = 361;
pub const NUM_GATES: usize = 32;

// Vehicle
pub const VEHICLE_WIDTH: f32 = 40.0;
pub const VEHICLE_HEIGHT: f32 = 20.0;
pub const VEHICLE_ACCELERATION: f32 = 0.5;
pub const VEHICLE_DECELERATION: f32 = 0.2;
pub const VEHICLE_TURN_RATE: f32 = 5.0; // degrees per tick
pub const VEHICLE_FRICTION: f32 = 0.95;

// Sensory
pub const SENSOR_RAY_LENGTH: f32 = 500.0;
pub const SENSOR_OFFSET_DEG: f32 = 45.0;

// Driver assists
pub const EMERGENCY_DISTANCE: f32 = 80.0;
pub const CAUTION_DISTANCE: f32 = 150.0;
pub const GATE_SEEK_DEADBAND_DEG: f32 = 10.0;

// Population
pub const POPULATION_SIZE: usize = 10;
pub const INITIAL_GENOME_LENGTH: usize = 1000;
pub const TARGET_GENOME_LENGTH: usize = 5000;
pub const GENOME_GROWTH: usize = 1000;
pub const MAX_GENOME_LENGTH: usize = 100_000;
pub const MAX_GENERATION_TICKS: u64 = 999_999_999;
pub const DEFAULT_SEED: u64 = 42;

// Mutation
pub const MUTATION_RATE_BASE: f32 = 0.05;
pub const MUTATION_RATE_INCREMENT: f32 = 0.05;
pub const MUTATION_STAGNATION_BUMP: f32 = 0.1;
pub const MUTATION_RATE_MAX: f32 = 0.7;
pub const PRESERVED_MUTATION_RATE: f32 = 0.02;
pub const PRESERVED_MUTATION_RATE_STAGNANT: f32 = 0.05;

// Fitness
pub const FITNESS_GATE_WEIGHT: i64 = 1_000_000;

// Stats
pub const STATS_HISTORY: usize = 500;

/// Errors raised when a configuration cannot produce a runnable simulation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("degenerate track: {boundary} radii ({rx:.1}, {ry:.1}) must be positive")]
    DegenerateTrack {
        boundary: &'static str,
        rx: f32,
        ry: f32,
    },
}

/// Procedural track dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Vehicle width the track is sized for.
    pub vehicle_width: f32,
    pub boundary_samples: usize,
    pub gate_count: usize,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            margin: TRACK_MARGIN,
            vehicle_width: VEHICLE_WIDTH,
            boundary_samples: BOUNDARY_SAMPLES,
            gate_count: NUM_GATES,
        }
    }
}

impl TrackConfig {
    pub fn new(width: f32, height: f32, vehicle_width: f32) -> Self {
        Self {
            width,
            height,
            vehicle_width,
            ..Default::default()
        }
    }

    pub fn track_width(&self) -> f32 {
        self.vehicle_width * TRACK_WIDTH_FACTOR
    }

    /// Outer ellipse radii (x, y).
    pub fn outer_radii(&self) -> (f32, f32) {
        (
            self.width * 0.5 - self.margin,
            self.height * 0.5 - self.margin,
        )
    }

    /// Inner ellipse radii (x, y).
    pub fn inner_radii(&self) -> (f32, f32) {
        let (rx, ry) = self.outer_radii();
        (rx - self.track_width(), ry - self.track_width())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(ConfigError::InvalidConfig("track dimensions must be finite"));
        }
        if self.vehicle_width <= 0.0 {
            return Err(ConfigError::InvalidConfig("vehicle width must be positive"));
        }
        if self.boundary_samples < 3 {
            return Err(ConfigError::InvalidConfig(
                "track needs at least 3 boundary samples",
            ));
        }
        if self.gate_count == 0 {
            return Err(ConfigError::InvalidConfig("gate count must be positive"));
        }
        if self.gate_count > self.boundary_samples {
            return Err(ConfigError::InvalidConfig(
                "gate count cannot exceed boundary samples",
            ));
        }
        let (rx, ry) = self.outer_radii();
        if rx <= 0.0 || ry <= 0.0 {
            return Err(ConfigError::DegenerateTrack {
                boundary: "outer",
                rx,
                ry,
            });
        }
        let (rx, ry) = self.inner_radii();
        if rx <= 0.0 || ry <= 0.0 {
            return Err(ConfigError::DegenerateTrack {
                boundary: "inner",
                rx,
                ry,
            });
        }
        Ok(())
    }
}

/// Vehicle body and kinematic constants.
#[derive(Clone, Debug, PartialEq)]
pub struct HandlingConfig {
    pub width: f32,
    pub height: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub turn_rate: f32,
    pub friction: f32,
}

impl Default for HandlingConfig {
    fn default() -> Self {
        Self {
            width: VEHICLE_WIDTH,
            height: VEHICLE_HEIGHT,
            acceleration: VEHICLE_ACCELERATION,
            deceleration: VEHICLE_DECELERATION,
            turn_rate: VEHICLE_TURN_RATE,
            friction: VEHICLE_FRICTION,
        }
    }
}

impl HandlingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::InvalidConfig(
                "vehicle dimensions must be positive",
            ));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::InvalidConfig("friction must lie in (0, 1]"));
        }
        if self.acceleration < 0.0 || self.deceleration < 0.0 || self.turn_rate < 0.0 {
            return Err(ConfigError::InvalidConfig(
                "handling increments must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Sensor and assist-layer thresholds for the decision function.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverConfig {
    /// Enables the rule layer and gate seeking. Without it decisions are genome-only.
    pub assists: bool,
    pub sensor_length: f32,
    pub sensor_offset: f32,
    pub emergency_distance: f32,
    pub caution_distance: f32,
    pub gate_deadband: f32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            assists: true,
            sensor_length: SENSOR_RAY_LENGTH,
            sensor_offset: SENSOR_OFFSET_DEG,
            emergency_distance: EMERGENCY_DISTANCE,
            caution_distance: CAUTION_DISTANCE,
            gate_deadband: GATE_SEEK_DEADBAND_DEG,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_length <= 0.0 {
            return Err(ConfigError::InvalidConfig("sensor length must be positive"));
        }
        if self.emergency_distance > self.caution_distance {
            return Err(ConfigError::InvalidConfig(
                "emergency distance must not exceed caution distance",
            ));
        }
        Ok(())
    }
}

/// Generational algorithm parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub initial_genome_length: usize,
    /// Padding target for offspring, in effect from the second generation.
    pub target_genome_length: usize,
    pub genome_growth: usize,
    pub max_genome_length: usize,
    pub base_mutation_rate: f32,
    pub mutation_increment: f32,
    pub stagnation_bump: f32,
    pub max_mutation_rate: f32,
    pub preserved_mutation_rate: f32,
    pub preserved_mutation_rate_stagnant: f32,
    /// Generation is rolled over after this many ticks even if vehicles remain active.
    pub max_generation_ticks: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            initial_genome_length: INITIAL_GENOME_LENGTH,
            target_genome_length: TARGET_GENOME_LENGTH,
            genome_growth: GENOME_GROWTH,
            max_genome_length: MAX_GENOME_LENGTH,
            base_mutation_rate: MUTATION_RATE_BASE,
            mutation_increment: MUTATION_RATE_INCREMENT,
            stagnation_bump: MUTATION_STAGNATION_BUMP,
            max_mutation_rate: MUTATION_RATE_MAX,
            preserved_mutation_rate: PRESERVED_MUTATION_RATE,
            preserved_mutation_rate_stagnant: PRESERVED_MUTATION_RATE_STAGNANT,
            max_generation_ticks: MAX_GENERATION_TICKS,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidConfig("population size must be positive"));
        }
        if self.initial_genome_length == 0 {
            return Err(ConfigError::InvalidConfig(
                "initial genome length must be positive",
            ));
        }
        if self.max_genome_length < self.initial_genome_length
            || self.max_genome_length < self.target_genome_length
        {
            return Err(ConfigError::InvalidConfig(
                "max genome length must cover the initial and target lengths",
            ));
        }
        let rates = [
            self.base_mutation_rate,
            self.mutation_increment,
            self.stagnation_bump,
            self.max_mutation_rate,
            self.preserved_mutation_rate,
            self.preserved_mutation_rate_stagnant,
        ];
        if rates.iter().any(|r| !(0.0..=1.0).contains(r)) {
            return Err(ConfigError::InvalidConfig("mutation rates must lie in [0, 1]"));
        }
        if self.base_mutation_rate > self.max_mutation_rate {
            return Err(ConfigError::InvalidConfig(
                "base mutation rate must not exceed the max",
            ));
        }
        if self.max_generation_ticks == 0 {
            return Err(ConfigError::InvalidConfig(
                "generation tick cap must be positive",
            ));
        }
        Ok(())
    }
}

/// Everything needed to build an `Evolution` controller.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub track: TrackConfig,
    pub handling: HandlingConfig,
    pub driver: DriverConfig,
    pub evolution: EvolutionConfig,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            track: TrackConfig::default(),
            handling: HandlingConfig::default(),
            driver: DriverConfig::default(),
            evolution: EvolutionConfig::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.track.validate()?;
        self.handling.validate()?;
        self.driver.validate()?;
        self.evolution.validate()?;
        Ok(())
    }
}
