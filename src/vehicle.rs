use macroquad::prelude::*;

use crate::config::{DriverConfig, HandlingConfig};
use crate::controller::{self, Intents};
use crate::genome::Genome;
use crate::geometry;
use crate::physics;
use crate::sensory;
use crate::track::{StartPose, Track};

/// Display colours, assigned by population index.
pub const VEHICLE_PALETTE: [Color; 10] = [
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(0.0, 1.0, 0.0, 1.0),
    Color::new(0.0, 0.0, 1.0, 1.0),
    Color::new(1.0, 1.0, 0.0, 1.0),
    Color::new(1.0, 0.0, 1.0, 1.0),
    Color::new(0.0, 1.0, 1.0, 1.0),
    Color::new(1.0, 0.5, 0.0, 1.0),
    Color::new(0.5, 0.0, 1.0, 1.0),
    Color::new(0.0, 0.5, 1.0, 1.0),
    Color::new(0.545, 0.271, 0.075, 1.0),
];

pub fn palette_color(index: usize) -> Color {
    VEHICLE_PALETTE[index % VEHICLE_PALETTE.len()]
}

/// Vehicle lifecycle. Both terminal states leave the vehicle inactive until `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleStatus {
    Active,
    Collided,
    GenomeExhausted,
}

#[derive(Clone, Debug)]
pub struct Vehicle {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    /// Degrees, counter-clockwise on screen, wrapped to a single turn whenever it turns.
    pub heading: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Next gate expected, modulo the gate count.
    pub gate_index: usize,
    pub score: u32,
    pub distance_traveled: f32,
    pub ticks_alive: u32,
    pub genome: Genome,
    pub cursor: usize,
    status: VehicleStatus,
}

impl Vehicle {
    pub fn new(genome: Genome, pose: StartPose, handling: &HandlingConfig, color: Color) -> Self {
        Self {
            pos: pose.pos,
            prev_pos: pose.pos,
            heading: pose.heading,
            speed: 0.0,
            width: handling.width,
            height: handling.height,
            color,
            gate_index: 0,
            score: 0,
            distance_traveled: 0.0,
            ticks_alive: 0,
            genome,
            cursor: 0,
            status: VehicleStatus::Active,
        }
    }

    /// Back to the start pose with progress, cursor and status cleared. The genome is kept.
    pub fn reset(&mut self, pose: StartPose) {
        self.pos = pose.pos;
        self.prev_pos = pose.pos;
        self.heading = pose.heading;
        self.speed = 0.0;
        self.gate_index = 0;
        self.score = 0;
        self.distance_traveled = 0.0;
        self.ticks_alive = 0;
        self.cursor = 0;
        self.status = VehicleStatus::Active;
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == VehicleStatus::Active
    }

    pub fn has_collided(&self) -> bool {
        self.status == VehicleStatus::Collided
    }

    pub fn corners(&self) -> [Vec2; 4] {
        physics::corners(self.pos, self.heading, self.width, self.height)
    }

    /// Blend the assist layers with the next gene and advance the cursor.
    ///
    /// An exhausted genome yields no intents and moves the vehicle to `GenomeExhausted`.
    pub fn decide_actions(&mut self, track: &Track, driver: &DriverConfig) -> Intents {
        let Some(gene) = self.genome.get(self.cursor) else {
            if self.is_active() {
                self.status = VehicleStatus::GenomeExhausted;
            }
            return Intents::default();
        };
        self.cursor += 1;

        if !driver.assists {
            return gene;
        }

        let readings = sensory::sense_walls(track, self.pos, self.heading, driver);
        let next_gate = track.gate_center(self.gate_index);
        let assist =
            controller::assist_intents(self.pos, self.heading, readings, next_gate, driver);
        controller::combine(assist, gene)
    }

    /// Advance one tick under `intents`: move, then check the body against the walls and
    /// the travelled segment against the expected gate.
    pub fn update(&mut self, track: &Track, intents: Intents, handling: &HandlingConfig) {
        if !self.is_active() {
            return;
        }

        physics::apply_intents(self, intents, handling);
        physics::integrate(self, handling);

        if self.corners().iter().any(|c| !track.is_on_track(*c)) {
            self.status = VehicleStatus::Collided;
        }

        self.check_gate(track);
    }

    /// One simulation tick: decide, then update if the genome still had a gene.
    pub fn step(&mut self, track: &Track, driver: &DriverConfig, handling: &HandlingConfig) {
        if !self.is_active() {
            return;
        }
        let intents = self.decide_actions(track, driver);
        self.update(track, intents, handling);
    }

    fn check_gate(&mut self, track: &Track) {
        let Some(gate) = track.gates.get(self.gate_index) else {
            return;
        };
        if geometry::segments_intersect(self.prev_pos, self.pos, gate.start, gate.end) {
            self.score += 1;
            self.gate_index = (self.gate_index + 1) % track.gate_count();
        }
    }
}
