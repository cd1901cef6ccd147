//! Evolving track-driving controllers with a generational genetic algorithm.

pub mod config;
pub mod controller;
pub mod evolution;
pub mod genome;
pub mod geometry;
pub mod headless;
pub mod physics;
pub mod reporting;
pub mod sensory;
pub mod stats;
pub mod track;
pub mod vehicle;
