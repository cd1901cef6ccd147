//! Per-generation history for graphs and reports.

use crate::evolution::GenerationSummary;

/// Fixed-capacity ring of the most recent samples.
pub struct RingBuffer {
    data: Vec<f32>,
    head: usize,
    len: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn push(&mut self, value: f32) {
        let cap = self.capacity();
        self.data[self.head] = value;
        self.head = (self.head + 1) % cap;
        self.len = (self.len + 1).min(cap);
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let cap = self.capacity();
        let start = (self.head + cap - self.len) % cap;
        (0..self.len).map(move |i| self.data[(start + i) % cap])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last(&self) -> Option<f32> {
        if self.len == 0 {
            return None;
        }
        let cap = self.capacity();
        Some(self.data[(self.head + cap - 1) % cap])
    }

    pub fn max(&self) -> Option<f32> {
        self.iter().reduce(f32::max)
    }
}

/// Series recorded once per generation rollover.
pub struct EvolutionStats {
    pub best_score: RingBuffer,
    pub best_distance: RingBuffer,
    pub best_fitness: RingBuffer,
    pub mutation_rate: RingBuffer,
    pub genome_length: RingBuffer,
    pub generations: u32,
    pub best_score_ever: u32,
}

impl EvolutionStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            best_score: RingBuffer::new(capacity),
            best_distance: RingBuffer::new(capacity),
            best_fitness: RingBuffer::new(capacity),
            mutation_rate: RingBuffer::new(capacity),
            genome_length: RingBuffer::new(capacity),
            generations: 0,
            best_score_ever: 0,
        }
    }

    pub fn record(&mut self, summary: &GenerationSummary) {
        self.best_score.push(summary.best_score as f32);
        self.best_distance.push(summary.best_distance);
        self.best_fitness.push(summary.fitness as f32);
        self.mutation_rate.push(summary.mutation_rate);
        self.genome_length.push(summary.genome_length as f32);
        self.generations += 1;
        self.best_score_ever = self.best_score_ever.max(summary.best_score);
    }
}
