use serde::Serialize;

use crate::evolution::GenerationSummary;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
}

impl MetricSummary {
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = samples.into_iter().collect();
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sorted.iter().sum::<f64>() / count as f64,
            p50: percentile_nearest_rank(&sorted, 0.50),
            p90: percentile_nearest_rank(&sorted, 0.90),
        }
    }
}

fn percentile_nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let rank = ((p.clamp(0.0, 1.0) * sorted.len() as f64).ceil() as usize).saturating_sub(1);
    sorted[rank.min(sorted.len() - 1)]
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub seed: u64,
    pub population: usize,
    pub final_genome_length: usize,
    pub best_score: MetricSummary,
    pub fitness: MetricSummary,
    pub generations: Vec<GenerationSummary>,
}

impl HeadlessReport {
    pub fn new(
        seed: u64,
        population: usize,
        final_genome_length: usize,
        generations: Vec<GenerationSummary>,
    ) -> Self {
        Self {
            seed,
            population,
            final_genome_length,
            best_score: MetricSummary::from_samples(
                generations.iter().map(|g| g.best_score as f64),
            ),
            fitness: MetricSummary::from_samples(generations.iter().map(|g| g.fitness as f64)),
            generations,
        }
    }
}
