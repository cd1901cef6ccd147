//! Windowless batch runs.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::config::{ConfigError, SimConfig};
use crate::evolution::Evolution;
use crate::reporting::HeadlessReport;
use crate::stats::EvolutionStats;

/// Run `generations` full generations and collect their summaries.
pub fn run(config: SimConfig, generations: u32) -> Result<HeadlessReport, ConfigError> {
    let seed = config.seed;
    let mut evolution = Evolution::new(config)?;
    let mut stats = EvolutionStats::new(generations as usize);
    let mut summaries = Vec::with_capacity(generations as usize);

    while summaries.len() < generations as usize {
        if let Some(summary) = evolution.tick() {
            stats.record(&summary);
            summaries.push(summary);
        }
    }

    info!(
        generations = stats.generations,
        best_score_ever = stats.best_score_ever,
        ticks = evolution.tick_count,
        "headless run finished"
    );

    Ok(HeadlessReport::new(
        seed,
        evolution.population.len(),
        evolution.state.target_genome_length,
        summaries,
    ))
}

pub fn write_report(report: &HeadlessReport, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize headless report")?;
    std::fs::write(path, json)
        .with_context(|| format!("write headless report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvolutionConfig;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn quick_config() -> SimConfig {
        SimConfig {
            evolution: EvolutionConfig {
                population_size: 3,
                initial_genome_length: 150,
                target_genome_length: 200,
                ..Default::default()
            },
            seed: 5,
            ..Default::default()
        }
    }

    #[test]
    fn run_produces_one_summary_per_generation() {
        let report = run(quick_config(), 3).unwrap();
        assert_eq!(report.population, 3);
        let gens: Vec<u32> = report.generations.iter().map(|g| g.generation).collect();
        assert_eq!(gens, vec![1, 2, 3]);
        assert_eq!(report.best_score.count, 3);
        assert!(report.generations.iter().all(|g| !g.forced));
    }

    #[test]
    fn report_is_written_as_json() {
        let report = run(quick_config(), 1).unwrap();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("racer_report_{nanos}.json"));
        write_report(&report, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["seed"], 5);
        assert_eq!(value["generations"].as_array().map(|a| a.len()), Some(1));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let mut config = quick_config();
        config.evolution.population_size = 0;
        assert!(run(config, 1).is_err());
    }
}
