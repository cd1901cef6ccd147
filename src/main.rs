use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use macroquad::prelude::*;
use tracing::{error, info};

use racer::config::{self, SimConfig};
use racer::evolution::Evolution;
use racer::headless;
use racer::stats::EvolutionStats;

mod renderer;
mod ui;

use ui::UiState;

#[derive(Parser, Debug)]
#[command(name = "racer", about = "Evolve simple drivers around a looped track")]
struct Cli {
    /// Run without a window and exit after `--generations`.
    #[arg(long)]
    headless: bool,
    #[arg(long, default_value_t = 20)]
    generations: u32,
    #[arg(long, default_value_t = config::DEFAULT_SEED)]
    seed: u64,
    #[arg(long, default_value_t = config::POPULATION_SIZE)]
    population: usize,
    /// JSON report path for headless runs.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Per-generation tick cap.
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Drive from the genome alone, without wall avoidance or gate seeking.
    #[arg(long)]
    no_assists: bool,
}

impl Cli {
    fn sim_config(&self) -> SimConfig {
        let mut config = SimConfig {
            seed: self.seed,
            ..Default::default()
        };
        config.evolution.population_size = self.population;
        if let Some(max_ticks) = self.max_ticks {
            config.evolution.max_generation_ticks = max_ticks;
        }
        config.driver.assists = !self.no_assists;
        config
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Racer".to_string(),
        window_width: config::SCREEN_WIDTH as i32,
        window_height: config::SCREEN_HEIGHT as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.sim_config();

    if cli.headless {
        let report = headless::run(config, cli.generations).inspect_err(|e| {
            error!(error = %e, "refusing to start");
        })?;
        if let Some(path) = &cli.report {
            headless::write_report(&report, path)?;
            info!(path = %path.display(), "report written");
        }
        return Ok(());
    }

    let evolution = Evolution::new(config).inspect_err(|e| {
        error!(error = %e, "refusing to start");
    })?;
    info!(
        population = evolution.population.len(),
        seed = evolution.config.seed,
        "starting race"
    );
    macroquad::Window::from_config(window_conf(), run_window(evolution));
    Ok(())
}

async fn run_window(mut evolution: Evolution) {
    let mut stats = EvolutionStats::new(config::STATS_HISTORY);
    let mut ui_state = UiState::default();

    loop {
        if is_key_pressed(KeyCode::Space) {
            ui_state.reset_requested = true;
        }

        // Toggle sensor ray visualization
        if is_key_pressed(KeyCode::R) {
            evolution.show_rays = !evolution.show_rays;
        }

        if is_key_pressed(KeyCode::P) {
            ui_state.paused = !ui_state.paused;
        }

        for (key, ticks) in [
            (KeyCode::Key1, 1),
            (KeyCode::Key2, 2),
            (KeyCode::Key5, 5),
            (KeyCode::Key0, 10),
        ] {
            if is_key_pressed(key) {
                ui_state.ticks_per_frame = ticks;
            }
        }

        if std::mem::take(&mut ui_state.reset_requested) {
            info!(generation = evolution.generation(), "manual generation reset");
            let summary = evolution.reset_generation();
            stats.record(&summary);
        }

        if !ui_state.paused {
            for _ in 0..ui_state.ticks_per_frame {
                if let Some(summary) = evolution.tick() {
                    stats.record(&summary);
                }
            }
        }

        renderer::draw(&evolution, ui_state.paused);
        ui::draw_ui(&mut evolution, &mut ui_state, &stats);

        next_frame().await;
    }
}
