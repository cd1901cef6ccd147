use egui;

use super::UiState;
use racer::evolution::{mutation_rates, Evolution};

/// Slim status strip + compact controls.
pub fn draw_toolbar(ctx: &egui::Context, evolution: &mut Evolution, ui_state: &mut UiState) {
    egui::TopBottomPanel::bottom("toolbar").show(ctx, |ui| {
        ui.add_space(3.0);
        ui.horizontal_wrapped(|ui| {
            title_badge(ui, "RACER");

            ui.separator();
            compact_group(ui, "Sim", |ui| {
                let pause_label = if ui_state.paused { "Play" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    ui_state.paused = !ui_state.paused;
                }
                if ui.button("Next gen").clicked() {
                    ui_state.reset_requested = true;
                }
            });

            compact_group(ui, "Speed", |ui| {
                for ticks in [1, 2, 5, 10] {
                    speed_button(ui, ui_state, ticks);
                }
            });

            compact_group(ui, "Panels", |ui| {
                ui.toggle_value(&mut ui_state.show_scoreboard, "Scores");
                ui.toggle_value(&mut ui_state.show_graphs, "Graphs");
                ui.toggle_value(&mut evolution.show_rays, "Rays");
            });
        });

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            let rates = mutation_rates(
                evolution.state.stagnant_generations,
                &evolution.config.evolution,
            );
            metric_chip(ui, "Generation", format!("{}", evolution.generation()));
            metric_chip(
                ui,
                "Active",
                format!("{}/{}", evolution.active_count(), evolution.population.len()),
            );
            metric_chip(ui, "Tick", format!("{}", evolution.generation_ticks));
            metric_chip(ui, "Stagnant", format!("{}", evolution.state.stagnant_generations));
            metric_chip(ui, "Mutation", format!("{:.2}", rates.novel));
            metric_chip(
                ui,
                "Genome",
                format!("{}", evolution.state.target_genome_length),
            );
            if evolution.state.best_fitness_ever >= 0 {
                metric_chip(ui, "Best", format!("{}", evolution.state.best_fitness_ever));
            }
            if ui_state.paused {
                status_chip(ui, "PAUSED", egui::Color32::from_rgb(230, 190, 80));
            }
        });
        ui.add_space(3.0);
    });
}

fn speed_button(ui: &mut egui::Ui, ui_state: &mut UiState, ticks: u32) {
    let label = format!("{ticks}x");
    if ui
        .selectable_label(ui_state.ticks_per_frame == ticks, label)
        .clicked()
    {
        ui_state.ticks_per_frame = ticks;
    }
}

fn title_badge(ui: &mut egui::Ui, label: &str) {
    let text = egui::RichText::new(label)
        .strong()
        .color(egui::Color32::from_rgb(190, 220, 255));
    ui.label(text);
}

fn compact_group(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(heading)
                    .small()
                    .color(egui::Color32::from_rgb(150, 170, 185)),
            );
            add_contents(ui);
        });
    });
}

fn metric_chip(ui: &mut egui::Ui, key: &str, value: String) {
    let text = egui::RichText::new(format!("{key}: {value}"))
        .small()
        .color(egui::Color32::from_rgb(205, 215, 225));
    ui.group(|ui| {
        ui.label(text);
    });
}

fn status_chip(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(label).small().strong().color(color));
    });
}
