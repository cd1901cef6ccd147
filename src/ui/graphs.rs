use egui;

use racer::stats::{EvolutionStats, RingBuffer};

/// Per-generation history of the best vehicle.
pub fn draw_graphs(ctx: &egui::Context, stats: &EvolutionStats) {
    egui::Window::new("History")
        .default_pos(egui::pos2(380.0, 300.0))
        .default_size(egui::vec2(400.0, 260.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{} generations, best score ever {}",
                    stats.generations, stats.best_score_ever
                ))
                .small(),
            );

            ui.collapsing("Best Score", |ui| {
                draw_line_graph(
                    ui,
                    &stats.best_score,
                    egui::Color32::from_rgb(100, 200, 100),
                    0,
                );
            });

            ui.collapsing("Best Fitness", |ui| {
                draw_line_graph(
                    ui,
                    &stats.best_fitness,
                    egui::Color32::from_rgb(230, 200, 90),
                    0,
                );
            });

            ui.collapsing("Best Distance", |ui| {
                draw_line_graph(
                    ui,
                    &stats.best_distance,
                    egui::Color32::from_rgb(100, 180, 255),
                    0,
                );
            });

            ui.collapsing("Mutation Rate", |ui| {
                draw_line_graph(
                    ui,
                    &stats.mutation_rate,
                    egui::Color32::from_rgb(255, 140, 100),
                    2,
                );
            });

            ui.collapsing("Genome Length", |ui| {
                draw_line_graph(
                    ui,
                    &stats.genome_length,
                    egui::Color32::from_rgb(200, 150, 255),
                    0,
                );
            });
        });
}

fn draw_line_graph(ui: &mut egui::Ui, buffer: &RingBuffer, color: egui::Color32, decimals: usize) {
    let size = egui::vec2(ui.available_width(), 80.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));

    draw_line_in_rect(&painter, buffer, rect, color);

    if let Some(val) = buffer.last() {
        painter.text(
            egui::pos2(rect.right() - 4.0, rect.top() + 2.0),
            egui::Align2::RIGHT_TOP,
            format!("{val:.decimals$}"),
            egui::FontId::proportional(10.0),
            egui::Color32::from_gray(200),
        );
    }
}

fn draw_line_in_rect(
    painter: &egui::Painter,
    buffer: &RingBuffer,
    rect: egui::Rect,
    color: egui::Color32,
) {
    let len = buffer.len();
    if len < 2 {
        return;
    }

    let samples: Vec<f32> = buffer.iter().collect();
    let max_val = samples.iter().copied().fold(f32::MIN, f32::max);
    let min_val = samples.iter().copied().fold(f32::MAX, f32::min);
    // Mutation rates live in [0, 1]; keep a small floor so flat lines stay visible.
    let range = (max_val - min_val).max(1e-3);

    let points: Vec<egui::Pos2> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = rect.left() + (i as f32 / (len - 1) as f32) * rect.width();
            let y = rect.bottom() - ((v - min_val) / range) * rect.height();
            egui::pos2(x, y)
        })
        .collect();

    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(1.5, color));
    }
}
