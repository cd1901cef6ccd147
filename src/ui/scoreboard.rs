use egui;
use macroquad::prelude::Color;

use racer::evolution::Evolution;
use racer::vehicle::VehicleStatus;

fn to_color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgb(
        (c.r * 255.0) as u8,
        (c.g * 255.0) as u8,
        (c.b * 255.0) as u8,
    )
}

/// Per-vehicle scores with colour swatches, in population order.
pub fn draw_scoreboard(ctx: &egui::Context, evolution: &Evolution) {
    egui::Window::new("Scores")
        .default_pos(egui::pos2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            for (i, vehicle) in evolution.population.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, to_color32(vehicle.color));

                    let status = match vehicle.status() {
                        VehicleStatus::Active => "",
                        VehicleStatus::Collided => " (crashed)",
                        VehicleStatus::GenomeExhausted => " (done)",
                    };
                    let label = if i == 0 {
                        format!("Score: {} elite{status}", vehicle.score)
                    } else {
                        format!("Score: {}{status}", vehicle.score)
                    };
                    ui.label(egui::RichText::new(label).small());
                });
            }
        });
}
