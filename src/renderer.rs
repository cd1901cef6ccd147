use macroquad::prelude::*;

use racer::evolution::Evolution;
use racer::sensory::VehicleRays;
use racer::track::Track;
use racer::vehicle::Vehicle;

const BG_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const TRACK_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);
const INFIELD_COLOR: Color = Color::new(0.12, 0.12, 0.12, 1.0);
const GATE_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Draw the track, vehicles and text HUD for the current tick.
pub fn draw(evolution: &Evolution, paused: bool) {
    clear_background(BG_COLOR);

    draw_track(&evolution.track);

    // Draw sensor rays if enabled
    if evolution.show_rays {
        draw_sensor_rays(&evolution.last_rays);
    }

    draw_vehicles(&evolution.population);
    draw_hud(evolution, paused);
}

/// Triangle fan from `center`. Only valid for convex outlines such as the ellipses.
fn fill_convex(center: Vec2, outline: &[Vec2], color: Color) {
    for pair in outline.windows(2) {
        draw_triangle(center, pair[0], pair[1], color);
    }
    if let (Some(&first), Some(&last)) = (outline.first(), outline.last()) {
        draw_triangle(center, last, first, color);
    }
}

fn draw_track(track: &Track) {
    let center = track.center();
    fill_convex(center, &track.outer, TRACK_COLOR);
    fill_convex(center, &track.inner, INFIELD_COLOR);

    // Start line
    if let (Some(a), Some(b)) = (track.outer.first(), track.inner.first()) {
        draw_line(a.x, a.y, b.x, b.y, 5.0, WHITE);
    }

    for gate in &track.gates {
        draw_line(gate.start.x, gate.start.y, gate.end.x, gate.end.y, 2.0, GATE_COLOR);
    }
}

fn draw_vehicles(population: &[Vehicle]) {
    // Finished vehicles first so active ones stay on top.
    for vehicle in population.iter().filter(|v| !v.is_active()) {
        let c = vehicle.color;
        draw_vehicle_body(vehicle, Color::new(c.r, c.g, c.b, 0.35));
    }
    for vehicle in population.iter().filter(|v| v.is_active()) {
        draw_vehicle_body(vehicle, vehicle.color);
    }
}

fn draw_vehicle_body(vehicle: &Vehicle, color: Color) {
    draw_rectangle_ex(
        vehicle.pos.x,
        vehicle.pos.y,
        vehicle.width,
        vehicle.height,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            // Headings turn counter-clockwise on screen; macroquad rotates clockwise.
            rotation: -vehicle.heading.to_radians(),
            color,
        },
    );
}

fn draw_sensor_rays(all_rays: &[Option<VehicleRays>]) {
    for rays in all_rays.iter().flatten() {
        for (start, end, hit) in &rays.rays {
            let color = if *hit {
                Color::new(1.0, 0.3, 0.3, 0.5)
            } else {
                Color::new(0.6, 0.6, 0.6, 0.2)
            };
            draw_line(start.x, start.y, end.x, end.y, 1.0, color);
        }
    }
}

fn draw_hud(evolution: &Evolution, paused: bool) {
    let tc = Color::new(1.0, 1.0, 1.0, 1.0);
    let sh = Color::new(0.0, 0.0, 0.0, 0.5);

    let gen_text = format!("Generation: {}", evolution.generation());
    let tw = measure_text(&gen_text, None, 30, 1.0).width;
    let x = screen_width() - tw - 10.0;
    draw_text(&gen_text, x + 1.0, 31.0, 30.0, sh);
    draw_text(&gen_text, x, 30.0, 30.0, tc);

    let active_text = format!(
        "Active: {}/{}",
        evolution.active_count(),
        evolution.population.len()
    );
    let tw = measure_text(&active_text, None, 18, 1.0).width;
    let x = screen_width() - tw - 10.0;
    draw_text(&active_text, x, 52.0, 18.0, tc);

    if paused {
        let pause_text = "PAUSED (P to resume)";
        let tw = measure_text(pause_text, None, 24, 1.0).width;
        let x = screen_width() * 0.5 - tw * 0.5;
        draw_text(pause_text, x + 1.0, screen_height() * 0.5 + 1.0, 24.0, sh);
        draw_text(pause_text, x, screen_height() * 0.5, 24.0, Color::new(1.0, 0.8, 0.2, 0.9));
    }
}
