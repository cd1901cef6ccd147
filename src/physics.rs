use macroquad::prelude::*;

use crate::config::HandlingConfig;
use crate::controller::Intents;
use crate::vehicle::Vehicle;

/// Apply drive and turn intents. Turning and accelerating combine freely in one tick.
pub fn apply_intents(vehicle: &mut Vehicle, intents: Intents, handling: &HandlingConfig) {
    if intents.accelerate {
        vehicle.speed += handling.acceleration;
    }
    if intents.decelerate {
        vehicle.speed -= handling.deceleration;
    }
    if intents.turn_left {
        vehicle.heading += handling.turn_rate;
    }
    if intents.turn_right {
        vehicle.heading -= handling.turn_rate;
    }
    if intents.turn_left || intents.turn_right {
        vehicle.heading = vehicle.heading.rem_euclid(360.0);
    }
}

/// Friction, then position integration along the heading (screen y inverted).
pub fn integrate(vehicle: &mut Vehicle, handling: &HandlingConfig) {
    vehicle.prev_pos = vehicle.pos;
    vehicle.speed *= handling.friction;

    let rad = vehicle.heading.to_radians();
    vehicle.pos += vec2(vehicle.speed * rad.cos(), -vehicle.speed * rad.sin());

    vehicle.distance_traveled += vehicle.prev_pos.distance(vehicle.pos);
    vehicle.ticks_alive += 1;
}

/// Body corners around `center`, rotated by `heading_deg` (top-left, top-right,
/// bottom-right, bottom-left before rotation).
pub fn corners(center: Vec2, heading_deg: f32, width: f32, height: f32) -> [Vec2; 4] {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let (sin, cos) = heading_deg.to_radians().sin_cos();
    [
        vec2(-hw, -hh),
        vec2(hw, -hh),
        vec2(hw, hh),
        vec2(-hw, hh),
    ]
    .map(|d| center + vec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos))
}
