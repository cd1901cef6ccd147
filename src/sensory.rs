use macroquad::prelude::*;

use crate::config::DriverConfig;
use crate::geometry;
use crate::track::Track;

/// Wall distances along the three sensor rays. A miss reads as the sensor cap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorReadings {
    pub front: f32,
    pub left: f32,
    pub right: f32,
}

/// Per-vehicle ray data for visualization.
#[derive(Clone, Debug)]
pub struct VehicleRays {
    pub rays: Vec<(Vec2, Vec2, bool)>, // (start, end, hit_wall)
}

/// Distance to the first wall along `heading + offset`, or `max_length` on a miss.
pub fn distance_to_wall(
    track: &Track,
    pos: Vec2,
    heading: f32,
    offset: f32,
    max_length: f32,
) -> f32 {
    match track.ray_intersection_with_boundary(pos, heading + offset, max_length) {
        Some(hit) => pos.distance(hit),
        None => max_length,
    }
}

pub fn sense_walls(
    track: &Track,
    pos: Vec2,
    heading: f32,
    driver: &DriverConfig,
) -> SensorReadings {
    let len = driver.sensor_length;
    SensorReadings {
        front: distance_to_wall(track, pos, heading, 0.0, len),
        left: distance_to_wall(track, pos, heading, driver.sensor_offset, len),
        right: distance_to_wall(track, pos, heading, -driver.sensor_offset, len),
    }
}

/// Ray segments for the overlay, ending at the hit point or the sensor cap.
pub fn cast_rays(track: &Track, pos: Vec2, heading: f32, driver: &DriverConfig) -> VehicleRays {
    let rays = [0.0, driver.sensor_offset, -driver.sensor_offset]
        .iter()
        .map(|offset| {
            let angle = heading + offset;
            match track.ray_intersection_with_boundary(pos, angle, driver.sensor_length) {
                Some(hit) => (pos, hit, true),
                None => (
                    pos,
                    geometry::ray_endpoint(pos, angle, driver.sensor_length),
                    false,
                ),
            }
        })
        .collect();
    VehicleRays { rays }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackConfig;

    #[test]
    fn readings_at_start_line() {
        let track = Track::new(&TrackConfig::default()).unwrap();
        let pos = track.centerline[0]; // (690, 300), 50 from either wall along x
        let driver = DriverConfig::default();

        // Facing east: the outer wall is 50 away dead ahead.
        let east = sense_walls(&track, pos, 0.0, &driver);
        assert!((east.front - 50.0).abs() < 0.5);
        assert!(east.left > east.front && east.right > east.front);
        assert!((east.left - east.right).abs() < 0.5);
    }

    #[test]
    fn miss_reads_as_sensor_cap() {
        let track = Track::new(&TrackConfig::default()).unwrap();
        let pos = track.centerline[0];
        let driver = DriverConfig {
            sensor_length: 20.0,
            ..Default::default()
        };
        assert_eq!(distance_to_wall(&track, pos, 0.0, 0.0, 20.0), 20.0);

        let rays = cast_rays(&track, pos, 0.0, &driver);
        assert_eq!(rays.rays.len(), 3);
        assert!(rays.rays.iter().all(|(_, _, hit)| !hit));
        assert!((rays.rays[0].1.x - 710.0).abs() < 1e-3);
    }
}
