use macroquad::prelude::*;

use crate::config::{ConfigError, TrackConfig};
use crate::geometry;

/// A line segment vehicles must cross, in order, to score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gate {
    pub start: Vec2,
    pub end: Vec2,
}

impl Gate {
    pub fn center(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }
}

/// Where every vehicle begins a generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartPose {
    pub pos: Vec2,
    /// Heading in degrees, counter-clockwise on screen.
    pub heading: f32,
}

/// Elliptical ring track. Immutable once built.
pub struct Track {
    pub width: f32,
    pub height: f32,
    pub track_width: f32,
    pub outer: Vec<Vec2>,
    pub inner: Vec<Vec2>,
    pub centerline: Vec<Vec2>,
    pub gates: Vec<Gate>,
}

impl Track {
    pub fn new(config: &TrackConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let center = vec2(config.width * 0.5, config.height * 0.5);
        let track_width = config.track_width();
        let (outer_rx, outer_ry) = config.outer_radii();
        let (inner_rx, inner_ry) = config.inner_radii();
        let mid_rx = (outer_rx + inner_rx) * 0.5;
        let mid_ry = (outer_ry + inner_ry) * 0.5;

        let samples = config.boundary_samples;
        let step_deg = 360.0 / (samples - 1) as f32;
        let mut outer = Vec::with_capacity(samples);
        let mut inner = Vec::with_capacity(samples);
        let mut centerline = Vec::with_capacity(samples);

        for i in 0..samples {
            let angle = (i as f32 * step_deg).to_radians();
            let (sin, cos) = angle.sin_cos();
            outer.push(center + vec2(outer_rx * cos, outer_ry * sin));
            inner.push(center + vec2(inner_rx * cos, inner_ry * sin));
            centerline.push(center + vec2(mid_rx * cos, mid_ry * sin));
        }

        let gates = build_gates(&centerline, config.gate_count, track_width);

        Ok(Self {
            width: config.width,
            height: config.height,
            track_width,
            outer,
            inner,
            centerline,
            gates,
        })
    }

    /// Inside the outer boundary and outside the inner one.
    pub fn is_on_track(&self, point: Vec2) -> bool {
        geometry::point_in_polygon(point, &self.outer)
            && !geometry::point_in_polygon(point, &self.inner)
    }

    /// First boundary hit along a ray. The outer boundary is checked first and the inner
    /// boundary only when the outer one yields nothing.
    pub fn ray_intersection_with_boundary(
        &self,
        origin: Vec2,
        angle_deg: f32,
        max_length: f32,
    ) -> Option<Vec2> {
        let end = geometry::ray_endpoint(origin, angle_deg, max_length);
        geometry::closest_polygon_intersection(origin, end, &self.outer)
            .or_else(|| geometry::closest_polygon_intersection(origin, end, &self.inner))
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn gate_center(&self, index: usize) -> Vec2 {
        self.gates[index % self.gates.len()].center()
    }

    /// First centerline point, facing the second.
    pub fn start_pose(&self) -> StartPose {
        let p1 = self.centerline[0];
        let p2 = self.centerline[1];
        let d = p2 - p1;
        StartPose {
            pos: p1,
            heading: (-d.y).atan2(d.x).to_degrees(),
        }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }
}

/// Gates evenly spaced by centerline index, each perpendicular to the local tangent.
fn build_gates(centerline: &[Vec2], gate_count: usize, track_width: f32) -> Vec<Gate> {
    let n = centerline.len();
    let half = track_width * 0.5;
    (0..gate_count)
        .map(|i| {
            let index = i * n / gate_count;
            let gate_center = centerline[index];
            let next = centerline[(index + 1) % n];
            let d = next - gate_center;
            let normal = Vec2::from_angle(d.y.atan2(d.x) + std::f32::consts::FRAC_PI_2);
            Gate {
                start: gate_center + normal * half,
                end: gate_center - normal * half,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BOUNDARY_SAMPLES, NUM_GATES};

    fn default_track() -> Track {
        Track::new(&TrackConfig::new(800.0, 600.0, 40.0)).unwrap()
    }

    #[test]
    fn default_track_has_expected_shape() {
        let track = default_track();
        assert_eq!(track.gate_count(), NUM_GATES);
        assert_eq!(track.outer.len(), BOUNDARY_SAMPLES);
        assert_eq!(track.inner.len(), BOUNDARY_SAMPLES);
        assert_eq!(track.centerline.len(), BOUNDARY_SAMPLES);
        assert!(!track.is_on_track(vec2(400.0, 300.0)));
    }

    #[test]
    fn on_track_only_between_boundaries_along_a_ray() {
        let track = default_track();
        let center = track.center();
        for angle_deg in [0.0f32, 37.0, 90.0, 200.0, 305.0] {
            let dir = Vec2::from_angle(angle_deg.to_radians());
            // Ellipse radius along this direction.
            let radius = |rx: f32, ry: f32| {
                1.0 / ((dir.x / rx).powi(2) + (dir.y / ry).powi(2)).sqrt()
            };
            let r_outer = radius(340.0, 240.0);
            let r_inner = radius(240.0, 140.0);

            let between = center + dir * (r_inner + r_outer) * 0.5;
            assert!(track.is_on_track(between), "angle {angle_deg}");

            let beyond = center + dir * (r_outer + 10.0);
            assert!(!track.is_on_track(beyond), "angle {angle_deg}");

            let within = center + dir * (r_inner - 10.0);
            assert!(!track.is_on_track(within), "angle {angle_deg}");
        }
    }

    #[test]
    fn centerline_lies_on_track() {
        let track = default_track();
        assert!(track.centerline.iter().all(|p| track.is_on_track(*p)));
    }

    #[test]
    fn gates_span_track_width_and_are_perpendicular() {
        let track = default_track();
        for (i, gate) in track.gates.iter().enumerate() {
            let length = gate.start.distance(gate.end);
            assert!((length - track.track_width).abs() < 1e-3, "gate {i}");

            let index = i * track.centerline.len() / track.gate_count();
            let tangent = track.centerline[index + 1] - track.centerline[index];
            let span = gate.end - gate.start;
            let cos = tangent.normalize().dot(span.normalize());
            assert!(cos.abs() < 1e-3, "gate {i} not perpendicular: {cos}");
            assert!(gate.center().distance(track.centerline[index]) < 1e-3);
        }
    }

    #[test]
    fn start_pose_faces_along_centerline() {
        let track = default_track();
        let pose = track.start_pose();
        assert_eq!(pose.pos, track.centerline[0]);
        // Second sample sits below the first on screen, so the heading points down.
        assert!(pose.heading < -80.0 && pose.heading > -100.0);
    }

    #[test]
    fn ray_from_centerline_hits_outer_wall() {
        let track = default_track();
        let origin = track.centerline[0]; // (690, 300)
        let hit = track
            .ray_intersection_with_boundary(origin, 0.0, 500.0)
            .unwrap();
        assert!((hit.x - 740.0).abs() < 0.5);
        assert!((hit.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn ray_falls_back_to_inner_wall() {
        let track = default_track();
        let origin = track.centerline[0];
        // Pointing west: the inner boundary is 50 units away, outer is behind the infield.
        let hit = track
            .ray_intersection_with_boundary(origin, 180.0, 100.0)
            .unwrap();
        assert!((hit.x - 640.0).abs() < 0.5);
    }

    #[test]
    fn short_ray_misses() {
        let track = default_track();
        let origin = track.centerline[0];
        assert!(track
            .ray_intersection_with_boundary(origin, 0.0, 10.0)
            .is_none());
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert!(Track::new(&TrackConfig::new(250.0, 600.0, 40.0)).is_err());
    }
}
