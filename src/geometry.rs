use macroquad::prelude::*;

/// Even-odd crossing test. The polygon is closed implicitly from its last vertex back to the first.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut p1 = polygon[0];
    for i in 1..=n {
        let p2 = polygon[i % n];
        if point.y > p1.y.min(p2.y) && point.y <= p1.y.max(p2.y) && point.x <= p1.x.max(p2.x) {
            // The y-range check above guarantees p1.y != p2.y.
            let crosses = if p1.x == p2.x {
                true
            } else {
                let x_inters = (point.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
                point.x <= x_inters
            };
            if crosses {
                inside = !inside;
            }
        }
        p1 = p2;
    }
    inside
}

fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Orientation test for segments p1p2 and p3p4.
///
/// Collinear overlap is reported as no intersection.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    ccw(p1, p3, p4) != ccw(p2, p3, p4) && ccw(p1, p2, p3) != ccw(p1, p2, p4)
}

/// Intersection point of segments p1p2 and p3p4, if any.
/// Parallel segments (zero determinant) never intersect.
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let s1 = p2 - p1;
    let s2 = p4 - p3;

    let denominator = -s2.x * s1.y + s1.x * s2.y;
    if denominator == 0.0 {
        return None;
    }

    let s = (-s1.y * (p1.x - p3.x) + s1.x * (p1.y - p3.y)) / denominator;
    let t = (s2.x * (p1.y - p3.y) - s2.y * (p1.x - p3.x)) / denominator;

    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some(p1 + s1 * t)
    } else {
        None
    }
}

/// Nearest intersection (to `p1`) of segment p1p2 with any edge of a closed polygon.
pub fn closest_polygon_intersection(p1: Vec2, p2: Vec2, polygon: &[Vec2]) -> Option<Vec2> {
    let n = polygon.len();
    let mut closest = None;
    let mut min_dist_sq = f32::INFINITY;

    for i in 0..n {
        let p3 = polygon[i];
        let p4 = polygon[(i + 1) % n];
        if let Some(hit) = segment_intersection(p1, p2, p3, p4) {
            let dist_sq = p1.distance_squared(hit);
            if dist_sq < min_dist_sq {
                min_dist_sq = dist_sq;
                closest = Some(hit);
            }
        }
    }
    closest
}

/// End point of a ray of `length` at `angle_deg`. Positive angles turn counter-clockwise on
/// screen, so the y component is inverted.
pub fn ray_endpoint(origin: Vec2, angle_deg: f32, length: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    vec2(origin.x + length * rad.cos(), origin.y - length * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(half: f32) -> Vec<Vec2> {
        vec![
            vec2(-half, -half),
            vec2(half, -half),
            vec2(half, half),
            vec2(-half, half),
        ]
    }

    #[test]
    fn point_in_polygon_inside_and_outside_square() {
        let poly = square(10.0);
        assert!(point_in_polygon(vec2(0.0, 0.0), &poly));
        assert!(point_in_polygon(vec2(9.5, -9.5), &poly));
        assert!(!point_in_polygon(vec2(11.0, 0.0), &poly));
        assert!(!point_in_polygon(vec2(0.0, -10.5), &poly));
        assert!(!point_in_polygon(vec2(0.0, 0.0), &[]));
    }

    #[test]
    fn point_in_polygon_handles_concave_notch() {
        // U shape opening upward (screen y grows downward)
        let poly = vec![
            vec2(0.0, 0.0),
            vec2(3.0, 0.0),
            vec2(3.0, 3.0),
            vec2(2.0, 3.0),
            vec2(2.0, 1.0),
            vec2(1.0, 1.0),
            vec2(1.0, 3.0),
            vec2(0.0, 3.0),
        ];
        assert!(point_in_polygon(vec2(0.5, 2.0), &poly));
        assert!(point_in_polygon(vec2(2.5, 2.0), &poly));
        assert!(!point_in_polygon(vec2(1.5, 2.0), &poly));
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect(
            vec2(0.0, 0.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
            vec2(10.0, 0.0)
        ));
        assert!(!segments_intersect(
            vec2(0.0, 0.0),
            vec2(4.0, 4.0),
            vec2(6.0, 0.0),
            vec2(10.0, -4.0)
        ));
    }

    #[test]
    fn collinear_overlap_is_not_an_intersection() {
        assert!(!segments_intersect(
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(5.0, 0.0),
            vec2(15.0, 0.0)
        ));
    }

    #[test]
    fn segment_intersection_returns_crossing_point() {
        let hit = segment_intersection(
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(4.0, -5.0),
            vec2(4.0, 5.0),
        )
        .unwrap();
        assert!((hit.x - 4.0).abs() < 1e-5);
        assert!(hit.y.abs() < 1e-5);
    }

    #[test]
    fn parallel_and_disjoint_segments_have_no_intersection() {
        assert!(segment_intersection(
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(0.0, 1.0),
            vec2(10.0, 1.0)
        )
        .is_none());
        // Would cross beyond the end of the first segment.
        assert!(segment_intersection(
            vec2(0.0, 0.0),
            vec2(3.0, 0.0),
            vec2(4.0, -5.0),
            vec2(4.0, 5.0)
        )
        .is_none());
    }

    #[test]
    fn closest_polygon_intersection_from_inside_hits_once() {
        let poly = square(10.0);
        let hit = closest_polygon_intersection(vec2(0.0, 0.0), vec2(100.0, 0.0), &poly).unwrap();
        assert!((hit.distance(vec2(0.0, 0.0)) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn closest_polygon_intersection_picks_near_side() {
        // Ray from outside passes through both the left and right edges.
        let poly = square(10.0);
        let origin = vec2(-50.0, 2.0);
        let hit = closest_polygon_intersection(origin, vec2(50.0, 2.0), &poly).unwrap();
        assert!((hit.x + 10.0).abs() < 1e-4);
        assert!((origin.distance(hit) - 40.0).abs() < 1e-3);
    }

    #[test]
    fn closest_polygon_intersection_misses_when_short() {
        let poly = square(10.0);
        assert!(closest_polygon_intersection(vec2(0.0, 0.0), vec2(5.0, 0.0), &poly).is_none());
    }

    #[test]
    fn ray_endpoint_inverts_y() {
        let origin = vec2(100.0, 100.0);
        let east = ray_endpoint(origin, 0.0, 10.0);
        assert!((east.x - 110.0).abs() < 1e-4 && (east.y - 100.0).abs() < 1e-4);
        let up = ray_endpoint(origin, 90.0, 10.0);
        assert!((up.x - 100.0).abs() < 1e-4 && (up.y - 90.0).abs() < 1e-4);
    }
}
