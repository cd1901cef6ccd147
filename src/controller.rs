use macroquad::prelude::*;

use crate::config::DriverConfig;
use crate::genome::Gene;
use crate::sensory::SensorReadings;

/// Control intents for one tick. Same shape as a gene.
pub type Intents = Gene;

/// Signed angle in degrees from `heading` to the bearing of `target`, in (-180, 180].
pub fn relative_bearing(pos: Vec2, heading: f32, target: Vec2) -> f32 {
    let bearing = (pos.y - target.y).atan2(target.x - pos.x).to_degrees();
    let relative = (bearing - heading + 360.0).rem_euclid(360.0);
    if relative > 180.0 {
        relative - 360.0
    } else {
        relative
    }
}

/// Rule layer (wall avoidance) followed by gate seeking when the rules asked for no turn.
pub fn assist_intents(
    pos: Vec2,
    heading: f32,
    readings: SensorReadings,
    next_gate: Vec2,
    driver: &DriverConfig,
) -> Intents {
    let mut intents = Intents {
        accelerate: true,
        ..Default::default()
    };

    let open_left = readings.left > readings.right;
    if readings.front < driver.emergency_distance {
        intents.accelerate = false;
        intents.turn_left = open_left;
        intents.turn_right = !open_left;
    } else if readings.front < driver.caution_distance {
        intents.turn_left = open_left;
        intents.turn_right = !open_left;
    }

    if !(intents.turn_left || intents.turn_right) {
        let relative = relative_bearing(pos, heading, next_gate);
        if relative > driver.gate_deadband {
            intents.turn_left = true;
        } else if relative < -driver.gate_deadband {
            intents.turn_right = true;
        }
    }

    intents
}

/// OR the assist and genome intents. When the two disagree on turn direction the genome's
/// accelerate/decelerate bits replace the assist's, while both turn bits stay ORed.
pub fn combine(assist: Intents, gene: Gene) -> Intents {
    let mut combined = Intents {
        accelerate: assist.accelerate || gene.accelerate,
        decelerate: assist.decelerate || gene.decelerate,
        turn_left: assist.turn_left || gene.turn_left,
        turn_right: assist.turn_right || gene.turn_right,
    };

    let conflict =
        (assist.turn_left && gene.turn_right) || (assist.turn_right && gene.turn_left);
    if conflict {
        combined.accelerate = gene.accelerate;
        combined.decelerate = gene.decelerate;
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(front: f32, left: f32, right: f32) -> SensorReadings {
        SensorReadings { front, left, right }
    }

    #[test]
    fn bearing_is_signed_and_wrapped() {
        let pos = vec2(0.0, 0.0);
        // Target straight up the screen is +90 from east.
        assert!((relative_bearing(pos, 0.0, vec2(0.0, -10.0)) - 90.0).abs() < 1e-3);
        assert!((relative_bearing(pos, 0.0, vec2(0.0, 10.0)) + 90.0).abs() < 1e-3);
        // Accumulated headings wrap.
        assert!((relative_bearing(pos, 720.0 + 45.0, vec2(10.0, 0.0)) + 45.0).abs() < 1e-3);
    }

    #[test]
    fn emergency_stops_and_turns_to_open_side() {
        let driver = DriverConfig::default();
        let ahead = vec2(100.0, 0.0);
        let i = assist_intents(vec2(0.0, 0.0), 0.0, readings(50.0, 200.0, 100.0), ahead, &driver);
        assert!(!i.accelerate && i.turn_left && !i.turn_right);

        let i = assist_intents(vec2(0.0, 0.0), 0.0, readings(50.0, 100.0, 100.0), ahead, &driver);
        assert!(!i.accelerate && !i.turn_left && i.turn_right);
    }

    #[test]
    fn caution_turns_without_braking() {
        let driver = DriverConfig::default();
        let i = assist_intents(
            vec2(0.0, 0.0),
            0.0,
            readings(120.0, 100.0, 300.0),
            vec2(100.0, 0.0),
            &driver,
        );
        assert!(i.accelerate && i.turn_right && !i.turn_left);
    }

    #[test]
    fn open_road_seeks_gate_outside_deadband() {
        let driver = DriverConfig::default();
        let open = readings(500.0, 500.0, 500.0);
        let pos = vec2(0.0, 0.0);

        let straight = assist_intents(pos, 0.0, open, vec2(100.0, -5.0), &driver);
        assert!(straight.accelerate && !straight.turn_left && !straight.turn_right);

        let left = assist_intents(pos, 0.0, open, vec2(100.0, -100.0), &driver);
        assert!(left.turn_left && !left.turn_right);

        let right = assist_intents(pos, 0.0, open, vec2(100.0, 100.0), &driver);
        assert!(right.turn_right && !right.turn_left);
    }

    #[test]
    fn combine_is_or_without_conflict() {
        let assist = Intents {
            accelerate: true,
            turn_left: true,
            ..Default::default()
        };
        let gene = Gene {
            decelerate: true,
            turn_left: true,
            ..Default::default()
        };
        let c = combine(assist, gene);
        assert!(c.accelerate && c.decelerate && c.turn_left && !c.turn_right);
    }

    #[test]
    fn combine_conflict_takes_genome_drive_bits() {
        let assist = Intents {
            accelerate: true,
            turn_left: true,
            ..Default::default()
        };
        let gene = Gene {
            decelerate: true,
            turn_right: true,
            ..Default::default()
        };
        let c = combine(assist, gene);
        assert!(!c.accelerate && c.decelerate);
        assert!(c.turn_left && c.turn_right);
    }
}
