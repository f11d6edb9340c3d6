//! Spatial math for conflict detection: distances, progress along a path,
//! and closest approach between two segments.

use crate::models::{Drone, Point3};
use crate::rules::PARALLEL_EPSILON;

/// Euclidean distance between two points.
pub fn distance(p1: Point3, p2: Point3) -> f64 {
    let delta = p1.sub(p2);
    delta.dot(delta).sqrt()
}

/// Position of a drone at normalized progress `t`.
///
/// `t` is clamped to [0, 1], so out-of-range progress pins the drone to an
/// endpoint.
pub fn position_at_progress(drone: &Drone, t: f64) -> Point3 {
    let t = t.clamp(0.0, 1.0);
    drone.start.advance(drone.end.sub(drone.start), t)
}

/// Time for a drone to fly its whole segment.
///
/// Zero for a zero-length path, infinite when the speed is not positive.
pub fn path_duration(drone: &Drone) -> f64 {
    let length = distance(drone.start, drone.end);
    if length == 0.0 {
        return 0.0;
    }
    if drone.speed > 0.0 {
        length / drone.speed
    } else {
        f64::INFINITY
    }
}

/// Closest approach between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    /// Distance between the two clamped closest points.
    pub distance: f64,
    /// Parameter along the first segment, in [0, 1].
    pub t1: f64,
    /// Parameter along the second segment, in [0, 1].
    pub t2: f64,
    /// The normal equations were singular and the fallback was used.
    pub parallel: bool,
}

/// Closest approach between segments `p1 -> p2` and `p3 -> p4`.
///
/// Solves the 2x2 normal equations for the unconstrained lines and clamps
/// both parameters into the segments without re-projecting. For parallel or
/// degenerate segments the first parameter is pinned to 0 and the second is
/// `d / b` (or 0), which is an approximation: results near parallel pairs
/// depend on it, so keep it as is.
pub fn closest_approach(p1: Point3, p2: Point3, p3: Point3, p4: Point3) -> ClosestApproach {
    let d1 = p2.sub(p1);
    let d2 = p4.sub(p3);
    let w = p1.sub(p3);

    let a = d1.dot(d1);
    let b = d1.dot(d2);
    let c = d2.dot(d2);
    let d = d1.dot(w);
    let e = d2.dot(w);

    let denom = a * c - b * b;
    let parallel = denom.abs() < PARALLEL_EPSILON;

    let (t1, t2) = if parallel {
        let t2 = if b.abs() > PARALLEL_EPSILON { d / b } else { 0.0 };
        (0.0, t2)
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    let t1 = t1.clamp(0.0, 1.0);
    let t2 = t2.clamp(0.0, 1.0);

    let closest1 = p1.advance(d1, t1);
    let closest2 = p3.advance(d2, t2);

    ClosestApproach {
        distance: distance(closest1, closest2),
        t1,
        t2,
        parallel,
    }
}

/// Approximate minimum distance between the flight segments of two drones.
pub fn segment_distance(drone1: &Drone, drone2: &Drone) -> f64 {
    path_approach(drone1, drone2).distance
}

/// Closest approach between the flight segments of two drones.
pub fn path_approach(drone1: &Drone, drone2: &Drone) -> ClosestApproach {
    closest_approach(drone1.start, drone1.end, drone2.start, drone2.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone(start: (f64, f64, f64), end: (f64, f64, f64), speed: f64) -> Drone {
        Drone::new(
            0,
            Point3::new(start.0, start.1, start.2),
            Point3::new(end.0, end.1, end.2),
        )
        .with_speed(speed)
    }

    #[test]
    fn test_distance_known_value() {
        let dist = distance(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 6.0));
        assert!((dist - 7.0).abs() < 1e-12);
    }

    #[test]
    fn position_clamps_progress() {
        let d = drone((0.0, 0.0, 5.0), (20.0, 0.0, 5.0), 1.0);
        assert_eq!(position_at_progress(&d, 0.25), Point3::new(5.0, 0.0, 5.0));
        assert_eq!(position_at_progress(&d, -3.0), d.start);
        assert_eq!(position_at_progress(&d, 7.5), d.end);
    }

    #[test]
    fn duration_handles_speed_edge_cases() {
        let cruising = drone((0.0, 0.0, 0.0), (20.0, 0.0, 0.0), 2.0);
        assert!((path_duration(&cruising) - 10.0).abs() < 1e-12);
        assert!(path_duration(&drone((0.0, 0.0, 0.0), (20.0, 0.0, 0.0), 0.0)).is_infinite());
        assert!(path_duration(&drone((0.0, 0.0, 0.0), (20.0, 0.0, 0.0), -1.0)).is_infinite());
        assert_eq!(path_duration(&drone((4.0, 4.0, 4.0), (4.0, 4.0, 4.0), 0.0)), 0.0);
        assert_eq!(path_duration(&drone((4.0, 4.0, 4.0), (4.0, 4.0, 4.0), 3.0)), 0.0);
    }

    #[test]
    fn closest_approach_of_crossing_segments() {
        let approach = closest_approach(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(20.0, 0.0, 5.0),
            Point3::new(10.0, -10.0, 5.0),
            Point3::new(10.0, 10.0, 5.0),
        );
        assert!(!approach.parallel);
        assert!(approach.distance < 1e-12);
        assert!((approach.t1 - 0.5).abs() < 1e-12);
        assert!((approach.t2 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn closest_approach_clamps_without_reprojection() {
        // The unconstrained lines meet at x = 30, past the end of the first segment.
        let approach = closest_approach(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(20.0, 0.0, 0.0),
            Point3::new(30.0, -10.0, 0.0),
            Point3::new(30.0, 10.0, 0.0),
        );
        assert_eq!(approach.t1, 1.0);
        assert!((approach.t2 - 0.5).abs() < 1e-12);
        assert!((approach.distance - 10.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_segments_use_start_anchored_fallback() {
        // Offset parallel lines: d = d1 . w = 0, so t2 = 0 and the distance is
        // measured between the two start points.
        let approach = closest_approach(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(20.0, 0.0, 5.0),
            Point3::new(0.0, 5.0, 5.0),
            Point3::new(20.0, 5.0, 5.0),
        );
        assert!(approach.parallel);
        assert_eq!(approach.t1, 0.0);
        assert_eq!(approach.t2, 0.0);
        assert!((approach.distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_fallback_is_not_a_true_minimum() {
        // Second segment starts ahead of the first; the fallback projects
        // p1 onto it and clamps, measuring from the first segment's start.
        let approach = closest_approach(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(8.0, 1.0, 0.0),
            Point3::new(18.0, 1.0, 0.0),
        );
        assert!(approach.parallel);
        // d = d1 . (p1 - p3) = -80, b = 100, t2 = -0.8 -> clamped to 0
        assert_eq!(approach.t2, 0.0);
        let expected = distance(Point3::new(0.0, 0.0, 0.0), Point3::new(8.0, 1.0, 0.0));
        assert!((approach.distance - expected).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segments_fall_back_to_start_points() {
        let approach = closest_approach(
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(4.0, 5.0, 1.0),
            Point3::new(4.0, 5.0, 1.0),
        );
        assert!(approach.parallel);
        assert!((approach.distance - 5.0).abs() < 1e-12);
    }
}
