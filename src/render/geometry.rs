//! Geometry helpers: arcs, pie slices, clipping
//!
//! All functions work in SVG pixel space (Y-down).

use std::f64::consts::TAU;

use glam::{DVec2, dvec2};

use super::svg::fmt_num;

/// Point on a circle at `turn` (fraction of a full turn) measured clockwise
/// from 12 o'clock.
pub fn clock_point(center: DVec2, radius: f64, turn: f64) -> DVec2 {
    let a = turn * TAU;
    dvec2(center.x + radius * a.sin(), center.y - radius * a.cos())
}

/// Point on a circle at `degrees`, counterclockwise from 3 o'clock as seen on
/// screen.
pub fn polar_point(center: DVec2, radius: f64, degrees: f64) -> DVec2 {
    let a = degrees.to_radians();
    dvec2(center.x + radius * a.cos(), center.y - radius * a.sin())
}

/// Closed pie slice from `start` to `end` turns, clockwise from 12 o'clock.
pub fn pie_slice_path(center: DVec2, radius: f64, start: f64, end: f64) -> String {
    let p0 = clock_point(center, radius, start);
    let p1 = clock_point(center, radius, end);
    let large = if end - start > 0.5 { 1 } else { 0 };
    format!(
        "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
        fmt_num(center.x),
        fmt_num(center.y),
        fmt_num(p0.x),
        fmt_num(p0.y),
        fmt_num(radius),
        fmt_num(radius),
        large,
        fmt_num(p1.x),
        fmt_num(p1.y),
    )
}

/// Open arc from `start_deg` counterclockwise to `end_deg`.
pub fn arc_path(center: DVec2, radius: f64, start_deg: f64, end_deg: f64) -> String {
    let p0 = polar_point(center, radius, start_deg);
    let p1 = polar_point(center, radius, end_deg);
    let large = if end_deg - start_deg > 180.0 { 1 } else { 0 };
    format!(
        "M {} {} A {} {} 0 {} 0 {} {}",
        fmt_num(p0.x),
        fmt_num(p0.y),
        fmt_num(radius),
        fmt_num(radius),
        large,
        fmt_num(p1.x),
        fmt_num(p1.y),
    )
}

/// Clip the segment `p0`-`p1` to the rectangle `min`..`max` (Liang-Barsky).
pub fn clip_segment(p0: DVec2, p1: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    let d = p1 - p0;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let checks = [
        (-d.x, p0.x - min.x),
        (d.x, max.x - p0.x),
        (-d.y, p0.y - min.y),
        (d.y, max.y - p0.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((p0 + d * t0, p0 + d * t1))
}

/// Vertex average of a polygon.
pub fn centroid(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }
    points.iter().copied().sum::<DVec2>() / points.len() as f64
}

#[inline]
pub fn xy(p: DVec2) -> (f64, f64) {
    (p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clock_points_run_clockwise_from_top() {
        let c = dvec2(50.0, 50.0);
        let top = clock_point(c, 10.0, 0.0);
        let right = clock_point(c, 10.0, 0.25);
        assert_relative_eq!(top.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(top.y, 40.0, epsilon = 1e-9);
        assert_relative_eq!(right.x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(right.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn polar_points_are_screen_counterclockwise() {
        let p = polar_point(dvec2(0.0, 0.0), 10.0, 90.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn slice_path_uses_large_arc_past_half() {
        let path = pie_slice_path(dvec2(0.0, 0.0), 10.0, 0.0, 0.75);
        assert!(path.contains("A 10 10 0 1 1"));
        let path = pie_slice_path(dvec2(0.0, 0.0), 10.0, 0.0, 0.25);
        assert!(path.contains("A 10 10 0 0 1"));
    }

    #[test]
    fn clipping_trims_to_box() {
        let (a, b) = clip_segment(
            dvec2(-10.0, 5.0),
            dvec2(20.0, 5.0),
            dvec2(0.0, 0.0),
            dvec2(10.0, 10.0),
        )
        .unwrap();
        assert_relative_eq!(a.x, 0.0);
        assert_relative_eq!(b.x, 10.0);
        assert!(
            clip_segment(dvec2(-10.0, 20.0), dvec2(20.0, 20.0), dvec2(0.0, 0.0), dvec2(10.0, 10.0))
                .is_none()
        );
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&[
            dvec2(0.0, 0.0),
            dvec2(2.0, 0.0),
            dvec2(2.0, 2.0),
            dvec2(0.0, 2.0),
        ]);
        assert_eq!(c, dvec2(1.0, 1.0));
    }
}
