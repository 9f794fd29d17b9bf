#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Moves `target` along the ray from `center` by `ratio`.
///
/// `ratio < 1` pulls the point toward the center (inner rings, data values), `ratio > 1` pushes
/// it outward (label anchors). Exact at `ratio == 0` (the center) and `ratio == 1` (the target).
pub fn scale_from(center: Point, target: Point, ratio: f64) -> Point {
    if ratio == 0.0 {
        return center;
    }
    if ratio == 1.0 {
        return target;
    }
    center + (target - center) * ratio
}

/// Point on the circle of `radius` around `center` at `angle` radians, measured clockwise from
/// straight up (screen coordinates, y grows downward).
pub fn clockwise_from_top(center: Point, radius: f64, angle: f64) -> Point {
    point(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_from_interpolates_and_extrapolates() {
        let c = point(10.0, 10.0);
        let p = point(20.0, 0.0);
        assert_eq!(scale_from(c, p, 0.0), c);
        assert_eq!(scale_from(c, p, 1.0), p);
        assert_eq!(scale_from(c, p, 0.5), point(15.0, 5.0));
        assert_eq!(scale_from(c, p, 2.0), point(30.0, -10.0));
    }

    #[test]
    fn angle_zero_points_straight_up() {
        let p = clockwise_from_top(point(100.0, 100.0), 50.0, 0.0);
        assert_eq!(p, point(100.0, 50.0));
        let q = clockwise_from_top(point(0.0, 0.0), 1.0, std::f64::consts::FRAC_PI_2);
        assert!((q.x - 1.0).abs() < 1e-12);
        assert!(q.y.abs() < 1e-12);
    }
}
