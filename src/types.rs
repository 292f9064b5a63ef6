use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Unit vector for a heading where 0 points up the screen and positive
    /// angles turn clockwise.
    pub fn from_heading(heading: f64) -> Self {
        Vector2D::new(heading.sin(), -heading.cos())
    }

    pub fn from_angle(angle: f64) -> Self {
        Vector2D::new(angle.cos(), angle.sin())
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        self.scale(rhs)
    }
}

/// Rotates `point` about the origin by `angle` radians.
pub fn rotate_point(point: Vector2D, angle: f64) -> Vector2D {
    let (sn, cs) = angle.sin_cos();
    Vector2D::new(point.x * cs - point.y * sn, point.x * sn + point.y * cs)
}

/// Snaps a coordinate that left `[0, max]` onto the opposite edge.
///
/// This is a single step, not a modulo: a value far past an edge lands exactly
/// on the other edge rather than at its remainder.
pub fn wrap_coordinate(value: f64, max: f64) -> f64 {
    if value < 0.0 {
        max
    } else if value > max {
        0.0
    } else {
        value
    }
}

pub fn wrap_position(position: &mut Vector2D, width: f64, height: f64) {
    position.x = wrap_coordinate(position.x, width);
    position.y = wrap_coordinate(position.y, height);
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate_point(Vector2D::new(1.0, 0.0), FRAC_PI_2);
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 1.0));
    }

    #[test]
    fn rotate_then_unrotate_is_identity() {
        let original = Vector2D::new(3.5, -7.25);
        let back = rotate_point(rotate_point(original, 1.234), -1.234);
        assert!(approx_eq(back.x, original.x));
        assert!(approx_eq(back.y, original.y));
    }

    #[test]
    fn heading_zero_points_up() {
        let up = Vector2D::from_heading(0.0);
        assert!(approx_eq(up.x, 0.0));
        assert!(approx_eq(up.y, -1.0));
        let right = Vector2D::from_heading(FRAC_PI_2);
        assert!(approx_eq(right.x, 1.0));
        assert!(approx_eq(right.y, 0.0));
        let down = Vector2D::from_heading(PI);
        assert!(approx_eq(down.y, 1.0));
    }

    #[test]
    fn wrap_snaps_to_opposite_edge() {
        assert_eq!(wrap_coordinate(-0.1, 256.0), 256.0);
        assert_eq!(wrap_coordinate(256.1, 256.0), 0.0);
        assert_eq!(wrap_coordinate(128.0, 256.0), 128.0);
        assert_eq!(wrap_coordinate(256.0, 256.0), 256.0);
        assert_eq!(wrap_coordinate(0.0, 256.0), 0.0);
    }

    #[test]
    fn wrap_is_single_step_not_modulo() {
        // far past the right edge still lands on 0, not at the remainder
        assert_eq!(wrap_coordinate(700.0, 256.0), 0.0);
        assert_eq!(wrap_coordinate(-700.0, 256.0), 256.0);
    }

    #[test]
    fn wrapped_position_lies_within_bounds() {
        let samples = [-1000.0, -1.0, 0.0, 0.5, 120.0, 239.9, 240.0, 240.5, 5000.0];
        for &x in &samples {
            for &y in &samples {
                let mut p = Vector2D::new(x, y);
                wrap_position(&mut p, 256.0, 240.0);
                assert!((0.0..=256.0).contains(&p.x), "x out of range: {p:?}");
                assert!((0.0..=240.0).contains(&p.y), "y out of range: {p:?}");
            }
        }
    }
}
