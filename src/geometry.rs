use crate::types::{Vector2D, rotate_point};

/// Tests whether `point` lies inside the closed polygon `model`, placed at
/// `polygon_pos` and rotated by `polygon_angle`.
///
/// The point is moved into the polygon's unrotated local frame and a
/// horizontal ray is cast towards +x, counting edge crossings. An edge counts
/// when exactly one of its end points has a strictly greater y than the point
/// and the crossing lies strictly to the right of it. Points exactly on an edge
/// therefore get no special treatment and may read either way.
pub fn is_collision(
    point: Vector2D,
    polygon_pos: Vector2D,
    model: &[Vector2D],
    polygon_angle: f64,
) -> bool {
    let local = rotate_point(point - polygon_pos, -polygon_angle);
    let count = model.len();
    if count < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = count - 1;
    for i in 0..count {
        let (a, b) = (model[i], model[j]);
        if (a.y > local.y) != (b.y > local.y) {
            let crossing_x = (b.x - a.x) * (local.y - a.y) / (b.y - a.y) + a.x;
            if local.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn square(half: f64) -> Vec<Vector2D> {
        vec![
            Vector2D::new(-half, -half),
            Vector2D::new(half, -half),
            Vector2D::new(half, half),
            Vector2D::new(-half, half),
        ]
    }

    #[test]
    fn centre_is_inside() {
        let model = square(10.0);
        let pos = Vector2D::new(50.0, 60.0);
        assert!(is_collision(pos, pos, &model, 0.0));
        assert!(is_collision(pos, pos, &model, 2.5));
    }

    #[test]
    fn far_point_is_outside() {
        let model = square(10.0);
        let pos = Vector2D::new(50.0, 60.0);
        assert!(!is_collision(Vector2D::new(200.0, 60.0), pos, &model, 0.0));
        assert!(!is_collision(Vector2D::new(50.0, -100.0), pos, &model, 1.0));
    }

    #[test]
    fn rotation_is_applied_to_polygon() {
        let model = square(10.0);
        let pos = Vector2D::ZERO;
        // the corner region of the axis-aligned square
        let corner = Vector2D::new(9.0, 9.0);
        assert!(is_collision(corner, pos, &model, 0.0));
        // rotated by 45 degrees the square's edge sits at distance 10 along the
        // diagonal, so (9, 9) at distance ~12.7 falls outside
        assert!(!is_collision(corner, pos, &model, FRAC_PI_4));
        // while a point straight right at 13 is now inside the rotated corner
        assert!(is_collision(Vector2D::new(13.0, 0.0), pos, &model, FRAC_PI_4));
        assert!(!is_collision(Vector2D::new(13.0, 0.0), pos, &model, 0.0));
    }

    #[test]
    fn concave_notch_is_outside() {
        // a "C" shape opening to the right
        let model = vec![
            Vector2D::new(-10.0, -10.0),
            Vector2D::new(10.0, -10.0),
            Vector2D::new(10.0, -5.0),
            Vector2D::new(-5.0, -5.0),
            Vector2D::new(-5.0, 5.0),
            Vector2D::new(10.0, 5.0),
            Vector2D::new(10.0, 10.0),
            Vector2D::new(-10.0, 10.0),
        ];
        assert!(!is_collision(Vector2D::new(2.0, 0.0), Vector2D::ZERO, &model, 0.0));
        assert!(is_collision(Vector2D::new(-7.0, 0.0), Vector2D::ZERO, &model, 0.0));
        assert!(is_collision(Vector2D::new(5.0, -7.0), Vector2D::ZERO, &model, 0.0));
    }

    #[test]
    fn degenerate_models_contain_nothing() {
        assert!(!is_collision(Vector2D::ZERO, Vector2D::ZERO, &[], 0.0));
        let line = [Vector2D::new(-1.0, 0.0), Vector2D::new(1.0, 0.0)];
        assert!(!is_collision(Vector2D::ZERO, Vector2D::ZERO, &line, 0.0));
    }
}
