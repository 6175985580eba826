//! Toroidal arena edges.
//!
//! A polygon body re-enters on the opposite side only once its whole extent
//! has left the arena. The origin is then placed past the opposite edge by
//! the distance between the origin and the shape's leading extreme, so the
//! shape slides back in instead of popping into view.

use crate::geometry::{Bounds, Vec2};

/// Repositions `position` when the extent of `vertices` (together with the
/// origin) lies entirely outside `[0, width] x [0, height]`. Each axis is
/// handled independently.
pub fn wrap_polygon(position: &mut Vec2, vertices: &[Vec2], width: f64, height: f64) {
    debug_assert!(position.is_finite(), "wrap origin is not finite");
    debug_assert!(
        vertices.iter().all(|vertex| vertex.is_finite()),
        "wrap vertices are not finite"
    );

    let bounds = Bounds::around(*position, vertices);

    position.x = wrap_axis(position.x, bounds.min.x, bounds.max.x, width);
    position.y = wrap_axis(position.y, bounds.min.y, bounds.max.y, height);
}

#[inline]
fn wrap_axis(origin: f64, min: f64, max: f64, limit: f64) -> f64 {
    if max < 0.0 {
        limit + (origin - min).abs()
    } else if min > limit {
        -(origin - max).abs()
    } else {
        origin
    }
}

/// Point-like variant for small round bodies: once the body has left an
/// edge it snaps to the opposite edge coordinate.
pub fn wrap_point(position: &mut Vec2, radius: f64, width: f64, height: f64) {
    debug_assert!(position.is_finite(), "wrap origin is not finite");

    if position.x + radius < 0.0 {
        position.x = width;
    } else if position.x > width {
        position.x = 0.0;
    }

    if position.y + radius < 0.0 {
        position.y = height;
    } else if position.y > height {
        position.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f64 = 700.0;
    const HEIGHT: f64 = 500.0;

    fn box_at(origin: Vec2, half: f64) -> Vec<Vec2> {
        vec![
            Vec2::new(origin.x - half, origin.y - half),
            Vec2::new(origin.x + half, origin.y - half),
            Vec2::new(origin.x + half, origin.y + half),
            Vec2::new(origin.x - half, origin.y + half),
        ]
    }

    #[test]
    fn shape_inside_bounds_is_untouched() {
        for origin in [
            Vec2::new(350.0, 250.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(699.0, 499.0),
        ] {
            let mut position = origin;
            wrap_polygon(&mut position, &box_at(origin, 10.0), WIDTH, HEIGHT);
            assert_eq!(position, origin);
        }
    }

    #[test]
    fn partially_offscreen_shape_is_untouched() {
        let origin = Vec2::new(-5.0, 250.0);
        let mut position = origin;
        wrap_polygon(&mut position, &box_at(origin, 10.0), WIDTH, HEIGHT);
        assert_eq!(position, origin);
    }

    #[test]
    fn shape_past_left_edge_reenters_from_right_with_same_offset() {
        // Rightmost vertex at x = -5, leftmost at x = -25, origin at x = -15.
        let origin = Vec2::new(-15.0, 250.0);
        let vertices = box_at(origin, 10.0);
        let mut position = origin;
        wrap_polygon(&mut position, &vertices, WIDTH, HEIGHT);

        assert_eq!(position.x, WIDTH + 10.0);
        assert_eq!(position.y, 250.0);

        let moved: Vec<Vec2> = box_at(position, 10.0);
        let new_bounds = Bounds::around(position, &moved);
        assert_eq!(new_bounds.min.x, WIDTH);
    }

    #[test]
    fn shape_past_right_edge_reenters_from_left() {
        let origin = Vec2::new(WIDTH + 30.0, 100.0);
        let mut position = origin;
        wrap_polygon(&mut position, &box_at(origin, 10.0), WIDTH, HEIGHT);
        assert_eq!(position.x, -10.0);
        assert_eq!(position.y, 100.0);
    }

    #[test]
    fn diagonal_exit_wraps_both_axes() {
        let origin = Vec2::new(-40.0, HEIGHT + 40.0);
        let mut position = origin;
        wrap_polygon(&mut position, &box_at(origin, 10.0), WIDTH, HEIGHT);
        assert_eq!(position, Vec2::new(WIDTH + 10.0, -10.0));
    }

    #[test]
    fn offset_uses_extreme_vertex_for_lopsided_shapes() {
        // Origin sits at one corner; the body trails 30 units to its left.
        let origin = Vec2::new(-2.0, 250.0);
        let vertices = vec![
            Vec2::new(-32.0, 240.0),
            Vec2::new(-12.0, 240.0),
            Vec2::new(-12.0, 260.0),
        ];
        let mut position = origin;
        wrap_polygon(&mut position, &vertices, WIDTH, HEIGHT);
        assert_eq!(position.x, WIDTH + 30.0);
    }

    #[test]
    fn point_snaps_to_opposite_edge() {
        let mut position = Vec2::new(-5.0, 250.0);
        wrap_point(&mut position, 4.0, WIDTH, HEIGHT);
        assert_eq!(position, Vec2::new(WIDTH, 250.0));

        let mut position = Vec2::new(350.0, HEIGHT + 0.5);
        wrap_point(&mut position, 4.0, WIDTH, HEIGHT);
        assert_eq!(position, Vec2::new(350.0, 0.0));
    }

    #[test]
    fn point_within_radius_of_edge_stays() {
        let mut position = Vec2::new(-3.0, 250.0);
        wrap_point(&mut position, 4.0, WIDTH, HEIGHT);
        assert_eq!(position, Vec2::new(-3.0, 250.0));
    }
}
