//! Separating-axis overlap test for convex polygons.
//!
//! Every edge normal of both polygons is a candidate axis. Normals are left
//! unnormalized since only the ordering of projections matters. Touching
//! intervals count as overlap.

use crate::geometry::Vec2;

/// Returns true when the convex polygons `a` and `b` overlap or touch.
///
/// Both vertex loops are closed implicitly (last vertex connects to the
/// first). Concave input gives unspecified results.
pub fn intersects(a: &[Vec2], b: &[Vec2]) -> bool {
    debug_assert_polygon(a);
    debug_assert_polygon(b);

    edge_normals(a)
        .chain(edge_normals(b))
        .all(|axis| projections_overlap(project(axis, a), project(axis, b)))
}

fn edge_normals(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    vertices.iter().enumerate().map(move |(index, current)| {
        let next = vertices[(index + 1) % vertices.len()];
        (next - *current).perp()
    })
}

#[inline]
fn project(axis: Vec2, vertices: &[Vec2]) -> (f64, f64) {
    vertices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), vertex| {
            let dot = vertex.dot(axis);
            (min.min(dot), max.max(dot))
        })
}

#[inline]
fn projections_overlap((min_a, max_a): (f64, f64), (min_b, max_b): (f64, f64)) -> bool {
    max_a >= min_b && max_b >= min_a
}

#[inline]
fn debug_assert_polygon(vertices: &[Vec2]) {
    debug_assert!(
        vertices.len() >= 3,
        "polygon needs at least 3 vertices, got {}",
        vertices.len()
    );
    debug_assert!(
        vertices.iter().all(|vertex| vertex.is_finite()),
        "polygon has non-finite coordinates"
    );
}
