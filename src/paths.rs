//! Discretized line sampling between two points.
//!
//! The collision engine never tests a whole edge at once; it walks the edge
//! point by point. This module provides that walk: a unit-step path that
//! moves diagonally until one axis lines up with the target, then straight
//! along the remaining axis.

use sdl2::rect::Point;

/// Generates the unit-step path from `from` to `to`.
///
/// The path EXCLUDES the origin point and INCLUDES the endpoint, so two
/// equal points produce an empty path. Callers walking a rectangle edge
/// therefore skip the starting corner, which is shared with the adjacent
/// edge.
pub fn linear_path(from: Point, to: Point) -> Vec<Point> {
    let mut path = Vec::new();
    let mut current = from;

    while current != to {
        let dx = (to.x() - current.x()).signum();
        let dy = (to.y() - current.y()).signum();
        current = Point::new(current.x() + dx, current.y() + dy);
        path.push(current);
    }

    path
}
