//! Collision detection and notification engine.
//!
//! This module is the framework's core: direction-aware AABB
//! (Axis-Aligned Bounding Box) tests between entities, boundary and
//! obstacle tests against the scenario, and the notification protocol that
//! turns a detected collision into a callback on the affected entity.
//!
//! # Architecture
//!
//! - Pure predicates (`entities_intersect`, `surface_collision`, ...) take
//!   their inputs by reference and have no side effects.
//! - Scenario checks (`check_scenario_limits`, `check_scenario_areas`,
//!   `check_falling`) notify the moving entity through its `CollisionSink`
//!   as part of the query itself: detection and notification are atomic.
//! - Entity-to-entity checks (`check_action_collisions`) run against the
//!   registry's cached snapshots and queue `CollisionEvent`s for the world
//!   to deliver, since the struck entities are not borrowable mid-update.
//!
//! # Rust Learning Notes
//!
//! This module demonstrates:
//! - **Generic functions over trait bounds**: the same check works for any
//!   `Collidable + CollisionSink` entity, including trait objects (`?Sized`)
//! - **Side-effect-free cores**: the rectangle math is separated from the
//!   notification plumbing, which keeps it trivially testable

use crate::direction::Direction;
use crate::entity::{Causer, Collidable, CollisionSink, EntityId};
use crate::paths::linear_path;
use crate::registry::Registry;
use crate::scenario::Scenario;
use sdl2::rect::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Semantic cause of a collision event. Orthogonal to `Direction`; a full
/// collision report is the pair (type, direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionType {
    Moving,
    Jumping,
    Falling,
    Landing,
    Attacking,
    Defending,
    Catching,
    Dropping,
    Using,
    Talking,
    LimitReached,
    ScenarioAreaReached,
    Undefined,
}

/// A detected collision waiting to be delivered to its target.
///
/// Scenario checks notify the mover directly; everything that targets a
/// *different* entity goes through one of these, queued during the tick and
/// dispatched by the world afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub causer: Causer,
    pub target: EntityId,
    pub kind: CollisionType,
    pub direction: Option<Direction>,
}

/// Bottom clearance, in pixels, trimmed off the east/west leading edges
/// before the surface walk. Without it, standing on a floor reads as a wall
/// hit whenever the mover's bottom corner touches the floor's top edge.
const CORNER_INSET: i32 = 5;

//
// Collisions between collidables
//

/// Checks whether two collidables intersect: same z-index and overlapping
/// bounding rectangles. This is the coarse eligibility filter used by every
/// other entity-to-entity test.
pub fn entities_intersect<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    a.z_index() == b.z_index() && a.collision_area().has_intersection(b.collision_area())
}

/// Checks whether any sub-rectangle of `a` intersects any sub-rectangle of
/// `b` (same z-index required). Entities without sub-rectangles never
/// collide precisely.
pub fn entities_intersect_precise<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    if a.z_index() != b.z_index() {
        return false;
    }

    a.collision_areas().iter().any(|area_a| {
        b.collision_areas()
            .iter()
            .any(|area_b| area_a.has_intersection(*area_b))
    })
}

/// Refines `entities_intersect` with a cheap directional pre-check: the
/// intersection test only runs when the mover is actually approaching the
/// target's facing side. Compound directions OR their two cardinal
/// pre-checks, which is intentionally permissive — this gates the expensive
/// test, it does not tighten it.
pub fn directional_intersect<A, B>(mover: &A, direction: Direction, target: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    approaching_edge(mover.collision_area(), direction, target.collision_area())
        && entities_intersect(mover, target)
}

/// Per-direction cheap rejection: is `mover` on the approaching side of
/// `target` for this heading? `Standing` and `Any` approach nothing.
fn approaching_edge(mover: Rect, direction: Direction, target: Rect) -> bool {
    match direction {
        Direction::North => mover.top() <= target.bottom(),
        Direction::East => mover.right() >= target.left(),
        Direction::South => mover.bottom() >= target.top(),
        Direction::West => mover.left() <= target.right(),
        Direction::NorthEast => {
            approaching_edge(mover, Direction::North, target)
                || approaching_edge(mover, Direction::East, target)
        }
        Direction::SouthEast => {
            approaching_edge(mover, Direction::South, target)
                || approaching_edge(mover, Direction::East, target)
        }
        Direction::SouthWest => {
            approaching_edge(mover, Direction::South, target)
                || approaching_edge(mover, Direction::West, target)
        }
        Direction::NorthWest => {
            approaching_edge(mover, Direction::North, target)
                || approaching_edge(mover, Direction::West, target)
        }
        Direction::Standing | Direction::Any => false,
    }
}

/// Checks whether the mover's leading edge is overlapping the facing edge
/// of an obstacle.
///
/// For a cardinal direction the test is three stages: the directional
/// pre-check, the AABB confirmation, then a discretized walk of the mover's
/// leading edge looking for a sample point inside the obstacle (inclusive
/// bounds on both axes). Diagonals OR the two component cardinal tests,
/// horizontal component first; the order is fixed for determinism but is
/// not a guaranteed contract.
pub fn surface_collision(mover: Rect, direction: Direction, obstacle: Rect) -> bool {
    match direction {
        Direction::North | Direction::East | Direction::South | Direction::West => {
            cardinal_surface_collision(mover, direction, obstacle)
        }
        Direction::NorthEast => {
            cardinal_surface_collision(mover, Direction::East, obstacle)
                || cardinal_surface_collision(mover, Direction::North, obstacle)
        }
        Direction::SouthEast => {
            cardinal_surface_collision(mover, Direction::East, obstacle)
                || cardinal_surface_collision(mover, Direction::South, obstacle)
        }
        Direction::SouthWest => {
            cardinal_surface_collision(mover, Direction::West, obstacle)
                || cardinal_surface_collision(mover, Direction::South, obstacle)
        }
        Direction::NorthWest => {
            cardinal_surface_collision(mover, Direction::West, obstacle)
                || cardinal_surface_collision(mover, Direction::North, obstacle)
        }
        Direction::Standing | Direction::Any => false,
    }
}

fn cardinal_surface_collision(mover: Rect, direction: Direction, obstacle: Rect) -> bool {
    if !approaching_edge(mover, direction, obstacle) {
        return false;
    }
    if !mover.has_intersection(obstacle) {
        return false;
    }

    let (from, to) = leading_edge(mover, direction);
    linear_path(from, to)
        .into_iter()
        .any(|point| contains_inclusive(obstacle, point))
}

/// Endpoints of the mover's leading edge for a cardinal direction. The
/// east/west edges keep [`CORNER_INSET`] of bottom clearance, clamped so a
/// very short mover still walks a valid edge.
fn leading_edge(mover: Rect, direction: Direction) -> (Point, Point) {
    match direction {
        Direction::North => (
            Point::new(mover.left(), mover.top()),
            Point::new(mover.right(), mover.top()),
        ),
        Direction::South => (
            Point::new(mover.left(), mover.bottom()),
            Point::new(mover.right(), mover.bottom()),
        ),
        Direction::East => (
            Point::new(mover.right(), mover.top()),
            Point::new(mover.right(), (mover.bottom() - CORNER_INSET).max(mover.top())),
        ),
        // West, plus any non-cardinal input, which cardinal_surface_collision
        // never passes here
        _ => (
            Point::new(mover.left(), mover.top()),
            Point::new(mover.left(), (mover.bottom() - CORNER_INSET).max(mover.top())),
        ),
    }
}

/// Inclusive point-in-rectangle test. The surface walk treats the
/// obstacle's far edges as solid, unlike the half-open SDL containment.
fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x() >= rect.left()
        && point.x() <= rect.right()
        && point.y() >= rect.top()
        && point.y() <= rect.bottom()
}

//
// Collisions between a collidable and the scenario
//

/// Checks whether the entity has reached (or passed) the scenario's scalar
/// boundary limit for the given direction; diagonals OR their two cardinal
/// sub-tests. Boundaries are inclusive: sitting exactly on the limit
/// already collides.
///
/// On a hit the entity is notified with `LimitReached` and the direction as
/// part of the query — callers must expect detection and notification to be
/// atomic.
pub fn check_scenario_limits<E>(entity: &mut E, direction: Direction, scenario: &Scenario) -> bool
where
    E: Collidable + CollisionSink + ?Sized,
{
    let area = entity.collision_area();

    let reached = match direction {
        Direction::North => area.top() <= scenario.north_limit(),
        Direction::East => area.right() >= scenario.east_limit(),
        Direction::South => area.bottom() >= scenario.south_limit(),
        Direction::West => area.left() <= scenario.west_limit(),
        Direction::NorthEast => {
            area.top() <= scenario.north_limit() || area.right() >= scenario.east_limit()
        }
        Direction::SouthEast => {
            area.bottom() >= scenario.south_limit() || area.right() >= scenario.east_limit()
        }
        Direction::SouthWest => {
            area.bottom() >= scenario.south_limit() || area.left() <= scenario.west_limit()
        }
        Direction::NorthWest => {
            area.top() <= scenario.north_limit() || area.left() <= scenario.west_limit()
        }
        Direction::Standing | Direction::Any => false,
    };

    if reached {
        entity.receive_directional_collision(
            Causer::Scenario,
            CollisionType::LimitReached,
            direction,
        );
    }

    reached
}

/// Checks the entity's surface against every scenario obstacle rectangle,
/// short-circuiting on the first hit, which fires a `ScenarioAreaReached`
/// notification at the entity.
pub fn check_scenario_areas<E>(entity: &mut E, direction: Direction, scenario: &Scenario) -> bool
where
    E: Collidable + CollisionSink + ?Sized,
{
    let area = entity.collision_area();

    let hit = scenario
        .collision_areas()
        .iter()
        .any(|obstacle| surface_collision(area, direction, *obstacle));

    if hit {
        entity.receive_directional_collision(
            Causer::Scenario,
            CollisionType::ScenarioAreaReached,
            direction,
        );
    }

    hit
}

/// Platformer support: is there ground under the entity?
///
/// Samples the entity's bottom edge and probes one pixel below each sample
/// against the scenario obstacles. Returns `false` (not falling) as soon as
/// a probe lands inside an obstacle. Otherwise the entity is airborne; if
/// its feet are still above the south limit it also receives a `Falling`
/// notification pointing south.
pub fn check_falling<E>(entity: &mut E, scenario: &Scenario) -> bool
where
    E: Collidable + CollisionSink + ?Sized,
{
    let area = entity.collision_area();
    let bottom_left = Point::new(area.left(), area.bottom());
    let bottom_right = Point::new(area.right(), area.bottom());

    for point in linear_path(bottom_left, bottom_right) {
        let probe = Point::new(point.x(), point.y() + 1);
        if scenario
            .collision_areas()
            .iter()
            .any(|obstacle| obstacle.contains_point(probe))
        {
            return false;
        }
    }

    if scenario.south_limit() > area.bottom() + 1 {
        entity.receive_directional_collision(
            Causer::Scenario,
            CollisionType::Falling,
            Direction::South,
        );
    }

    true
}

//
// Collisions caused by actions
//

/// Checks whether an action performed by `causer` lands on any entity
/// visible to it: every same-layer candidate whose bounding rectangle
/// intersects the causer's gets a queued notification carrying the action's
/// collision type. All candidates are checked and notified — this does not
/// short-circuit on the first hit.
///
/// Returns true if at least one collision occurred. The registry must be
/// synced by the caller; results reflect the snapshots, not live entities.
pub fn check_action_collisions<C>(
    causer_id: EntityId,
    causer: &C,
    cause: CollisionType,
    registry: &Registry,
    events: &mut Vec<CollisionEvent>,
) -> bool
where
    C: Collidable + ?Sized,
{
    let area = causer.collision_area();
    let z_index = causer.z_index();
    let mut collided = false;

    for candidate in registry.visible_to(causer_id, causer.visible_area()) {
        if candidate.z_index == z_index && area.has_intersection(candidate.area) {
            collided = true;
            events.push(CollisionEvent {
                causer: Causer::Entity(causer_id),
                target: candidate.id,
                kind: cause,
                direction: None,
            });
        }
    }

    collided
}
