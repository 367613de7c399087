//! Entity capabilities and the shared `Body` component.
//!
//! Instead of a deep sprite inheritance chain, game objects are composed
//! from small capability traits:
//!
//! - `Collidable`: read-only geometry the collision engine queries
//! - `CollisionSink`: the notification side, where collision reports land
//!
//! Most entities satisfy `Collidable` by embedding a [`Body`] and delegating
//! to it. The movement capability lives in the `movable` module and the
//! reaction capability in `actions`.

use crate::collision::CollisionType;
use crate::direction::Direction;
use sdl2::rect::{Point, Rect};

/// World-assigned identifier for an entity. Stable for the entity's lifetime.
pub type EntityId = u64;

/// Reserved id for the scenario itself in the registry.
pub const SCENARIO_ID: EntityId = 0;

/// Who caused a collision. Identifies the causer without borrowing it, so a
/// notification can be delivered while the causer is elsewhere mutably held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Causer {
    /// The scenario (a boundary limit, obstacle area, or falling check).
    Scenario,
    /// Another entity, by id.
    Entity(EntityId),
}

/// Read-only collision geometry of a game object.
///
/// Only entities sharing a z-index are eligible to collide; the z-index is
/// the coarse layer filter applied before any rectangle test.
pub trait Collidable {
    /// Top-left corner of the entity in scenario coordinates.
    fn scenario_coordinates(&self) -> Point;

    /// Layer index. Entities on different layers never collide.
    fn z_index(&self) -> i32;

    /// The bounding rectangle used for coarse collision tests.
    fn collision_area(&self) -> Rect;

    /// Optional finer-grained sub-rectangles for precise collision tests.
    /// They are always kept in lockstep with the bounding rectangle.
    fn collision_areas(&self) -> &[Rect];

    /// How far beyond its own bounds the entity can "see" other entities.
    fn visibility_range(&self) -> u32 {
        0
    }

    /// The bounding rectangle inflated by the visibility range on all sides.
    fn visible_area(&self) -> Rect {
        let area = self.collision_area();
        let range = self.visibility_range();
        Rect::new(
            area.x() - range as i32,
            area.y() - range as i32,
            area.width() + 2 * range,
            area.height() + 2 * range,
        )
    }
}

/// Notification side of a collidable entity: collision reports detected by
/// the engine are delivered through these two hooks.
pub trait CollisionSink {
    /// A collision with no meaningful direction (an action landing on the
    /// entity, for example).
    fn receive_collision(&mut self, causer: Causer, kind: CollisionType);

    /// A collision with a direction, such as running into a scenario limit
    /// while moving north.
    fn receive_directional_collision(
        &mut self,
        causer: Causer,
        kind: CollisionType,
        direction: Direction,
    );
}

/// Position, size, layer and sub-rectangles of a game object.
///
/// `Body` is a plain component: entities embed one and forward the
/// `Collidable` accessors to it. Mutation goes through [`Body::translate`]
/// so the sub-rectangles can never desynchronize from the position.
#[derive(Debug, Clone)]
pub struct Body {
    position: Point,
    width: u32,
    height: u32,
    z_index: i32,
    visibility_range: u32,
    collision_areas: Vec<Rect>,
}

impl Body {
    pub fn new(x: i32, y: i32, width: u32, height: u32, z_index: i32) -> Self {
        Body {
            position: Point::new(x, y),
            width,
            height,
            z_index,
            visibility_range: 0,
            collision_areas: Vec::new(),
        }
    }

    pub fn with_visibility_range(mut self, range: u32) -> Self {
        self.visibility_range = range;
        self
    }

    pub fn with_collision_areas(mut self, areas: Vec<Rect>) -> Self {
        self.add_collision_areas(areas);
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = Point::new(x, y);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    pub fn visibility_range(&self) -> u32 {
        self.visibility_range
    }

    pub fn set_visibility_range(&mut self, range: u32) {
        self.visibility_range = range;
    }

    /// The bounding rectangle at the current position.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x(), self.position.y(), self.width, self.height)
    }

    pub fn collision_areas(&self) -> &[Rect] {
        &self.collision_areas
    }

    /// Appends sub-rectangles, skipping any that duplicate or are already
    /// contained by an existing one.
    pub fn add_collision_areas(&mut self, areas: Vec<Rect>) {
        for area in areas {
            let redundant = self
                .collision_areas
                .iter()
                .any(|existing| *existing == area || existing.contains_rect(area));
            if redundant {
                log::warn!("skipping redundant collision area {:?}", area);
            } else {
                self.collision_areas.push(area);
            }
        }
    }

    pub fn set_collision_areas(&mut self, areas: Vec<Rect>) {
        self.collision_areas.clear();
        self.add_collision_areas(areas);
    }

    /// Moves the body and every sub-rectangle by the same delta.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy);
        for area in &mut self.collision_areas {
            area.offset(dx, dy);
        }
    }
}
