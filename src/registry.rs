//! Cached registry of entity positions for cross-entity queries.
//!
//! Entities cannot borrow each other during an update, so spatial
//! queries (who can I see, who is standing here) run against immutable
//! [`Snapshot`]s captured from the live entities. The registry is lazily
//! rebuilt: mutations flip an `outdated` flag, and the world re-captures
//! snapshots only when the next query actually needs them. Between a
//! mutation and the next refresh, queries intentionally see stale data.
//!
//! # Rust Learning Notes
//!
//! This module demonstrates:
//! - **Snapshot isolation**: copying the few fields queries need breaks
//!   the borrow dependency on `&mut` entities
//! - **Lazy invalidation**: a dirty flag plus a generation counter makes
//!   "refresh at most once per tick" trivial to enforce and test

use crate::entity::{Collidable, EntityId};
use sdl2::rect::{Point, Rect};

/// Immutable copy of one entity's spatial state at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub id: EntityId,
    pub z_index: i32,
    pub area: Rect,
    pub visible_area: Rect,
}

impl Snapshot {
    pub fn capture<C>(id: EntityId, entity: &C) -> Self
    where
        C: Collidable + ?Sized,
    {
        Snapshot {
            id,
            z_index: entity.z_index(),
            area: entity.collision_area(),
            visible_area: entity.visible_area(),
        }
    }
}

pub struct Registry {
    snapshots: Vec<Snapshot>,
    outdated: bool,
    generation: u64,
}

impl Registry {
    /// A new registry starts outdated: it has never captured anything.
    pub fn new() -> Self {
        Registry {
            snapshots: Vec::new(),
            outdated: true,
            generation: 0,
        }
    }

    /// Marks the cache stale. Cheap; call on every mutation that can move
    /// or add or remove an entity.
    pub fn invalidate(&mut self) {
        self.outdated = true;
    }

    pub fn is_outdated(&self) -> bool {
        self.outdated
    }

    /// How many times the cache has been rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the cached snapshots and marks the cache fresh.
    pub fn refresh(&mut self, snapshots: Vec<Snapshot>) {
        self.snapshots = snapshots;
        self.outdated = false;
        self.generation += 1;
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn get(&self, id: EntityId) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    /// Every snapshot other than the viewer whose area touches the given
    /// visibility rectangle, in capture order.
    pub fn visible_to(
        &self,
        viewer: EntityId,
        visible_area: Rect,
    ) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter().filter(move |s| {
            s.id != viewer
                && (visible_area.contains_rect(s.area) || visible_area.has_intersection(s.area))
        })
    }

    /// Snapshots fully contained in `area`. Containment, not overlap: an
    /// entity straddling the edge is not in the area.
    pub fn in_area(&self, area: Rect) -> impl Iterator<Item = &Snapshot> {
        self.snapshots
            .iter()
            .filter(move |s| area.contains_rect(s.area))
    }

    /// The first snapshot whose area contains the point, if any. Follows
    /// SDL's half-open containment: right and bottom edges are outside.
    pub fn at_point(&self, point: Point) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.area.contains_point(point))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
