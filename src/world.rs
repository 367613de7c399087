//! World orchestration: entity ownership, the tick loop, and collision
//! event delivery.
//!
//! The [`World`] owns the scenario, every entity, and the position
//! [`Registry`]. Each tick runs in three phases:
//!
//! 1. sync the registry if anything invalidated it since the last tick
//! 2. update every entity with a [`TickContext`] scoped to that entity
//! 3. deliver the collision events the updates queued
//!
//! Entities queue events instead of touching each other because phase 2
//! holds a mutable borrow of exactly one entity at a time; the queue is
//! what lets an attack land on an entity that has not been updated yet
//! this tick.
//!
//! # Rust Learning Notes
//!
//! This module demonstrates:
//! - **Trait objects for heterogeneous collections**: `Box<dyn Entity>`
//!   stores players, monsters and props in one `Vec`
//! - **Split borrows via destructuring**: the update loop borrows the
//!   scenario, registry and event queue as separate fields so each entity
//!   can be updated mutably alongside them

use crate::collision::{self, CollisionEvent, CollisionType};
use crate::entity::{Collidable, CollisionSink, EntityId, SCENARIO_ID};
use crate::registry::{Registry, Snapshot};
use crate::scenario::Scenario;
use sdl2::rect::{Point, Rect};

/// A live entity: collision geometry, notification handling, and a
/// per-tick update.
pub trait Entity: Collidable + CollisionSink {
    /// Advances the entity by one tick. Movement goes through
    /// `ctx.scenario`, cross-entity effects through `ctx.events` (usually
    /// via [`crate::collision::check_action_collisions`]).
    fn update(&mut self, ctx: &mut TickContext);
}

/// Everything an entity may touch during its update, scoped to one tick.
/// Replaces any notion of globally reachable world state: an entity only
/// sees what it is handed.
pub struct TickContext<'a> {
    /// The id the world knows the updating entity by.
    pub self_id: EntityId,
    pub scenario: &'a Scenario,
    /// Snapshot cache, synced at the start of the tick. Positions are
    /// from the previous tick for entities not yet updated.
    pub registry: &'a Registry,
    /// Collision events to deliver after every entity has updated.
    pub events: &'a mut Vec<CollisionEvent>,
}

struct WorldEntry {
    id: EntityId,
    entity: Box<dyn Entity>,
}

pub struct World {
    scenario: Scenario,
    entries: Vec<WorldEntry>,
    registry: Registry,
    pending: Vec<CollisionEvent>,
    next_id: EntityId,
}

impl World {
    pub fn new(scenario: Scenario) -> Self {
        World {
            scenario,
            entries: Vec::new(),
            registry: Registry::new(),
            pending: Vec::new(),
            // Zero is the scenario's id; entities start above it
            next_id: SCENARIO_ID + 1,
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn scenario_mut(&mut self) -> &mut Scenario {
        &mut self.scenario
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an entity and returns the id it will be known by.
    pub fn add(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(WorldEntry { id, entity });
        self.registry.invalidate();
        id
    }

    /// Removes an entity, returning it if it was present.
    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(index);
        self.registry.invalidate();
        Some(entry.entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| e.entity.as_mut())
    }

    /// Rebuilds the snapshot cache if anything invalidated it. Queries and
    /// ticks call this; nothing refreshes eagerly.
    fn sync_registry(&mut self) {
        if self.registry.is_outdated() {
            let snapshots: Vec<Snapshot> = self
                .entries
                .iter()
                .map(|e| Snapshot::capture(e.id, e.entity.as_ref()))
                .collect();
            self.registry.refresh(snapshots);
        }
    }

    /// Runs one tick: registry sync, every entity's update, then event
    /// delivery. Entities are updated in insertion order.
    pub fn update(&mut self) {
        self.sync_registry();

        let World {
            scenario,
            entries,
            registry,
            pending,
            ..
        } = self;
        let scenario: &Scenario = scenario;
        let registry: &Registry = registry;

        for entry in entries.iter_mut() {
            let mut ctx = TickContext {
                self_id: entry.id,
                scenario,
                registry,
                events: &mut *pending,
            };
            entry.entity.update(&mut ctx);
        }

        // Updates have moved entities; the cache is stale until the next
        // sync
        self.registry.invalidate();
        self.dispatch_pending();
    }

    /// Performs an out-of-band action for an entity (an input handler
    /// firing an attack between ticks): collision check against the
    /// current registry, then immediate delivery.
    pub fn perform_action(&mut self, causer_id: EntityId, cause: CollisionType) -> bool {
        self.sync_registry();

        let Some(entry) = self.entries.iter().find(|e| e.id == causer_id) else {
            log::warn!("perform_action for unknown entity {}", causer_id);
            return false;
        };

        let mut events = Vec::new();
        let collided = collision::check_action_collisions(
            causer_id,
            entry.entity.as_ref(),
            cause,
            &self.registry,
            &mut events,
        );

        self.pending.extend(events);
        self.dispatch_pending();
        collided
    }

    /// Delivers queued collision events to their targets. Events aimed at
    /// entities that disappeared since being queued are dropped with a
    /// warning; the lazy cache makes that window legitimate.
    fn dispatch_pending(&mut self) {
        for event in self.pending.drain(..) {
            let target = self
                .entries
                .iter_mut()
                .find(|e| e.id == event.target);

            match target {
                Some(entry) => match event.direction {
                    Some(direction) => entry.entity.receive_directional_collision(
                        event.causer,
                        event.kind,
                        direction,
                    ),
                    None => entry.entity.receive_collision(event.causer, event.kind),
                },
                None => {
                    log::warn!(
                        "dropping {:?} event for missing entity {}",
                        event.kind,
                        event.target
                    );
                }
            }
        }
    }

    /// Ids of the entities the given entity can see, by its visibility
    /// rectangle in the synced registry.
    pub fn visible_entities(&mut self, viewer: EntityId) -> Vec<EntityId> {
        self.sync_registry();
        let Some(snapshot) = self.registry.get(viewer) else {
            return Vec::new();
        };
        self.registry
            .visible_to(viewer, snapshot.visible_area)
            .map(|s| s.id)
            .collect()
    }

    /// Ids of the entities fully contained in `area`.
    pub fn entities_in_area(&mut self, area: Rect) -> Vec<EntityId> {
        self.sync_registry();
        self.registry.in_area(area).map(|s| s.id).collect()
    }

    /// The first entity standing on `point`, if any.
    pub fn entity_at_point(&mut self, point: Point) -> Option<EntityId> {
        self.sync_registry();
        self.registry.at_point(point).map(|s| s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::entity::{Body, Causer};
    use crate::movable::{Mobility, Movable};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    type HitLog = Rc<RefCell<Vec<(EntityId, Causer, CollisionType)>>>;

    /// Walks its fixed increments every tick and logs every notification
    /// it receives into a shared log keyed by its own id.
    struct Creature {
        id: EntityId,
        body: Body,
        mobility: Mobility,
        log: HitLog,
    }

    impl Creature {
        fn new(x: i32, y: i32, dx: i32, dy: i32, log: HitLog) -> Self {
            Creature {
                id: 0,
                body: Body::new(x, y, 10, 10, 0).with_visibility_range(20),
                mobility: Mobility::new(Duration::ZERO).with_increments(dx, dy),
                log,
            }
        }
    }

    impl Collidable for Creature {
        fn scenario_coordinates(&self) -> Point {
            self.body.position()
        }
        fn z_index(&self) -> i32 {
            self.body.z_index()
        }
        fn collision_area(&self) -> Rect {
            self.body.bounds()
        }
        fn collision_areas(&self) -> &[Rect] {
            self.body.collision_areas()
        }
        fn visibility_range(&self) -> u32 {
            self.body.visibility_range()
        }
    }

    impl CollisionSink for Creature {
        fn receive_collision(&mut self, causer: Causer, kind: CollisionType) {
            self.log.borrow_mut().push((self.id, causer, kind));
        }
        fn receive_directional_collision(
            &mut self,
            causer: Causer,
            kind: CollisionType,
            _direction: Direction,
        ) {
            self.log.borrow_mut().push((self.id, causer, kind));
        }
    }

    impl Movable for Creature {
        fn mobility(&self) -> &Mobility {
            &self.mobility
        }
        fn mobility_mut(&mut self) -> &mut Mobility {
            &mut self.mobility
        }
        fn apply_movement(&mut self, dx: i32, dy: i32) {
            self.body.translate(dx, dy);
        }
    }

    impl Entity for Creature {
        fn update(&mut self, ctx: &mut TickContext) {
            self.id = ctx.self_id;
            self.step(ctx.scenario);
        }
    }

    fn world_with(creatures: Vec<Creature>) -> (World, Vec<EntityId>) {
        let mut world = World::new(Scenario::new(0, 0, 100, 100, 0));
        let ids = creatures
            .into_iter()
            .map(|c| world.add(Box::new(c)))
            .collect();
        (world, ids)
    }

    #[test]
    fn test_add_assigns_ids_above_the_scenario() {
        let log: HitLog = Rc::default();
        let (world, ids) = world_with(vec![
            Creature::new(10, 10, 0, 0, log.clone()),
            Creature::new(30, 30, 0, 0, log),
        ]);
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(world.len(), 2);
        assert!(ids.iter().all(|&id| id != SCENARIO_ID));
    }

    #[test]
    fn test_update_moves_entities_and_refreshes_queries() {
        let log: HitLog = Rc::default();
        let (mut world, ids) =
            world_with(vec![Creature::new(50, 50, 0, -2, log)]);

        world.update();

        assert_eq!(world.entity_at_point(Point::new(55, 49)), Some(ids[0]));
        assert_eq!(world.entity_at_point(Point::new(55, 59)), None);
    }

    #[test]
    fn test_blocked_entity_is_notified_during_its_update() {
        let log: HitLog = Rc::default();
        let (mut world, ids) =
            world_with(vec![Creature::new(50, 0, 0, -2, log.clone())]);

        world.update();

        assert_eq!(
            log.borrow().as_slice(),
            &[(ids[0], Causer::Scenario, CollisionType::LimitReached)]
        );
        // It did not move
        assert_eq!(world.entity_at_point(Point::new(55, 5)), Some(ids[0]));
    }

    #[test]
    fn test_perform_action_notifies_overlapping_entities() {
        let log: HitLog = Rc::default();
        let (mut world, ids) = world_with(vec![
            Creature::new(50, 50, 0, 0, log.clone()),
            Creature::new(55, 55, 0, 0, log.clone()),
            Creature::new(95, 95, 0, 0, log.clone()),
        ]);
        // Give every creature its id without moving anyone
        world.update();
        log.borrow_mut().clear();

        assert!(world.perform_action(ids[0], CollisionType::Attacking));
        assert_eq!(
            log.borrow().as_slice(),
            &[(ids[1], Causer::Entity(ids[0]), CollisionType::Attacking)]
        );
    }

    #[test]
    fn test_perform_action_with_nothing_in_reach() {
        let log: HitLog = Rc::default();
        let (mut world, ids) = world_with(vec![
            Creature::new(0, 0, 0, 0, log.clone()),
            Creature::new(90, 90, 0, 0, log.clone()),
        ]);
        world.update();
        log.borrow_mut().clear();

        assert!(!world.perform_action(ids[0], CollisionType::Attacking));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_removed_entity_disappears_from_queries() {
        let log: HitLog = Rc::default();
        let (mut world, ids) = world_with(vec![
            Creature::new(10, 10, 0, 0, log.clone()),
            Creature::new(30, 30, 0, 0, log),
        ]);

        // Prime the cache, then mutate
        assert_eq!(world.entities_in_area(Rect::new(0, 0, 100, 100)).len(), 2);
        assert!(world.remove(ids[0]).is_some());

        let remaining = world.entities_in_area(Rect::new(0, 0, 100, 100));
        assert_eq!(remaining, vec![ids[1]]);
        assert!(world.get(ids[0]).is_none());
    }

    #[test]
    fn test_visible_entities_respects_range() {
        let log: HitLog = Rc::default();
        let (mut world, ids) = world_with(vec![
            Creature::new(50, 50, 0, 0, log.clone()),
            Creature::new(65, 50, 0, 0, log.clone()),
            Creature::new(95, 50, 0, 0, log),
        ]);

        // Viewer at (50,50) with range 20 sees (65,50) but not (95,50)
        assert_eq!(world.visible_entities(ids[0]), vec![ids[1]]);
        assert!(world.visible_entities(999).is_empty());
    }
}
