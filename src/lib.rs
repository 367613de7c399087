//! A fixed-timestep 2D game framework core: collision detection,
//! move-and-slide movement, spatial queries, action dispatch, and saves.
//!
//! The framework owns the boring machinery of a top-down or side-on 2D
//! game and leaves rendering and game rules to the caller. Its pieces:
//!
//! - [`collision`]: direction-aware AABB tests and the notification
//!   protocol that delivers hits to entities
//! - [`movable`]: throttled move-and-slide movement against the scenario
//! - [`scenario`]: the playing field, its limits and obstacles
//! - [`registry`]: lazily-rebuilt snapshot cache for spatial queries
//! - [`world`]: entity ownership and the three-phase tick loop
//! - [`actions`] / [`controls`]: input bindings and reaction tables
//! - [`save`]: slot-based JSON persistence
//!
//! # Architecture
//!
//! Entities are composed, not inherited: a game type embeds a
//! [`entity::Body`] for geometry and implements the small traits it
//! needs ([`entity::Collidable`], [`entity::CollisionSink`],
//! [`movable::Movable`], [`world::Entity`]). Nothing in the framework is
//! globally reachable; each tick hands every entity a
//! [`world::TickContext`] scoped to exactly what it may touch.

pub mod actions;
pub mod collision;
pub mod controls;
pub mod direction;
pub mod entity;
pub mod movable;
pub mod paths;
pub mod registry;
pub mod save;
pub mod scenario;
pub mod world;

pub use actions::{Action, Reaction, Reactor, SetupError};
pub use collision::{CollisionEvent, CollisionType};
pub use controls::{Controls, FiredBinding, assemble};
pub use direction::Direction;
pub use entity::{Body, Causer, Collidable, CollisionSink, EntityId, SCENARIO_ID};
pub use movable::{Mobility, Movable};
pub use registry::{Registry, Snapshot};
pub use scenario::Scenario;
pub use world::{Entity, TickContext, World};
