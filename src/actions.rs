//! Actions and reactions: what an entity does, and what it does back.
//!
//! An [`Action`] is a tagged sum of the two ways behavior gets triggered:
//! `Fired` actions come from input events (a key press mapped through
//! [`crate::controls`]), `Reacted` actions answer a collision
//! notification. Both carry a command payload of the caller's choosing;
//! the framework never interprets it, it only routes it.
//!
//! A [`Reactor`] is an entity's reaction table. Its two query modes are
//! deliberately different: non-directional lookups return *every* match
//! (an attack that is also a shove runs both reactions), while
//! directional lookups return only the *first* match, because two
//! reactions to the same directional hit would fight over the same
//! displacement.

use crate::collision::CollisionType;
use crate::direction::Direction;
use sdl2::keyboard::Keycode;
use std::fmt;

/// Setup-time wiring mistakes: detected when bindings and reactions are
/// registered, never at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The key is already bound to a fired action.
    DuplicateBinding(Keycode),
    /// A reaction with an overlapping trigger and direction is already
    /// registered; the new reaction's name is carried for diagnostics.
    DuplicateReaction(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::DuplicateBinding(key) => {
                write!(f, "key already bound: {:?}", key)
            }
            SetupError::DuplicateReaction(name) => {
                write!(f, "overlapping reaction: {}", name)
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// A reaction to a collision: runs `command` when a collision of one of
/// the `triggers` types arrives from a matching direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction<C> {
    pub name: String,
    /// Collision types this reaction answers.
    pub triggers: Vec<CollisionType>,
    /// Direction filter; `Direction::Any` matches every direction.
    pub direction: Direction,
    /// Collision type this reaction itself causes when it lands on
    /// another entity, for chained reactions.
    pub cause: CollisionType,
    pub command: C,
}

impl<C> Reaction<C> {
    fn triggered_by(&self, kind: CollisionType) -> bool {
        self.triggers.contains(&kind)
    }

    fn matches_direction(&self, direction: Direction) -> bool {
        self.direction == Direction::Any
            || direction == Direction::Any
            || self.direction == direction
    }
}

/// One unit of entity behavior with its trigger attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<C> {
    /// Triggered by an input event.
    Fired {
        name: String,
        event_code: Keycode,
        /// Collision type this action causes when it lands on another
        /// entity.
        cause: CollisionType,
        command: C,
    },
    /// Triggered by an incoming collision.
    Reacted(Reaction<C>),
}

impl<C> Action<C> {
    pub fn name(&self) -> &str {
        match self {
            Action::Fired { name, .. } => name,
            Action::Reacted(reaction) => &reaction.name,
        }
    }

    pub fn cause(&self) -> CollisionType {
        match self {
            Action::Fired { cause, .. } => *cause,
            Action::Reacted(reaction) => reaction.cause,
        }
    }
}

/// An entity's reaction table.
#[derive(Debug)]
pub struct Reactor<C> {
    reactions: Vec<Reaction<C>>,
}

impl<C> Reactor<C> {
    pub fn new() -> Self {
        Reactor {
            reactions: Vec::new(),
        }
    }

    /// Registers a reaction, rejecting it if an existing reaction shares a
    /// trigger type with an overlapping direction (equal, or either side
    /// `Any`). Overlaps would make directional dispatch order-dependent.
    pub fn add(&mut self, reaction: Reaction<C>) -> Result<(), SetupError> {
        let overlapping = self.reactions.iter().any(|existing| {
            reaction
                .triggers
                .iter()
                .any(|kind| existing.triggered_by(*kind))
                && (existing.direction == reaction.direction
                    || existing.direction == Direction::Any
                    || reaction.direction == Direction::Any)
        });

        if overlapping {
            return Err(SetupError::DuplicateReaction(reaction.name));
        }

        self.reactions.push(reaction);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    /// Every reaction triggered by `kind`, in registration order. All of
    /// them are meant to run.
    pub fn all_matching(&self, kind: CollisionType) -> Vec<&Reaction<C>> {
        self.reactions
            .iter()
            .filter(|r| r.triggered_by(kind))
            .collect()
    }

    /// The first reaction triggered by `kind` from `direction`. At most
    /// one directional reaction runs per hit.
    pub fn first_matching(
        &self,
        kind: CollisionType,
        direction: Direction,
    ) -> Option<&Reaction<C>> {
        self.reactions
            .iter()
            .find(|r| r.triggered_by(kind) && r.matches_direction(direction))
    }
}

impl<C> Default for Reactor<C> {
    fn default() -> Self {
        Reactor::new()
    }
}
