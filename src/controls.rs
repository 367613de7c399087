//! Input bindings: from SDL key codes to fired actions.
//!
//! [`Controls`] is a plain key-to-binding map with duplicate detection at
//! bind time. [`assemble`] splits a flat action list into its two runtime
//! homes: `Fired` actions become key bindings here, `Reacted` actions go
//! into the entity's [`Reactor`].

use crate::actions::{Action, Reactor, SetupError};
use crate::collision::CollisionType;
use sdl2::keyboard::Keycode;
use std::collections::HashMap;

/// What a bound key triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredBinding<C> {
    pub name: String,
    /// Collision type the action causes when it lands on another entity.
    pub cause: CollisionType,
    pub command: C,
}

/// Key-to-action map for one controlled entity.
#[derive(Debug)]
pub struct Controls<C> {
    bindings: HashMap<Keycode, FiredBinding<C>>,
}

impl<C> Controls<C> {
    pub fn new() -> Self {
        Controls {
            bindings: HashMap::new(),
        }
    }

    /// Binds a key, rejecting keys that already have a binding. Unbind by
    /// rebinding, not by silent overwrite.
    pub fn bind(&mut self, key: Keycode, binding: FiredBinding<C>) -> Result<(), SetupError> {
        if self.bindings.contains_key(&key) {
            return Err(SetupError::DuplicateBinding(key));
        }
        self.bindings.insert(key, binding);
        Ok(())
    }

    /// Moves an existing binding to a different key. A `from` key without
    /// a binding is a no-op; an occupied `to` key is an error, so user
    /// remapping cannot clobber another action.
    pub fn rebind(&mut self, from: Keycode, to: Keycode) -> Result<(), SetupError> {
        if from == to {
            return Ok(());
        }
        if self.bindings.contains_key(&to) {
            return Err(SetupError::DuplicateBinding(to));
        }
        if let Some(binding) = self.bindings.remove(&from) {
            self.bindings.insert(to, binding);
        }
        Ok(())
    }

    /// The binding for a pressed key, if any.
    pub fn command_for(&self, key: Keycode) -> Option<&FiredBinding<C>> {
        self.bindings.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl<C> Default for Controls<C> {
    fn default() -> Self {
        Controls::new()
    }
}

/// Routes a flat action list into key bindings and a reaction table.
/// Fails on the first duplicate key or overlapping reaction, leaving the
/// caller to fix its action list rather than guessing at precedence.
pub fn assemble<C>(actions: Vec<Action<C>>) -> Result<(Controls<C>, Reactor<C>), SetupError> {
    let mut controls = Controls::new();
    let mut reactor = Reactor::new();

    for action in actions {
        match action {
            Action::Fired {
                name,
                event_code,
                cause,
                command,
            } => {
                controls.bind(
                    event_code,
                    FiredBinding {
                        name,
                        cause,
                        command,
                    },
                )?;
            }
            Action::Reacted(reaction) => {
                reactor.add(reaction)?;
            }
        }
    }

    Ok((controls, reactor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Reaction;
    use crate::direction::Direction;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Command {
        Walk,
        Attack,
        Flinch,
    }

    fn binding(name: &str, command: Command) -> FiredBinding<Command> {
        FiredBinding {
            name: name.to_string(),
            cause: CollisionType::Moving,
            command,
        }
    }

    #[test]
    fn test_bind_and_look_up() {
        let mut controls = Controls::new();
        controls.bind(Keycode::W, binding("walk", Command::Walk)).unwrap();

        let bound = controls.command_for(Keycode::W).unwrap();
        assert_eq!(bound.name, "walk");
        assert_eq!(bound.command, Command::Walk);
        assert!(controls.command_for(Keycode::S).is_none());
    }

    #[test]
    fn test_duplicate_binding_is_rejected() {
        let mut controls = Controls::new();
        controls.bind(Keycode::W, binding("walk", Command::Walk)).unwrap();

        let err = controls
            .bind(Keycode::W, binding("attack", Command::Attack))
            .unwrap_err();
        assert_eq!(err, SetupError::DuplicateBinding(Keycode::W));
        // The original binding is untouched
        assert_eq!(controls.command_for(Keycode::W).unwrap().name, "walk");
    }

    #[test]
    fn test_rebind_moves_a_binding() {
        let mut controls = Controls::new();
        controls.bind(Keycode::W, binding("walk", Command::Walk)).unwrap();

        controls.rebind(Keycode::W, Keycode::Up).unwrap();
        assert!(controls.command_for(Keycode::W).is_none());
        assert_eq!(controls.command_for(Keycode::Up).unwrap().name, "walk");
    }

    #[test]
    fn test_rebind_refuses_occupied_target() {
        let mut controls = Controls::new();
        controls.bind(Keycode::W, binding("walk", Command::Walk)).unwrap();
        controls
            .bind(Keycode::Space, binding("attack", Command::Attack))
            .unwrap();

        let err = controls.rebind(Keycode::W, Keycode::Space).unwrap_err();
        assert_eq!(err, SetupError::DuplicateBinding(Keycode::Space));
        assert_eq!(controls.len(), 2);
    }

    #[test]
    fn test_assemble_splits_fired_and_reacted() {
        let actions = vec![
            Action::Fired {
                name: "attack".to_string(),
                event_code: Keycode::Space,
                cause: CollisionType::Attacking,
                command: Command::Attack,
            },
            Action::Reacted(Reaction {
                name: "flinch".to_string(),
                triggers: vec![CollisionType::Attacking],
                direction: Direction::Any,
                cause: CollisionType::Undefined,
                command: Command::Flinch,
            }),
        ];

        let (controls, reactor) = assemble(actions).unwrap();
        assert_eq!(controls.len(), 1);
        assert_eq!(reactor.len(), 1);
        assert_eq!(
            controls.command_for(Keycode::Space).unwrap().cause,
            CollisionType::Attacking
        );
    }

    #[test]
    fn test_assemble_propagates_duplicate_errors() {
        let duplicate = |name: &str| Action::Fired {
            name: name.to_string(),
            event_code: Keycode::Space,
            cause: CollisionType::Attacking,
            command: Command::Attack,
        };

        let err = assemble(vec![duplicate("attack"), duplicate("shove")]).unwrap_err();
        assert_eq!(err, SetupError::DuplicateBinding(Keycode::Space));
    }
}
