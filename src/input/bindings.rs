use std::collections::HashMap;

use sdl2::keyboard::Keycode;

use crate::events::GameCommand;
use crate::map::direction::Direction;

/// A key transition, stripped of everything the bindings do not need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Keycode),
    Up(Keycode),
}

/// Maps keyboard keys to game commands.
///
/// While a movement key is held its direction is re-sent every frame, so a turn
/// pressed early still lands when Pac-Man reaches the junction.
#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, GameCommand>,
    held: Vec<Keycode>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert(Keycode::Up, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(Keycode::W, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(Keycode::Down, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(Keycode::S, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(Keycode::Left, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(Keycode::A, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(Keycode::Right, GameCommand::MovePlayer(Direction::Right));
        key_bindings.insert(Keycode::D, GameCommand::MovePlayer(Direction::Right));

        // Game actions
        key_bindings.insert(Keycode::P, GameCommand::TogglePause);
        key_bindings.insert(Keycode::Space, GameCommand::TogglePause);
        key_bindings.insert(Keycode::R, GameCommand::Restart);
        key_bindings.insert(Keycode::Escape, GameCommand::Exit);
        key_bindings.insert(Keycode::Q, GameCommand::Exit);

        Self {
            key_bindings,
            held: Vec::new(),
        }
    }
}

impl Bindings {
    pub fn command_for(&self, key: Keycode) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }

    fn is_movement(&self, key: Keycode) -> bool {
        matches!(self.command_for(key), Some(GameCommand::MovePlayer(_)))
    }

    /// Turns one frame's key transitions into commands.
    ///
    /// Releasing the most recent movement key falls back to the one held before it.
    pub fn process(&mut self, events: &[KeyEvent]) -> Vec<GameCommand> {
        let mut commands = Vec::new();
        let mut moved = false;

        for event in events {
            match *event {
                KeyEvent::Down(key) => {
                    if let Some(command) = self.command_for(key) {
                        commands.push(command);
                    }
                    if self.is_movement(key) {
                        moved = true;
                        self.held.retain(|k| *k != key);
                        self.held.push(key);
                    }
                }
                KeyEvent::Up(key) => self.held.retain(|k| *k != key),
            }
        }

        if !moved {
            if let Some(command) = self.held.last().and_then(|key| self.command_for(*key)) {
                commands.push(command);
            }
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut bindings = Bindings::default();
        assert!(bindings.process(&[KeyEvent::Down(Keycode::Z)]).is_empty());
    }

    #[test]
    fn test_exit_keys() {
        let mut bindings = Bindings::default();
        assert_eq!(bindings.process(&[KeyEvent::Down(Keycode::Escape)]), vec![GameCommand::Exit]);
        assert_eq!(bindings.process(&[KeyEvent::Down(Keycode::Q)]), vec![GameCommand::Exit]);
    }

    #[test]
    fn test_held_key_repeats_until_released() {
        let mut bindings = Bindings::default();
        bindings.process(&[KeyEvent::Down(Keycode::Left)]);
        assert_eq!(bindings.process(&[]), vec![GameCommand::MovePlayer(Direction::Left)]);
        assert!(bindings.process(&[KeyEvent::Up(Keycode::Left)]).is_empty());
    }

    #[test]
    fn test_release_resumes_previous_key() {
        let mut bindings = Bindings::default();
        bindings.process(&[KeyEvent::Down(Keycode::W)]);
        bindings.process(&[KeyEvent::Down(Keycode::D)]);
        assert_eq!(
            bindings.process(&[KeyEvent::Up(Keycode::D)]),
            vec![GameCommand::MovePlayer(Direction::Up)]
        );
    }
}
