//! Complete state of a running game.
//!
//! A `GameSession` owns the world map and the player for one play-through. It is
//! created once setup has produced a player, then mutated turn by turn by the
//! REPL handlers.

use crate::player::Player;
use crate::room::Room;
use crate::world::WorldMap;

use anyhow::{Result, anyhow};
use log::info;

/// Where the session is in its lifecycle. Setup happens before a session exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Playing,
    Terminated,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub world: WorldMap,
    pub player: Player,
    /// Feedback from the previous command, shown on the next HUD.
    pub last_message: String,
    pub state: SessionState,
    pub turn_count: usize,
}
impl GameSession {
    pub fn new(world: WorldMap, player: Player) -> Self {
        info!(
            "session started for '{}' ({}) in '{}'",
            player.name, player.attribute, player.current_room
        );
        Self {
            world,
            player,
            last_message: String::new(),
            state: SessionState::Playing,
            turn_count: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// Obtain a reference to the room the player occupies.
    ///
    /// # Errors
    /// - if the player's room is no longer part of the world map
    pub fn player_room(&self) -> Result<&Room> {
        self.world
            .room(&self.player.current_room)
            .ok_or_else(|| anyhow!("player's room '{}' not found in world", self.player.current_room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Attribute;
    use crate::world::{BOSS_ROOM, START_ROOM};

    #[test]
    fn new_session_is_playing_with_no_feedback() {
        let session = GameSession::new(
            WorldMap::build_world(),
            Player::new("Tester", Attribute::Perception, START_ROOM),
        );
        assert!(session.is_playing());
        assert!(session.last_message.is_empty());
        assert_eq!(session.turn_count, 0);
        assert_eq!(session.player_room().unwrap().name, START_ROOM);
    }

    #[test]
    fn player_room_errors_when_room_is_missing() {
        let session = GameSession::new(
            WorldMap::new_empty(),
            Player::new("Tester", Attribute::Perception, BOSS_ROOM),
        );
        assert!(session.player_room().is_err());
    }

    #[test]
    fn terminate_ends_play() {
        let mut session = GameSession::new(
            WorldMap::build_world(),
            Player::new("Tester", Attribute::Perception, START_ROOM),
        );
        session.terminate();
        assert_eq!(session.state, SessionState::Terminated);
        assert!(!session.is_playing());
    }
}
