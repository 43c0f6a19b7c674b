//! `repl::navigation` module
//!
//! Handlers that answer questions about the map without moving the player.

use crate::session::GameSession;

use log::info;
use std::fmt::Write as _;

const HINT_USAGE: &str = "Please specify a room name, e.g., 'hint Demon High Temple'.";

/// Describe the shortest route from the player's room to the named room.
pub fn hint_handler(session: &mut GameSession, target: &str) {
    session.last_message = hint_message(session, target);
}

fn hint_message(session: &GameSession, target: &str) -> String {
    if target.trim().is_empty() {
        return HINT_USAGE.to_string();
    }
    let Some(goal) = session.world.find_room_name_ignore_case(target) else {
        return format!("No such room: {}", target.trim());
    };
    let start = session.player.current_room.as_str();
    if goal == start {
        return format!("You are already in {goal}.");
    }

    let path = session.world.find_shortest_path(start, goal);
    if path.is_empty() {
        info!("no route from '{start}' to '{goal}'");
        return format!("No path found from {start} to {goal}.");
    }

    let mut message = format!("Shortest path to {goal}:\n");
    for (step, pair) in path.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let direction = session
            .world
            .direction_between(from, to)
            .map_or("??", |dir| dir.as_str());
        let _ = write!(message, "\n{}. From {from}, go {direction} to {to}", step + 1);
    }
    message
}

/// List every room currently on the map.
pub fn rooms_handler(session: &mut GameSession) {
    let mut message = String::from("Available rooms:");
    for name in session.world.room_names() {
        let _ = write!(message, "\n- {name}");
    }
    session.last_message = message;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Attribute, Player};
    use crate::world::{BOSS_ROOM, SECRET_ROOM, START_ROOM, WorldMap};

    fn session_at(room: &str) -> GameSession {
        GameSession::new(WorldMap::build_world(), Player::new("Tester", Attribute::Perception, room))
    }

    #[test]
    fn hint_to_temple_from_foyer() {
        let mut session = session_at(START_ROOM);
        hint_handler(&mut session, "demon high temple");
        assert_eq!(
            session.last_message,
            "Shortest path to Demon High Temple:\n\n\
             1. From Ashen Foyer, go East to The Haunted Library of Wayward Souls\n\
             2. From The Haunted Library of Wayward Souls, go North to Demon High Temple"
        );
        assert_eq!(session.player.current_room, START_ROOM);
    }

    #[test]
    fn hint_requires_a_room_name() {
        let mut session = session_at(START_ROOM);
        hint_handler(&mut session, "   ");
        assert_eq!(session.last_message, HINT_USAGE);
    }

    #[test]
    fn hint_unknown_room() {
        let mut session = session_at(START_ROOM);
        hint_handler(&mut session, "narnia");
        assert_eq!(session.last_message, "No such room: narnia");
    }

    #[test]
    fn hint_current_room() {
        let mut session = session_at(START_ROOM);
        hint_handler(&mut session, "ASHEN FOYER");
        assert_eq!(session.last_message, "You are already in Ashen Foyer.");
    }

    #[test]
    fn hint_unreachable_room() {
        let mut session = session_at(BOSS_ROOM);
        hint_handler(&mut session, "ashen foyer");
        assert_eq!(session.last_message, "No path found from Demon High Temple to Ashen Foyer.");
    }

    #[test]
    fn hint_to_locked_cavern_is_unknown() {
        let mut session = session_at(START_ROOM);
        session.world.lock_secret_ending();
        hint_handler(&mut session, "secret cavern");
        assert_eq!(session.last_message, "No such room: secret cavern");
    }

    #[test]
    fn rooms_lists_every_room_sorted() {
        let mut session = session_at(START_ROOM);
        rooms_handler(&mut session);
        let lines: Vec<&str> = session.last_message.lines().collect();
        assert_eq!(lines[0], "Available rooms:");
        assert_eq!(lines.len(), 1 + session.world.room_count());
        assert!(lines.contains(&"- Secret Cavern"));
        let mut sorted = lines[1..].to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, lines[1..]);
    }

    #[test]
    fn rooms_reflects_the_lock() {
        let mut session = session_at(START_ROOM);
        session.world.lock_secret_ending();
        rooms_handler(&mut session);
        assert!(!session.last_message.contains(SECRET_ROOM));
    }
}
