//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location

use crate::room::Direction;
use crate::session::GameSession;

use log::info;

const BLOCKED: &str = "You can't go that way.";

/// Move the player through the exit in the requested direction, if there is one.
///
/// Unknown directions, missing exits, and exits into rooms that no longer exist all
/// leave the player where they are.
pub fn travel_handler(session: &mut GameSession, input_dir: &str) {
    let Ok(direction) = input_dir.parse::<Direction>() else {
        info!("{} tried to travel '{input_dir}'", session.player.name);
        session.last_message = BLOCKED.to_string();
        return;
    };

    let destination = session
        .world
        .room(&session.player.current_room)
        .and_then(|room| room.exit(direction))
        .filter(|name| session.world.has_room(name))
        .map(str::to_string);

    match destination {
        Some(destination) => {
            info!(
                "{} moved {direction} from '{}' to '{destination}'",
                session.player.name, session.player.current_room
            );
            session.player.move_to(destination);
            session.last_message = format!("You travel {direction}");
        },
        None => {
            info!(
                "{} found no way {direction} out of '{}'",
                session.player.name, session.player.current_room
            );
            session.last_message = BLOCKED.to_string();
        },
    }
}
