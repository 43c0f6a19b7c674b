//! `repl::inventory` module
//!
//! Contains repl loop handlers for commands that affect player inventory

use crate::normalize::capitalize;
use crate::session::GameSession;

use log::info;

/// Pick up the item on display in the current room if it matches `desired`.
pub fn equip_handler(session: &mut GameSession, desired: &str) {
    let wanted = capitalize(desired);
    let on_display = session
        .world
        .room(&session.player.current_room)
        .and_then(|room| room.item.as_deref())
        .map(capitalize);

    session.last_message = match on_display {
        Some(item) if !wanted.is_empty() && item == wanted => {
            if session.player.add_item(&item) {
                format!("{item} equipped!")
            } else {
                format!("You already have the {item}")
            }
        },
        _ => {
            info!(
                "{} looked for '{desired}' in '{}'",
                session.player.name, session.player.current_room
            );
            format!("Can't find {wanted}")
        },
    };
}
