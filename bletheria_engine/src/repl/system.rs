//! `repl::system` module
//!
//! Contains repl loop handlers for commands that affect the session itself

use crate::repl::ReplControl;
use crate::session::GameSession;
use crate::store::PlayerStore;

use log::{info, warn};
use std::fmt::Write as _;

/// Leave the game, saving progress first when the player has an account.
///
/// A failed save is reported in the farewell; the session ends either way.
pub fn exit_handler(session: &mut GameSession, store: Option<&mut (dyn PlayerStore + '_)>) -> ReplControl {
    let player = &session.player;
    info!(
        "{} left from '{}' after {} turns",
        player.name, player.current_room, session.turn_count
    );
    info!("ending inventory:");
    player.inventory().iter().for_each(|item| info!("- {item}"));

    let relics = player.inventory().len();
    let mut farewell = format!(
        "Farewell, {}. You leave Bletheria carrying {relics} {}.",
        player.name,
        if relics == 1 { "relic" } else { "relics" }
    );

    if let Some(store) = store
        && player.user_id.is_some()
    {
        match store.save_player_state(player) {
            Ok(()) => farewell.push_str("\nYour progress has been saved."),
            Err(e) => {
                warn!("saving progress for '{}' failed: {e}", player.name);
                let _ = write!(farewell, "\nYour progress could not be saved: {e}");
            },
        }
    }

    session.last_message = farewell;
    session.terminate();
    ReplControl::Quit
}
