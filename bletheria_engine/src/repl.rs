//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the command handlers that act on a [`GameSession`].

pub mod input;
pub mod inventory;
pub mod movement;
pub mod navigation;
pub mod system;

pub use input::{InputEvent, InputManager, LineSource, ScriptedInput};
pub use inventory::*;
pub use movement::*;
pub use navigation::*;
pub use system::*;

use crate::command::{Command, parse_command};
use crate::ending::{ending_text, resolve_ending};
use crate::narrative::LOST_BETWEEN_REALMS;
use crate::session::GameSession;
use crate::store::PlayerStore;
use crate::style::GameStyle;
use crate::view::{View, ViewItem};

use anyhow::{Context, Result};
use log::{error, info};
use std::io::Write;

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read-eval-print loop until the player exits.
///
/// Each pass renders the HUD for the current turn, reads one line, and dispatches
/// it. End of input is treated as `exit`; Ctrl-C cancels the line.
///
/// # Errors
/// - if input can't be read or output can't be written
pub fn run_repl(
    session: &mut GameSession,
    input: &mut dyn LineSource,
    view: &mut View,
    out: &mut dyn Write,
    mut store: Option<&mut dyn PlayerStore>,
) -> Result<()> {
    let prompt = "Enter your move: ".prompt_style().to_string();
    while session.is_playing() {
        session.turn_count += 1;
        info!("================> BEGIN TURN {} <================", session.turn_count);

        if let ReplControl::Quit = render_turn(session, view) {
            view.flush(out).context("writing game output")?;
            break;
        }
        view.flush(out).context("writing game output")?;

        input.set_room_names(session.world.room_names().into_iter().map(str::to_string).collect());
        let line = match input.read_line(&prompt).context("reading player input")? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                info!("end of input reached, treating as exit");
                "exit".to_string()
            },
            InputEvent::Interrupted => {
                session.last_message = "Command canceled.".to_string();
                continue;
            },
        };

        let turn_store = store.as_mut().map(|s| &mut **s as &mut dyn PlayerStore);
        if let ReplControl::Quit = process_line(session, &line, turn_store) {
            view.push(ViewItem::Feedback(session.last_message.clone()));
            view.flush(out).context("writing game output")?;
            break;
        }
    }
    Ok(())
}

/// Queue the HUD for the current turn: command help, location, inventory, the
/// previous command's feedback, any item on display, and the ending in the temple.
///
/// Returns `Quit` if the player's room has vanished from the map.
pub fn render_turn(session: &mut GameSession, view: &mut View) -> ReplControl {
    let room = match session.player_room() {
        Ok(room) => room.clone(),
        Err(e) => {
            error!("{e}");
            view.push(ViewItem::Error(LOST_BETWEEN_REALMS.to_string()));
            session.terminate();
            return ReplControl::Quit;
        },
    };

    view.push(ViewItem::ClearScreen);
    view.push(ViewItem::CommandHelp);
    view.push(ViewItem::Location(room.name.clone()));
    view.push(ViewItem::Inventory(session.player.inventory_display()));
    view.push(ViewItem::Feedback(session.last_message.clone()));

    if let Some(item) = room.item.as_deref()
        && !session.player.has_item(item)
    {
        view.push(ViewItem::ItemOnDisplay(item.to_string()));
    }

    if room.is_boss_room() {
        if let Some(ending) = resolve_ending(&session.player) {
            info!("{} faces the boss: {ending:?} ending", session.player.name);
        }
        view.push(ViewItem::Ending(ending_text(&session.player).to_string()));
    }
    ReplControl::Continue
}

/// Parse one line of input and run the matching handler.
pub fn process_line(session: &mut GameSession, line: &str, store: Option<&mut (dyn PlayerStore + '_)>) -> ReplControl {
    let command = parse_command(line);
    match command {
        Command::Travel(direction) => travel_handler(session, &direction),
        Command::Equip(item) => equip_handler(session, &item),
        Command::Hint(room) => hint_handler(session, &room),
        Command::Rooms => rooms_handler(session),
        Command::Exit => return exit_handler(session, store),
        Command::Invalid => {
            info!("unrecognized input: '{}'", line.trim());
            session.last_message = "Invalid command.".to_string();
        },
    }
    ReplControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Attribute, Player};
    use crate::world::{BOSS_ROOM, START_ROOM, WorldMap};

    fn session_at(room: &str) -> GameSession {
        GameSession::new(WorldMap::build_world(), Player::new("Tester", Attribute::Perception, room))
    }

    fn play(session: &mut GameSession, lines: &[&str]) -> String {
        colored::control::set_override(false);
        let mut input = ScriptedInput::new(lines.iter().copied());
        let mut view = View::plain(200);
        let mut out = Vec::new();
        run_repl(session, &mut input, &mut view, &mut out, None).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn invalid_input_changes_nothing() {
        let mut session = session_at(START_ROOM);
        for line in ["", "   ", "dance", "go west"] {
            assert_eq!(process_line(&mut session, line, None), ReplControl::Continue);
            assert_eq!(session.last_message, "Invalid command.");
            assert_eq!(session.player.current_room, START_ROOM);
            assert!(session.player.inventory().is_empty());
        }
    }

    #[test]
    fn process_line_dispatches_commands() {
        let mut session = session_at(START_ROOM);
        process_line(&mut session, "TRAVEL west", None);
        assert_eq!(session.player.current_room, "Rotten Forrest");
        process_line(&mut session, "equip Wand", None);
        assert!(session.player.has_item("Wand"));
        process_line(&mut session, "rooms", None);
        assert!(session.last_message.starts_with("Available rooms:"));
        assert_eq!(process_line(&mut session, "exit", None), ReplControl::Quit);
    }

    #[test]
    fn render_turn_shows_hud_and_item() {
        let mut session = session_at("Rotten Forrest");
        session.last_message = "You travel West".into();
        let mut view = View::plain(80);
        assert_eq!(render_turn(&mut session, &mut view), ReplControl::Continue);
        assert!(view.items.contains(&ViewItem::CommandHelp));
        assert!(view.items.contains(&ViewItem::Location("Rotten Forrest".into())));
        assert!(view.items.contains(&ViewItem::Inventory("[]".into())));
        assert!(view.items.contains(&ViewItem::Feedback("You travel West".into())));
        assert!(view.items.contains(&ViewItem::ItemOnDisplay("Wand".into())));
        assert!(!view.items.iter().any(|item| matches!(item, ViewItem::Ending(_))));
    }

    #[test]
    fn render_turn_hides_collected_item() {
        let mut session = session_at("Rotten Forrest");
        session.player.add_item("Wand");
        let mut view = View::plain(80);
        render_turn(&mut session, &mut view);
        assert!(!view.items.iter().any(|item| matches!(item, ViewItem::ItemOnDisplay(_))));
    }

    #[test]
    fn render_turn_in_temple_shows_ending() {
        let mut session = session_at(BOSS_ROOM);
        let mut view = View::plain(80);
        render_turn(&mut session, &mut view);
        assert!(view.items.contains(&ViewItem::Ending(crate::narrative::BAD_ENDING.to_string())));
    }

    #[test]
    fn missing_room_ends_the_session() {
        let mut session = session_at("Nowhere");
        let output = play(&mut session, &["travel west"]);
        assert!(output.contains(LOST_BETWEEN_REALMS));
        assert!(!session.is_playing());
        assert_eq!(session.player.current_room, "Nowhere");
    }

    #[test]
    fn end_of_input_exits() {
        let mut session = session_at(START_ROOM);
        let output = play(&mut session, &["travel west"]);
        assert!(!session.is_playing());
        assert_eq!(session.player.current_room, "Rotten Forrest");
        assert!(output.contains("Farewell, Tester."));
    }

    #[test]
    fn interrupted_read_cancels_the_line() {
        struct Interrupting {
            interrupted: bool,
        }
        impl LineSource for Interrupting {
            fn read_line(&mut self, _prompt: &str) -> std::io::Result<InputEvent> {
                if self.interrupted {
                    Ok(InputEvent::Line("exit".into()))
                } else {
                    self.interrupted = true;
                    Ok(InputEvent::Interrupted)
                }
            }
        }

        colored::control::set_override(false);
        let mut session = session_at(START_ROOM);
        let mut input = Interrupting { interrupted: false };
        let mut view = View::plain(80);
        let mut out = Vec::new();
        run_repl(&mut session, &mut input, &mut view, &mut out, None).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Command canceled."));
        assert_eq!(session.turn_count, 2);
    }

    #[test]
    fn store_is_available_on_every_turn() -> anyhow::Result<()> {
        use crate::store::RonStore;

        colored::control::set_override(false);
        let dir = tempfile::tempdir()?;
        let mut store = RonStore::open(dir.path().join("bletheria.ron"))?;
        let user_id = store.register_user("Tester", "pw")?;
        let mut session = GameSession::new(
            WorldMap::build_world(),
            Player::new("Tester", Attribute::Perception, START_ROOM).with_user_id(user_id),
        );
        let mut input = ScriptedInput::new(["travel west", "equip wand", "rooms", "exit"]);
        let mut view = View::plain(200);
        let mut out = Vec::new();
        run_repl(&mut session, &mut input, &mut view, &mut out, Some(&mut store))?;

        assert_eq!(session.turn_count, 4);
        let state = store.load_player_state(user_id)?.expect("saved on exit");
        assert_eq!(state.current_room, "Rotten Forrest");
        assert_eq!(state.inventory_csv, "Wand");
        Ok(())
    }

    #[test]
    fn ending_repeats_every_turn_in_temple() {
        let mut session = session_at(BOSS_ROOM);
        let output = play(&mut session, &["rooms", "dance"]);
        assert_eq!(output.matches(crate::narrative::BAD_ENDING.trim()).count(), 3);
    }
}
