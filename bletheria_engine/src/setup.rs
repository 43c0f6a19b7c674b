//! Character creation and account setup.
//!
//! Setup runs before a [`GameSession`](crate::session::GameSession) exists. It
//! shows the intro, asks the player's name and attribute, and applies the
//! Wisdom lock to the world map. With persistence enabled it first walks the
//! player through login or registration and may restore a saved adventure.

use crate::narrative::{COMMAND_PRIMER, INTRO, PERCEPTION_CHOSEN, WISDOM_CHOSEN};
use crate::normalize::capitalize;
use crate::player::{Attribute, Player};
use crate::repl::{InputEvent, LineSource};
use crate::store::{PlayerState, PlayerStore};
use crate::style::GameStyle;
use crate::view::{View, ViewItem};
use crate::world::WorldMap;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use std::io::Write;

/// Failed login / registration rounds allowed before continuing as a guest.
pub const MAX_ACCOUNT_ATTEMPTS: usize = 3;
/// Name used when the player doesn't give one.
pub const DEFAULT_NAME: &str = "Nameless";

const NAME_PROMPT: &str = "What is your name, adventurer? ";
const ATTRIBUTE_PROMPT: &str = "Will you buff Wisdom or Perception? ";
const ACCOUNT_PROMPT: &str = "Login or register? ";
const USERNAME_PROMPT: &str = "Username: ";
const PASSWORD_PROMPT: &str = "Password: ";

/// Create a new player without persistence: intro, name, primer, attribute.
///
/// # Errors
/// - if input ends or can't be read before setup completes
/// - if output can't be written
pub fn run_intro_setup(
    world: &mut WorldMap,
    input: &mut dyn LineSource,
    view: &mut View,
    out: &mut dyn Write,
) -> Result<Player> {
    show_intro(view);
    let name = ask(input, view, out, NAME_PROMPT)?;
    create_player(world, &name, None, input, view, out)
}

/// Log in or register, then restore the saved adventure or create a new player.
///
/// After [`MAX_ACCOUNT_ATTEMPTS`] failed rounds the player continues as a guest
/// whose progress isn't saved.
///
/// # Errors
/// - if input ends or can't be read before setup completes
/// - if output can't be written
pub fn run_account_setup(
    world: &mut WorldMap,
    store: &mut dyn PlayerStore,
    input: &mut dyn LineSource,
    view: &mut View,
    out: &mut dyn Write,
) -> Result<Player> {
    show_intro(view);

    for attempt in 1..=MAX_ACCOUNT_ATTEMPTS {
        let choice = capitalize(&ask(input, view, out, ACCOUNT_PROMPT)?);
        match choice.as_str() {
            "Register" => {
                let username = ask(input, view, out, USERNAME_PROMPT)?.trim().to_string();
                let password = ask_secret(input, view, out, PASSWORD_PROMPT)?;
                if username.is_empty() {
                    view.push(ViewItem::Error("A username is required.".to_string()));
                    continue;
                }
                match store.register_user(&username, &password) {
                    Ok(user_id) => {
                        view.push(ViewItem::Notice(format!("Account created. Welcome, {username}!")));
                        return create_player(world, &username, Some(user_id), input, view, out);
                    },
                    Err(e) => {
                        warn!("registration attempt {attempt} failed: {e}");
                        view.push(ViewItem::Error(format!("Registration failed: {e}")));
                    },
                }
            },
            "Login" => {
                let username = ask(input, view, out, USERNAME_PROMPT)?.trim().to_string();
                let password = ask_secret(input, view, out, PASSWORD_PROMPT)?;
                match store.authenticate_user(&username, &password) {
                    Ok(user_id) => return resume_account(world, store, &username, user_id, input, view, out),
                    Err(e) => {
                        warn!("login attempt {attempt} failed: {e}");
                        view.push(ViewItem::Error(format!("Login failed: {e}")));
                    },
                }
            },
            _ => view.push(ViewItem::Error("Please answer 'login' or 'register'.".to_string())),
        }
    }

    warn!("no account after {MAX_ACCOUNT_ATTEMPTS} attempts, continuing as guest");
    view.push(ViewItem::Notice(
        "Too many failed attempts. You will play as a guest and your progress won't be saved.".to_string(),
    ));
    let name = ask(input, view, out, NAME_PROMPT)?;
    create_player(world, &name, None, input, view, out)
}

/// Rebuild a player from saved state.
///
/// A Wisdom save re-applies the secret-ending lock. If the saved room is no longer
/// on the map the player starts over in the start room, keeping their items.
pub fn restore_player(world: &mut WorldMap, state: &PlayerState, name: &str, user_id: i64) -> Player {
    let attribute = Attribute::from_input(&state.attribute);
    if attribute == Attribute::Wisdom {
        world.lock_secret_ending();
    }
    let room = if world.has_room(&state.current_room) {
        state.current_room.clone()
    } else {
        warn!(
            "saved room '{}' no longer exists, restoring to '{}'",
            state.current_room,
            world.start_room()
        );
        world.start_room().to_string()
    };
    let mut player = Player::new(name, attribute, room).with_user_id(user_id);
    player.load_inventory_from_csv(&state.inventory_csv);
    info!(
        "restored user {user_id} in '{}' with {} items",
        player.current_room,
        player.inventory().len()
    );
    player
}

fn resume_account(
    world: &mut WorldMap,
    store: &mut dyn PlayerStore,
    username: &str,
    user_id: i64,
    input: &mut dyn LineSource,
    view: &mut View,
    out: &mut dyn Write,
) -> Result<Player> {
    match store.load_player_state(user_id) {
        Ok(Some(state)) => {
            view.push(ViewItem::Notice(format!("Welcome back, {username}. Your adventure continues.")));
            Ok(restore_player(world, &state, username, user_id))
        },
        Ok(None) => {
            view.push(ViewItem::Notice(format!(
                "Welcome, {username}. No saved adventure was found, so a new one begins."
            )));
            create_player(world, username, Some(user_id), input, view, out)
        },
        Err(e) => {
            warn!("loading saved state for user {user_id} failed: {e}");
            view.push(ViewItem::Error(format!("Could not load your saved adventure: {e}")));
            create_player(world, username, Some(user_id), input, view, out)
        },
    }
}

fn show_intro(view: &mut View) {
    view.push(ViewItem::ClearScreen);
    view.push(ViewItem::Title);
    view.push(ViewItem::Notice("Welcome to Bletheria!".to_string()));
    view.push(ViewItem::Narrative(INTRO.to_string()));
}

/// Greet the player, show the primer, and ask for their attribute.
fn create_player(
    world: &mut WorldMap,
    raw_name: &str,
    user_id: Option<i64>,
    input: &mut dyn LineSource,
    view: &mut View,
    out: &mut dyn Write,
) -> Result<Player> {
    let name = match raw_name.trim() {
        "" => DEFAULT_NAME.to_string(),
        trimmed => trimmed.to_string(),
    };
    view.push(ViewItem::ClearScreen);
    view.push(ViewItem::Notice(format!("{name} the Lowly! Welcome to The Realm of Misfortune.")));
    view.push(ViewItem::Notice(COMMAND_PRIMER.to_string()));

    let attribute = Attribute::from_input(&ask(input, view, out, ATTRIBUTE_PROMPT)?);
    let acknowledgement = match attribute {
        Attribute::Wisdom => {
            world.lock_secret_ending();
            WISDOM_CHOSEN
        },
        Attribute::Perception => PERCEPTION_CHOSEN,
    };
    view.push(ViewItem::Narrative(acknowledgement.to_string()));
    view.flush(out).context("writing setup output")?;

    let mut player = Player::new(name, attribute, world.start_room());
    if let Some(user_id) = user_id {
        player = player.with_user_id(user_id);
    }
    info!("created player '{}' ({attribute})", player.name);
    Ok(player)
}

/// Flush anything pending, then read one answer.
fn ask(input: &mut dyn LineSource, view: &mut View, out: &mut dyn Write, prompt: &str) -> Result<String> {
    view.flush(out).context("writing setup output")?;
    let event = input
        .read_line(&prompt.prompt_style().to_string())
        .context("reading setup answer")?;
    answer(event)
}

/// Like [`ask`], but the answer is never kept in input history.
fn ask_secret(input: &mut dyn LineSource, view: &mut View, out: &mut dyn Write, prompt: &str) -> Result<String> {
    view.flush(out).context("writing setup output")?;
    let event = input
        .read_secret(&prompt.prompt_style().to_string())
        .context("reading setup answer")?;
    answer(event)
}

fn answer(event: InputEvent) -> Result<String> {
    match event {
        InputEvent::Line(line) => Ok(line),
        InputEvent::Eof => bail!("input ended during setup"),
        InputEvent::Interrupted => bail!("setup interrupted"),
    }
}
