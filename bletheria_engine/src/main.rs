#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Bletheria **
//! A text adventure in the Realm of Misfortune

use bletheria_engine::store::PlayerStore;
use bletheria_engine::{
    BLETHERIA_VERSION, GameConfig, GameSession, InputManager, RonStore, View, ViewItem, WorldMap, run_account_setup,
    run_intro_setup, run_repl,
};

use anyhow::{Context, Result};
use log::{info, warn};

use std::io;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: Bletheria {BLETHERIA_VERSION}");
    let config = GameConfig::load();

    let mut world = WorldMap::build_world();
    let mut view = View::from_config(&config.display);
    let mut input = InputManager::new();
    let mut stdout = io::stdout();

    let mut store = if config.persistence.enabled {
        let path = config.persistence.resolved_store_path();
        match RonStore::open(&path) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("player store unavailable: {e}");
                view.push(ViewItem::Error(format!(
                    "Saved games are unavailable ({e}). Playing without saving."
                )));
                None
            },
        }
    } else {
        None
    };

    let player = match store.as_mut() {
        Some(store) => run_account_setup(&mut world, store, &mut input, &mut view, &mut stdout),
        None => run_intro_setup(&mut world, &mut input, &mut view, &mut stdout),
    }
    .context("while setting up the player")?;

    info!("Starting the game!");
    let mut session = GameSession::new(world, player);
    run_repl(
        &mut session,
        &mut input,
        &mut view,
        &mut stdout,
        store.as_mut().map(|store| store as &mut dyn PlayerStore),
    )
}
