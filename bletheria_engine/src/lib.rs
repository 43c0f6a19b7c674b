#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const BLETHERIA_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod config;
pub mod ending;
pub mod narrative;
pub mod normalize;
pub mod player;
pub mod repl;
pub mod room;
pub mod session;
pub mod setup;
pub mod store;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use config::GameConfig;
pub use ending::{Ending, ending_text, resolve_ending};
pub use player::{Attribute, Player};
pub use repl::{InputManager, LineSource, ScriptedInput, run_repl};
pub use room::{Direction, Room};
pub use session::GameSession;
pub use setup::{run_account_setup, run_intro_setup};
pub use store::{PlayerStore, RonStore};
pub use view::{View, ViewItem};
pub use world::WorldMap;
