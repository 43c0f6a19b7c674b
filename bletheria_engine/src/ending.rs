//! Ending resolution.
//!
//! Once the player stands before Nozgorath, the relics they carry decide how the
//! story ends. The resolver only reads the player; it never mutates anything.

use crate::narrative;
use crate::player::Player;
use crate::world::BOSS_ROOM;

/// Relics needed to defeat Nozgorath. Every collected item counts, the Key included.
pub const RELICS_REQUIRED: usize = 6;
/// The item that opens the well of wisdom.
pub const SECRET_RELIC: &str = "Key";

/// The three ways a confrontation with Nozgorath can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Secret,
    Good,
    Bad,
}
impl Ending {
    pub fn text(self) -> &'static str {
        match self {
            Ending::Secret => narrative::SECRET_ENDING,
            Ending::Good => narrative::GOOD_ENDING,
            Ending::Bad => narrative::BAD_ENDING,
        }
    }
}

/// Decide the ending for the player's current state, or `None` outside the temple.
pub fn resolve_ending(player: &Player) -> Option<Ending> {
    if player.current_room != BOSS_ROOM {
        return None;
    }
    let prepared = player.inventory().len() >= RELICS_REQUIRED;
    Some(match (prepared, player.has_item(SECRET_RELIC)) {
        (true, true) => Ending::Secret,
        (true, false) => Ending::Good,
        (false, _) => Ending::Bad,
    })
}

/// Ending narrative for the player's state; empty outside the temple.
pub fn ending_text(player: &Player) -> &'static str {
    resolve_ending(player).map_or("", Ending::text)
}
