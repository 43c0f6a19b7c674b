//! Room definitions.
//!
//! Every location in the Realm of Misfortune is a `Room`: a named node with
//! directed exits labeled by compass direction, and at most one item and one boss.
//!
//! A room never checks whether its exits point at rooms that still exist. That is
//! the world map's job, and anything following an exit must re-validate it.

use crate::normalize::capitalize;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Compass directions an exit may be labeled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}
impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];

    /// Canonical (title case) label for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when input doesn't name one of the four compass directions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a direction")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parses any capitalization of a direction, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match capitalize(s).as_str() {
            "North" => Ok(Direction::North),
            "South" => Ok(Direction::South),
            "East" => Ok(Direction::East),
            "West" => Ok(Direction::West),
            _ => Err(ParseDirectionError(s.trim().to_string())),
        }
    }
}

/// A graph node in the world map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub exits: BTreeMap<Direction, String>,
    pub item: Option<String>,
    pub boss: Option<String>,
}
impl Room {
    /// Create an empty room with no exits, item or boss.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exits: BTreeMap::new(),
            item: None,
            boss: None,
        }
    }

    /// Builder-style helper to place an item in the room.
    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Builder-style helper to station a boss in the room.
    #[must_use]
    pub fn with_boss(mut self, boss: impl Into<String>) -> Self {
        self.boss = Some(boss.into());
        self
    }

    /// Add an exit, replacing any existing exit in the same direction.
    pub fn add_exit(&mut self, direction: Direction, destination: impl Into<String>) {
        self.exits.insert(direction, destination.into());
    }

    /// Remove the exit in `direction`, returning its destination if there was one.
    pub fn remove_exit(&mut self, direction: Direction) -> Option<String> {
        self.exits.remove(&direction)
    }

    /// Name of the room the exit in `direction` leads to, if any.
    pub fn exit(&self, direction: Direction) -> Option<&str> {
        self.exits.get(&direction).map(String::as_str)
    }

    pub fn is_boss_room(&self) -> bool {
        self.boss.as_deref().is_some_and(|boss| !boss.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_any_case() {
        assert_eq!("east".parse::<Direction>(), Ok(Direction::East));
        assert_eq!(" East ".parse::<Direction>(), Ok(Direction::East));
        assert_eq!("EAST".parse::<Direction>(), Ok(Direction::East));
        assert_eq!("nOrTh".parse::<Direction>(), Ok(Direction::North));
    }

    #[test]
    fn direction_rejects_unknown_words() {
        let err = "up".parse::<Direction>().unwrap_err();
        assert_eq!(err, ParseDirectionError("up".into()));
        assert!("".parse::<Direction>().is_err());
        assert!("north east".parse::<Direction>().is_err());
    }

    #[test]
    fn direction_display_is_title_case() {
        assert_eq!(Direction::West.to_string(), "West");
    }

    #[test]
    fn add_exit_overwrites_same_direction() {
        let mut room = Room::new("Ashen Foyer");
        room.add_exit(Direction::North, "Wiwaria Common");
        room.add_exit(Direction::North, "Rotten Forrest");
        assert_eq!(room.exits.len(), 1);
        assert_eq!(room.exit(Direction::North), Some("Rotten Forrest"));
    }

    #[test]
    fn remove_exit_is_a_noop_when_absent() {
        let mut room = Room::new("Secret Cavern");
        assert_eq!(room.remove_exit(Direction::East), None);
        room.add_exit(Direction::West, "Forgotten Hut of Secret Spaces");
        assert_eq!(
            room.remove_exit(Direction::West).as_deref(),
            Some("Forgotten Hut of Secret Spaces")
        );
        assert_eq!(room.exit(Direction::West), None);
    }

    #[test]
    fn exit_is_none_for_missing_direction() {
        let room = Room::new("Rotten Forrest");
        assert_eq!(room.exit(Direction::South), None);
    }

    #[test]
    fn boss_marker_detection() {
        assert!(Room::new("Demon High Temple").with_boss("Nozgorath the Decrepit").is_boss_room());
        assert!(!Room::new("Demon High Temple").with_boss("").is_boss_room());
        assert!(!Room::new("Ashen Foyer").is_boss_room());
    }

    #[test]
    fn with_item_places_single_item() {
        let room = Room::new("Rotten Forrest").with_item("Wand");
        assert_eq!(room.item.as_deref(), Some("Wand"));
        assert!(room.boss.is_none());
    }
}
