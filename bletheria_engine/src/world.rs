//! The world map.
//!
//! [`WorldMap`] owns every [`Room`] in the Realm of Misfortune, builds the fixed
//! topology at startup, and answers the graph queries the REPL needs: exact and
//! case-insensitive room lookup, breadth-first shortest paths, and the direction
//! label between two adjacent rooms.
//!
//! Exits are directed. Each one is declared on its own, and the map never adds a
//! reverse edge that wasn't declared.

use crate::room::{Direction, Room};

use log::info;
use std::collections::{HashMap, VecDeque};

pub const START_ROOM: &str = "Ashen Foyer";
pub const BOSS_ROOM: &str = "Demon High Temple";
pub const BOSS_NAME: &str = "Nozgorath the Decrepit";
pub const SECRET_ROOM: &str = "Secret Cavern";
pub const HUT_ROOM: &str = "Forgotten Hut of Secret Spaces";

const ACRID_SWAMP: &str = "The Acrid Swamp";
const WORKSHOP: &str = "Cursed Workshop of Azazel the Ensnared";
const ROTTEN_FORREST: &str = "Rotten Forrest";
const WIWARIA_COMMON: &str = "Wiwaria Common";
const LIBRARY: &str = "The Haunted Library of Wayward Souls";

/// (room name, item)
const ROOM_DEFS: &[(&str, Option<&str>)] = &[
    (START_ROOM, None),
    (ACRID_SWAMP, Some("Potion")),
    (WORKSHOP, Some("Mask")),
    (ROTTEN_FORREST, Some("Wand")),
    (WIWARIA_COMMON, Some("Grieves")),
    (HUT_ROOM, Some("Cloak")),
    (SECRET_ROOM, Some("Key")),
    (LIBRARY, Some("Spellbook")),
    (BOSS_ROOM, None),
];

/// (from, direction, to)
const EXIT_DEFS: &[(&str, Direction, &str)] = &[
    (START_ROOM, Direction::South, ACRID_SWAMP),
    (START_ROOM, Direction::North, WIWARIA_COMMON),
    (START_ROOM, Direction::East, LIBRARY),
    (START_ROOM, Direction::West, ROTTEN_FORREST),
    (ACRID_SWAMP, Direction::North, START_ROOM),
    (ACRID_SWAMP, Direction::East, WORKSHOP),
    (WORKSHOP, Direction::West, ACRID_SWAMP),
    (ROTTEN_FORREST, Direction::East, START_ROOM),
    (WIWARIA_COMMON, Direction::South, START_ROOM),
    (WIWARIA_COMMON, Direction::East, HUT_ROOM),
    (HUT_ROOM, Direction::West, WIWARIA_COMMON),
    (HUT_ROOM, Direction::East, SECRET_ROOM),
    (SECRET_ROOM, Direction::West, HUT_ROOM),
    (LIBRARY, Direction::West, START_ROOM),
    (LIBRARY, Direction::North, BOSS_ROOM),
];

/// All rooms of the game, keyed by their canonical name.
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    rooms: HashMap<String, Room>,
}
impl WorldMap {
    /// Create a map with no rooms at all.
    pub fn new_empty() -> WorldMap {
        Self { rooms: HashMap::new() }
    }

    /// Build the fixed topology of the Realm of Misfortune.
    pub fn build_world() -> WorldMap {
        let mut world = Self::new_empty();
        for (name, item) in ROOM_DEFS {
            let mut room = Room::new(*name);
            room.item = item.map(str::to_string);
            if *name == BOSS_ROOM {
                room.boss = Some(BOSS_NAME.to_string());
            }
            world.add_room(room);
        }
        for (from, direction, to) in EXIT_DEFS {
            if let Some(room) = world.rooms.get_mut(*from) {
                room.add_exit(*direction, *to);
            }
        }
        info!(
            "{} rooms and {} exits added to the world map",
            world.rooms.len(),
            world.exit_count()
        );
        world
    }

    /// Where every new adventurer begins.
    pub fn start_room(&self) -> &'static str {
        START_ROOM
    }

    /// Lair of the boss, where the ending is decided.
    pub fn boss_room(&self) -> &'static str {
        BOSS_ROOM
    }

    /// Insert a room, replacing any room with the same name.
    pub fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.name.clone(), room);
    }

    /// Exact-name room lookup.
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn room_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.rooms.get_mut(name)
    }

    pub fn has_room(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Total number of exits across every room, dangling or not.
    pub fn exit_count(&self) -> usize {
        self.rooms.values().map(|room| room.exits.len()).sum()
    }

    /// Names of all rooms currently on the map, sorted alphabetically.
    pub fn room_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rooms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve free-form input to a canonical room name, ignoring case and surrounding whitespace.
    pub fn find_room_name_ignore_case(&self, input: &str) -> Option<&str> {
        let wanted = input.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.rooms
            .keys()
            .find(|name| name.to_lowercase() == wanted)
            .map(String::as_str)
    }

    /// Seal off the secret ending: the hut loses its East exit and the Secret Cavern is removed.
    ///
    /// Safe to call repeatedly, or on a map missing either room.
    pub fn lock_secret_ending(&mut self) {
        if let Some(hut) = self.rooms.get_mut(HUT_ROOM)
            && hut.remove_exit(Direction::East).is_some()
        {
            info!("sealed the East exit of '{HUT_ROOM}'");
        }
        if self.rooms.remove(SECRET_ROOM).is_some() {
            info!("'{SECRET_ROOM}' removed from the world map");
        }
    }

    /// Returns true once the Secret Cavern is no longer part of the map.
    pub fn secret_ending_locked(&self) -> bool {
        !self.has_room(SECRET_ROOM)
    }

    /// Breadth-first search along directed exits from `start` to `goal`.
    ///
    /// Returns the room names from `start` to `goal` inclusive, or an empty path if
    /// either room is missing or `goal` can't be reached. Exits into rooms that no
    /// longer exist are skipped. When several shortest paths exist, which one is
    /// returned depends on exit iteration order.
    pub fn find_shortest_path(&self, start: &str, goal: &str) -> Vec<String> {
        if !self.has_room(start) || !self.has_room(goal) {
            return Vec::new();
        }

        let mut queue = VecDeque::from([start]);
        let mut came_from: HashMap<&str, Option<&str>> = HashMap::from([(start, None)]);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                break;
            }
            let Some(room) = self.rooms.get(current) else {
                continue;
            };
            for neighbor in room.exits.values() {
                let neighbor = neighbor.as_str();
                if !came_from.contains_key(neighbor) && self.has_room(neighbor) {
                    came_from.insert(neighbor, Some(current));
                    queue.push_back(neighbor);
                }
            }
        }

        if !came_from.contains_key(goal) {
            return Vec::new();
        }

        // walk the predecessor chain back from the goal
        let mut path = Vec::new();
        let mut cursor = Some(goal);
        while let Some(name) = cursor {
            path.push(name.to_string());
            cursor = came_from.get(name).copied().flatten();
        }
        path.reverse();
        path
    }

    /// Direction of the first exit in `from` that leads to `to`.
    pub fn direction_between(&self, from: &str, to: &str) -> Option<Direction> {
        self.rooms
            .get(from)?
            .exits
            .iter()
            .find(|(_, destination)| destination.as_str() == to)
            .map(|(direction, _)| *direction)
    }
}
