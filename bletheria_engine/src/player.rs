//! Player -- the adventurer's session state.
use crate::normalize::capitalize;

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The attribute the player chose to buff during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    Wisdom,
    Perception,
}
impl Attribute {
    /// Interpret a setup answer. Only "wisdom" (any case) selects Wisdom; every
    /// other answer is taken as Perception.
    pub fn from_input(raw: &str) -> Self {
        if capitalize(raw) == "Wisdom" {
            Attribute::Wisdom
        } else {
            Attribute::Perception
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Wisdom => "Wisdom",
            Attribute::Perception => "Perception",
        }
    }
}
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state of the one adventurer in a session.
///
/// The inventory behaves as an insertion-ordered set of capitalized item names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub attribute: Attribute,
    pub current_room: String,
    inventory: Vec<String>,
    pub user_id: Option<i64>,
}
impl Player {
    pub fn new(name: impl Into<String>, attribute: Attribute, start_room: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute,
            current_room: start_room.into(),
            inventory: Vec::new(),
            user_id: None,
        }
    }

    /// Attach the account id used for saving progress.
    #[must_use]
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Items collected so far, in the order they were picked up.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Add an item to the inventory. Returns false if it was already held or the name is blank.
    pub fn add_item(&mut self, item: &str) -> bool {
        let item = capitalize(item);
        if item.is_empty() || self.inventory.contains(&item) {
            return false;
        }
        info!("{} picked up '{item}'", self.name);
        self.inventory.push(item);
        true
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.contains(&capitalize(item))
    }

    /// Restore items from a comma-separated list, skipping blank entries.
    pub fn load_inventory_from_csv(&mut self, csv: &str) {
        for item in csv.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            self.add_item(item);
        }
    }

    /// The inventory as a comma-separated list.
    pub fn inventory_csv(&self) -> String {
        self.inventory.join(",")
    }

    /// The inventory as shown on the HUD, e.g. `[Wand, Potion]`.
    pub fn inventory_display(&self) -> String {
        format!("[{}]", self.inventory.join(", "))
    }

    pub fn move_to(&mut self, room: impl Into<String>) {
        self.current_room = room.into();
    }
}
