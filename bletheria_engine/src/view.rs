//! View module.
//! This contains the view of the game world / messages.
//! Rather than printing to the console from each handler, the REPL and setup code
//! aggregate the needed information and messages into a `View`, which renders them
//! in one pass at the end of the step.
use std::io::{self, Write};

use textwrap::{fill, termwidth};

use crate::config::DisplayConfig;
use crate::narrative::TITLE;
use crate::style::GameStyle;

/// Command reference shown at the top of every turn.
pub const COMMAND_HELP: &str = "\
------------------------------
Commands:
travel <direction>
equip <item>
hint <room name>
rooms
exit
------------------------------";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Everything that can appear on screen, in the order it was pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewItem {
    ClearScreen,
    Title,
    Narrative(String),
    Notice(String),
    CommandHelp,
    Location(String),
    Inventory(String),
    Feedback(String),
    ItemOnDisplay(String),
    Ending(String),
    Error(String),
}

/// View aggregates information to be displayed on each pass through the REPL and then
/// writes it out.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
    pub clear_screen: bool,
    pub items: Vec<ViewItem>,
}
impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    /// Create a new empty view sized to the terminal.
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            clear_screen: true,
            items: Vec::new(),
        }
    }

    /// Create a view honoring the display settings from the game config.
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            width: config.wrap_width.unwrap_or_else(termwidth),
            clear_screen: config.clear_screen,
            items: Vec::new(),
        }
    }

    /// A fixed-width view that never clears the screen (for piped output and tests).
    pub fn plain(width: usize) -> Self {
        Self {
            width,
            clear_screen: false,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Render all queued items to `out` and empty the queue.
    ///
    /// # Errors
    /// Returns any error from writing to `out`.
    pub fn flush(&mut self, out: &mut dyn Write) -> io::Result<()> {
        for item in std::mem::take(&mut self.items) {
            self.render(out, &item)?;
        }
        out.flush()
    }

    fn render(&self, out: &mut dyn Write, item: &ViewItem) -> io::Result<()> {
        match item {
            ViewItem::ClearScreen => {
                if self.clear_screen {
                    write!(out, "{CLEAR_SCREEN}")?;
                }
            },
            ViewItem::Title => writeln!(out, "{:^width$}\n", TITLE.title_style(), width = self.width)?,
            ViewItem::Narrative(text) => writeln!(out, "{}\n", self.wrap(text).narrative_style())?,
            ViewItem::Notice(text) => writeln!(out, "{}\n", self.wrap(text))?,
            ViewItem::CommandHelp => writeln!(out, "{}", COMMAND_HELP.help_style())?,
            ViewItem::Location(room) => writeln!(out, "You are in the {}", room.room_style())?,
            ViewItem::Inventory(items) => writeln!(out, "Inventory: {}", items.item_style())?,
            ViewItem::Feedback(message) => {
                if message.is_empty() {
                    writeln!(out)?;
                } else {
                    writeln!(out, "\n{}\n", self.wrap(message).feedback_style())?;
                }
            },
            ViewItem::ItemOnDisplay(item) => writeln!(out, "You see the {} on a pedestal.\n", item.item_style())?,
            ViewItem::Ending(text) => {
                if !text.trim().is_empty() {
                    writeln!(out, "{}\n", self.wrap(text).ending_style())?;
                }
            },
            ViewItem::Error(message) => writeln!(out, "{}", self.wrap(message).error_style())?,
        }
        Ok(())
    }

    /// Wrap each line of `text` to the view width, keeping existing line breaks.
    fn wrap(&self, text: &str) -> String {
        text.trim_end()
            .lines()
            .map(|line| if line.trim().is_empty() { String::new() } else { fill(line, self.width) })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(view: &mut View) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        view.flush(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn flush_renders_in_push_order_and_clears_queue() {
        let mut view = View::plain(80);
        view.push(ViewItem::Location("Ashen Foyer".into()));
        view.push(ViewItem::Inventory("[Wand]".into()));
        let text = render(&mut view);
        let location = text.find("You are in the Ashen Foyer").unwrap();
        let inventory = text.find("Inventory: [Wand]").unwrap();
        assert!(location < inventory);
        assert!(view.items.is_empty());
    }

    #[test]
    fn clear_screen_only_when_enabled() {
        let mut view = View::plain(80);
        view.push(ViewItem::ClearScreen);
        assert!(!render(&mut view).contains(CLEAR_SCREEN));

        view.clear_screen = true;
        view.push(ViewItem::ClearScreen);
        assert!(render(&mut view).contains(CLEAR_SCREEN));
    }

    #[test]
    fn empty_ending_renders_nothing() {
        let mut view = View::plain(80);
        view.push(ViewItem::Ending(String::new()));
        assert!(render(&mut view).is_empty());
    }

    #[test]
    fn long_text_is_wrapped_to_width() {
        let mut view = View::plain(20);
        view.push(ViewItem::Notice("one two three four five six seven eight".into()));
        let text = render(&mut view);
        assert!(text.lines().all(|line| line.chars().count() <= 20));
        assert!(text.contains("seven"));
    }

    #[test]
    fn command_help_lists_every_command() {
        for word in crate::command::COMMAND_WORDS {
            assert!(COMMAND_HELP.contains(word), "{word} missing from help");
        }
    }

    #[test]
    fn from_config_uses_fixed_width() {
        let config = DisplayConfig {
            clear_screen: false,
            wrap_width: Some(42),
        };
        let view = View::from_config(&config);
        assert_eq!(view.width, 42);
        assert!(!view.clear_screen);
    }
}
