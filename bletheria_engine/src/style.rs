//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn title_style(&self) -> ColoredString;
    fn room_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn narrative_style(&self) -> ColoredString;
    fn ending_style(&self) -> ColoredString;
    fn feedback_style(&self) -> ColoredString;
    fn help_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn title_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40).bold().underline()
    }
    fn room_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10)
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn narrative_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn ending_style(&self) -> ColoredString {
        self.italic().truecolor(230, 230, 30)
    }
    fn feedback_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn help_style(&self) -> ColoredString {
        self.truecolor(75, 80, 75)
    }
    fn prompt_style(&self) -> ColoredString {
        self.bold().truecolor(180, 180, 220)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
}

impl GameStyle for String {
    fn title_style(&self) -> ColoredString {
        self.as_str().title_style()
    }
    fn room_style(&self) -> ColoredString {
        self.as_str().room_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn narrative_style(&self) -> ColoredString {
        self.as_str().narrative_style()
    }
    fn ending_style(&self) -> ColoredString {
        self.as_str().ending_style()
    }
    fn feedback_style(&self) -> ColoredString {
        self.as_str().feedback_style()
    }
    fn help_style(&self) -> ColoredString {
        self.as_str().help_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
}
