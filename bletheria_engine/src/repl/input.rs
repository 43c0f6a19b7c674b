//! Terminal input handling for the REPL and setup prompts.
//!
//! [`LineSource`] is the seam between the game and whatever supplies its input.
//! [`InputManager`] wraps rustyline (history, tab completion of commands,
//! directions and room names) and falls back to plain stdin when stdin is not a
//! terminal. [`ScriptedInput`] replays a fixed list of lines.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::COMMAND_WORDS;
use crate::room::Direction;

/// Outcome of reading a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// Anything that can hand the game one line of input at a time.
pub trait LineSource {
    /// Show `prompt` (if the source is interactive) and read one line.
    ///
    /// # Errors
    /// Returns an error if the underlying input can't be read.
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent>;

    /// Read a line that must never be remembered, such as a password.
    ///
    /// # Errors
    /// Returns an error if the underlying input can't be read.
    fn read_secret(&mut self, prompt: &str) -> io::Result<InputEvent> {
        self.read_line(prompt)
    }

    /// Update the room names offered for completion. Non-interactive sources ignore this.
    fn set_room_names(&mut self, _names: Vec<String>) {}
}

/// Replays a fixed sequence of lines, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    /// Every prompt that was shown, in order.
    pub prompts: Vec<String>,
    /// Prompts answered through [`LineSource::read_secret`].
    pub secret_prompts: Vec<String>,
}
impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            secret_prompts: Vec::new(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}
impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().map_or(InputEvent::Eof, InputEvent::Line))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<InputEvent> {
        self.secret_prompts.push(prompt.to_string());
        self.read_line(prompt)
    }
}

type ReplEditor = rustyline::Editor<BletheriaHelper, DefaultHistory>;

#[derive(Default)]
struct BletheriaHelper {
    room_names: Vec<String>,
}

impl Helper for BletheriaHelper {}

impl Completer for BletheriaHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        Ok((start, completion_candidates(&prefix, &self.room_names)))
    }
}

impl Hinter for BletheriaHelper {
    type Hint = String;
}

impl Highlighter for BletheriaHelper {}

impl Validator for BletheriaHelper {}

/// Position and text of the line up to the cursor, with leading whitespace dropped.
fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

/// Completions for the text typed so far.
///
/// The first word completes to a command. After `travel` the argument completes
/// to a direction, and after `hint` to a room name (multi-word names included).
fn completion_candidates(prefix: &str, room_names: &[String]) -> Vec<Pair> {
    let Some((verb, argument)) = prefix.split_once(char::is_whitespace) else {
        let lower = prefix.to_lowercase();
        return COMMAND_WORDS
            .iter()
            .filter(|word| !lower.is_empty() && word.starts_with(&lower))
            .map(|word| pair("", word))
            .collect();
    };

    let argument = argument.trim_start();
    let lead = &prefix[..prefix.len() - argument.len()];
    let argument = argument.to_lowercase();
    let options: Vec<String> = match verb.to_lowercase().as_str() {
        "travel" => Direction::ALL.iter().map(|dir| dir.as_str().to_lowercase()).collect(),
        "hint" => room_names.to_vec(),
        _ => return Vec::new(),
    };
    options
        .iter()
        .filter(|option| option.to_lowercase().starts_with(&argument))
        .map(|option| pair(lead, option))
        .collect()
}

fn pair(lead: &str, option: &str) -> Pair {
    Pair {
        display: option.to_string(),
        replacement: format!("{lead}{option}"),
    }
}

/// Interactive input: rustyline when attached to a terminal, plain stdin otherwise.
pub struct InputManager {
    backend: Backend,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        let backend = if io::stdin().is_terminal() {
            match RustylineInput::new() {
                Ok(editor) => {
                    info!("using rustyline-backed input");
                    Backend::Rustyline(editor)
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };

        Self { backend }
    }

    /// Read a line from the current backend. If the interactive backend reports an
    /// unrecoverable error, switch to the plain stdin backend and retry once.
    fn read_with_fallback(&mut self, prompt: &str, remember: bool) -> io::Result<InputEvent> {
        match self.backend.read(prompt, remember) {
            Ok(event) => Ok(event),
            Err(err) => {
                if self.backend.is_rustyline() {
                    warn!("rustyline input failed: {err} -- switching to basic stdin");
                    self.backend = Backend::plain();
                    self.backend.read(prompt, remember)
                } else {
                    Err(err)
                }
            },
        }
    }
}

impl LineSource for InputManager {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        self.read_with_fallback(prompt, true)
    }

    /// Like `read_line`, but the answer is kept out of the history file.
    fn read_secret(&mut self, prompt: &str) -> io::Result<InputEvent> {
        self.read_with_fallback(prompt, false)
    }

    fn set_room_names(&mut self, names: Vec<String>) {
        if let Backend::Rustyline(input) = &mut self.backend
            && let Some(helper) = input.editor.helper_mut()
        {
            helper.room_names = names;
        }
    }
}

enum Backend {
    Rustyline(RustylineInput),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read(&mut self, prompt: &str, remember: bool) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read(prompt, remember),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new() -> io::Result<Self> {
        Self::with_history(history_file_path())
    }

    fn with_history(history_path: Option<PathBuf>) -> io::Result<Self> {
        let mut editor = rustyline::Editor::<BletheriaHelper, _>::new().map_err(map_io_err)?;
        editor.set_helper(Some(BletheriaHelper::default()));

        if let Some(path) = history_path.as_ref() {
            if let Some(dir) = path.parent()
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("failed to create history directory {}: {err}", dir.display());
            }

            if let Err(err) = editor.load_history(path) {
                match err {
                    ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        info!("no prior history found at {}, starting fresh", path.display());
                    },
                    other => {
                        warn!("failed to load history from {}: {other}", path.display());
                    },
                }
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read(&mut self, prompt: &str, remember: bool) -> io::Result<InputEvent> {
        let result = self.editor.readline(prompt);
        self.finish_read(result, remember)
    }

    /// Turn a readline result into an event, adding the line to history only when
    /// `remember` is set.
    fn finish_read(&mut self, result: rustyline::Result<String>, remember: bool) -> io::Result<InputEvent> {
        match result {
            Ok(line) => {
                if remember && !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Some(path) = self.history_path.as_ref()
                        && let Err(err) = self.editor.save_history(path)
                    {
                        warn!("failed to persist history to {}: {err}", path.display());
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        Ok(InputEvent::Line(self.buffer.clone()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    path.push("bletheria");
    path.push("history.txt");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::History;

    fn replacements(prefix: &str, rooms: &[String]) -> Vec<String> {
        completion_candidates(prefix, rooms)
            .into_iter()
            .map(|pair| pair.replacement)
            .collect()
    }

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).unwrap();
        assert_eq!(result, InputEvent::Interrupted);
        let result = convert_readline_error(ReadlineError::Eof).unwrap();
        assert_eq!(result, InputEvent::Eof);
    }

    #[test]
    fn history_path_appends_components() {
        let base = PathBuf::from("/tmp/bletheria-test");
        let path = build_history_path(&base);
        assert!(path.ends_with(Path::new("bletheria/history.txt")));
    }

    #[test]
    fn current_prefix_skips_leading_whitespace() {
        assert_eq!(current_prefix("   tra", 6), (3, "tra".to_string()));
        assert_eq!(current_prefix("hint ash", 8), (0, "hint ash".to_string()));
    }

    #[test]
    fn completes_command_words() {
        assert_eq!(replacements("tr", &[]), ["travel"]);
        assert_eq!(replacements("E", &[]), ["equip", "exit"]);
        assert!(replacements("", &[]).is_empty());
    }

    #[test]
    fn completes_directions_after_travel() {
        assert_eq!(replacements("travel n", &[]), ["travel north"]);
        assert_eq!(replacements("travel ", &[]).len(), 4);
    }

    #[test]
    fn completes_multi_word_room_names_after_hint() {
        let rooms = vec!["Demon High Temple".to_string(), "Ashen Foyer".to_string()];
        assert_eq!(replacements("hint demon h", &rooms), ["hint Demon High Temple"]);
        assert!(replacements("equip w", &rooms).is_empty());
    }

    #[test]
    fn secret_lines_stay_out_of_history() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("history.txt");
        let mut input = RustylineInput::with_history(Some(path.clone()))?;

        let event = input.finish_read(Ok("hunter2".to_string()), false)?;
        assert_eq!(event, InputEvent::Line("hunter2".into()));
        assert_eq!(input.editor.history().len(), 0);
        assert!(!path.exists());

        input.finish_read(Ok("travel west".to_string()), true)?;
        assert_eq!(input.editor.history().len(), 1);
        let saved = fs::read_to_string(&path)?;
        assert!(saved.contains("travel west"));
        assert!(!saved.contains("hunter2"));
        Ok(())
    }

    #[test]
    fn scripted_input_tracks_secret_prompts() {
        let mut input = ScriptedInput::new(["merlin", "staff"]);
        input.read_line("Username: ").unwrap();
        assert_eq!(input.read_secret("Password: ").unwrap(), InputEvent::Line("staff".into()));
        assert_eq!(input.prompts, ["Username: ", "Password: "]);
        assert_eq!(input.secret_prompts, ["Password: "]);
    }

    #[test]
    fn scripted_input_replays_then_reports_eof() {
        let mut input = ScriptedInput::new(["travel west", "exit"]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.read_line("> ").unwrap(), InputEvent::Line("travel west".into()));
        assert_eq!(input.read_line("> ").unwrap(), InputEvent::Line("exit".into()));
        assert_eq!(input.read_line("> ").unwrap(), InputEvent::Eof);
        assert_eq!(input.prompts.len(), 3);
    }
}
