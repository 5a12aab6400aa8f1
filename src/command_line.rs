//! Command-line interpreter shared by every page.
//!
//! Each page owns one `CommandLine` configured with its own command table,
//! an optional filter prefix (the gallery's `/search`), and an arrow-key
//! fallback (history recall on the shell, viewport scrolling on the resume
//! page). The interpreter owns the input buffer, the command history and
//! the autocomplete state; it turns key events into [`KeyOutcome`] values
//! and never renders or performs side effects itself.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::commands::Action;

/// A single entry in a command table.
///
/// The handler is a tagged action record executed by the host; the
/// interpreter only resolves names to actions.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    /// Hidden commands dispatch normally but never show up in autocomplete.
    pub hidden: bool,
    pub action: Action,
}

impl CommandSpec {
    pub fn new(name: &str, description: &str, action: Action) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            hidden: false,
            action,
        }
    }

    pub fn hidden(name: &str, description: &str, action: Action) -> Self {
        Self {
            hidden: true,
            ..Self::new(name, description, action)
        }
    }
}

/// Command table validation errors. Fatal at construction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandTableError {
    #[error("duplicate command name (case-insensitive): {0}")]
    DuplicateName(String),
    #[error("command name must not be empty")]
    EmptyName,
}

/// What Up/Down do when no autocomplete matches are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowFallback {
    /// Recall command history (shell and gallery pages).
    #[default]
    History,
    /// Ask the host to scroll its output pane (resume page). Also claims
    /// PageUp/PageDown/Home/End.
    Scroll,
}

/// Scroll request emitted in [`ArrowFallback::Scroll`] mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Per-page interpreter configuration.
#[derive(Debug, Clone, Default)]
pub struct CommandLineOptions {
    /// Leading sentinel that diverts input into filter mode. Filter-mode
    /// input never reaches the command table.
    pub filter_prefix: Option<char>,
    pub arrow_fallback: ArrowFallback,
}

/// Result of feeding one key event to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was handled; interpreter state may have changed.
    Consumed,
    /// The key is not one the interpreter handles.
    Ignored,
    /// Filter-mode text changed; the host should re-run its live search.
    FilterChanged(String),
    /// The host should scroll its output pane.
    Scroll(ScrollRequest),
    /// Enter produced a submission for the host to execute.
    Submitted(Submission),
}

/// A submitted line, after tokenizing and table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Command {
        /// The trimmed input as typed, for echoing into the transcript.
        raw: String,
        action: Action,
        args: Vec<String>,
    },
    /// Unknown name. Recovered by the host as a "command not found" line,
    /// never an error.
    Unknown { raw: String },
}

/// Outcome of a buffer edit.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TextOutcome {
    Edited,
    FilterChanged(String),
}

#[derive(Debug)]
pub struct CommandLine {
    specs: Vec<CommandSpec>,
    opts: CommandLineOptions,
    buffer: String,
    /// Cursor position in chars.
    cursor: usize,
    /// Append-only; adjacent duplicates are suppressed on submit.
    history: Vec<String>,
    /// None means "past the end" (not navigating).
    history_cursor: Option<usize>,
    /// Indices into `specs`, in table order.
    matches: Vec<usize>,
    /// Index into `matches`; Some whenever `matches` is non-empty.
    selected: Option<usize>,
}

impl CommandLine {
    /// Build an interpreter over a command table. Names must be non-empty
    /// and unique after case-folding.
    pub fn new(
        specs: Vec<CommandSpec>,
        opts: CommandLineOptions,
    ) -> Result<Self, CommandTableError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if spec.name.is_empty() {
                return Err(CommandTableError::EmptyName);
            }
            if !seen.insert(spec.name.to_lowercase()) {
                return Err(CommandTableError::DuplicateName(spec.name.clone()));
            }
        }
        Ok(Self {
            specs,
            opts,
            buffer: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_cursor: None,
            matches: Vec::new(),
            selected: None,
        })
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in chars, for the view.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    /// Table entries shown in `help` output (hidden ones excluded).
    pub fn visible_specs(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs.iter().filter(|s| !s.hidden)
    }

    /// Current autocomplete matches, in table order.
    pub fn matched(&self) -> impl Iterator<Item = &CommandSpec> {
        self.matches.iter().map(|&i| &self.specs[i])
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Index into the match list, Some whenever matches are shown.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Replace the whole buffer, as if the text had been typed. Recomputes
    /// autocomplete or reroutes to filter mode.
    pub fn set_text(&mut self, text: &str) -> KeyOutcome {
        self.buffer = text.to_string();
        self.cursor = self.buffer.chars().count();
        self.text_changed().into()
    }

    /// Feed one key event. The caller must suppress its own handling of
    /// any key that does not come back as [`KeyOutcome::Ignored`].
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            // 1. Arrows navigate the autocomplete list while it is shown.
            KeyCode::Down if self.has_matches() => {
                self.move_selection(1);
                KeyOutcome::Consumed
            }
            KeyCode::Up if self.has_matches() => {
                self.move_selection(-1);
                KeyOutcome::Consumed
            }

            // 2a. Scroll fallback claims the whole navigation cluster.
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Home
            | KeyCode::End
                if self.opts.arrow_fallback == ArrowFallback::Scroll =>
            {
                KeyOutcome::Scroll(match key.code {
                    KeyCode::Up => ScrollRequest::LineUp,
                    KeyCode::Down => ScrollRequest::LineDown,
                    KeyCode::PageUp => ScrollRequest::PageUp,
                    KeyCode::PageDown => ScrollRequest::PageDown,
                    KeyCode::Home => ScrollRequest::Top,
                    _ => ScrollRequest::Bottom,
                })
            }

            // 2b. History recall. Overwrites any in-progress text.
            KeyCode::Up => {
                self.recall_history(-1);
                KeyOutcome::Consumed
            }
            KeyCode::Down => {
                self.recall_history(1);
                KeyOutcome::Consumed
            }

            // 3. Tab completes the selected match.
            KeyCode::Tab => {
                if let Some(sel) = self.selected {
                    let name = self.specs[self.matches[sel]].name.clone();
                    self.buffer = name;
                    self.cursor = self.buffer.chars().count();
                    self.close_matches();
                }
                KeyOutcome::Consumed
            }

            // 4. Enter submits, except in filter mode where the filter
            // stays live.
            KeyCode::Enter => {
                if self.in_filter_mode() {
                    return KeyOutcome::Consumed;
                }
                match self.submit() {
                    Some(submission) => KeyOutcome::Submitted(submission),
                    None => KeyOutcome::Consumed,
                }
            }

            // 5. Esc clears the buffer and closes autocomplete.
            KeyCode::Esc => self.set_text(""),

            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.insert_char(c);
                self.text_changed().into()
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return KeyOutcome::Consumed;
                }
                self.cursor -= 1;
                self.remove_char(self.cursor);
                self.text_changed().into()
            }
            KeyCode::Delete => {
                if self.cursor >= self.buffer.chars().count() {
                    return KeyOutcome::Consumed;
                }
                self.remove_char(self.cursor);
                self.text_changed().into()
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                KeyOutcome::Consumed
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
                KeyOutcome::Consumed
            }
            // Home/End in scroll mode were claimed above.
            KeyCode::Home => {
                self.cursor = 0;
                KeyOutcome::Consumed
            }
            KeyCode::End => {
                self.cursor = self.buffer.chars().count();
                KeyOutcome::Consumed
            }

            _ => KeyOutcome::Ignored,
        }
    }

    fn in_filter_mode(&self) -> bool {
        self.opts
            .filter_prefix
            .is_some_and(|p| self.buffer.starts_with(p))
    }

    /// Recompute autocomplete state (or filter routing) from the buffer.
    fn text_changed(&mut self) -> TextOutcome {
        if self.buffer.is_empty() {
            self.close_matches();
            // Emptying the buffer also clears the live filter.
            if self.opts.filter_prefix.is_some() {
                return TextOutcome::FilterChanged(String::new());
            }
            return TextOutcome::Edited;
        }

        if let Some(prefix) = self.opts.filter_prefix {
            if let Some(rest) = self.buffer.strip_prefix(prefix) {
                let rest = rest.to_string();
                self.close_matches();
                return TextOutcome::FilterChanged(rest);
            }
        }

        let needle = self.buffer.trim().to_lowercase();
        if needle.is_empty() {
            self.close_matches();
            return TextOutcome::Edited;
        }

        self.matches = self
            .specs
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.hidden && s.name.to_lowercase().starts_with(&needle))
            .map(|(i, _)| i)
            .collect();
        self.selected = if self.matches.is_empty() { None } else { Some(0) };
        TextOutcome::Edited
    }

    fn move_selection(&mut self, delta: i64) {
        if let Some(sel) = self.selected {
            let last = self.matches.len() as i64 - 1;
            let next = (sel as i64 + delta).clamp(0, last);
            self.selected = Some(next as usize);
        }
    }

    /// Move the history cursor and overwrite the buffer with the recalled
    /// entry. In-progress text is lost, matching the observed behavior of
    /// the pages this replaces.
    fn recall_history(&mut self, delta: i64) {
        if self.in_filter_mode() || self.history.is_empty() {
            return;
        }
        let last = self.history.len() as i64 - 1;
        let at = self.history_cursor.unwrap_or(self.history.len()) as i64;
        let next = (at + delta).clamp(0, last) as usize;
        self.history_cursor = Some(next);
        self.buffer = self.history[next].clone();
        self.cursor = self.buffer.chars().count();
    }

    /// Submit the current buffer. Returns None for empty input; otherwise
    /// the buffer is cleared, autocomplete closed, and history updated
    /// regardless of whether the command resolved.
    fn submit(&mut self) -> Option<Submission> {
        let raw = self.buffer.trim().to_string();
        if raw.is_empty() {
            return None;
        }

        if self.history.last() != Some(&raw) {
            self.history.push(raw.clone());
        }
        self.history_cursor = None;

        let mut tokens = raw.split_whitespace();
        let name = tokens.next()?.to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let submission = match self
            .specs
            .iter()
            .find(|s| s.name.to_lowercase() == name)
        {
            Some(spec) => Submission::Command {
                raw: raw.clone(),
                action: spec.action,
                args,
            },
            None => Submission::Unknown { raw },
        };

        self.buffer.clear();
        self.cursor = 0;
        self.close_matches();
        Some(submission)
    }

    fn close_matches(&mut self) {
        self.matches.clear();
        self.selected = None;
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    fn remove_char(&mut self, char_index: usize) {
        let at = self.byte_index(char_index);
        self.buffer.remove(at);
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}

impl From<TextOutcome> for KeyOutcome {
    fn from(outcome: TextOutcome) -> Self {
        match outcome {
            TextOutcome::Edited => KeyOutcome::Consumed,
            TextOutcome::FilterChanged(text) => KeyOutcome::FilterChanged(text),
        }
    }
}
