//! Built-in command tables for the three pages.
//!
//! Commands dispatch to [`Action`] tags; the App executes them. Table
//! order matters: autocomplete presents matches in the order given here.

use crate::command_line::CommandSpec;

/// What a command does. Executed by the App, never by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Navigate to the prompt gallery.
    OpenGallery,
    /// Navigate to the resume viewer.
    OpenResume,
    /// Navigate to the shell (or report "already home").
    GoHome,
    /// List the current page's commands.
    Help,
    /// Clear the transcript (re-render on the resume page).
    Clear,
    About,
    /// Open the GitHub profile in the default browser.
    OpenGithub,
    /// List themes, or switch and persist: `theme <name>`.
    SetTheme,
    /// Copy a gallery card's prompt to the clipboard: `copy <n>`.
    CopyPrompt,
    /// Write the rendered resume to a plain-text file.
    ExportResume,
    /// Replay the welcome banner.
    ShowWelcome,
    Quit,
}

pub fn shell_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("prompts", "navigate to prompts gallery", Action::OpenGallery),
        CommandSpec::new("resume", "view professional resume", Action::OpenResume),
        CommandSpec::new("help", "show available commands", Action::Help),
        CommandSpec::new("clear", "clear terminal output", Action::Clear),
        CommandSpec::new("about", "about this site", Action::About),
        CommandSpec::new("github", "open GitHub profile", Action::OpenGithub),
        CommandSpec::new("home", "go to home page", Action::GoHome),
        CommandSpec::new("theme", "list themes or switch: theme <name>", Action::SetTheme),
        CommandSpec::new("quit", "leave the terminal", Action::Quit),
        CommandSpec::hidden("exit", "leave the terminal", Action::Quit),
        CommandSpec::hidden("welcome", "replay the welcome banner", Action::ShowWelcome),
    ]
}

pub fn gallery_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("home", "return to home", Action::GoHome),
        CommandSpec::new("help", "show available commands", Action::Help),
        CommandSpec::new("copy", "copy a prompt to the clipboard: copy <n>", Action::CopyPrompt),
        CommandSpec::new("quit", "leave the terminal", Action::Quit),
        CommandSpec::hidden("exit", "leave the terminal", Action::Quit),
    ]
}

pub fn resume_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("home", "return to home", Action::GoHome),
        CommandSpec::new("export", "write resume to a text file", Action::ExportResume),
        CommandSpec::new("help", "show available commands", Action::Help),
        CommandSpec::new("clear", "re-render the resume", Action::Clear),
        CommandSpec::new("quit", "leave the terminal", Action::Quit),
        CommandSpec::hidden("exit", "leave the terminal", Action::Quit),
    ]
}
