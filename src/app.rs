//! Application state: the three pages and command execution.
//!
//! Each page owns its own command line (its own vocabulary, filter prefix,
//! arrow fallback) and its own output surface: the shell and resume pages
//! keep a transcript, the gallery uses a transient toast. Actions are
//! executed here behind an error boundary: a failing action becomes an
//! error-kind output line, never a crash.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command_line::{
    ArrowFallback, CommandLine, CommandLineOptions, KeyOutcome, ScrollRequest, Submission,
};
use crate::commands::{self, Action};
use crate::config::Config;
use crate::gallery::{self, PromptCard};
use crate::resume::{self, DocLine, Resume};
use crate::view::theme::{Theme, ThemeRegistry};

const TOAST_DURATION: Duration = Duration::from_millis(2500);
const HELP_TOAST_DURATION: Duration = Duration::from_secs(5);

const BANNER: &[&str] = &[
    r"  _                       __       _ _       ",
    r" | |_ ___ _ _ _ __  ___  / _|___  | (_)___   ",
    r" |  _/ -_) '_| '  \|___||  _/ _ \ | | / _ \  ",
    r"  \__\___|_| |_|_|_|    |_| \___/ |_|_\___/  ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Shell,
    Gallery,
    Resume,
}

/// Output channel kinds, matching the site's line classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Result,
    Error,
    Success,
    /// Welcome banner art.
    Banner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// An echoed command ("❯ help").
    Command(String),
    Text { text: String, kind: OutputKind },
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: OutputKind,
    pub until: Instant,
}

pub struct ShellPage {
    pub line: CommandLine,
    pub transcript: Vec<OutputLine>,
}

pub struct GalleryPage {
    pub line: CommandLine,
    pub cards: Vec<PromptCard>,
    /// Indices of the cards passing the live filter.
    pub visible: Vec<usize>,
    pub query: String,
    pub toast: Option<Toast>,
}

pub struct ResumePage {
    pub line: CommandLine,
    pub doc: Vec<DocLine>,
    /// Shown when resume.json could not be loaded.
    pub load_error: Option<String>,
    pub transcript: Vec<OutputLine>,
    pub scroll: usize,
    /// Content-area height, cached by the view on every draw.
    pub viewport: usize,
}

pub struct App {
    pub config: Config,
    /// Where theme changes are persisted; None skips persistence.
    pub config_path: Option<PathBuf>,
    pub themes: ThemeRegistry,
    pub theme: Theme,
    pub page: Page,
    pub shell: ShellPage,
    pub gallery: GalleryPage,
    pub resume: ResumePage,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        themes: ThemeRegistry,
        cards: Vec<PromptCard>,
        resume_doc: Option<Resume>,
        resume_error: Option<String>,
    ) -> anyhow::Result<Self> {
        let shell_line =
            CommandLine::new(commands::shell_commands(), CommandLineOptions::default())
                .context("shell command table")?;
        let gallery_line = CommandLine::new(
            commands::gallery_commands(),
            CommandLineOptions {
                filter_prefix: Some('/'),
                arrow_fallback: ArrowFallback::History,
            },
        )
        .context("gallery command table")?;
        let resume_line = CommandLine::new(
            commands::resume_commands(),
            CommandLineOptions {
                filter_prefix: None,
                arrow_fallback: ArrowFallback::Scroll,
            },
        )
        .context("resume command table")?;

        let theme = match themes.get(&config.theme) {
            Some(theme) => theme.clone(),
            None => {
                tracing::warn!("configured theme '{}' not found, using dark", config.theme);
                Theme::dark()
            }
        };

        let visible = (0..cards.len()).collect();
        let doc = resume_doc.as_ref().map(resume::render).unwrap_or_default();

        let mut app = Self {
            config,
            config_path,
            themes,
            theme,
            page: Page::Shell,
            shell: ShellPage {
                line: shell_line,
                transcript: Vec::new(),
            },
            gallery: GalleryPage {
                line: gallery_line,
                cards,
                visible,
                query: String::new(),
                toast: None,
            },
            resume: ResumePage {
                line: resume_line,
                doc,
                load_error: resume_error,
                transcript: Vec::new(),
                scroll: 0,
                viewport: 0,
            },
            should_quit: false,
        };
        app.show_welcome();
        Ok(app)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn active_line(&self) -> &CommandLine {
        match self.page {
            Page::Shell => &self.shell.line,
            Page::Gallery => &self.gallery.line,
            Page::Resume => &self.resume.line,
        }
    }

    fn active_line_mut(&mut self) -> &mut CommandLine {
        match self.page {
            Page::Shell => &mut self.shell.line,
            Page::Gallery => &mut self.gallery.line,
            Page::Resume => &mut self.resume.line,
        }
    }

    /// Drop the toast once it has expired. Called from the event loop.
    pub fn tick(&mut self) {
        if let Some(toast) = &self.gallery.toast {
            if Instant::now() >= toast.until {
                self.gallery.toast = None;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        match self.active_line_mut().handle_key(key) {
            KeyOutcome::Submitted(Submission::Command { raw, action, args }) => {
                tracing::debug!("dispatching '{raw}'");
                self.echo(&raw);
                if let Err(err) = self.run_action(action, &args) {
                    tracing::warn!("command '{raw}' failed: {err:#}");
                    self.emit(&format!("{err:#}"), OutputKind::Error);
                }
            }
            KeyOutcome::Submitted(Submission::Unknown { raw }) => {
                self.echo(&raw);
                self.unknown_command(&raw);
            }
            KeyOutcome::FilterChanged(query) => self.set_filter(&query),
            KeyOutcome::Scroll(request) => self.scroll_resume(request),
            KeyOutcome::Consumed | KeyOutcome::Ignored => {}
        }
    }

    fn run_action(&mut self, action: Action, args: &[String]) -> anyhow::Result<()> {
        match action {
            Action::GoHome => {
                if self.page == Page::Shell {
                    self.emit("Already at home!", OutputKind::Success);
                } else {
                    self.page = Page::Shell;
                }
            }
            Action::OpenGallery => self.page = Page::Gallery,
            Action::OpenResume => self.page = Page::Resume,
            Action::Help => self.show_help(),
            Action::Clear => self.clear_page(),
            Action::About => self.show_about(),
            Action::OpenGithub => {
                let url = self.config.github_url.clone();
                open::that(&url).with_context(|| format!("could not open {url}"))?;
                self.emit("Opening GitHub...", OutputKind::Success);
            }
            Action::SetTheme => self.set_theme(args)?,
            Action::CopyPrompt => self.copy_prompt(args)?,
            Action::ExportResume => self.export_resume()?,
            Action::ShowWelcome => self.show_welcome(),
            Action::Quit => self.should_quit = true,
        }
        Ok(())
    }

    /// Echo a submitted command into the active transcript. The gallery
    /// has no transcript; its feedback goes through the toast.
    fn echo(&mut self, raw: &str) {
        let line = OutputLine::Command(raw.to_string());
        match self.page {
            Page::Shell => self.shell.transcript.push(line),
            Page::Resume => {
                self.resume.transcript.push(line);
                self.resume.scroll = usize::MAX; // clamped to bottom on draw
            }
            Page::Gallery => {}
        }
    }

    /// The interpreter's output channel: text plus a kind.
    fn emit(&mut self, text: &str, kind: OutputKind) {
        match self.page {
            Page::Shell => self.shell.transcript.push(OutputLine::Text {
                text: text.to_string(),
                kind,
            }),
            Page::Resume => {
                self.resume.transcript.push(OutputLine::Text {
                    text: text.to_string(),
                    kind,
                });
                self.resume.scroll = usize::MAX;
            }
            Page::Gallery => self.toast(text, kind, TOAST_DURATION),
        }
    }

    fn toast(&mut self, text: &str, kind: OutputKind, duration: Duration) {
        self.gallery.toast = Some(Toast {
            text: format!("System: {text}"),
            kind,
            until: Instant::now() + duration,
        });
    }

    fn unknown_command(&mut self, raw: &str) {
        let text = match self.page {
            Page::Shell => {
                format!("Command not found: {raw}. Type 'help' to see available commands.")
            }
            Page::Gallery => "Command not found. Try 'help' or '/keyword'".to_string(),
            Page::Resume => format!("Command not found: {raw}"),
        };
        self.emit(&text, OutputKind::Error);
    }

    fn set_filter(&mut self, query: &str) {
        self.gallery.query = query.trim().to_string();
        self.gallery.visible = gallery::filter(&self.gallery.cards, query);
    }

    fn scroll_resume(&mut self, request: ScrollRequest) {
        let step = self.config.scroll_step.max(1);
        let viewport = self.resume.viewport.max(1);
        let max = self.resume_content_len().saturating_sub(viewport);
        let scroll = self.resume.scroll.min(max);
        self.resume.scroll = match request {
            ScrollRequest::LineUp => scroll.saturating_sub(step),
            ScrollRequest::LineDown => (scroll + step).min(max),
            ScrollRequest::PageUp => scroll.saturating_sub(viewport * 4 / 5),
            ScrollRequest::PageDown => (scroll + viewport * 4 / 5).min(max),
            ScrollRequest::Top => 0,
            ScrollRequest::Bottom => max,
        };
    }

    /// Lines in the resume page's scrollable region: the rendered document
    /// plus the transcript appended below it.
    pub fn resume_content_len(&self) -> usize {
        let doc = if self.resume.doc.is_empty() {
            1 // the load-error line
        } else {
            self.resume.doc.len()
        };
        doc + self.resume.transcript.len()
    }

    fn clear_page(&mut self) {
        match self.page {
            Page::Shell => {
                self.shell.transcript.clear();
                self.emit("Terminal cleared.", OutputKind::Success);
            }
            Page::Resume => {
                self.resume.transcript.clear();
                self.resume.scroll = 0;
                self.emit("Screen cleared (resume re-rendered)", OutputKind::Success);
            }
            Page::Gallery => {}
        }
    }

    fn show_help(&mut self) {
        match self.page {
            Page::Gallery => {
                let mut names: Vec<String> = self
                    .gallery
                    .line
                    .visible_specs()
                    .map(|s| s.name.clone())
                    .collect();
                names.push("/query".to_string());
                let text = format!("commands: {}", names.join(" | "));
                self.toast(&text, OutputKind::Result, HELP_TOAST_DURATION);
            }
            _ => {
                let rows: Vec<String> = self
                    .active_line()
                    .visible_specs()
                    .map(|s| format!("  {:<10} {}", s.name, s.description))
                    .collect();
                for row in rows {
                    self.emit(&row, OutputKind::Result);
                }
            }
        }
    }

    fn show_about(&mut self) {
        let github = self.config.github_url.clone();
        let rows = [
            "Name:      Quinn Harper".to_string(),
            "Role:      Software Engineer & Creator".to_string(),
            format!("GitHub:    {github}"),
            "Projects:  AI prompts, generative art, terminal apps".to_string(),
        ];
        for row in rows {
            self.emit(&row, OutputKind::Result);
        }
    }

    fn show_welcome(&mut self) {
        for line in BANNER {
            self.shell.transcript.push(OutputLine::Text {
                text: line.to_string(),
                kind: OutputKind::Banner,
            });
        }
        self.shell.transcript.push(OutputLine::Text {
            text: "Welcome to termfolio v1.0".to_string(),
            kind: OutputKind::Success,
        });
        self.shell.transcript.push(OutputLine::Text {
            text: "Type 'help' to see available commands, or start typing to explore."
                .to_string(),
            kind: OutputKind::Result,
        });
    }

    fn set_theme(&mut self, args: &[String]) -> anyhow::Result<()> {
        let Some(name) = args.first() else {
            let names: Vec<String> = self
                .themes
                .names()
                .map(|n| {
                    if n == self.theme.name {
                        format!("{n} (active)")
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            self.emit(
                &format!("Available themes: {}", names.join(", ")),
                OutputKind::Result,
            );
            return Ok(());
        };

        let name = name.to_lowercase();
        let Some(theme) = self.themes.get(&name) else {
            bail!("Unknown theme: {name}. Run 'theme' to list the available ones.");
        };
        self.theme = theme.clone();
        self.config.theme = name.clone();
        if let Some(path) = &self.config_path {
            self.config
                .save_to_file(path)
                .context("could not persist the theme preference")?;
        }
        self.emit(&format!("Theme set to {name}"), OutputKind::Success);
        Ok(())
    }

    fn copy_prompt(&mut self, args: &[String]) -> anyhow::Result<()> {
        let n: usize = args
            .first()
            .context("usage: copy <n>")?
            .parse()
            .context("usage: copy <n>")?;
        let shown = self.gallery.visible.len();
        let card_index = n
            .checked_sub(1)
            .and_then(|i| self.gallery.visible.get(i))
            .copied();
        let Some(card_index) = card_index else {
            bail!("No card #{n} ({shown} shown)");
        };
        let prompt = self.gallery.cards[card_index].prompt.clone();

        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard
            .set_text(prompt)
            .context("could not write to the clipboard")?;
        self.emit("Copied to clipboard", OutputKind::Success);
        Ok(())
    }

    fn export_resume(&mut self) -> anyhow::Result<()> {
        if self.resume.doc.is_empty() {
            bail!("No resume loaded");
        }
        let path = self
            .config
            .export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("resume.txt"));
        std::fs::write(&path, resume::export_text(&self.resume.doc))
            .with_context(|| format!("could not write {}", path.display()))?;
        self.emit(
            &format!("Resume written to {}", path.display()),
            OutputKind::Success,
        );
        Ok(())
    }
}
