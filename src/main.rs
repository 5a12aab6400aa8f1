use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use termfolio::app::App;
use termfolio::config::Config;
use termfolio::view::theme::ThemeRegistry;
use termfolio::{gallery, resume, tracing_setup, view};

/// A personal site that is actually a terminal
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(about = "Command shell, prompt gallery and resume viewer", long_about = None)]
#[command(version)]
struct Args {
    /// Directory with index.json, the collection files and resume.json
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory with extra theme files
    #[arg(long, value_name = "PATH")]
    themes_dir: Option<PathBuf>,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("termfolio.log"));
    tracing_setup::init_global(&log_path)
        .with_context(|| format!("could not open log file {}", log_path.display()))?;

    let config_path = args.config.clone().or_else(Config::default_path);
    let config = load_config(config_path.as_deref())?;

    let mut themes = ThemeRegistry::builtin();
    let themes_dir = args
        .themes_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("themes"));
    if themes_dir.is_dir() {
        themes.load_dir(&themes_dir);
    }

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("data"));
    let cards = gallery::load_dir(&data_dir);
    let (resume_doc, resume_error) = match resume::load(&data_dir.join("resume.json")) {
        Ok(doc) => (Some(doc), None),
        Err(err) => {
            tracing::warn!("resume unavailable: {err:#}");
            (None, Some(format!("{err:#}")))
        }
    };

    let mut app = App::new(config, config_path, themes, cards, resume_doc, resume_error)?;

    let terminal = ratatui::init();
    let result = run(terminal, &mut app);
    ratatui::restore();
    result
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    if !path.exists() {
        tracing::info!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    Ok(Config::load_from_file(path)?)
}

fn run(mut terminal: ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| view::draw(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => app.handle_key(key),
                _ => {}
            }
        }
        app.tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}
