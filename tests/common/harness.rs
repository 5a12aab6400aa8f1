//! Test harness: a full App rendered into a ratatui TestBackend, driven
//! by synthesized key events. Data, config and themes live in a temp dir
//! so every test is hermetic.

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use tempfile::TempDir;

use termfolio::app::App;
use termfolio::config::Config;
use termfolio::view::theme::ThemeRegistry;
use termfolio::{gallery, resume, view};

pub struct SiteTestHarness {
    terminal: Terminal<TestBackend>,
    pub app: App,
    temp: TempDir,
}

impl SiteTestHarness {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        let temp = TempDir::new()?;
        let data_dir = temp.path().join("data");
        write_fixture_data(&data_dir)?;

        let themes_dir = temp.path().join("themes");
        std::fs::create_dir(&themes_dir)?;
        std::fs::write(
            themes_dir.join("light.json"),
            include_str!("../../themes/light.json"),
        )?;
        let mut themes = ThemeRegistry::builtin();
        themes.load_dir(&themes_dir);

        let config = Config {
            data_dir: Some(data_dir.clone()),
            export_path: Some(temp.path().join("resume-export.txt")),
            ..Config::default()
        };
        let config_path = temp.path().join("config.json");

        let cards = gallery::load_dir(&data_dir);
        let resume_doc = resume::load(&data_dir.join("resume.json")).ok();
        let app = App::new(
            config,
            Some(config_path),
            themes,
            cards,
            resume_doc,
            None,
        )?;

        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut harness = Self {
            terminal,
            app,
            temp,
        };
        harness.render()?;
        Ok(harness)
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        self.app.handle_key(KeyEvent::new(code, modifiers));
        self.render()
    }

    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c), KeyModifiers::NONE)?;
        }
        Ok(())
    }

    /// Type a line and press Enter.
    pub fn submit(&mut self, line: &str) -> Result<()> {
        self.type_text(line)?;
        self.send_key(KeyCode::Enter, KeyModifiers::NONE)
    }

    pub fn render(&mut self) -> Result<()> {
        let app = &mut self.app;
        self.terminal.draw(|frame| view::draw(frame, app))?;
        Ok(())
    }

    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                match buffer.cell((x, y)) {
                    Some(cell) => out.push_str(cell.symbol()),
                    None => out.push(' '),
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn assert_screen_contains(&self, needle: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(needle),
            "expected screen to contain {needle:?}\n--- screen ---\n{screen}"
        );
    }

    pub fn assert_screen_not_contains(&self, needle: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(needle),
            "expected screen to NOT contain {needle:?}\n--- screen ---\n{screen}"
        );
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.json")
    }

    pub fn export_path(&self) -> PathBuf {
        self.temp.path().join("resume-export.txt")
    }
}

fn write_fixture_data(data_dir: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(data_dir.join("prompts"))?;
    std::fs::write(
        data_dir.join("index.json"),
        r#"{ "collections": ["neon"] }"#,
    )?;
    std::fs::write(
        data_dir.join("neon.json"),
        r#"[
            { "id": "n-1", "title": "Neon Alley", "prompt": "rain-slick alley glow", "imageUrl": "a.webp" },
            { "id": "n-2", "title": "Glass Tower", "imageUrl": "b.webp", "promptFile": "prompts/tower.txt" },
            { "id": "n-3", "title": "Crash Screen", "prompt": "red error cascade", "imageUrl": "c.webp" }
        ]"#,
    )?;
    std::fs::write(data_dir.join("prompts/tower.txt"), "a tower of glass at dusk\n")?;
    std::fs::write(
        data_dir.join("resume.json"),
        r#"{
            "basics": {
                "name": "Imogen Hale",
                "label": "Systems Engineer",
                "email": "imogen@example.dev",
                "url": "https://imogen.dev",
                "summary": "Engineer with a taste for terminals."
            },
            "experience": [
                {
                    "position": "Engineer",
                    "company": "Coilworks",
                    "startDate": "2020",
                    "endDate": "present",
                    "summary": "Keeps the lights on."
                }
            ],
            "projects": [
                { "name": "glowgrid", "url": "https://example.dev/glowgrid", "description": "A neon plotter." }
            ],
            "skills": ["Rust", "SQL"],
            "education": [
                {
                    "institution": "Example University",
                    "studyType": "BSc",
                    "area": "Computing",
                    "startDate": "2014",
                    "endDate": "2018"
                }
            ]
        }"#,
    )?;
    Ok(())
}
