//! Color themes.
//!
//! Themes are small JSON files (see `themes/`). A built-in dark theme is
//! compiled in so the app always has something to fall back on; files in
//! the themes directory add to or override it by name.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serializable color representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorDef {
    /// RGB color as [r, g, b]
    Rgb(u8, u8, u8),
    /// Named color
    Named(String),
}

impl From<ColorDef> for Color {
    fn from(def: ColorDef) -> Self {
        match def {
            ColorDef::Rgb(r, g, b) => Color::Rgb(r, g, b),
            ColorDef::Named(name) => match name.as_str() {
                "Black" => Color::Black,
                "Red" => Color::Red,
                "Green" => Color::Green,
                "Yellow" => Color::Yellow,
                "Blue" => Color::Blue,
                "Magenta" => Color::Magenta,
                "Cyan" => Color::Cyan,
                "Gray" => Color::Gray,
                "DarkGray" => Color::DarkGray,
                "LightRed" => Color::LightRed,
                "LightGreen" => Color::LightGreen,
                "LightYellow" => Color::LightYellow,
                "LightBlue" => Color::LightBlue,
                "LightMagenta" => Color::LightMagenta,
                "LightCyan" => Color::LightCyan,
                "White" => Color::White,
                // Default/Reset uses the terminal's default color
                "Default" | "Reset" => Color::Reset,
                _ => Color::White,
            },
        }
    }
}

/// Serializable theme definition (matches the JSON structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeFile {
    name: String,
    bg: ColorDef,
    fg: ColorDef,
    muted: ColorDef,
    accent: ColorDef,
    success: ColorDef,
    error: ColorDef,
    prompt_fg: ColorDef,
    selection_bg: ColorDef,
    selection_fg: ColorDef,
    #[serde(default = "default_popup_bg")]
    popup_bg: ColorDef,
    #[serde(default = "default_popup_border_fg")]
    popup_border_fg: ColorDef,
    #[serde(default = "default_title_fg")]
    title_fg: ColorDef,
}

// Defaults for fields newer than the oldest theme files.
fn default_popup_bg() -> ColorDef {
    ColorDef::Rgb(24, 24, 28)
}
fn default_popup_border_fg() -> ColorDef {
    ColorDef::Named("DarkGray".to_string())
}
fn default_title_fg() -> ColorDef {
    ColorDef::Named("White".to_string())
}

/// Resolved theme with ratatui colors.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub bg: Color,
    pub fg: Color,
    /// Dim text: hints, descriptions, dates.
    pub muted: Color,
    /// Command names, section titles, links.
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub prompt_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub popup_bg: Color,
    pub popup_border_fg: Color,
    pub title_fg: Color,
}

impl From<ThemeFile> for Theme {
    fn from(file: ThemeFile) -> Self {
        Self {
            name: file.name,
            bg: file.bg.into(),
            fg: file.fg.into(),
            muted: file.muted.into(),
            accent: file.accent.into(),
            success: file.success.into(),
            error: file.error.into(),
            prompt_fg: file.prompt_fg.into(),
            selection_bg: file.selection_bg.into(),
            selection_fg: file.selection_fg.into(),
            popup_bg: file.popup_bg.into(),
            popup_border_fg: file.popup_border_fg.into(),
            title_fg: file.title_fg.into(),
        }
    }
}

impl Theme {
    /// Built-in fallback theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            bg: Color::Rgb(13, 17, 23),
            fg: Color::Rgb(201, 209, 217),
            muted: Color::Rgb(110, 118, 129),
            accent: Color::Rgb(88, 166, 255),
            success: Color::Rgb(63, 185, 80),
            error: Color::Rgb(248, 81, 73),
            prompt_fg: Color::Rgb(63, 185, 80),
            selection_bg: Color::Rgb(33, 66, 131),
            selection_fg: Color::Rgb(230, 237, 243),
            popup_bg: Color::Rgb(22, 27, 34),
            popup_border_fg: Color::Rgb(48, 54, 61),
            title_fg: Color::Rgb(230, 237, 243),
        }
    }

    pub fn load_from_str(contents: &str) -> Result<Self, serde_json::Error> {
        let file: ThemeFile = serde_json::from_str(contents)?;
        Ok(file.into())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// All themes known to the app, keyed by name.
#[derive(Debug)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl ThemeRegistry {
    /// Registry with only the built-in theme.
    pub fn builtin() -> Self {
        let dark = Theme::dark();
        let mut themes = BTreeMap::new();
        themes.insert(dark.name.clone(), dark);
        Self { themes }
    }

    /// Load every `*.json` in `dir`, overriding built-ins by name.
    /// Unreadable or invalid files are skipped with a warning.
    pub fn load_dir(&mut self, dir: &Path) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("could not read themes dir {}: {err}", dir.display());
                return;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match std::fs::read_to_string(&path).map_err(|e| e.to_string()).and_then(|c| {
                Theme::load_from_str(&c).map_err(|e| e.to_string())
            }) {
                Ok(theme) => {
                    tracing::debug!("loaded theme '{}' from {}", theme.name, path.display());
                    self.themes.insert(theme.name.clone(), theme);
                }
                Err(err) => {
                    tracing::warn!("skipping theme file {}: {err}", path.display());
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Theme names in sorted order, for the `theme` listing.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}
