use crate::common::harness::SiteTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use termfolio::config::Config;

/// The welcome banner is shown on startup.
#[test]
fn test_welcome_banner_renders() {
    let harness = SiteTestHarness::new(80, 24).unwrap();
    harness.assert_screen_contains("Welcome to termfolio v1.0");
    harness.assert_screen_contains("Type 'help' to see available commands");
}

/// Typing a prefix opens the autocomplete popup with descriptions.
#[test]
fn test_autocomplete_popup_renders() {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.type_text("he").unwrap();
    harness.assert_screen_contains("help");
    harness.assert_screen_contains("show available commands");
}

/// Tab completes the selection, Enter dispatches it.
#[test]
fn test_tab_complete_then_dispatch() {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.type_text("he").unwrap();
    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app.active_line().buffer(), "help");

    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    // Help output lists the visible shell commands.
    harness.assert_screen_contains("prompts");
    harness.assert_screen_contains("navigate to prompts gallery");
    assert_eq!(harness.app.active_line().buffer(), "");
}

#[test]
fn test_unknown_command_reports_not_found() {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.submit("zz").unwrap();
    harness.assert_screen_contains("Command not found: zz");
}

/// Up/Down recall history once the popup is closed.
#[test]
fn test_history_recall_on_arrow_up() {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.submit("about").unwrap();
    harness.submit("zz").unwrap();

    harness.send_key(KeyCode::Up, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app.active_line().buffer(), "zz");
    harness.send_key(KeyCode::Up, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app.active_line().buffer(), "about");
}

/// A theme change is applied and persisted to the config file.
#[test]
fn test_theme_switch_persists() {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.submit("theme light").unwrap();
    harness.assert_screen_contains("Theme set to light");
    assert_eq!(harness.app.theme.name, "light");

    let saved = Config::load_from_file(harness.config_path()).unwrap();
    assert_eq!(saved.theme, "light");
}

#[test]
fn test_unknown_theme_is_an_error_line() {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.submit("theme nope").unwrap();
    harness.assert_screen_contains("Unknown theme: nope");
}

#[test]
fn test_clear_wipes_the_transcript() {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.submit("about").unwrap();
    harness.assert_screen_contains("Quinn Harper");
    harness.submit("clear").unwrap();
    harness.assert_screen_not_contains("Quinn Harper");
    harness.assert_screen_contains("Terminal cleared.");
}

#[test]
fn test_quit_command_sets_should_quit() {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.submit("quit").unwrap();
    assert!(harness.app.should_quit());
}
