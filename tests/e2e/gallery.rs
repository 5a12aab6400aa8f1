use crate::common::harness::SiteTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use termfolio::app::Page;

fn gallery_harness() -> SiteTestHarness {
    let mut harness = SiteTestHarness::new(80, 24).unwrap();
    harness.submit("prompts").unwrap();
    assert_eq!(harness.app.page, Page::Gallery);
    harness
}

/// The gallery lists every card with its collection tag.
#[test]
fn test_gallery_lists_cards() {
    let harness = gallery_harness();
    harness.assert_screen_contains("Neon Alley");
    harness.assert_screen_contains("Glass Tower");
    harness.assert_screen_contains("[neon]");
    harness.assert_screen_contains("3 prompts");
}

/// Prompt bodies loaded from separate files show up too.
#[test]
fn test_prompt_file_bodies_are_loaded() {
    let harness = gallery_harness();
    harness.assert_screen_contains("a tower of glass at dusk");
}

/// `/keyword` live-filters the cards; Esc restores them.
#[test]
fn test_slash_filter_narrows_and_escape_restores() {
    let mut harness = gallery_harness();
    harness.type_text("/tower").unwrap();
    harness.assert_screen_contains("Glass Tower");
    harness.assert_screen_not_contains("Neon Alley");
    harness.assert_screen_contains("1 of 3 shown");

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    harness.assert_screen_contains("Neon Alley");
}

/// Filtering matches prompt bodies, not just titles.
#[test]
fn test_filter_matches_prompt_text() {
    let mut harness = gallery_harness();
    harness.type_text("/cascade").unwrap();
    harness.assert_screen_contains("Crash Screen");
    harness.assert_screen_not_contains("Glass Tower");
}

/// Enter in filter mode keeps the filter live instead of submitting.
#[test]
fn test_enter_keeps_filter_live() {
    let mut harness = gallery_harness();
    harness.type_text("/tower").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app.active_line().buffer(), "/tower");
    harness.assert_screen_not_contains("Neon Alley");
}

/// Unknown commands surface through the toast.
#[test]
fn test_unknown_command_toast() {
    let mut harness = gallery_harness();
    harness.submit("frobnicate").unwrap();
    harness.assert_screen_contains("Command not found. Try 'help' or '/keyword'");
}

#[test]
fn test_copy_out_of_range_is_an_error_toast() {
    let mut harness = gallery_harness();
    harness.submit("copy 9").unwrap();
    harness.assert_screen_contains("No card #9 (3 shown)");
}

#[test]
fn test_home_returns_to_the_shell() {
    let mut harness = gallery_harness();
    harness.submit("home").unwrap();
    assert_eq!(harness.app.page, Page::Shell);
    harness.assert_screen_not_contains("Neon Alley");
}
