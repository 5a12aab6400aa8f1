use crate::common::harness::SiteTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use termfolio::app::Page;

fn resume_harness(width: u16, height: u16) -> SiteTestHarness {
    let mut harness = SiteTestHarness::new(width, height).unwrap();
    harness.submit("resume").unwrap();
    assert_eq!(harness.app.page, Page::Resume);
    harness
}

/// The rendered resume starts with the basics.
#[test]
fn test_resume_renders_basics_and_sections() {
    let harness = resume_harness(80, 24);
    harness.assert_screen_contains("Imogen Hale");
    harness.assert_screen_contains("Systems Engineer");
    harness.assert_screen_contains("Experience");
    harness.assert_screen_contains("Engineer @ Coilworks");
}

/// Up/Down scroll the document instead of recalling history.
#[test]
fn test_arrows_scroll_the_document() {
    let mut harness = resume_harness(80, 10);
    assert_eq!(harness.app.resume.scroll, 0);

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    let bottom = harness.app.resume.scroll;
    assert!(bottom > 0, "End jumps to the bottom");
    harness.assert_screen_not_contains("Imogen Hale");

    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app.resume.scroll, bottom, "clamped at the bottom");

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app.resume.scroll, 0);
    harness.assert_screen_contains("Imogen Hale");

    harness.send_key(KeyCode::Up, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app.resume.scroll, 0, "clamped at the top");

    harness.send_key(KeyCode::PageDown, KeyModifiers::NONE).unwrap();
    assert!(harness.app.resume.scroll > 0);
}

/// Autocomplete still owns Up/Down while the popup is open.
#[test]
fn test_autocomplete_beats_scrolling() {
    let mut harness = resume_harness(80, 10);
    harness.type_text("h").unwrap();
    assert!(harness.app.active_line().has_matches());
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app.resume.scroll, 0, "Down moved the selection, not the view");
}

/// `export` writes the rendered resume next to the data.
#[test]
fn test_export_writes_a_text_file() {
    let mut harness = resume_harness(80, 24);
    harness.submit("export").unwrap();
    harness.assert_screen_contains("Resume written to");

    let text = std::fs::read_to_string(harness.export_path()).unwrap();
    assert!(text.contains("Imogen Hale"));
    assert!(text.contains("Experience\n----------"));
}

/// Commands echo below the document and scroll into view.
#[test]
fn test_commands_echo_below_the_document() {
    let mut harness = resume_harness(80, 10);
    harness.submit("nope").unwrap();
    harness.assert_screen_contains("Command not found: nope");
}

#[test]
fn test_clear_rerenders_and_resets_scroll() {
    let mut harness = resume_harness(80, 10);
    harness.submit("nope").unwrap();
    harness.submit("clear").unwrap();
    assert_eq!(harness.app.resume.transcript.len(), 1);
    harness.assert_screen_not_contains("Command not found");
}
