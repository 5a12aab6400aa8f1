//! View layer: all ratatui rendering.
//!
//! The view reads App state and draws; the only state it writes back is
//! the resume page's cached viewport height and the scroll clamp.

pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, OutputKind, OutputLine, Page};
use crate::resume::DocLineKind;
use crate::view::theme::Theme;

const PROMPT: &str = "\u{276f} ";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg).fg(app.theme.fg)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_title_bar(frame, app, rows[0]);
    match app.page {
        Page::Shell => draw_shell(frame, app, rows[1]),
        Page::Gallery => draw_gallery(frame, app, rows[1]),
        Page::Resume => draw_resume(frame, app, rows[1]),
    }
    draw_input(frame, app, rows[2]);
    draw_autocomplete(frame, app, rows[2]);
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let path = match app.page {
        Page::Shell => "~",
        Page::Gallery => "~/prompts",
        Page::Resume => "~/resume",
    };
    let line = Line::from(vec![
        Span::styled(
            " termfolio ",
            Style::default()
                .fg(app.theme.title_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(path, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn output_style(kind: OutputKind, theme: &Theme) -> Style {
    match kind {
        OutputKind::Result => Style::default().fg(theme.fg),
        OutputKind::Error => Style::default().fg(theme.error),
        OutputKind::Success => Style::default().fg(theme.success),
        OutputKind::Banner => Style::default().fg(theme.accent),
    }
}

fn transcript_line(line: &OutputLine, theme: &Theme) -> Line<'static> {
    match line {
        OutputLine::Command(raw) => Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(theme.prompt_fg)),
            Span::styled(raw.clone(), Style::default().fg(theme.fg)),
        ]),
        OutputLine::Text { text, kind } => {
            Line::styled(text.clone(), output_style(*kind, theme))
        }
    }
}

/// Shell transcript, pinned to the bottom.
fn draw_shell(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .shell
        .transcript
        .iter()
        .map(|l| transcript_line(l, &app.theme))
        .collect();
    let skip = lines.len().saturating_sub(area.height as usize);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(visible), area);
}

fn draw_gallery(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();

    let status = if app.gallery.query.is_empty() {
        format!(
            "{} prompts \u{b7} type /keyword to filter \u{b7} copy <n> copies a prompt",
            app.gallery.visible.len()
        )
    } else {
        format!(
            "filter: /{} \u{b7} {} of {} shown",
            app.gallery.query,
            app.gallery.visible.len(),
            app.gallery.cards.len()
        )
    };
    lines.push(Line::styled(status, Style::default().fg(theme.muted)));
    lines.push(Line::default());

    if app.gallery.visible.is_empty() {
        lines.push(Line::styled(
            "No prompts match.",
            Style::default().fg(theme.muted),
        ));
    }

    let width = area.width.saturating_sub(4) as usize;
    for (row, &card_index) in app.gallery.visible.iter().enumerate() {
        let card = &app.gallery.cards[card_index];
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>3}. ", row + 1),
                Style::default().fg(theme.muted),
            ),
            Span::styled(
                card.title.as_str(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}]", card.tag),
                Style::default().fg(theme.muted),
            ),
        ]));
        lines.push(Line::styled(
            format!("     {}", excerpt(&card.prompt, width)),
            Style::default().fg(theme.fg),
        ));
        lines.push(Line::default());
    }

    // Transient toast in the bottom row of the content area.
    if let Some(toast) = &app.gallery.toast {
        let toast_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(Line::styled(
                toast.text.as_str(),
                output_style(toast.kind, theme),
            ))
            .style(Style::default().bg(theme.popup_bg)),
            toast_area,
        );
    }

    let height = area.height.saturating_sub(1) as usize; // keep the toast row
    lines.truncate(height);
    frame.render_widget(
        Paragraph::new(lines),
        Rect::new(area.x, area.y, area.width, height as u16),
    );
}

fn doc_line_style(kind: DocLineKind, theme: &Theme) -> Style {
    match kind {
        DocLineKind::Title => Style::default()
            .fg(theme.title_fg)
            .add_modifier(Modifier::BOLD),
        DocLineKind::Section => Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
        DocLineKind::Emphasis => Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        DocLineKind::Body => Style::default().fg(theme.fg),
        DocLineKind::Meta => Style::default().fg(theme.muted),
        DocLineKind::Blank => Style::default(),
    }
}

/// Resume document with the command transcript appended below, scrolled.
fn draw_resume(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let mut lines: Vec<Line<'static>> = Vec::new();

    if app.resume.doc.is_empty() {
        let message = match &app.resume.load_error {
            Some(err) => format!("Error loading resume: {err}"),
            None => "Error loading resume".to_string(),
        };
        lines.push(Line::styled(message, Style::default().fg(theme.error)));
    } else {
        for doc_line in &app.resume.doc {
            lines.push(Line::styled(
                doc_line.text.clone(),
                doc_line_style(doc_line.kind, &theme),
            ));
        }
    }
    for line in &app.resume.transcript {
        lines.push(transcript_line(line, &theme));
    }

    let viewport = area.height as usize;
    app.resume.viewport = viewport;
    let max = lines.len().saturating_sub(viewport);
    app.resume.scroll = app.resume.scroll.min(max);

    let visible: Vec<Line> = lines.into_iter().skip(app.resume.scroll).take(viewport).collect();
    frame.render_widget(Paragraph::new(visible), area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let line = app.active_line();
    let text = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(app.theme.prompt_fg)),
        Span::styled(line.buffer(), Style::default().fg(app.theme.fg)),
    ]);
    frame.render_widget(Paragraph::new(text), area);

    let before_cursor: String = line.buffer().chars().take(line.cursor()).collect();
    let x = area.x + PROMPT.width() as u16 + before_cursor.width() as u16;
    frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
}

/// Autocomplete popup, rendered dropup-style above the input line.
fn draw_autocomplete(frame: &mut Frame, app: &App, input_area: Rect) {
    let line = app.active_line();
    if !line.has_matches() {
        return;
    }
    let theme = &app.theme;

    let matched: Vec<_> = line.matched().collect();
    let name_width = matched.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let items: Vec<ListItem> = matched
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let style = if line.selected() == Some(i) {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection_bg)
            } else {
                Style::default().fg(theme.fg).bg(theme.popup_bg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<name_width$} ", spec.name),
                    style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(spec.description.clone(), style.fg(theme.muted)),
            ]))
            .style(style)
        })
        .collect();

    let height = (matched.len() as u16).min(input_area.y);
    let width = input_area.width.min(52);
    let popup = Rect::new(
        input_area.x,
        input_area.y.saturating_sub(height),
        width,
        height,
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(
        List::new(items).style(Style::default().bg(theme.popup_bg)),
        popup,
    );
}

/// First `width` chars of a prompt, with an ellipsis when truncated.
fn excerpt(text: &str, width: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    format!("{}\u{2026}", cut.trim_end())
}
