// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use proyectos_app::{EditSession, ListCommand, ListEvent, MAX_NAME_LEN, ProjectList};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::io;
use std::time::Duration;

const ROW_MARKER: &str = "▸ ";
const ROW_INDENT: &str = "  ";

/// Cursor/selection state of the inline rename field. Opening a session
/// selects the whole draft, so the first printable key replaces it; any
/// movement or edit collapses the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct InlineInputUiState {
    cursor: usize,
    select_all: bool,
}

impl InlineInputUiState {
    fn focused_on(draft: &str) -> Self {
        Self {
            cursor: char_count(draft),
            select_all: true,
        }
    }
}

#[derive(Debug, Default)]
struct ViewData {
    selected_row: usize,
    input: InlineInputUiState,
    status_line: Option<String>,
    help_visible: bool,
}

pub fn run_app(list: &mut ProjectList) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();

    let mut result = Ok(());
    loop {
        if let Err(error) = terminal.draw(|frame| render(frame, list, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(list, &mut view_data, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn handle_key_event(list: &mut ProjectList, view_data: &mut ViewData, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        view_data.help_visible = false;
        return false;
    }

    if list.is_editing() {
        handle_edit_key(list, view_data, key);
        false
    } else {
        handle_view_key(list, view_data, key)
    }
}

fn handle_view_key(list: &mut ProjectList, view_data: &mut ViewData, key: KeyEvent) -> bool {
    let last_row = list.projects().len().saturating_sub(1);
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            view_data.selected_row = (view_data.selected_row + 1).min(last_row);
            view_data.status_line = None;
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            view_data.selected_row = view_data.selected_row.saturating_sub(1);
            view_data.status_line = None;
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
            view_data.selected_row = 0;
            view_data.status_line = None;
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
            view_data.selected_row = last_row;
            view_data.status_line = None;
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            start_edit_of_selected(list, view_data);
        }
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
        }
        _ => {}
    }
    false
}

fn start_edit_of_selected(list: &mut ProjectList, view_data: &mut ViewData) {
    let Some(id) = list
        .projects()
        .get(view_data.selected_row)
        .map(|project| project.id)
    else {
        view_data.status_line = Some("no project selected".to_owned());
        return;
    };
    let events = list.dispatch(ListCommand::StartEdit(id));
    note_list_events(list, view_data, &events);
}

fn handle_edit_key(list: &mut ProjectList, view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let events = list.dispatch(ListCommand::Cancel);
            note_list_events(list, view_data, &events);
        }
        KeyCode::Enter => {
            let events = list.dispatch(ListCommand::Commit);
            note_list_events(list, view_data, &events);
        }
        // Tab walks focus out of the field, which saves only when the
        // field is currently error-free.
        KeyCode::Tab | KeyCode::BackTab => {
            let events = list.dispatch(ListCommand::Blur);
            note_list_events(list, view_data, &events);
        }
        _ => {
            let Some(session) = list.session() else {
                return;
            };
            let Some((draft, input)) = apply_input_key(&session.draft, view_data.input, key)
            else {
                return;
            };
            view_data.input = input;
            if draft != session.draft {
                let events = list.dispatch(ListCommand::ChangeDraft(draft));
                note_list_events(list, view_data, &events);
            }
        }
    }
}

/// Applies one keystroke to the rename field. Returns the resulting draft
/// and cursor state when the key belongs to the field, `None` when it
/// does not. Drafts are capped at [`MAX_NAME_LEN`] characters; keystrokes
/// past the cap are swallowed without effect.
fn apply_input_key(
    draft: &str,
    input: InlineInputUiState,
    key: KeyEvent,
) -> Option<(String, InlineInputUiState)> {
    let len = char_count(draft);
    match (key.code, key.modifiers) {
        (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            if input.select_all {
                return Some((
                    ch.to_string(),
                    InlineInputUiState {
                        cursor: 1,
                        select_all: false,
                    },
                ));
            }
            if len >= MAX_NAME_LEN {
                return Some((draft.to_owned(), input));
            }
            let mut next = draft.to_owned();
            next.insert(byte_index(draft, input.cursor), ch);
            Some((
                next,
                InlineInputUiState {
                    cursor: input.cursor + 1,
                    select_all: false,
                },
            ))
        }
        (KeyCode::Backspace, _) => {
            if input.select_all {
                return Some((String::new(), InlineInputUiState::default()));
            }
            if input.cursor == 0 {
                return Some((draft.to_owned(), input));
            }
            let mut next = draft.to_owned();
            next.remove(byte_index(draft, input.cursor - 1));
            Some((
                next,
                InlineInputUiState {
                    cursor: input.cursor - 1,
                    select_all: false,
                },
            ))
        }
        (KeyCode::Delete, _) => {
            if input.select_all {
                return Some((String::new(), InlineInputUiState::default()));
            }
            if input.cursor >= len {
                return Some((draft.to_owned(), input));
            }
            let mut next = draft.to_owned();
            next.remove(byte_index(draft, input.cursor));
            Some((next, input_at(input.cursor)))
        }
        (KeyCode::Left, _) => {
            let cursor = if input.select_all {
                0
            } else {
                input.cursor.saturating_sub(1)
            };
            Some((draft.to_owned(), input_at(cursor)))
        }
        (KeyCode::Right, _) => {
            let cursor = if input.select_all {
                len
            } else {
                (input.cursor + 1).min(len)
            };
            Some((draft.to_owned(), input_at(cursor)))
        }
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
            Some((draft.to_owned(), input_at(0)))
        }
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
            Some((draft.to_owned(), input_at(len)))
        }
        _ => None,
    }
}

fn input_at(cursor: usize) -> InlineInputUiState {
    InlineInputUiState {
        cursor,
        select_all: false,
    }
}

fn char_count(draft: &str) -> usize {
    draft.chars().count()
}

fn byte_index(draft: &str, cursor: usize) -> usize {
    draft
        .char_indices()
        .nth(cursor)
        .map_or(draft.len(), |(index, _)| index)
}

fn note_list_events(list: &ProjectList, view_data: &mut ViewData, events: &[ListEvent]) {
    for event in events {
        match event {
            ListEvent::EditStarted(_) => {
                // One-time focus effect per session open: caret at the end,
                // whole draft selected.
                let draft = list.session().map(|session| session.draft.as_str());
                view_data.input = InlineInputUiState::focused_on(draft.unwrap_or_default());
                view_data.status_line = None;
            }
            ListEvent::EditUnavailable => {
                view_data.status_line = Some("rename unavailable".to_owned());
            }
            ListEvent::NameCommitted { name, .. } => {
                view_data.status_line = Some(format!("renamed to {name}"));
            }
            ListEvent::EditCanceled(_) => {
                view_data.status_line = Some("rename canceled".to_owned());
            }
            ListEvent::BlurSkipped => {
                view_data.status_line = Some("fix the name or press esc".to_owned());
            }
            ListEvent::CommitBlocked(_) | ListEvent::DraftChanged(_) => {
                // The inline error row carries the message.
                view_data.status_line = None;
            }
        }
    }
}

fn render(frame: &mut ratatui::Frame<'_>, list: &ProjectList, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let header = Paragraph::new(format!("{} projects", list.projects().len()))
        .style(Style::default().fg(Color::White))
        .block(Block::default().title("proyectos").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    let body = Paragraph::new(project_rows(list, view_data))
        .block(Block::default().title("projects").borders(Borders::ALL));
    frame.render_widget(body, layout[1]);

    let status = Paragraph::new(status_text(list, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(62, 46, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn project_rows(list: &ProjectList, view_data: &ViewData) -> Text<'static> {
    let mut lines = Vec::with_capacity(list.projects().len() + 1);
    for (row_index, project) in list.projects().iter().enumerate() {
        if let Some(session) = list.session().filter(|session| session.target == project.id) {
            lines.push(edit_field_line(session, view_data.input));
            if let Some(error) = session.error {
                lines.push(Line::styled(
                    format!("{ROW_INDENT}{ROW_INDENT}{error}"),
                    Style::default().fg(Color::Red),
                ));
            }
            continue;
        }

        let selected = row_index == view_data.selected_row;
        let marker = if selected { ROW_MARKER } else { ROW_INDENT };
        let mut style = Style::default();
        if selected {
            style = style.bg(Color::DarkGray);
        }
        let mut spans = vec![Span::styled(format!("{marker}{}", project.name), style)];
        if selected && !list.is_editing() {
            spans.push(Span::styled(
                "  e rename",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }
    Text::from(lines)
}

/// Renders the rename field: marker, draft split around a reversed caret
/// cell, red when the draft is invalid. A fully selected draft renders
/// reversed end to end instead of showing the caret.
fn edit_field_line(session: &EditSession, input: InlineInputUiState) -> Line<'static> {
    let base = if session.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let mut spans = vec![Span::styled(ROW_MARKER, base)];
    if input.select_all && !session.draft.is_empty() {
        spans.push(Span::styled(
            session.draft.clone(),
            base.add_modifier(Modifier::REVERSED),
        ));
        return Line::from(spans);
    }

    let split = byte_index(&session.draft, input.cursor);
    let (before, rest) = session.draft.split_at(split);
    let mut rest_chars = rest.chars();
    let caret = rest_chars.next().map_or(' ', |ch| ch);
    let after: String = rest_chars.collect();

    spans.push(Span::styled(before.to_owned(), base));
    spans.push(Span::styled(
        caret.to_string(),
        base.add_modifier(Modifier::REVERSED),
    ));
    if !after.is_empty() {
        spans.push(Span::styled(after, base));
    }
    Line::from(spans)
}

fn status_text(list: &ProjectList, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let (mode, hints) = if list.is_editing() {
        ("EDIT", "type name | enter save | tab save+leave | esc cancel")
    } else {
        ("VIEW", "j/k move | e rename | ? help | q quit")
    };
    match &view_data.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "view: j/k or arrows move | g/G first/last | e or enter rename | q or ctrl+q quit\n\
edit: type to replace the selected name | left/right home/end move caret\n\
edit: enter save | tab save and leave field | esc cancel\n\
renames must be non-empty and unique; the error shows under the field\n\
any key closes this help"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
