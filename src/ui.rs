use crate::controller::{Controller, Field};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const FIELDS: [Field; 3] = [Field::Description, Field::Priority, Field::DueDate];

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Description => "Description",
        Field::Priority => "Priority (high/medium/low)",
        Field::DueDate => "Due date (YYYY-MM-DD)",
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut Controller,
) -> io::Result<()> {
    // None = the table has focus.
    let mut focus: Option<Field> = None;
    let mut error: Option<String> = None;

    loop {
        terminal.draw(|f| draw(f, controller, focus, error.as_deref()))?;

        if let Event::Key(key) = event::read()? {
            // The error popup is modal: any key dismisses it and
            // nothing else is processed.
            if error.is_some() {
                error = None;
                continue;
            }

            match focus {
                Some(field) => match key.code {
                    KeyCode::Tab => focus = next_focus(focus),
                    KeyCode::Esc => focus = None,
                    KeyCode::Enter => {
                        if let Err(err) = controller.add_task() {
                            error = Some(err.to_string());
                        }
                    }
                    KeyCode::Backspace => {
                        controller.input_mut(field).pop();
                    }
                    KeyCode::Char(c) => {
                        controller.input_mut(field).push(c);
                    }
                    _ => {}
                },
                None => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Tab | KeyCode::Char('a') => focus = Some(Field::Description),
                    KeyCode::Up => controller.select_previous(),
                    KeyCode::Down => controller.select_next(),
                    KeyCode::Char('d') => {
                        if let Err(err) = controller.remove_selected() {
                            error = Some(err.to_string());
                        }
                    }
                    KeyCode::Char('c') => {
                        if let Err(err) = controller.mark_selected_completed() {
                            error = Some(err.to_string());
                        }
                    }
                    KeyCode::Char('r') => {
                        if let Err(err) = controller.refresh_list() {
                            error = Some(err.to_string());
                        }
                    }
                    _ => {}
                },
            }
        }
    }
}

fn next_focus(focus: Option<Field>) -> Option<Field> {
    match focus {
        Some(Field::Description) => Some(Field::Priority),
        Some(Field::Priority) => Some(Field::DueDate),
        Some(Field::DueDate) => None,
        None => Some(Field::Description),
    }
}

fn draw(f: &mut Frame, controller: &mut Controller, focus: Option<Field>, error: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(f.area());

    for (i, field) in FIELDS.iter().enumerate() {
        let value = controller.input_mut(*field).clone();
        let input = Paragraph::new(value).block(
            Block::default()
                .title(field_label(*field))
                .borders(Borders::ALL)
                .border_style(if focus == Some(*field) {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                }),
        );
        f.render_widget(input, chunks[i]);
    }

    let rows: Vec<Row> = controller
        .rows
        .iter()
        .map(|r| {
            Row::new(vec![
                r.id.to_string(),
                r.description.clone(),
                r.priority.clone(),
                r.due_date.clone(),
                r.status.to_string(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Description", "Priority", "Due Date", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title("To-Do List")
                .borders(Borders::ALL)
                .border_style(if focus.is_none() {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                }),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    state.select(controller.selected);
    f.render_stateful_widget(table, chunks[3], &mut state);

    let help = Paragraph::new(Line::from(
        "Tab: form  Enter: add  Up/Down: select  c: complete  d: delete  r: refresh  q: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[4]);

    if let Some(message) = error {
        let area = centered_rect(50, f.area());
        let popup = Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from("press any key to continue"),
        ])
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Percentage(40),
            Constraint::Length(5),
            Constraint::Percentage(40),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
