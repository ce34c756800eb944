//! Terminal rendering.
//!
//! # Module Structure
//!
//! - [`header`] - title bar with resource tabs and page info
//! - [`pager`] - the pagination bar
//! - [`search`] - the character name search bar
//! - [`detail`] - full JSON view of the selected item
//! - [`help`] - help overlay
//! - [`command_box`] - command input with suggestions
//! - [`splash`] - startup screen

mod command_box;
mod detail;
mod header;
mod help;
mod pager;
mod search;
pub mod splash;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use serde_json::Value;

use crate::app::{App, Mode};
use crate::resource::{self, ColumnDef, ColumnStyle};

/// Render the whole frame.
pub fn render(f: &mut Frame, app: &mut App) {
    // Hitboxes are rebuilt from scratch on every frame.
    app.tab_hits.clear();
    app.pager_hits.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(1),    // content
            Constraint::Length(1), // pagination bar
            Constraint::Length(1), // status line
        ])
        .split(f.area());

    header::render(f, app, chunks[0]);

    if app.mode == Mode::Detail {
        detail::render(f, app, chunks[1]);
    } else if app.in_error_state() {
        // The error view replaces the results and the pagination bar
        // renders nothing because no dataset is present.
        render_error_view(f, app, chunks[1]);
    } else {
        render_results(f, app, chunks[1]);
    }

    pager::render(f, app, chunks[2]);
    render_status_line(f, app, chunks[3]);

    match app.mode {
        Mode::Help => help::render(f),
        Mode::Command => command_box::render(f, app),
        _ => {}
    }
}

fn render_results(f: &mut Frame, app: &mut App, area: Rect) {
    // The search bar occupies one line while editing or while a term is
    // committed, so the table does not jump around on every keystroke.
    let show_search = app.kind.supports_search()
        && (app.mode == Mode::Search || app.active_search().is_some());

    let table_area = if show_search {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);
        search::render(f, app, rows[0]);
        rows[1]
    } else {
        area
    };

    match &app.data {
        None => render_centered_notice(
            f,
            table_area,
            if app.loading { "Loading..." } else { "No data" },
            Style::default().fg(Color::Yellow),
        ),
        Some(page) if page.is_empty() => render_no_results(f, app, table_area),
        Some(_) => render_table(f, app, table_area),
    }
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let Some(page) = &app.data else { return };
    let def = app.kind.def();

    let title = match app.active_search() {
        Some(term) => format!(" {} [{}] \u{201c}{}\u{201d} ", def.display_name, page.info.count, term),
        None => format!(" {} [{}] ", def.display_name, page.info.count),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let header_cells: Vec<Cell> = def
        .columns
        .iter()
        .map(|col| {
            Cell::from(format!(" {}", col.header)).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = page
        .results
        .iter()
        .map(|item| {
            let cells: Vec<Cell> = def
                .columns
                .iter()
                .map(|col| render_cell(item, col))
                .collect();
            Row::new(cells).height(1)
        })
        .collect();

    let widths: Vec<Constraint> = def
        .columns
        .iter()
        .map(|col| Constraint::Percentage(col.width))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if !page.results.is_empty() {
        state.select(Some(app.selected.min(page.results.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_cell(item: &Value, col: &ColumnDef) -> Cell<'static> {
    match col.style {
        ColumnStyle::Text => {
            let value = resource::display_value(item, col.json_path);
            let style = if value == resource::UNKNOWN {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Cell::from(format!(" {}", truncate_string(&value, 40))).style(style)
        }
        ColumnStyle::Status => {
            let value = resource::display_value(item, col.json_path);
            let color = resource::status_color(&value);
            Cell::from(format!(" \u{25cf} {}", truncate_string(&value, 12)))
                .style(Style::default().fg(color))
        }
        ColumnStyle::Gender => {
            let value = resource::display_value(item, col.json_path);
            let icon = resource::gender_icon(&value);
            Cell::from(format!(" {} {}", icon, truncate_string(&value, 12)))
        }
        ColumnStyle::Count => {
            let value = resource::count_value(item, col.json_path);
            Cell::from(format!(" {}", value)).style(Style::default().fg(Color::LightBlue))
        }
    }
}

fn render_no_results(f: &mut Frame, app: &App, area: Rect) {
    let def = app.kind.def();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} [0] ", def.display_name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    match app.active_search() {
        Some(term) => {
            lines.push(Line::from(Span::styled(
                format!("No {} match \u{201c}{}\u{201d}", def.key, term),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Esc clears the search",
                Style::default().fg(Color::DarkGray),
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "No results on this page",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_error_view(f: &mut Frame, app: &App, area: Rect) {
    let Some(message) = &app.error_message else { return };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Request failed ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / page {}", app.kind.def().display_name, app.page),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "r",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" retry    "),
            Span::styled(
                "q",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" quit"),
        ]),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_centered_notice(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![Line::from(""), Line::from(Span::styled(text.to_string(), style))];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_status_line(f: &mut Frame, app: &App, area: Rect) {
    let crumb = format!(" <{}:{}> ", app.kind.def().key, app.page);

    let (status_text, status_style) = if app.loading {
        ("Loading...".to_string(), Style::default().fg(Color::Yellow))
    } else if let Some(notice) = &app.notice {
        (notice.clone(), Style::default().fg(Color::Cyan))
    } else {
        let hints = match app.mode {
            Mode::Search => "Enter: search | Esc: clear",
            Mode::Detail => "j/k: scroll | q: back",
            Mode::Command => "Tab: complete | Enter: run | Esc: close",
            _ if app.in_error_state() => "r: retry | q: quit",
            _ => "?: help | /: search | [ ]: page | Enter: detail | q: quit",
        };
        (hints.to_string(), Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::styled(crumb, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(status_text, status_style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Truncate a string for display (Unicode-safe).
pub(crate) fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Centered rect helper for overlays, in percent of the parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
