//! Command box: a bottom panel with ghost-text completion and a
//! suggestion list.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::app::App;

/// Suggestions shown below the input at most.
const MAX_VISIBLE_SUGGESTIONS: usize = 6;

pub fn render(f: &mut Frame, app: &App) {
    let frame_area = f.area();
    let suggestions = app
        .command_suggestions
        .len()
        .min(MAX_VISIBLE_SUGGESTIONS) as u16;
    let height = 3 + suggestions;

    let area = Rect::new(
        frame_area.x,
        frame_area.bottom().saturating_sub(height),
        frame_area.width,
        height.min(frame_area.height),
    );
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_input(f, app, chunks[0]);
    if suggestions > 0 {
        render_suggestions(f, app, chunks[1]);
    }
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Command ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let mut spans = vec![
        Span::styled(":", Style::default().fg(Color::Yellow)),
        Span::styled(
            app.command_text.clone(),
            Style::default().fg(Color::White),
        ),
    ];

    // Ghost text: the rest of the previewed completion.
    if let Some(preview) = &app.command_preview {
        if let Some(rest) = preview.strip_prefix(&app.command_text) {
            if !rest.is_empty() && !app.command_text.is_empty() {
                spans.push(Span::styled(
                    rest.to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
    }
    spans.push(Span::styled("\u{2588}", Style::default().fg(Color::Yellow)));

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_suggestions(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .command_suggestions
        .iter()
        .take(MAX_VISIBLE_SUGGESTIONS)
        .enumerate()
        .map(|(index, suggestion)| {
            let style = if index == app.command_suggestion_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(" {}", suggestion)).style(style)
        })
        .collect();

    f.render_widget(List::new(items), area);
}
