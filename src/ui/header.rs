//! Header bar: title, resource tabs, and page info.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::resource::ResourceKind;
use crate::VERSION;

pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" mortui v{} ", VERSION),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    render_tabs(f, app, rows[0]);
    render_info_line(f, app, rows[1]);
}

/// One tab per resource, highlighting the active one. A hitbox is recorded
/// for every tab so clicks can switch resources.
fn render_tabs(f: &mut Frame, app: &mut App, area: Rect) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    let mut x = area.x + 1;

    for (index, kind) in ResourceKind::ALL.into_iter().enumerate() {
        let def = kind.def();
        let label = format!(" {} {} {} ", index + 1, def.icon, def.display_name);

        let style = if kind == app.kind {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let span = Span::styled(label, style);
        let width = span.width() as u16;
        if x + width <= area.right() {
            app.tab_hits.push((Rect::new(x, area.y, width, 1), kind));
        }

        spans.push(span);
        spans.push(Span::raw(" "));
        x += width + 1;
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_info_line(f: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(" Page: ", dim)];
    match &app.data {
        Some(page) => {
            spans.push(Span::styled(
                format!("{}/{}", app.page, page.info.pages),
                value,
            ));
            spans.push(Span::styled("  Total: ", dim));
            spans.push(Span::styled(page.info.count.to_string(), value));
        }
        None => spans.push(Span::styled("-", dim)),
    }

    if let Some(term) = app.active_search() {
        spans.push(Span::styled("  Search: ", dim));
        spans.push(Span::styled(
            format!("\u{201c}{}\u{201d}", term),
            Style::default().fg(Color::Yellow),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
