//! Pagination bar.
//!
//! Renders the marker sequence from [`page_range`] as one line under the
//! table: previous/next arrows, page numbers, and ellipses for collapsed
//! runs. Every navigable element records a hitbox so it can be clicked.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::pagination::{page_range, PageMarker};

pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let total = app.total_pages();
    let markers = page_range(app.page, total);
    if markers.is_empty() {
        return;
    }

    let mut spans: Vec<Span> = Vec::new();
    // Hitboxes track the x cursor, so the line must stay left-aligned.
    let mut x = area.x;

    let arrow_style = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let prev = Span::styled(" \u{2039} ", arrow_style(app.page > 1));
    let width = prev.width() as u16;
    if app.page > 1 && x + width <= area.right() {
        app.pager_hits.push((Rect::new(x, area.y, width, 1), app.page - 1));
    }
    x += width;
    spans.push(prev);

    for marker in &markers {
        let span = match marker {
            PageMarker::Page(n) => {
                let style = if *n == app.page {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let span = Span::styled(format!(" {} ", n), style);
                let width = span.width() as u16;
                if x + width <= area.right() {
                    app.pager_hits.push((Rect::new(x, area.y, width, 1), *n));
                }
                span
            }
            PageMarker::Ellipsis => {
                Span::styled(" \u{2026} ", Style::default().fg(Color::DarkGray))
            }
        };
        x += span.width() as u16;
        spans.push(span);
    }

    let next = Span::styled(" \u{203a} ", arrow_style(app.page < total));
    let width = next.width() as u16;
    if app.page < total && x + width <= area.right() {
        app.pager_hits.push((Rect::new(x, area.y, width, 1), app.page + 1));
    }
    spans.push(next);

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
