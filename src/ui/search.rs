//! Character name search bar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Mode};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == Mode::Search;

    let line = if editing {
        Line::from(vec![
            Span::styled(
                " /",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                app.search_input.clone(),
                Style::default().fg(Color::White),
            ),
            // Block cursor.
            Span::styled("\u{2588}", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(vec![
            Span::styled(" /", Style::default().fg(Color::DarkGray)),
            Span::styled(app.search.clone(), Style::default().fg(Color::DarkGray)),
        ])
    };

    f.render_widget(Paragraph::new(line), area);
}
