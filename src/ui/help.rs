//! Help overlay.

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

pub fn render(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Help ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let section = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::White);

    let entry = |keys: &str, text: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", keys), key_style),
            Span::styled(text.to_string(), text_style),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Resources", section)),
        entry("1 / c", "Characters"),
        entry("2 / l", "Locations"),
        entry("3 / e", "Episodes"),
        entry("click tab", "switch with the mouse"),
        Line::from(""),
        Line::from(Span::styled("  Pages", section)),
        entry("] / \u{2192}", "next page"),
        entry("[ / \u{2190}", "previous page"),
        entry("{ / }", "first / last page"),
        entry("click number", "jump to that page"),
        Line::from(""),
        Line::from(Span::styled("  Rows", section)),
        entry("j / k", "move selection"),
        entry("g / G", "first / last row"),
        entry("Enter / d", "detail view"),
        Line::from(""),
        Line::from(Span::styled("  Search (characters)", section)),
        entry("/", "edit the name filter"),
        entry("Enter", "apply"),
        entry("Esc", "clear"),
        Line::from(""),
        Line::from(Span::styled("  Other", section)),
        entry(":", "command box (:episodes, :page 7, :quit)"),
        entry("R", "reload the current page"),
        entry("r", "retry after a failed request"),
        entry("q / Ctrl+C", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
