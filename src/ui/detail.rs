//! Detail view: the selected item as syntax-highlighted JSON.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::app::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let json = app
        .selected_item_json()
        .unwrap_or_else(|| "No item selected".to_string());
    let lines: Vec<Line> = json.lines().map(highlight_line).collect();
    let total_lines = lines.len();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} detail ", app.kind.def().singular),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = inner.height as usize;
    let max_scroll = total_lines.saturating_sub(visible);
    let scroll = app.detail_scroll.min(max_scroll);

    f.render_widget(
        Paragraph::new(lines).scroll((scroll as u16, 0)),
        inner,
    );

    if total_lines > visible {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("\u{2191}"))
            .end_symbol(Some("\u{2193}"));
        let mut state = ScrollbarState::new(max_scroll).position(scroll);
        f.render_stateful_widget(scrollbar, inner, &mut state);
    }
}

/// Colorize one line of pretty-printed JSON.
///
/// Works on the line structure serde_json emits: optional indentation, an
/// optional `"key":` prefix, then a value or bracket.
fn highlight_line(line: &str) -> Line<'static> {
    let indent_len = line.len() - line.trim_start().len();
    let (indent, rest) = line.split_at(indent_len);

    let mut spans = vec![Span::raw(indent.to_string())];

    if rest.starts_with('"') {
        if let Some(colon) = find_key_colon(rest) {
            let (key, value) = rest.split_at(colon);
            spans.push(Span::styled(
                key.to_string(),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::styled(":".to_string(), Style::default().fg(Color::White)));
            spans.extend(value_spans(&value[1..]));
            return Line::from(spans);
        }
    }

    spans.extend(value_spans(rest));
    Line::from(spans)
}

/// Byte position of the colon separating key from value, if this line
/// starts with a JSON string key. Honors escaped quotes inside the key.
fn find_key_colon(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => {
                return if bytes.get(i + 1) == Some(&b':') {
                    Some(i + 1)
                } else {
                    None
                };
            }
            _ => i += 1,
        }
    }
    None
}

/// Style the value part of a line: strings green, numbers blue, booleans
/// magenta, null dim, brackets yellow.
fn value_spans(s: &str) -> Vec<Span<'static>> {
    let without_comma = s.trim_end_matches(',');
    let has_comma = without_comma.len() != s.len();
    let value = without_comma.trim_start();
    let lead = &without_comma[..without_comma.len() - value.len()];

    let style = if value.starts_with('"') {
        Style::default().fg(Color::Green)
    } else if value == "null" {
        Style::default().fg(Color::DarkGray)
    } else if value == "true" || value == "false" {
        Style::default().fg(Color::Magenta)
    } else if value.parse::<f64>().is_ok() {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut spans = vec![
        Span::raw(lead.to_string()),
        Span::styled(value.to_string(), style),
    ];
    if has_comma {
        spans.push(Span::styled(",".to_string(), Style::default().fg(Color::White)));
    }
    spans
}
