//! Startup splash screen with a progress gauge.

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::VERSION;

/// Progress through the startup sequence.
pub struct SplashState {
    message: String,
    completed_steps: usize,
    total_steps: usize,
}

impl SplashState {
    pub fn new() -> Self {
        Self {
            message: "Starting...".to_string(),
            completed_steps: 0,
            total_steps: 2,
        }
    }

    pub fn set_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    pub fn complete_step(&mut self) {
        self.completed_steps = (self.completed_steps + 1).min(self.total_steps);
    }

    fn progress_percent(&self) -> u16 {
        if self.total_steps == 0 {
            return 100;
        }
        ((self.completed_steps * 100) / self.total_steps) as u16
    }
}

impl Default for SplashState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(f: &mut Frame, splash: &SplashState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Percentage(30),
        ])
        .split(area);

    let logo = vec![
        Line::from(Span::styled(
            r"                      _         _ ",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            r"  _ __  ___  _ _ | |_ _  _ (_)",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            r" | '  \/ _ \| '_||  _| || || |",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            r" |_|_|_\___/|_|   \__|\_,_||_|",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Terminal UI for the Rick and Morty API  v{}", VERSION),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(logo).alignment(Alignment::Center),
        chunks[1],
    );

    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(chunks[2])[1];

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(splash.progress_percent())
        .label(Span::styled(
            splash.message.clone(),
            Style::default().fg(Color::White),
        ));
    f.render_widget(gauge, gauge_area);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Ctrl+C to abort",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center),
        chunks[3],
    );
}
