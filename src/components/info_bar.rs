// ABOUTME: Repository info bar showing working path, remote URL and current revision

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::RepoInfo;

pub struct InfoBarComponent;

impl InfoBarComponent {
    pub const HEIGHT: u16 = 5;

    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, info: &RepoInfo) {
        let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let placeholder = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Working path: ", heading),
                Span::raw(placeholder(&info.working_path)),
            ]),
            Line::from(vec![
                Span::styled("Remote URL:   ", heading),
                Span::raw(placeholder(&info.remote_url)),
            ]),
            Line::from(vec![
                Span::styled("Revision:     ", heading),
                Span::styled(placeholder(&info.revision), Style::default().fg(Color::Magenta)),
            ]),
        ];

        let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }
}

impl Default for InfoBarComponent {
    fn default() -> Self {
        Self::new()
    }
}
