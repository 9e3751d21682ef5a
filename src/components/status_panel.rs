// ABOUTME: Status panel component rendering notices, section headers, paths and inline diffs

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::PathStatus;
use crate::panel::{Element, ElementKind, NoticeLevel, StatusPanel};

pub struct StatusPanelComponent;

impl StatusPanelComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, panel: &StatusPanel) {
        let block = Block::default()
            .title("Status")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let mut lines: Vec<Line> = panel
            .notices()
            .map(|notice| {
                let color = match notice.level {
                    NoticeLevel::Error => Color::Red,
                    NoticeLevel::Warning => Color::Yellow,
                    NoticeLevel::Info => Color::Gray,
                };
                Line::from(Span::styled(notice.to_string(), Style::default().fg(color)))
            })
            .collect();

        if panel.elements().is_empty() {
            lines.push(Line::from(Span::styled(
                "Working copy clean",
                Style::default().fg(Color::Gray),
            )));
            frame.render_widget(Paragraph::new(lines).block(block), area);
            return;
        }

        let window = panel.window();
        for (offset, element) in panel.visible_elements().iter().enumerate() {
            let selected = panel.cursor_row() == Some(window.start + offset);
            let loading =
                element.kind == ElementKind::Path && panel.is_fetching_diff(&element.content);
            lines.push(Self::element_line(element, selected, loading));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn element_line(element: &Element, selected: bool, loading: bool) -> Line<'static> {
        let mut style = match element.kind {
            ElementKind::Header => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ElementKind::Path => Style::default().fg(element.status.map_or(Color::White, status_color)),
            ElementKind::DiffLine => diff_line_style(&element.content),
            ElementKind::Blank => Style::default(),
        };
        if selected {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        let mut spans = vec![Span::styled(element.display(), style)];
        if loading {
            spans.push(Span::styled(
                " (loading diff)",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
        }
        Line::from(spans)
    }
}

impl Default for StatusPanelComponent {
    fn default() -> Self {
        Self::new()
    }
}

pub fn status_color(status: PathStatus) -> Color {
    match status {
        PathStatus::Added => Color::Green,
        PathStatus::Modified => Color::Yellow,
        PathStatus::Deleted | PathStatus::Missing => Color::Red,
        PathStatus::Replaced => Color::Blue,
        PathStatus::Conflicted | PathStatus::Obstructed => Color::Magenta,
        PathStatus::External => Color::Cyan,
        PathStatus::Unversioned => Color::Gray,
        PathStatus::Ignored => Color::DarkGray,
    }
}

fn diff_line_style(line: &str) -> Style {
    if line.starts_with("@@") {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if line.starts_with('+') {
        Style::default().fg(Color::Green)
    } else if line.starts_with('-') {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    }
}
