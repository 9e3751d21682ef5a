// ABOUTME: Main layout component stacking the info bar, status panel and bottom menu bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    style::{Color, Style},
};

use crate::app::AppState;
use super::{HelpComponent, InfoBarComponent, StatusPanelComponent};

const MENU_HEIGHT: u16 = 3;
const PANEL_BORDERS: u16 = 2;

pub struct LayoutComponent {
    info_bar: InfoBarComponent,
    status_panel: StatusPanelComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            info_bar: InfoBarComponent::new(),
            status_panel: StatusPanelComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Rows available to status panel content in a terminal `rows` tall.
    pub fn panel_height(rows: u16) -> usize {
        rows.saturating_sub(InfoBarComponent::HEIGHT + MENU_HEIGHT + PANEL_BORDERS) as usize
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(InfoBarComponent::HEIGHT),
                Constraint::Min(0),
                Constraint::Length(MENU_HEIGHT),
            ])
            .split(frame.size());

        self.info_bar.render(frame, chunks[0], state.panel.info());
        self.status_panel.render(frame, chunks[1], &state.panel);
        self.render_menu_bar(frame, chunks[2]);

        if state.help_visible {
            self.help.render(frame, frame.size());
        }
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect) {
        let menu_text = "[j/k]move [tab]toggle [s]tage [u]nstage [r]efresh [?]help [q]uit";

        let menu = Paragraph::new(menu_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_height_subtracts_chrome() {
        assert_eq!(LayoutComponent::panel_height(40), 30);
        assert_eq!(LayoutComponent::panel_height(5), 0);
    }
}
