// ABOUTME: Event handling system mapping keyboard input to status panel actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppState;
use crate::panel::PanelEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    Toggle,
    Stage,
    Unstage,
    Refresh,
    DismissNotices,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Quit);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Char('q') => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::MoveUp),
            KeyCode::Char('g') | KeyCode::Home => Some(AppEvent::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(AppEvent::GoToBottom),
            KeyCode::Tab | KeyCode::Enter => Some(AppEvent::Toggle),
            KeyCode::Char('s') => Some(AppEvent::Stage),
            KeyCode::Char('u') => Some(AppEvent::Unstage),
            KeyCode::Char('r') => Some(AppEvent::Refresh),
            KeyCode::Esc => Some(AppEvent::DismissNotices),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        let panel_event = match event {
            AppEvent::Quit => return state.quit(),
            AppEvent::ToggleHelp => return state.toggle_help(),
            AppEvent::MoveUp => PanelEvent::MoveUp,
            AppEvent::MoveDown => PanelEvent::MoveDown,
            AppEvent::GoToTop => PanelEvent::MoveTop,
            AppEvent::GoToBottom => PanelEvent::MoveBottom,
            AppEvent::Toggle => PanelEvent::Toggle,
            AppEvent::Stage => PanelEvent::Stage,
            AppEvent::Unstage => PanelEvent::Unstage,
            AppEvent::Refresh => PanelEvent::Refresh,
            AppEvent::DismissNotices => PanelEvent::DismissNotices,
        };
        state.dispatch(panel_event);
    }
}
