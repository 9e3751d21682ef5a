// ABOUTME: Test UI display components including info bar, status panel, menu bar and help text

use ratatui::{backend::TestBackend, Terminal};
use wc_status::app::AppState;
use wc_status::components::LayoutComponent;
use wc_status::models::{PathStatus, RepoInfo, SectionIdx, StatusSnapshot};
use wc_status::panel::PanelEvent;
use wc_status::source::{run_to_completion, MockStatusSource, SourceError};

fn render(state: &AppState) -> String {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    let mut layout = LayoutComponent::new();

    terminal
        .draw(|frame| {
            layout.render(frame, state);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

fn demo_state() -> AppState {
    let mut state = AppState::default();
    let mut source = MockStatusSource::demo();
    run_to_completion(&mut state.panel, &mut source, PanelEvent::Refresh);
    state.dispatch(PanelEvent::InfoFetched(Ok(RepoInfo {
        working_path: "/home/dev/project".to_string(),
        remote_url: "https://example.com/project.git".to_string(),
        revision: "main @ 64a1f2c".to_string(),
    })));
    state
}

#[test]
fn test_bottom_menu_bar_shows_keys() {
    let content = render(&demo_state());

    assert!(
        content.contains("[s]tage"),
        "Bottom menu bar should contain '[s]tage' but content was: {}",
        content.chars().filter(|c| c.is_ascii_graphic() || *c == ' ').collect::<String>()
    );
    assert!(content.contains("[r]efresh"), "Should contain '[r]efresh'");
    assert!(content.contains("[?]help"), "Should contain '[?]help'");
    assert!(content.contains("[q]uit"), "Should contain '[q]uit'");
}

#[test]
fn test_info_bar_shows_repository() {
    let content = render(&demo_state());

    assert!(content.contains("/home/dev/project"));
    assert!(content.contains("https://example.com/project.git"));
    assert!(content.contains("main @ 64a1f2c"));
}

#[test]
fn test_status_panel_shows_sections_and_paths() {
    let content = render(&demo_state());

    assert!(content.contains("▸ Unversioned (2)"), "Unversioned starts collapsed");
    assert!(content.contains("▾ Unstaged (3)"));
    assert!(content.contains("M src/main.rs"));
    assert!(content.contains("A src/config.rs"));
    assert!(!content.contains("scratch.txt"), "Collapsed section paths are hidden");
}

#[test]
fn test_help_screen_shows_stage_key() {
    let mut state = demo_state();
    state.help_visible = true;

    let content = render(&state);
    assert!(
        content.contains("s          Stage path"),
        "Help screen should list the stage key but content was: {}",
        content.chars().filter(|c| c.is_ascii_graphic() || *c == ' ').collect::<String>()
    );
}

#[test]
fn test_clean_working_copy_message() {
    let mut state = AppState::default();
    state.dispatch(PanelEvent::StatusFetched {
        user: false,
        result: Ok(StatusSnapshot::new()),
    });

    let content = render(&state);
    assert!(content.contains("Working copy clean"));
}

#[test]
fn test_error_notice_rendered_above_panel() {
    let mut state = AppState::default();
    let snapshot = StatusSnapshot::new().with(SectionIdx::Unstaged, "a.txt", PathStatus::Modified);
    state.dispatch(PanelEvent::StatusFetched {
        user: false,
        result: Ok(snapshot),
    });
    state.dispatch(PanelEvent::StatusFetched {
        user: false,
        result: Err(SourceError::CommandFailed("status exited with 1".to_string())),
    });

    let content = render(&state);
    let notice = content
        .find("error: Command failed: status exited with 1")
        .expect("error notice rendered");
    let header = content.find("▾ Unstaged (1)").expect("header rendered");
    assert!(notice < header);
}

#[test]
fn test_pending_diff_shows_loading_marker() {
    let mut state = AppState::default();
    let mut source = MockStatusSource::new(
        StatusSnapshot::new()
            .with(SectionIdx::Unstaged, "a.txt", PathStatus::Modified)
            .with(SectionIdx::Unstaged, "b.txt", PathStatus::Modified),
    )
    .with_diff("a.txt", &["@@ -1 +1 @@", "+new"]);
    run_to_completion(&mut state.panel, &mut source, PanelEvent::Refresh);

    state.dispatch(PanelEvent::MoveDown);
    state.dispatch(PanelEvent::Toggle);
    assert_eq!(state.pending_effects.len(), 1);

    let content = render(&state);
    assert!(content.contains("M a.txt (loading diff)"));
    assert!(!content.contains("M b.txt (loading diff)"));
}
