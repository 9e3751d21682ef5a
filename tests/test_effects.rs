// ABOUTME: Tests for effect execution against a mocked source and the async app runtime

use mockall::mock;
use mockall::predicate::eq;
use wc_status::app::App;
use wc_status::config::AppConfig;
use wc_status::models::{PathEntry, PathStatus, RepoInfo, SectionIdx, StatusSnapshot};
use wc_status::panel::{Cursor, Effect, PanelEvent, StatusPanel};
use wc_status::source::{
    execute, run_to_completion, BoundsError, MockStatusSource, SourceError, StatusSource,
};

mock! {
    pub Source {}

    impl StatusSource for Source {
        fn current_snapshot(&self) -> StatusSnapshot;
        fn refresh_snapshot(&mut self) -> Result<(), SourceError>;
        fn current_info(&self) -> RepoInfo;
        fn refresh_info(&mut self) -> Result<(), SourceError>;
        fn stage_path(&mut self, path: &str) -> Result<(), SourceError>;
        fn unstage_path(&mut self, path: &str) -> Result<(), SourceError>;
        fn fetch_diff(&mut self, path: &str) -> Result<(), SourceError>;
        fn get_diff(&self, path: &str) -> Vec<String>;
        fn path_entry_at(&self, section: SectionIdx, index: usize) -> Result<PathEntry, BoundsError>;
    }
}

#[test]
fn test_fetch_diff_reads_cache_after_success() {
    let mut source = MockSource::new();
    source
        .expect_fetch_diff()
        .withf(|path| path == "a.txt")
        .times(1)
        .returning(|_| Ok(()));
    source
        .expect_get_diff()
        .withf(|path| path == "a.txt")
        .times(1)
        .returning(|_| vec!["@@ -1 +1 @@".to_string()]);

    let event = execute(
        &mut source,
        Effect::FetchDiff {
            path: "a.txt".to_string(),
            generation: 3,
        },
    );

    match event {
        PanelEvent::DiffFetched {
            path,
            generation,
            result,
        } => {
            assert_eq!(path, "a.txt");
            assert_eq!(generation, 3);
            assert_eq!(result.unwrap(), vec!["@@ -1 +1 @@".to_string()]);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_failed_fetch_never_reads_cache() {
    let mut source = MockSource::new();
    source
        .expect_fetch_diff()
        .times(1)
        .returning(|_| Err(SourceError::CommandFailed("diff exited with 1".to_string())));
    source.expect_get_diff().never();

    let event = execute(
        &mut source,
        Effect::FetchDiff {
            path: "a.txt".to_string(),
            generation: 1,
        },
    );
    assert!(matches!(event, PanelEvent::DiffFetched { result: Err(_), .. }));
}

#[test]
fn test_refresh_completion_carries_user_flag() {
    let mut source = MockSource::new();
    source.expect_refresh_snapshot().times(2).returning(|| Ok(()));
    source
        .expect_current_snapshot()
        .times(2)
        .return_const(StatusSnapshot::new());

    let user = execute(&mut source, Effect::RefreshStatus { user: true });
    assert!(matches!(user, PanelEvent::StatusFetched { user: true, result: Ok(_) }));
    let automatic = execute(&mut source, Effect::RefreshStatus { user: false });
    assert!(matches!(automatic, PanelEvent::StatusFetched { user: false, result: Ok(_) }));
}

#[test]
fn test_batched_diff_fetch_reports_each_path() {
    let mut source = MockSource::new();
    source
        .expect_fetch_diff()
        .withf(|path| path == "a.txt")
        .times(1)
        .returning(|_| Ok(()));
    source
        .expect_fetch_diff()
        .withf(|path| path == "b.txt")
        .times(1)
        .returning(|_| Err(SourceError::CommandFailed("b.txt vanished".to_string())));
    source
        .expect_get_diff()
        .withf(|path| path == "a.txt")
        .times(1)
        .returning(|_| vec!["+a".to_string()]);

    let event = execute(
        &mut source,
        Effect::FetchDiffs(vec![("a.txt".to_string(), 4), ("b.txt".to_string(), 7)]),
    );

    let batch = match event {
        PanelEvent::DiffsFetched(batch) => batch,
        other => panic!("unexpected event {:?}", other),
    };
    assert_eq!(batch.len(), 2);
    assert_eq!((batch[0].path.as_str(), batch[0].generation), ("a.txt", 4));
    assert_eq!(batch[0].result.as_ref().unwrap(), &vec!["+a".to_string()]);
    assert_eq!((batch[1].path.as_str(), batch[1].generation), ("b.txt", 7));
    assert!(batch[1].result.is_err());
}

#[test]
fn test_stage_success_refreshes_status() {
    let staged = StatusSnapshot::new().with(SectionIdx::Staged, "a.txt", PathStatus::Modified);

    let mut source = MockSource::new();
    source
        .expect_stage_path()
        .withf(|path| path == "a.txt")
        .times(1)
        .returning(|_| Ok(()));
    source.expect_refresh_snapshot().times(1).returning(|| Ok(()));
    source
        .expect_current_snapshot()
        .times(1)
        .return_const(staged.clone());

    let mut panel = StatusPanel::default();
    panel.update(PanelEvent::StatusFetched {
        user: false,
        result: Ok(StatusSnapshot::new().with(SectionIdx::Unstaged, "a.txt", PathStatus::Modified)),
    });
    panel.move_down();
    run_to_completion(&mut panel, &mut source, PanelEvent::Stage);

    assert_eq!(panel.snapshot(), &staged);
}

#[test]
fn test_stage_failure_is_reported_without_refresh() {
    let mut source = MockSource::new();
    source
        .expect_stage_path()
        .times(1)
        .returning(|_| Err(SourceError::CommandFailed("index locked".to_string())));
    source.expect_refresh_snapshot().never();

    let mut panel = StatusPanel::default();
    panel.update(PanelEvent::StatusFetched {
        user: false,
        result: Ok(StatusSnapshot::new().with(SectionIdx::Unstaged, "a.txt", PathStatus::Modified)),
    });
    panel.move_down();
    run_to_completion(&mut panel, &mut source, PanelEvent::Stage);

    let messages: Vec<String> = panel.notices().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["error: Command failed: index locked".to_string()]);
}

#[test]
fn test_path_entry_at_default_uses_snapshot() {
    let source = MockStatusSource::new(
        StatusSnapshot::new().with(SectionIdx::Issues, "c.txt", PathStatus::Conflicted),
    );
    // Nothing refreshed yet
    let err = source.path_entry_at(SectionIdx::Issues, 0).unwrap_err();
    assert_eq!(err, BoundsError { section: SectionIdx::Issues, index: 0 });
}

#[test]
fn test_path_entry_at_can_be_mocked() {
    let mut source = MockSource::new();
    source
        .expect_path_entry_at()
        .with(eq(SectionIdx::Staged), eq(0))
        .returning(|_, _| Ok(PathEntry::new("b.txt", PathStatus::Added)));

    assert_eq!(source.path_entry_at(SectionIdx::Staged, 0).unwrap().path, "b.txt");
}

#[tokio::test]
async fn test_app_init_loads_info_and_status() {
    let mut app = App::new(Box::new(MockStatusSource::demo()), &AppConfig::default());
    app.init();
    assert_eq!(app.in_flight(), 2);

    app.settle().await;

    assert_eq!(app.in_flight(), 0);
    assert_eq!(app.state.panel.snapshot().total_paths(), 8);
    assert_eq!(app.state.panel.info().revision, "main @ 64a1f2c");
    assert!(app.needs_ui_refresh());
    assert!(!app.needs_ui_refresh());
}

#[tokio::test]
async fn test_app_stage_round_trip() {
    let mut app = App::new(Box::new(MockStatusSource::demo()), &AppConfig::default());
    app.init();
    app.settle().await;

    app.state.dispatch(PanelEvent::MoveDown);
    app.state.dispatch(PanelEvent::MoveDown);
    assert_eq!(app.state.panel.cursor(), Cursor::path(SectionIdx::Unstaged, 0));

    app.state.dispatch(PanelEvent::Stage);
    app.settle().await;

    assert_eq!(
        app.state.panel.snapshot().find("src/main.rs").map(|f| f.0),
        Some(SectionIdx::Staged)
    );
    assert_eq!(app.state.panel.notices().count(), 0);
}

#[tokio::test]
async fn test_app_toggle_diff_expands_inline() {
    let mut app = App::new(Box::new(MockStatusSource::demo()), &AppConfig::default());
    app.init();
    app.settle().await;

    app.state.dispatch(PanelEvent::MoveDown);
    app.state.dispatch(PanelEvent::MoveDown);
    app.state.dispatch(PanelEvent::Toggle);
    app.settle().await;

    assert!(app.state.panel.registry().is_path_expanded("src/main.rs"));
    assert!(app.state.panel.move_down());
    assert_eq!(
        app.state.panel.cursor(),
        Cursor::diff_line(SectionIdx::Unstaged, 0, 0)
    );
}
