// ABOUTME: Status source capability the panel consumes, plus the effect executor
// Implementations wrap a version-control backend; the panel never calls them directly

pub mod error;
pub mod git;
pub mod mock;

use tracing::debug;

use crate::models::{PathEntry, RepoInfo, SectionIdx, StatusSnapshot};
use crate::panel::{Effect, FetchedDiff, PanelEvent, StatusPanel};

pub use error::{BoundsError, SourceError};
pub use git::GitStatusSource;
pub use mock::{MockOp, MockStatusSource};

/// Access to working-copy status for one repository.
pub trait StatusSource {
    /// Last successfully fetched snapshot.
    fn current_snapshot(&self) -> StatusSnapshot;

    fn refresh_snapshot(&mut self) -> Result<(), SourceError>;

    fn current_info(&self) -> RepoInfo;

    fn refresh_info(&mut self) -> Result<(), SourceError>;

    fn stage_path(&mut self, path: &str) -> Result<(), SourceError>;

    fn unstage_path(&mut self, path: &str) -> Result<(), SourceError>;

    /// Populates the diff cache entry for `path`.
    fn fetch_diff(&mut self, path: &str) -> Result<(), SourceError>;

    /// Cached diff lines, empty if never fetched.
    fn get_diff(&self, path: &str) -> Vec<String>;

    fn path_entry_at(&self, section: SectionIdx, index: usize) -> Result<PathEntry, BoundsError> {
        self.current_snapshot()
            .entry(section, index)
            .cloned()
            .ok_or(BoundsError { section, index })
    }
}

/// Runs one effect to completion and returns the event reporting its outcome.
pub fn execute(source: &mut dyn StatusSource, effect: Effect) -> PanelEvent {
    debug!("Executing effect: {:?}", effect);
    match effect {
        Effect::RefreshInfo => {
            PanelEvent::InfoFetched(source.refresh_info().map(|()| source.current_info()))
        }
        Effect::RefreshStatus { user } => PanelEvent::StatusFetched {
            user,
            result: source.refresh_snapshot().map(|()| source.current_snapshot()),
        },
        Effect::StagePath(path) => {
            let result = source.stage_path(&path);
            PanelEvent::PathStaged { path, result }
        }
        Effect::UnstagePath(path) => {
            let result = source.unstage_path(&path);
            PanelEvent::PathUnstaged { path, result }
        }
        Effect::FetchDiff { path, generation } => {
            let result = source.fetch_diff(&path).map(|()| source.get_diff(&path));
            PanelEvent::DiffFetched {
                path,
                generation,
                result,
            }
        }
        Effect::FetchDiffs(requests) => PanelEvent::DiffsFetched(
            requests
                .into_iter()
                .map(|(path, generation)| {
                    let result = source.fetch_diff(&path).map(|()| source.get_diff(&path));
                    FetchedDiff {
                        path,
                        generation,
                        result,
                    }
                })
                .collect(),
        ),
    }
}

/// Drives `event` and every follow-up effect synchronously until the panel
/// settles. Used where blocking on the source is acceptable.
pub fn run_to_completion(
    panel: &mut StatusPanel,
    source: &mut dyn StatusSource,
    event: PanelEvent,
) {
    let mut next = panel.update(event);
    while let Some(effect) = next {
        let completion = execute(source, effect);
        next = panel.update(completion);
    }
}

/// Splits patch text into display lines starting at the first hunk header.
/// A patch with no hunks yields no lines.
pub fn hunk_lines(patch: &str) -> Vec<String> {
    let normalized = patch.replace("\r\n", "\n");
    let start = if normalized.starts_with("@@") {
        Some(0)
    } else {
        normalized.find("\n@@").map(|idx| idx + 1)
    };
    let Some(start) = start else {
        return Vec::new();
    };
    normalized[start..]
        .strip_suffix('\n')
        .unwrap_or(&normalized[start..])
        .split('\n')
        .map(str::to_string)
        .collect()
}
