// ABOUTME: Closed set of panel events, follow-up effects and user-visible notices
// Events carry both user intents and I/O completions into the single-threaded reducer

use std::fmt;

use crate::models::{RepoInfo, StatusSnapshot};
use crate::source::SourceError;

#[derive(Debug)]
pub enum PanelEvent {
    MoveUp,
    MoveDown,
    MoveTop,
    MoveBottom,
    Stage,
    Unstage,
    /// Section toggle on a header, diff toggle on a path or diff line.
    Toggle,
    ToggleDiff,
    ToggleSection,
    Refresh,
    DismissNotices,
    Resize { height: usize },
    InfoFetched(Result<RepoInfo, SourceError>),
    /// `user` is set when the refresh came from an explicit request.
    StatusFetched {
        user: bool,
        result: Result<StatusSnapshot, SourceError>,
    },
    DiffFetched {
        path: String,
        generation: u64,
        result: Result<Vec<String>, SourceError>,
    },
    DiffsFetched(Vec<FetchedDiff>),
    PathStaged {
        path: String,
        result: Result<(), SourceError>,
    },
    PathUnstaged {
        path: String,
        result: Result<(), SourceError>,
    },
}

/// Work the reducer asks the host to run against the status source. Each
/// effect completes with exactly one [`PanelEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RefreshInfo,
    RefreshStatus { user: bool },
    StagePath(String),
    UnstagePath(String),
    FetchDiff { path: String, generation: u64 },
    /// Re-fetch of every expanded diff after a status refresh.
    FetchDiffs(Vec<(String, u64)>),
}

/// One completed fetch inside a [`PanelEvent::DiffsFetched`] batch.
#[derive(Debug)]
pub struct FetchedDiff {
    pub path: String,
    pub generation: u64,
    pub result: Result<Vec<String>, SourceError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        write!(f, "{}: {}", label, self.message)
    }
}
