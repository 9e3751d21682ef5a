// ABOUTME: Error types for status sources
// SourceError covers failed or unparseable external operations; BoundsError bad indices

use thiserror::Error;

use crate::models::SectionIdx;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid status {status} for path {path}")]
    InvalidStatus { path: String, status: String },

    #[error("Not a working copy: {0}")]
    NotAWorkingCopy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} has no path at index {index}", section.title())]
pub struct BoundsError {
    pub section: SectionIdx,
    pub index: usize,
}
