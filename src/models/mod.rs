// ABOUTME: Core data models for working-copy status sections, paths and repository info

pub mod repo_info;
pub mod status;

pub use repo_info::RepoInfo;
pub use status::{PathEntry, PathStatus, SectionIdx, StatusSnapshot};
