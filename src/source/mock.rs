// ABOUTME: In-memory status source with programmable diffs and failures
// Backs the --mock demo mode and drives the panel in tests without a repository

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{PathEntry, PathStatus, RepoInfo, SectionIdx, StatusSnapshot};

use super::{SourceError, StatusSource};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    Refresh,
    Info,
    Stage,
    Unstage,
    Diff,
}

#[derive(Debug, Clone, Default)]
pub struct MockStatusSource {
    /// The working-copy state a refresh will report.
    working: StatusSnapshot,
    snapshot: StatusSnapshot,
    info: RepoInfo,
    diffs: HashMap<String, Vec<String>>,
    diff_cache: HashMap<String, Vec<String>>,
    failing: HashSet<MockOp>,
    fetch_diff_calls: usize,
}

impl MockStatusSource {
    pub fn new(working: StatusSnapshot) -> Self {
        Self {
            working,
            ..Self::default()
        }
    }

    /// Seeded working copy used by `--mock`.
    pub fn demo() -> Self {
        let working = StatusSnapshot::new()
            .with(SectionIdx::Unversioned, "notes/todo.md", PathStatus::Unversioned)
            .with(SectionIdx::Unversioned, "scratch.txt", PathStatus::Unversioned)
            .with(SectionIdx::Unstaged, "src/main.rs", PathStatus::Modified)
            .with(SectionIdx::Unstaged, "src/render.rs", PathStatus::Modified)
            .with(SectionIdx::Unstaged, "docs/old.md", PathStatus::Missing)
            .with(SectionIdx::Staged, "src/config.rs", PathStatus::Added)
            .with(SectionIdx::Ignored, "target", PathStatus::Ignored)
            .with(SectionIdx::Issues, "vendor/lib", PathStatus::Obstructed);

        Self::new(working)
            .with_info(RepoInfo {
                working_path: "/home/dev/project".to_string(),
                remote_url: "https://example.com/project.git".to_string(),
                revision: "main @ 64a1f2c".to_string(),
            })
            .with_diff(
                "src/main.rs",
                &[
                    "@@ -10,7 +10,8 @@ fn main() {",
                    "     let args = Args::parse();",
                    "-    let config = load();",
                    "+    let config = AppConfig::load(args.config.as_deref())?;",
                    "+    setup_logging(&config);",
                    "     run(config)",
                ],
            )
            .with_diff(
                "src/render.rs",
                &["@@ -1,3 +1,3 @@", "-use std::fmt;", "+use std::fmt::{self, Write};", " "],
            )
            .with_diff(
                "src/config.rs",
                &["@@ -0,0 +1,3 @@", "+pub struct Config {", "+    pub verbose: bool,", "+}"],
            )
    }

    pub fn with_info(mut self, info: RepoInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_diff(mut self, path: &str, lines: &[&str]) -> Self {
        self.diffs
            .insert(path.to_string(), lines.iter().map(|l| (*l).to_string()).collect());
        self
    }

    /// Replaces the diff served for `path` from the next fetch on.
    pub fn set_diff(&mut self, path: &str, lines: &[&str]) {
        self.diffs
            .insert(path.to_string(), lines.iter().map(|l| (*l).to_string()).collect());
    }

    pub fn fail(&mut self, op: MockOp) {
        self.failing.insert(op);
    }

    pub fn recover(&mut self, op: MockOp) {
        self.failing.remove(&op);
    }

    pub fn fetch_diff_calls(&self) -> usize {
        self.fetch_diff_calls
    }

    pub fn working(&self) -> &StatusSnapshot {
        &self.working
    }

    fn check(&self, op: MockOp) -> Result<(), SourceError> {
        if self.failing.contains(&op) {
            return Err(SourceError::CommandFailed(format!("{op:?} failed")));
        }
        Ok(())
    }

    fn take_entry(&mut self, path: &str) -> Result<(SectionIdx, PathEntry), SourceError> {
        let (section, _) = self
            .working
            .find(path)
            .ok_or_else(|| SourceError::CommandFailed(format!("{path} is not under version control")))?;
        let entry = self
            .working
            .remove(section, path)
            .ok_or_else(|| SourceError::CommandFailed(format!("{path} vanished")))?;
        Ok((section, entry))
    }
}

impl StatusSource for MockStatusSource {
    fn current_snapshot(&self) -> StatusSnapshot {
        self.snapshot.clone()
    }

    fn refresh_snapshot(&mut self) -> Result<(), SourceError> {
        self.check(MockOp::Refresh)?;
        self.snapshot = self.working.clone();
        self.diff_cache.clear();
        Ok(())
    }

    fn current_info(&self) -> RepoInfo {
        self.info.clone()
    }

    fn refresh_info(&mut self) -> Result<(), SourceError> {
        self.check(MockOp::Info)
    }

    fn stage_path(&mut self, path: &str) -> Result<(), SourceError> {
        self.check(MockOp::Stage)?;
        let (section, mut entry) = self.take_entry(path)?;
        debug!("Mock staging {} from {}", path, section.title());
        if entry.status == PathStatus::Unversioned {
            entry.status = PathStatus::Added;
        }
        self.working.push(SectionIdx::Staged, entry);
        Ok(())
    }

    fn unstage_path(&mut self, path: &str) -> Result<(), SourceError> {
        self.check(MockOp::Unstage)?;
        let (section, entry) = self.take_entry(path)?;
        if section != SectionIdx::Staged {
            self.working.push(section, entry);
            return Err(SourceError::CommandFailed(format!("{path} is not staged")));
        }
        self.working.push(SectionIdx::Unstaged, entry);
        Ok(())
    }

    fn fetch_diff(&mut self, path: &str) -> Result<(), SourceError> {
        self.fetch_diff_calls += 1;
        self.check(MockOp::Diff)?;
        let lines = self.diffs.get(path).cloned().unwrap_or_default();
        self.diff_cache.insert(path.to_string(), lines);
        Ok(())
    }

    fn get_diff(&self, path: &str) -> Vec<String> {
        self.diff_cache.get(path).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_publishes_working_state() {
        let mut source = MockStatusSource::demo();
        assert!(source.current_snapshot().is_empty());
        source.refresh_snapshot().unwrap();
        assert_eq!(source.current_snapshot(), *source.working());
    }

    #[test]
    fn test_stage_moves_path_to_staged() {
        let mut source = MockStatusSource::demo();
        source.stage_path("scratch.txt").unwrap();
        source.refresh_snapshot().unwrap();

        let snapshot = source.current_snapshot();
        let (section, idx) = snapshot.find("scratch.txt").unwrap();
        assert_eq!(section, SectionIdx::Staged);
        assert_eq!(snapshot.entry(section, idx).unwrap().status, PathStatus::Added);
    }

    #[test]
    fn test_unstage_requires_staged_path() {
        let mut source = MockStatusSource::demo();
        assert!(source.unstage_path("src/main.rs").is_err());
        assert_eq!(source.working().find("src/main.rs").map(|f| f.0), Some(SectionIdx::Unstaged));
        source.unstage_path("src/config.rs").unwrap();
        assert_eq!(source.working().find("src/config.rs").map(|f| f.0), Some(SectionIdx::Unstaged));
    }

    #[test]
    fn test_failures_are_programmable() {
        let mut source = MockStatusSource::demo();
        source.fail(MockOp::Diff);
        assert!(source.fetch_diff("src/main.rs").is_err());
        assert!(source.get_diff("src/main.rs").is_empty());
        source.recover(MockOp::Diff);
        source.fetch_diff("src/main.rs").unwrap();
        assert_eq!(source.get_diff("src/main.rs").len(), 6);
        assert_eq!(source.fetch_diff_calls(), 2);
    }

    #[test]
    fn test_path_entry_at_is_bounds_checked() {
        let mut source = MockStatusSource::demo();
        source.refresh_snapshot().unwrap();
        assert_eq!(
            source.path_entry_at(SectionIdx::Staged, 0).unwrap().path,
            "src/config.rs"
        );
        let err = source.path_entry_at(SectionIdx::Staged, 1).unwrap_err();
        assert_eq!(err.to_string(), "Staged has no path at index 1");
    }
}
