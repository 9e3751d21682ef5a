// ABOUTME: Git-backed status source mapping index and worktree state onto the fixed sections

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use git2::{DiffFormat, DiffOptions, Repository, Status, StatusOptions};
use tracing::{debug, info};

use crate::models::{PathEntry, PathStatus, RepoInfo, SectionIdx, StatusSnapshot};

use super::{hunk_lines, SourceError, StatusSource};

pub struct GitStatusSource {
    workdir: PathBuf,
    snapshot: StatusSnapshot,
    info: RepoInfo,
    diff_cache: HashMap<String, Vec<String>>,
}

impl GitStatusSource {
    /// Opens the repository containing `path`. Bare repositories are rejected.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let repo = Repository::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| SourceError::NotAWorkingCopy(path.display().to_string()))?
            .to_path_buf();
        info!("Opened git working copy at {}", workdir.display());

        Ok(Self {
            workdir,
            snapshot: StatusSnapshot::new(),
            info: RepoInfo::default(),
            diff_cache: HashMap::new(),
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn repo(&self) -> Result<Repository, SourceError> {
        Ok(Repository::open(&self.workdir)?)
    }
}

/// Section and status for one git status entry. A path with both index and
/// worktree changes is listed under Unstaged only.
pub fn classify(status: Status) -> Option<(SectionIdx, PathStatus)> {
    if status.is_conflicted() {
        return Some((SectionIdx::Issues, PathStatus::Conflicted));
    }
    if status.is_ignored() {
        return Some((SectionIdx::Ignored, PathStatus::Ignored));
    }
    if status.is_wt_new() {
        return Some((SectionIdx::Unversioned, PathStatus::Unversioned));
    }
    if status.is_wt_deleted() {
        return Some((SectionIdx::Unstaged, PathStatus::Missing));
    }
    if status.is_wt_typechange() || status.is_wt_renamed() {
        return Some((SectionIdx::Unstaged, PathStatus::Replaced));
    }
    if status.is_wt_modified() {
        return Some((SectionIdx::Unstaged, PathStatus::Modified));
    }

    let staged = if status.is_index_new() {
        PathStatus::Added
    } else if status.is_index_deleted() {
        PathStatus::Deleted
    } else if status.is_index_renamed() || status.is_index_typechange() {
        PathStatus::Replaced
    } else if status.is_index_modified() {
        PathStatus::Modified
    } else {
        return None;
    };
    Some((SectionIdx::Staged, staged))
}

impl StatusSource for GitStatusSource {
    fn current_snapshot(&self) -> StatusSnapshot {
        self.snapshot.clone()
    }

    fn refresh_snapshot(&mut self) -> Result<(), SourceError> {
        debug!("Refreshing git status for {}", self.workdir.display());
        let repo = self.repo()?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(true);

        let mut snapshot = StatusSnapshot::new();
        for entry in repo.statuses(Some(&mut opts))?.iter() {
            let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
            match classify(entry.status()) {
                Some((section, status)) => snapshot.push(section, PathEntry::new(path, status)),
                None if entry.status() == Status::CURRENT => {}
                None => {
                    return Err(SourceError::InvalidStatus {
                        path,
                        status: format!("{:?}", entry.status()),
                    })
                }
            }
        }

        debug!("Git status found {} paths", snapshot.total_paths());
        self.snapshot = snapshot;
        self.diff_cache.clear();
        Ok(())
    }

    fn current_info(&self) -> RepoInfo {
        self.info.clone()
    }

    fn refresh_info(&mut self) -> Result<(), SourceError> {
        let repo = self.repo()?;

        let remote_url = repo
            .find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().map(str::to_string))
            .unwrap_or_default();

        let revision = match repo.head() {
            Ok(head) => {
                let commit = head.peel_to_commit()?;
                let id = commit.id().to_string();
                let short = id.get(..7).unwrap_or(&id);
                format!("{} @ {}", head.shorthand().unwrap_or("HEAD"), short)
            }
            Err(_) => "(no commits)".to_string(),
        };

        self.info = RepoInfo {
            working_path: self.workdir.display().to_string(),
            remote_url,
            revision,
        };
        Ok(())
    }

    fn stage_path(&mut self, path: &str) -> Result<(), SourceError> {
        info!("Staging {}", path);
        let repo = self.repo()?;
        let mut index = repo.index()?;
        let relative = Path::new(path);

        if self.workdir.join(relative).exists() {
            index.add_path(relative)?;
        } else {
            index.remove_path(relative)?;
        }
        index.write()?;
        Ok(())
    }

    fn unstage_path(&mut self, path: &str) -> Result<(), SourceError> {
        info!("Unstaging {}", path);
        let repo = self.repo()?;

        match repo.head() {
            Ok(head) => {
                let commit = head.peel_to_commit()?;
                repo.reset_default(Some(commit.as_object()), [path])?;
            }
            Err(_) => {
                // Nothing committed yet: unstaging means dropping the index entry.
                let mut index = repo.index()?;
                index.remove_path(Path::new(path))?;
                index.write()?;
            }
        }
        Ok(())
    }

    fn fetch_diff(&mut self, path: &str) -> Result<(), SourceError> {
        if self.diff_cache.contains_key(path) {
            return Ok(());
        }
        debug!("Diff for {} not cached, asking git", path);

        let repo = self.repo()?;
        let mut opts = DiffOptions::new();
        opts.pathspec(path).disable_pathspec_match(true);

        let staged = matches!(self.snapshot.find(path), Some((SectionIdx::Staged, _)));
        let diff = if staged {
            let head_tree = match repo.head() {
                Ok(head) => Some(head.peel_to_tree()?),
                Err(_) => None,
            };
            repo.diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))?
        } else {
            repo.diff_index_to_workdir(None, Some(&mut opts))?
        };

        let mut patch = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        self.diff_cache.insert(path.to_string(), hunk_lines(&patch));
        Ok(())
    }

    fn get_diff(&self, path: &str) -> Vec<String> {
        self.diff_cache.get(path).cloned().unwrap_or_default()
    }
}
