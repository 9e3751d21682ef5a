// ABOUTME: Working-copy status data model: fixed sections, per-path status codes and the snapshot

use serde::{Deserialize, Serialize};

/// One of the fixed status categories. The discriminant is the stable index
/// into [`StatusSnapshot`]'s section array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionIdx {
    Unversioned = 0,
    Unstaged = 1,
    Staged = 2,
    Ignored = 3,
    Issues = 4,
}

impl SectionIdx {
    pub const COUNT: usize = 5;

    pub const ALL: [SectionIdx; Self::COUNT] = [
        SectionIdx::Unversioned,
        SectionIdx::Unstaged,
        SectionIdx::Staged,
        SectionIdx::Ignored,
        SectionIdx::Issues,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionIdx::Unversioned => "Unversioned",
            SectionIdx::Unstaged => "Unstaged",
            SectionIdx::Staged => "Staged",
            SectionIdx::Ignored => "Ignored",
            SectionIdx::Issues => "Issues",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

/// Status code of a single path. Closed set; anything else reported by the
/// underlying tool is rejected at the source boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStatus {
    Added,
    Conflicted,
    Deleted,
    Ignored,
    Modified,
    Replaced,
    External,
    Unversioned,
    Missing,
    Obstructed,
}

impl PathStatus {
    pub const ALL: [PathStatus; 10] = [
        PathStatus::Added,
        PathStatus::Conflicted,
        PathStatus::Deleted,
        PathStatus::Ignored,
        PathStatus::Modified,
        PathStatus::Replaced,
        PathStatus::External,
        PathStatus::Unversioned,
        PathStatus::Missing,
        PathStatus::Obstructed,
    ];

    pub fn symbol(self) -> char {
        match self {
            PathStatus::Added => 'A',
            PathStatus::Conflicted => 'C',
            PathStatus::Deleted => 'D',
            PathStatus::Ignored => 'I',
            PathStatus::Modified => 'M',
            PathStatus::Replaced => 'R',
            PathStatus::External => 'X',
            PathStatus::Unversioned => '?',
            PathStatus::Missing => '!',
            PathStatus::Obstructed => '~',
        }
    }

    /// Only modified and added paths can be expanded into a diff.
    pub fn is_diffable(self) -> bool {
        matches!(self, PathStatus::Modified | PathStatus::Added)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub path: String,
    pub status: PathStatus,
}

impl PathEntry {
    pub fn new(path: impl Into<String>, status: PathStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// Paths grouped into the fixed sections, each in source order.
///
/// Snapshots are values: a refresh produces a new one and the panel replaces
/// its copy wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    sections: [Vec<PathEntry>; SectionIdx::COUNT],
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: SectionIdx, entry: PathEntry) {
        self.sections[section.index()].push(entry);
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, section: SectionIdx, path: &str, status: PathStatus) -> Self {
        self.push(section, PathEntry::new(path, status));
        self
    }

    pub fn section(&self, section: SectionIdx) -> &[PathEntry] {
        &self.sections[section.index()]
    }

    pub fn len(&self, section: SectionIdx) -> usize {
        self.sections[section.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    pub fn entry(&self, section: SectionIdx, index: usize) -> Option<&PathEntry> {
        self.sections[section.index()].get(index)
    }

    pub fn remove(&mut self, section: SectionIdx, path: &str) -> Option<PathEntry> {
        let entries = &mut self.sections[section.index()];
        let pos = entries.iter().position(|e| e.path == path)?;
        Some(entries.remove(pos))
    }

    /// Section currently listing `path`, if any.
    pub fn find(&self, path: &str) -> Option<(SectionIdx, usize)> {
        SectionIdx::ALL.into_iter().find_map(|section| {
            self.section(section)
                .iter()
                .position(|e| e.path == path)
                .map(|idx| (section, idx))
        })
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    pub fn first_non_empty(&self) -> Option<SectionIdx> {
        SectionIdx::ALL.into_iter().find(|s| self.len(*s) > 0)
    }

    pub fn next_non_empty(&self, current: SectionIdx) -> Option<SectionIdx> {
        SectionIdx::ALL[current.index() + 1..]
            .iter()
            .copied()
            .find(|s| self.len(*s) > 0)
    }

    pub fn prev_non_empty(&self, current: SectionIdx) -> Option<SectionIdx> {
        SectionIdx::ALL[..current.index()]
            .iter()
            .rev()
            .copied()
            .find(|s| self.len(*s) > 0)
    }

    pub fn total_paths(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }
}
