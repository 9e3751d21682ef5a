// ABOUTME: Cursor addressing exactly one header, path or diff line in the status hierarchy

use std::fmt;

use crate::models::SectionIdx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    Header,
    Path,
    DiffLine,
}

/// `path` is meaningful for `Path` and `DiffLine`, `line` for `DiffLine` only.
/// Constructors zero the fields that do not apply so equal addresses compare
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub kind: CursorKind,
    pub section: SectionIdx,
    pub path: usize,
    pub line: usize,
}

impl Cursor {
    pub fn header(section: SectionIdx) -> Self {
        Self {
            kind: CursorKind::Header,
            section,
            path: 0,
            line: 0,
        }
    }

    pub fn path(section: SectionIdx, path: usize) -> Self {
        Self {
            kind: CursorKind::Path,
            section,
            path,
            line: 0,
        }
    }

    pub fn diff_line(section: SectionIdx, path: usize, line: usize) -> Self {
        Self {
            kind: CursorKind::DiffLine,
            section,
            path,
            line,
        }
    }

    pub fn is_header(&self) -> bool {
        self.kind == CursorKind::Header
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::header(SectionIdx::Unversioned)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CursorKind::Header => write!(f, "header({})", self.section.title()),
            CursorKind::Path => write!(f, "path({}, {})", self.section.title(), self.path),
            CursorKind::DiffLine => write!(
                f,
                "diff({}, {}, {})",
                self.section.title(),
                self.path,
                self.line
            ),
        }
    }
}
