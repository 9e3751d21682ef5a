// ABOUTME: Hierarchy-aware cursor movement over sections, paths and diff lines
// Works directly against the snapshot and expansion state, never the flattened element list

use crate::models::{PathEntry, SectionIdx, StatusSnapshot};

use super::cursor::{Cursor, CursorKind};
use super::diffs::DiffStore;
use super::expansion::ExpansionRegistry;

/// Read-only view of everything that decides what is visible.
#[derive(Debug, Clone, Copy)]
pub struct Hierarchy<'a> {
    pub snapshot: &'a StatusSnapshot,
    pub registry: &'a ExpansionRegistry,
    pub diffs: &'a DiffStore,
}

impl<'a> Hierarchy<'a> {
    pub fn new(
        snapshot: &'a StatusSnapshot,
        registry: &'a ExpansionRegistry,
        diffs: &'a DiffStore,
    ) -> Self {
        Self {
            snapshot,
            registry,
            diffs,
        }
    }

    /// Diff lines rendered under `entry`: none unless the path is expanded
    /// and its status is diffable.
    pub fn diff_lines(&self, entry: &PathEntry) -> &'a [String] {
        if entry.status.is_diffable() && self.registry.is_path_expanded(&entry.path) {
            self.diffs.lines(&entry.path)
        } else {
            &[]
        }
    }

    fn diff_rows(&self, section: SectionIdx, path: usize) -> usize {
        self.snapshot
            .entry(section, path)
            .map_or(0, |entry| self.diff_lines(entry).len())
    }

    fn section_open(&self, section: SectionIdx) -> bool {
        self.registry.is_section_expanded(section) && self.snapshot.len(section) > 0
    }

    /// Whether `cursor` addresses an element the builder would emit.
    pub fn resolves(&self, cursor: &Cursor) -> bool {
        let section = cursor.section;
        if self.snapshot.len(section) == 0 {
            return false;
        }
        match cursor.kind {
            CursorKind::Header => true,
            CursorKind::Path => {
                self.registry.is_section_expanded(section) && cursor.path < self.snapshot.len(section)
            }
            CursorKind::DiffLine => {
                self.registry.is_section_expanded(section)
                    && cursor.line < self.diff_rows(section, cursor.path)
            }
        }
    }

    fn first_header(&self) -> Option<Cursor> {
        self.snapshot.first_non_empty().map(Cursor::header)
    }

    /// Last visible element of `section`, which must be non-empty.
    fn tail_of(&self, section: SectionIdx) -> Cursor {
        if !self.registry.is_section_expanded(section) {
            return Cursor::header(section);
        }
        let last = self.snapshot.len(section) - 1;
        match self.diff_rows(section, last) {
            0 => Cursor::path(section, last),
            rows => Cursor::diff_line(section, last, rows - 1),
        }
    }

    /// Target of "down" from `cursor`, or `None` when there is nowhere valid
    /// to go.
    pub fn down(&self, cursor: &Cursor) -> Option<Cursor> {
        let section = cursor.section;
        let has_next_path = cursor.path + 1 < self.snapshot.len(section);
        let target = match cursor.kind {
            CursorKind::DiffLine if cursor.line + 1 < self.diff_rows(section, cursor.path) => {
                Cursor::diff_line(section, cursor.path, cursor.line + 1)
            }
            CursorKind::Path if self.diff_rows(section, cursor.path) > 0 => {
                Cursor::diff_line(section, cursor.path, 0)
            }
            CursorKind::DiffLine | CursorKind::Path if has_next_path => {
                Cursor::path(section, cursor.path + 1)
            }
            CursorKind::Header if self.section_open(section) => Cursor::path(section, 0),
            _ => Cursor::header(self.snapshot.next_non_empty(section)?),
        };
        self.resolves(&target).then_some(target)
    }

    /// Target of "up" from `cursor`, the mirror of [`down`](Self::down).
    pub fn up(&self, cursor: &Cursor) -> Option<Cursor> {
        let section = cursor.section;
        let target = match cursor.kind {
            CursorKind::Header => self.tail_of(self.snapshot.prev_non_empty(section)?),
            CursorKind::Path if cursor.path > 0 => {
                let prev = cursor.path - 1;
                match self.diff_rows(section, prev) {
                    0 => Cursor::path(section, prev),
                    rows => Cursor::diff_line(section, prev, rows - 1),
                }
            }
            CursorKind::Path => Cursor::header(section),
            CursorKind::DiffLine if cursor.line > 0 => {
                Cursor::diff_line(section, cursor.path, cursor.line - 1)
            }
            CursorKind::DiffLine => Cursor::path(section, cursor.path),
        };
        self.resolves(&target).then_some(target)
    }

    /// Brings `cursor` back onto an existing element: up, then down, then the
    /// first header. `None` when the snapshot has nothing to address.
    pub fn clamp(&self, cursor: &Cursor) -> Option<Cursor> {
        if self.resolves(cursor) {
            return Some(*cursor);
        }
        self.up(cursor)
            .or_else(|| self.down(cursor))
            .or_else(|| self.first_header())
    }

    pub fn top(&self) -> Option<Cursor> {
        self.first_header()
    }

    pub fn bottom(&self) -> Option<Cursor> {
        let last = SectionIdx::ALL
            .into_iter()
            .rev()
            .find(|s| self.snapshot.len(*s) > 0)?;
        Some(self.tail_of(last))
    }
}
