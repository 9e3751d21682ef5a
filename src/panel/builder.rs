// ABOUTME: Projects the status hierarchy into a flat list of render elements
// Pure and idempotent: the same inputs always produce the same elements and cursor

use crate::models::{PathStatus, SectionIdx};

use super::cursor::Cursor;
use super::navigator::Hierarchy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Header,
    Path,
    DiffLine,
    Blank,
}

/// One row of the flattened panel. Rebuilt from scratch on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub section: SectionIdx,
    pub path: usize,
    pub line: usize,
    pub content: String,
    pub status: Option<PathStatus>,
    pub size: usize,
    pub expanded: bool,
}

impl Element {
    fn header(section: SectionIdx, size: usize, expanded: bool) -> Self {
        Self {
            kind: ElementKind::Header,
            section,
            path: 0,
            line: 0,
            content: section.title().to_string(),
            status: None,
            size,
            expanded,
        }
    }

    fn blank(section: SectionIdx) -> Self {
        Self {
            kind: ElementKind::Blank,
            section,
            path: 0,
            line: 0,
            content: String::new(),
            status: None,
            size: 0,
            expanded: false,
        }
    }

    /// The cursor address of this element; blanks are not addressable.
    pub fn address(&self) -> Option<Cursor> {
        match self.kind {
            ElementKind::Header => Some(Cursor::header(self.section)),
            ElementKind::Path => Some(Cursor::path(self.section, self.path)),
            ElementKind::DiffLine => Some(Cursor::diff_line(self.section, self.path, self.line)),
            ElementKind::Blank => None,
        }
    }

    pub fn display(&self) -> String {
        match self.kind {
            ElementKind::Header => {
                let marker = if self.expanded { '▾' } else { '▸' };
                format!("{} {} ({})", marker, self.content, self.size)
            }
            ElementKind::Path => {
                let symbol = self.status.map_or(' ', PathStatus::symbol);
                format!("  {} {}", symbol, self.content)
            }
            ElementKind::DiffLine => format!("    {}", self.content),
            ElementKind::Blank => String::new(),
        }
    }
}

/// Outcome of checking the cursor against a fresh build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Ok,
    Clamped { from: Cursor, to: Cursor },
    /// Nothing to address; the cursor is left where it was.
    Empty,
}

#[derive(Debug, Clone)]
pub struct Build {
    pub elements: Vec<Element>,
    pub cursor: Cursor,
    pub cursor_row: Option<usize>,
    pub validation: Validation,
}

pub fn build(tree: &Hierarchy<'_>, cursor: &Cursor) -> Build {
    let mut elements = Vec::new();

    for section in SectionIdx::ALL {
        let entries = tree.snapshot.section(section);
        if entries.is_empty() {
            continue;
        }

        let expanded = tree.registry.is_section_expanded(section);
        elements.push(Element::header(section, entries.len(), expanded));
        if !expanded {
            elements.push(Element::blank(section));
            continue;
        }

        for (path_idx, entry) in entries.iter().enumerate() {
            elements.push(Element {
                kind: ElementKind::Path,
                section,
                path: path_idx,
                line: 0,
                content: entry.path.clone(),
                status: Some(entry.status),
                size: 0,
                expanded: tree.registry.is_path_expanded(&entry.path),
            });

            for (line_idx, line) in tree.diff_lines(entry).iter().enumerate() {
                elements.push(Element {
                    kind: ElementKind::DiffLine,
                    section,
                    path: path_idx,
                    line: line_idx,
                    content: line.clone(),
                    status: None,
                    size: 0,
                    expanded: false,
                });
            }
        }
        elements.push(Element::blank(section));
    }

    let (clamped, validation) = match tree.clamp(cursor) {
        Some(to) if to == *cursor => (to, Validation::Ok),
        Some(to) => (to, Validation::Clamped { from: *cursor, to }),
        None => (*cursor, Validation::Empty),
    };
    let cursor_row = elements
        .iter()
        .position(|element| element.address() == Some(clamped));

    Build {
        elements,
        cursor: clamped,
        cursor_row,
        validation,
    }
}
