// ABOUTME: Status panel engine: expansion state, cursor navigation, projection and scrolling
// StatusPanel is the single writer of all panel state; I/O is requested through Effects

pub mod builder;
pub mod cursor;
pub mod diffs;
pub mod event;
pub mod expansion;
pub mod navigator;
pub mod viewport;

use std::collections::VecDeque;
use std::ops::Range;

use tracing::{debug, info, warn};

use crate::models::{RepoInfo, SectionIdx, StatusSnapshot};
use crate::source::SourceError;

pub use builder::{Element, ElementKind, Validation};
pub use cursor::{Cursor, CursorKind};
pub use diffs::DiffStore;
pub use event::{Effect, FetchedDiff, Notice, NoticeLevel, PanelEvent};
pub use expansion::ExpansionRegistry;
pub use navigator::Hierarchy;
pub use viewport::Viewport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOptions {
    pub scroll_padding: usize,
    pub max_notices: usize,
    pub prune_expansions: bool,
    pub collapsed_sections: Vec<SectionIdx>,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            scroll_padding: 2,
            max_notices: 5,
            prune_expansions: false,
            collapsed_sections: vec![SectionIdx::Unversioned],
        }
    }
}

#[derive(Debug)]
pub struct StatusPanel {
    options: PanelOptions,
    info: RepoInfo,
    snapshot: StatusSnapshot,
    registry: ExpansionRegistry,
    diffs: DiffStore,
    cursor: Cursor,
    elements: Vec<Element>,
    cursor_row: Option<usize>,
    viewport: Viewport,
    window: Range<usize>,
    // Unbounded until the host reports a size.
    height: usize,
    notices: VecDeque<Notice>,
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self::new(PanelOptions::default())
    }
}

impl StatusPanel {
    pub fn new(options: PanelOptions) -> Self {
        let registry = ExpansionRegistry::with_collapsed(&options.collapsed_sections);
        let viewport = Viewport::new(options.scroll_padding);
        Self {
            options,
            info: RepoInfo::default(),
            snapshot: StatusSnapshot::new(),
            registry,
            diffs: DiffStore::new(),
            cursor: Cursor::default(),
            elements: Vec::new(),
            cursor_row: None,
            viewport,
            window: 0..0,
            height: usize::MAX,
            notices: VecDeque::new(),
        }
    }

    pub fn info(&self) -> &RepoInfo {
        &self.info
    }

    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    pub fn registry(&self) -> &ExpansionRegistry {
        &self.registry
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_row(&self) -> Option<usize> {
        self.cursor_row
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    pub fn visible_elements(&self) -> &[Element] {
        &self.elements[self.window.clone()]
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Whether a diff fetch for `path` is still outstanding.
    pub fn is_fetching_diff(&self, path: &str) -> bool {
        self.diffs.is_fetching(path)
    }

    fn hierarchy(&self) -> Hierarchy<'_> {
        Hierarchy::new(&self.snapshot, &self.registry, &self.diffs)
    }

    /// Re-projects the current snapshot and expansion state.
    pub fn rebuild(&mut self) {
        let resolved_before = self.cursor_row.is_some();
        let built = builder::build(&self.hierarchy(), &self.cursor);

        self.elements = built.elements;
        self.cursor = built.cursor;
        self.cursor_row = built.cursor_row;

        if let Validation::Clamped { from, to } = built.validation {
            debug!("Cursor clamped from {} to {}", from, to);
            if resolved_before {
                self.push_notice(Notice::warning(format!(
                    "selection moved: {from} no longer exists"
                )));
            }
        }
        self.refresh_window();
    }

    /// Replaces the snapshot wholesale and rebuilds.
    pub fn apply_snapshot(&mut self, snapshot: StatusSnapshot) {
        debug!("Applying snapshot with {} paths", snapshot.total_paths());
        self.snapshot = snapshot;
        if self.options.prune_expansions {
            let pruned = self.registry.prune_paths(&self.snapshot);
            if pruned > 0 {
                debug!("Pruned {} stale path expansions", pruned);
            }
        }
        self.rebuild();
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.refresh_window();
    }

    fn refresh_window(&mut self) {
        let height = self.height.saturating_sub(self.notices.len());
        self.window = self
            .viewport
            .window(self.elements.len(), self.cursor_row, height);
    }

    fn move_to(&mut self, target: Option<Cursor>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let Some(row) = self
            .elements
            .iter()
            .position(|element| element.address() == Some(target))
        else {
            // Elements are stale relative to the hierarchy; leave the cursor alone.
            warn!("Navigation target {} has no element", target);
            return false;
        };
        self.cursor = target;
        self.cursor_row = Some(row);
        self.refresh_window();
        true
    }

    pub fn move_down(&mut self) -> bool {
        let target = self.hierarchy().down(&self.cursor);
        self.move_to(target)
    }

    pub fn move_up(&mut self) -> bool {
        let target = self.hierarchy().up(&self.cursor);
        self.move_to(target)
    }

    pub fn move_to_top(&mut self) -> bool {
        let target = self.hierarchy().top().filter(|t| *t != self.cursor);
        self.move_to(target)
    }

    pub fn move_to_bottom(&mut self) -> bool {
        let target = self.hierarchy().bottom().filter(|t| *t != self.cursor);
        self.move_to(target)
    }

    fn selected_path(&self) -> Option<String> {
        self.snapshot
            .entry(self.cursor.section, self.cursor.path)
            .map(|entry| entry.path.clone())
    }

    pub fn stage(&mut self) -> Option<Effect> {
        match self.cursor.kind {
            CursorKind::Path => self.selected_path().map(Effect::StagePath),
            CursorKind::Header => {
                self.push_notice(Notice::info("staging a whole section is not supported"));
                None
            }
            CursorKind::DiffLine => {
                debug!("Stage ignored on diff line {}", self.cursor);
                None
            }
        }
    }

    pub fn unstage(&mut self) -> Option<Effect> {
        match self.cursor.kind {
            CursorKind::Path if self.cursor.section == SectionIdx::Staged => {
                self.selected_path().map(Effect::UnstagePath)
            }
            CursorKind::Header => {
                self.push_notice(Notice::info("unstaging a whole section is not supported"));
                None
            }
            _ => {
                debug!("Unstage ignored at {}", self.cursor);
                None
            }
        }
    }

    pub fn toggle_diff(&mut self) -> Option<Effect> {
        if self.cursor.is_header() {
            return None;
        }
        let entry = self
            .snapshot
            .entry(self.cursor.section, self.cursor.path)?
            .clone();
        if !entry.status.is_diffable() {
            debug!("{} ({}) has no diff to show", entry.path, entry.status.symbol());
            return None;
        }

        if self.registry.is_path_expanded(&entry.path) {
            self.registry.set_path_expanded(&entry.path, false);
            self.diffs.cancel_fetch(&entry.path);
            self.cursor = Cursor::path(self.cursor.section, self.cursor.path);
            self.rebuild();
            return None;
        }

        let generation = self.diffs.begin_fetch(&entry.path);
        Some(Effect::FetchDiff {
            path: entry.path,
            generation,
        })
    }

    pub fn toggle_section_expand(&mut self) -> Option<Effect> {
        if !self.cursor.is_header() {
            return None;
        }
        self.registry.toggle_section(self.cursor.section);
        self.rebuild();
        None
    }

    /// Section toggle on a header, diff toggle anywhere else.
    pub fn toggle(&mut self) -> Option<Effect> {
        if self.cursor.is_header() {
            self.toggle_section_expand()
        } else {
            self.toggle_diff()
        }
    }

    pub fn refresh(&mut self) -> Option<Effect> {
        Some(Effect::RefreshStatus { user: true })
    }

    /// Drops diff lines no longer shown and re-requests every expanded diff
    /// against the refreshed working copy. Old lines stay visible until the
    /// replacements arrive.
    fn refetch_expanded_diffs(&mut self) -> Option<Effect> {
        let expanded: Vec<String> = SectionIdx::ALL
            .into_iter()
            .flat_map(|section| self.snapshot.section(section))
            .filter(|entry| entry.status.is_diffable() && self.registry.is_path_expanded(&entry.path))
            .map(|entry| entry.path.clone())
            .collect();
        self.diffs
            .retain_lines(|path| expanded.iter().any(|kept| kept == path));

        if expanded.is_empty() {
            return None;
        }
        debug!("Re-fetching {} expanded diffs", expanded.len());
        let requests = expanded
            .into_iter()
            .map(|path| {
                let generation = self.diffs.begin_fetch(&path);
                (path, generation)
            })
            .collect();
        Some(Effect::FetchDiffs(requests))
    }

    /// Applies one diff completion. Returns whether the elements changed.
    fn apply_diff(
        &mut self,
        path: &str,
        generation: u64,
        result: Result<Vec<String>, SourceError>,
    ) -> bool {
        if !self.diffs.complete_fetch(path, generation) {
            debug!("Discarding stale diff for {} (generation {})", path, generation);
            return false;
        }
        match result {
            Ok(lines) => {
                self.diffs.insert(path, lines);
                self.registry.set_path_expanded(path, true);
                true
            }
            Err(e) => {
                self.push_notice(Notice::error(e.to_string()));
                // Outdated lines go with the expansion.
                if self.registry.is_path_expanded(path) {
                    self.registry.set_path_expanded(path, false);
                    self.diffs.remove(path);
                    return true;
                }
                false
            }
        }
    }

    pub fn push_notice(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => warn!("{}", notice.message),
            NoticeLevel::Warning | NoticeLevel::Info => info!("{}", notice.message),
        }
        self.notices.push_back(notice);
        while self.notices.len() > self.options.max_notices {
            self.notices.pop_front();
        }
        self.refresh_window();
    }

    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
        self.refresh_window();
    }

    /// Notices first, then the scrolled window of the panel.
    pub fn visible_rows(&self) -> Vec<String> {
        self.notices
            .iter()
            .map(ToString::to_string)
            .chain(self.visible_elements().iter().map(Element::display))
            .collect()
    }

    /// Applies one event and returns the follow-up work it requires.
    pub fn update(&mut self, event: PanelEvent) -> Option<Effect> {
        match event {
            PanelEvent::MoveUp => {
                self.move_up();
                None
            }
            PanelEvent::MoveDown => {
                self.move_down();
                None
            }
            PanelEvent::MoveTop => {
                self.move_to_top();
                None
            }
            PanelEvent::MoveBottom => {
                self.move_to_bottom();
                None
            }
            PanelEvent::Stage => self.stage(),
            PanelEvent::Unstage => self.unstage(),
            PanelEvent::Toggle => self.toggle(),
            PanelEvent::ToggleDiff => self.toggle_diff(),
            PanelEvent::ToggleSection => self.toggle_section_expand(),
            PanelEvent::Refresh => self.refresh(),
            PanelEvent::DismissNotices => {
                self.dismiss_notices();
                None
            }
            PanelEvent::Resize { height } => {
                self.set_height(height);
                None
            }
            PanelEvent::InfoFetched(result) => {
                match result {
                    Ok(info) => self.info = info,
                    Err(e) => self.push_notice(Notice::error(e.to_string())),
                }
                None
            }
            PanelEvent::StatusFetched { user, result } => match result {
                Ok(snapshot) => {
                    if user {
                        self.notices.clear();
                    }
                    self.apply_snapshot(snapshot);
                    self.refetch_expanded_diffs()
                }
                Err(e) => {
                    self.push_notice(Notice::error(e.to_string()));
                    None
                }
            },
            PanelEvent::DiffFetched {
                path,
                generation,
                result,
            } => {
                if self.apply_diff(&path, generation, result) {
                    self.rebuild();
                }
                None
            }
            PanelEvent::DiffsFetched(batch) => {
                let mut changed = false;
                for fetched in batch {
                    changed |= self.apply_diff(&fetched.path, fetched.generation, fetched.result);
                }
                if changed {
                    self.rebuild();
                }
                None
            }
            PanelEvent::PathStaged { path, result } => match result {
                Ok(()) => {
                    info!("Staged {}", path);
                    Some(Effect::RefreshStatus { user: false })
                }
                Err(e) => {
                    self.push_notice(Notice::error(e.to_string()));
                    None
                }
            },
            PanelEvent::PathUnstaged { path, result } => match result {
                Ok(()) => {
                    info!("Unstaged {}", path);
                    Some(Effect::RefreshStatus { user: false })
                }
                Err(e) => {
                    self.push_notice(Notice::error(e.to_string()));
                    None
                }
            },
        }
    }
}
