// ABOUTME: Expansion registry tracking which sections and which paths are expanded
// State is keyed by section index and path string so it survives snapshot replacement

use std::collections::HashMap;

use crate::models::{SectionIdx, StatusSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRegistry {
    sections: [bool; SectionIdx::COUNT],
    paths: HashMap<String, bool>,
}

impl Default for ExpansionRegistry {
    fn default() -> Self {
        let mut sections = [true; SectionIdx::COUNT];
        sections[SectionIdx::Unversioned.index()] = false;
        Self {
            sections,
            paths: HashMap::new(),
        }
    }
}

impl ExpansionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose listed sections start collapsed and all others expanded.
    pub fn with_collapsed(collapsed: &[SectionIdx]) -> Self {
        let mut registry = Self {
            sections: [true; SectionIdx::COUNT],
            paths: HashMap::new(),
        };
        for section in collapsed {
            registry.sections[section.index()] = false;
        }
        registry
    }

    pub fn is_section_expanded(&self, section: SectionIdx) -> bool {
        self.sections[section.index()]
    }

    pub fn set_section_expanded(&mut self, section: SectionIdx, expanded: bool) {
        self.sections[section.index()] = expanded;
    }

    pub fn toggle_section(&mut self, section: SectionIdx) {
        let slot = &mut self.sections[section.index()];
        *slot = !*slot;
    }

    pub fn is_path_expanded(&self, path: &str) -> bool {
        self.paths.get(path).copied().unwrap_or(false)
    }

    pub fn set_path_expanded(&mut self, path: &str, expanded: bool) {
        self.paths.insert(path.to_string(), expanded);
    }

    pub fn toggle_path(&mut self, path: &str) {
        let slot = self.paths.entry(path.to_string()).or_insert(false);
        *slot = !*slot;
    }

    /// Number of per-path entries held, expanded or not.
    pub fn tracked_paths(&self) -> usize {
        self.paths.len()
    }

    /// Drops per-path entries for paths the snapshot no longer lists.
    /// Returns how many entries were removed.
    pub fn prune_paths(&mut self, snapshot: &StatusSnapshot) -> usize {
        let before = self.paths.len();
        self.paths.retain(|path, _| snapshot.contains_path(path));
        before - self.paths.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PathStatus;

    #[test]
    fn test_defaults_collapse_only_unversioned() {
        let registry = ExpansionRegistry::new();
        for section in SectionIdx::ALL {
            assert_eq!(
                registry.is_section_expanded(section),
                section != SectionIdx::Unversioned
            );
        }
    }

    #[test]
    fn test_unknown_path_reads_collapsed() {
        let registry = ExpansionRegistry::new();
        assert!(!registry.is_path_expanded("never/seen.rs"));
        assert_eq!(registry.tracked_paths(), 0);
    }

    #[test]
    fn test_toggle_path_creates_entry_on_demand() {
        let mut registry = ExpansionRegistry::new();
        registry.toggle_path("src/lib.rs");
        assert!(registry.is_path_expanded("src/lib.rs"));
        registry.toggle_path("src/lib.rs");
        assert!(!registry.is_path_expanded("src/lib.rs"));
        assert_eq!(registry.tracked_paths(), 1);
    }

    #[test]
    fn test_toggle_section_twice_restores() {
        let mut registry = ExpansionRegistry::new();
        let original = registry.clone();
        registry.toggle_section(SectionIdx::Staged);
        assert!(!registry.is_section_expanded(SectionIdx::Staged));
        registry.toggle_section(SectionIdx::Staged);
        assert_eq!(registry, original);
    }

    #[test]
    fn test_with_collapsed_overrides_defaults() {
        let registry = ExpansionRegistry::with_collapsed(&[SectionIdx::Ignored]);
        assert!(registry.is_section_expanded(SectionIdx::Unversioned));
        assert!(!registry.is_section_expanded(SectionIdx::Ignored));
    }

    #[test]
    fn test_prune_keeps_only_listed_paths() {
        let mut registry = ExpansionRegistry::new();
        registry.set_path_expanded("kept.rs", true);
        registry.set_path_expanded("gone.rs", true);

        let snapshot =
            StatusSnapshot::new().with(SectionIdx::Unstaged, "kept.rs", PathStatus::Modified);

        assert_eq!(registry.prune_paths(&snapshot), 1);
        assert!(registry.is_path_expanded("kept.rs"));
        assert!(!registry.is_path_expanded("gone.rs"));
    }
}
