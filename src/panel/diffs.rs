// ABOUTME: Diff line storage for expanded paths plus per-path fetch generations
// A completion is only applied when its generation is the newest one issued for the path

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DiffStore {
    lines: HashMap<String, Vec<String>>,
    generations: HashMap<String, u64>,
    next_generation: u64,
}

impl DiffStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached lines for `path`, empty if nothing was fetched.
    pub fn lines(&self, path: &str) -> &[String] {
        self.lines.get(path).map_or(&[], Vec::as_slice)
    }

    pub fn insert(&mut self, path: &str, lines: Vec<String>) {
        self.lines.insert(path.to_string(), lines);
    }

    pub fn remove(&mut self, path: &str) {
        self.lines.remove(path);
    }

    /// Drops cached lines for every path `keep` rejects.
    pub fn retain_lines(&mut self, keep: impl Fn(&str) -> bool) {
        self.lines.retain(|path, _| keep(path));
    }

    /// Issues a new generation for `path`, superseding any fetch in flight.
    pub fn begin_fetch(&mut self, path: &str) -> u64 {
        self.next_generation += 1;
        self.generations
            .insert(path.to_string(), self.next_generation);
        self.next_generation
    }

    /// Invalidates any fetch in flight for `path` without starting a new one.
    pub fn cancel_fetch(&mut self, path: &str) {
        self.generations.remove(path);
    }

    /// Consumes the pending generation if `generation` is current.
    pub fn complete_fetch(&mut self, path: &str, generation: u64) -> bool {
        match self.generations.get(path) {
            Some(current) if *current == generation => {
                self.generations.remove(path);
                true
            }
            _ => false,
        }
    }

    pub fn is_fetching(&self, path: &str) -> bool {
        self.generations.contains_key(path)
    }
}
