//! Project list cache
//!
//! Read-through copy of the backend's list. It is only ever replaced by a
//! fetch result or cleared on sign-out; mutations mark it stale and the
//! caller refetches.

use devlog_core::{Project, ProjectId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectList {
    items: Vec<Project>,
    stale: bool,
}

impl ProjectList {
    pub fn items(&self) -> &[Project] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Whether the backend may hold changes this copy has not seen
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Install a fresh fetch result
    pub fn replace(&mut self, items: Vec<Project>) {
        self.items = items;
        self.stale = false;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.stale = false;
    }
}
