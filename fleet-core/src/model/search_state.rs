//! src/model/search_state.rs
//! ============================================================================
//! # Per-view saved queries and the transient edit buffer
//!
//! Saved queries live for the whole process and survive view navigation.
//! Only one view edits at a time. Each keystroke bumps a generation counter
//! that debounce messages quote, so a stale fire is recognized and ignored.

use crate::model::view_stack::ViewId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchEdit {
    view: ViewId,
    buffer: String,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    saved: HashMap<ViewId, String>,
    editing: Option<SearchEdit>,
    generation: u64,
}

impl SearchState {
    /// Enters edit mode for `view` with `seed` in the buffer.
    pub fn begin(&mut self, view: ViewId, seed: impl Into<String>) {
        self.editing = Some(SearchEdit {
            view,
            buffer: seed.into(),
        });
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    #[must_use]
    pub fn editing_view(&self) -> Option<ViewId> {
        self.editing.as_ref().map(|e| e.view)
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.buffer.as_str())
    }

    /// Applies `edit` to the buffer and returns the new generation.
    pub fn edit(&mut self, edit: impl FnOnce(&mut String)) -> Option<u64> {
        let state = self.editing.as_mut()?;
        edit(&mut state.buffer);
        self.generation += 1;
        Some(self.generation)
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Leaves edit mode, saving the buffer. An empty buffer removes the
    /// saved entry.
    pub fn commit(&mut self) -> Option<ViewId> {
        let SearchEdit { view, buffer } = self.editing.take()?;
        self.generation += 1;
        if buffer.trim().is_empty() {
            self.saved.remove(&view);
        } else {
            self.saved.insert(view, buffer);
        }
        Some(view)
    }

    /// Leaves edit mode, discarding the buffer.
    pub fn cancel(&mut self) -> Option<ViewId> {
        let edit = self.editing.take()?;
        self.generation += 1;
        Some(edit.view)
    }

    #[must_use]
    pub fn saved(&self, view: ViewId) -> &str {
        self.saved.get(&view).map_or("", String::as_str)
    }

    pub fn set_saved(&mut self, view: ViewId, query: impl Into<String>) {
        let query = query.into();
        if query.trim().is_empty() {
            self.saved.remove(&view);
        } else {
            self.saved.insert(view, query);
        }
    }

    /// Returns true if a saved query was removed.
    pub fn clear_saved(&mut self, view: ViewId) -> bool {
        self.saved.remove(&view).is_some()
    }

    /// Query that currently drives `view`: the live buffer while that view
    /// is being edited, otherwise its saved query.
    #[must_use]
    pub fn effective(&self, view: ViewId) -> &str {
        match &self.editing {
            Some(edit) if edit.view == view => &edit.buffer,
            _ => self.saved(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_saves_and_empty_commit_clears() {
        let mut search = SearchState::default();
        search.begin(ViewId::Instances, "");
        search.edit(|b| b.push_str("web"));
        assert_eq!(search.effective(ViewId::Instances), "web");
        assert_eq!(search.commit(), Some(ViewId::Instances));
        assert_eq!(search.saved(ViewId::Instances), "web");

        search.begin(ViewId::Instances, "");
        search.commit();
        assert_eq!(search.saved(ViewId::Instances), "");
    }

    #[test]
    fn test_cancel_keeps_previous_saved_query() {
        let mut search = SearchState::default();
        search.set_saved(ViewId::Clusters, "prod");
        search.begin(ViewId::Clusters, "");
        search.edit(|b| b.push_str("stag"));
        search.cancel();
        assert_eq!(search.effective(ViewId::Clusters), "prod");
        assert!(!search.is_editing());
    }

    #[test]
    fn test_generation_advances_per_edit() {
        let mut search = SearchState::default();
        assert_eq!(search.edit(|b| b.push('x')), None);
        search.begin(ViewId::NodeGroups, "");
        let first = search.edit(|b| b.push('a'));
        let second = search.edit(|b| b.push('b'));
        assert!(second > first);
    }
}
