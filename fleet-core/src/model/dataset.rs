//! src/model/dataset.rs
//! ============================================================================
//! # Per-view raw and filtered datasets
//!
//! `Dataset<T>` owns the raw records of one view together with their search
//! indexes. The filtered list is stored as positions into the raw list, so it
//! is always a subset of raw and is rebuilt whenever either side changes.

use crate::model::resources::Resource;
use crate::search::{
    matcher::{Searchable, matches},
    query::Query,
};

#[derive(Debug)]
pub struct Entry<T: Searchable> {
    pub record: T,
    pub index: T::Index,
}

#[derive(Debug)]
pub struct Dataset<T: Searchable> {
    entries: Vec<Entry<T>>,
    /// `None` means unfiltered: every raw entry is visible.
    filtered: Option<Vec<usize>>,
    loaded: bool,
}

impl<T: Searchable> Default for Dataset<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            filtered: None,
            loaded: false,
        }
    }
}

impl<T: Searchable + Resource> Dataset<T> {
    /// Replaces every record, rebuilding indexes, then re-applies `query`.
    pub fn replace(&mut self, records: Vec<T>, query: &Query) {
        self.entries = records
            .into_iter()
            .map(|record| {
                let index = record.build_index();
                Entry { record, index }
            })
            .collect();
        self.loaded = true;
        self.apply_filter(query);
    }

    pub fn apply_filter(&mut self, query: &Query) {
        self.filtered = if query.is_empty() {
            None
        } else {
            Some(
                self.entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| matches::<T>(&entry.index, query))
                    .map(|(i, _)| i)
                    .collect(),
            )
        };
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.filtered.is_some()
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.filtered
            .as_ref()
            .map_or(self.entries.len(), Vec::len)
    }

    #[must_use]
    pub fn visible(&self, position: usize) -> Option<&T> {
        let raw = match &self.filtered {
            Some(positions) => *positions.get(position)?,
            None => position,
        };
        self.entries.get(raw).map(|entry| &entry.record)
    }

    pub fn iter_visible(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.visible_len()).filter_map(|i| self.visible(i))
    }

    /// Visible position of the record whose selection key equals `key`.
    #[must_use]
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.iter_visible()
            .position(|record| record.selection_key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resources::Cluster;

    fn cluster(name: &str, status: &str) -> Cluster {
        Cluster {
            name: name.into(),
            status: status.into(),
            version: "1.29".into(),
            arn: format!("arn-{name}"),
        }
    }

    fn sample() -> Vec<Cluster> {
        vec![
            cluster("prod", "ACTIVE"),
            cluster("staging", "ACTIVE"),
            cluster("sandbox", "CREATING"),
        ]
    }

    #[test]
    fn test_empty_query_shows_raw() {
        let mut ds = Dataset::<Cluster>::default();
        ds.replace(sample(), &Query::parse(" "));
        assert!(!ds.is_filtered());
        assert_eq!(ds.visible_len(), 3);
    }

    #[test]
    fn test_filter_is_subset_and_idempotent() {
        let mut ds = Dataset::<Cluster>::default();
        let query = Query::parse("creating");
        ds.replace(sample(), &query);
        let first: Vec<String> = ds.iter_visible().map(|c| c.name.clone()).collect();
        ds.apply_filter(&query);
        let second: Vec<String> = ds.iter_visible().map(|c| c.name.clone()).collect();

        assert_eq!(first, vec!["sandbox".to_string()]);
        assert_eq!(first, second);
        assert!(ds.visible_len() <= ds.raw_len());
    }

    #[test]
    fn test_position_of_uses_visible_order() {
        let mut ds = Dataset::<Cluster>::default();
        ds.replace(sample(), &Query::parse("s"));
        assert_eq!(ds.position_of("staging"), Some(0));
        assert_eq!(ds.position_of("sandbox"), Some(1));
        assert_eq!(ds.position_of("prod"), None);
    }

    #[test]
    fn test_visible_out_of_range() {
        let ds = Dataset::<Cluster>::default();
        assert!(ds.visible(0).is_none());
        assert!(!ds.is_loaded());
    }
}
