use crate::url::NormalizedKey;
use std::collections::HashMap;

/// Number of same-domain anchors observed per page key
///
/// A key is present only once at least one anchor pointing to it has been
/// seen; its count is the number of such anchors, not the number of fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCount {
    counts: HashMap<NormalizedKey, u32>,
}

impl LinkCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an anchor to `key` has already been observed
    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.counts.get(key).copied()
    }

    /// Records one more anchor to `key` and returns its new count
    pub fn increment(&mut self, key: NormalizedKey) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedKey, u32)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Entries sorted ascending by count, ties broken by key
    pub fn sorted_by_count(&self) -> Vec<(&NormalizedKey, u32)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
