//! Reference signatures and best-of-N search

use crate::FeatureVector;
use crate::matcher::distance;
use serde::{Deserialize, Serialize};

/// A named, enrolled reference signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Name the reference is looked up by
    pub name: String,
    /// Descriptor of the reference image
    pub features: FeatureVector,
}

impl ReferenceEntry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, features: FeatureVector) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }
}

/// Source of enrolled references
pub trait ReferenceStore {
    /// All entries, in the store's order
    fn list(&self) -> Vec<ReferenceEntry>;

    /// Look up an entry by name
    fn get(&self, name: &str) -> Option<ReferenceEntry> {
        self.list().into_iter().find(|e| e.name == name)
    }
}

/// In-memory reference store preserving insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryReferenceStore {
    entries: Vec<ReferenceEntry>,
}

impl MemoryReferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any existing entry with the same name
    pub fn insert(&mut self, entry: ReferenceEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ReferenceEntry> for MemoryReferenceStore {
    fn from_iter<I: IntoIterator<Item = ReferenceEntry>>(iter: I) -> Self {
        let mut store = Self::new();
        for entry in iter {
            store.insert(entry);
        }
        store
    }
}

impl ReferenceStore for MemoryReferenceStore {
    fn list(&self) -> Vec<ReferenceEntry> {
        self.entries.clone()
    }

    fn get(&self, name: &str) -> Option<ReferenceEntry> {
        self.entries.iter().find(|e| e.name == name).cloned()
    }
}

/// Closest reference to an input signature
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    /// Closest entry; `None` when there were no entries
    pub entry: Option<ReferenceEntry>,
    /// Distance to the closest entry, `+inf` when there were none
    pub distance: f64,
    /// Whether the closest distance is within the threshold
    pub is_match: bool,
}

/// Find the entry closest to `input`.
///
/// Ties keep the earlier entry. The threshold is applied to the minimum
/// distance only.
pub fn find_best_match(
    input: &FeatureVector,
    entries: &[ReferenceEntry],
    threshold: f64,
) -> BestMatch {
    let mut best: Option<(&ReferenceEntry, f64)> = None;
    for entry in entries {
        let d = distance(input, &entry.features);
        if best.is_none_or(|(_, min)| d < min) {
            best = Some((entry, d));
        }
    }

    match best {
        Some((entry, d)) => BestMatch {
            entry: Some(entry.clone()),
            distance: d,
            is_match: d <= threshold,
        },
        None => BestMatch {
            entry: None,
            distance: f64::INFINITY,
            is_match: false,
        },
    }
}
