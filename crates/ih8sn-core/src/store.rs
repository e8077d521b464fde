//! # Property Store
//!
//! The narrow capability interface over the external key-value store, and
//! an in-memory implementation of it.
//!
//! The native store lives in the binary (it needs FFI). Everything in this
//! crate talks to [`PropertyStore`] only, so the same rules run unchanged
//! against [`MemoryStore`] in tests and dry runs.

use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// PROPERTYSTORE TRAIT
// =============================================================================

/// The four primitives the override engine needs from a property store.
///
/// A handle is only valid for the store that produced it.
pub trait PropertyStore {
    /// Opaque reference to an existing property.
    type Handle: Copy;

    /// Look up a property by exact name.
    fn find(&self, name: &str) -> Option<Self::Handle>;

    /// Current value of the property behind `handle`.
    fn read(&self, handle: Self::Handle) -> String;

    /// Replace the value in place. Returns `false` if the store rejected it.
    fn update(&mut self, handle: Self::Handle, value: &str) -> bool;

    /// Insert a new property. Returns `false` if the store rejected it.
    fn add(&mut self, name: &str, value: &str) -> bool;

    /// Convenience: `find` followed by `read`.
    fn get(&self, name: &str) -> Option<String> {
        self.find(name).map(|handle| self.read(handle))
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Handle into a [`MemoryStore`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(usize);

/// In-memory property store.
///
/// Slots are append-only, so a [`SlotId`] stays valid for the lifetime of
/// the store. Name lookup goes through a `BTreeMap` index for deterministic
/// iteration.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Slot storage: (name, value)
    slots: Vec<(String, String)>,

    /// Name -> slot
    index: BTreeMap<String, SlotId>,

    /// Slots that reject updates
    read_only: BTreeSet<SlotId>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property unconditionally, creating it if needed.
    ///
    /// This is a seeding helper, not one of the store primitives.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&slot) => self.slots[slot.0].1 = value,
            None => {
                let slot = SlotId(self.slots.len());
                self.index.insert(name.clone(), slot);
                self.slots.push((name, value));
            }
        }
    }

    /// Make future `update` calls on `name` fail. No-op if `name` is absent.
    pub fn mark_read_only(&mut self, name: &str) {
        if let Some(&slot) = self.index.get(name) {
            self.read_only.insert(slot);
        }
    }

    /// Current value of a property, borrowed.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|slot| self.slots[slot.0].1.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All properties, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.index.values().map(|slot| {
            let (name, value) = &self.slots[slot.0];
            (name.as_str(), value.as_str())
        })
    }

    /// Owned copy of the store contents, ordered by name.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, value) in iter {
            store.set(name, value);
        }
        store
    }
}

impl PropertyStore for MemoryStore {
    type Handle = SlotId;

    fn find(&self, name: &str) -> Option<SlotId> {
        self.index.get(name).copied()
    }

    fn read(&self, handle: SlotId) -> String {
        self.slots
            .get(handle.0)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    fn update(&mut self, handle: SlotId, value: &str) -> bool {
        if self.read_only.contains(&handle) {
            return false;
        }
        match self.slots.get_mut(handle.0) {
            Some(slot) => {
                slot.1 = value.to_string();
                true
            }
            None => false,
        }
    }

    fn add(&mut self, name: &str, value: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.set(name, value);
        true
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_read_update() {
        let mut store = MemoryStore::new();
        store.set("ro.product.model", "Pixel");

        let handle = store.find("ro.product.model").expect("present");
        assert_eq!(store.read(handle), "Pixel");

        assert!(store.update(handle, "Pixel 6"));
        assert_eq!(store.value("ro.product.model"), Some("Pixel 6"));
    }

    #[test]
    fn find_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.find("ro.secure").is_none());
        assert!(store.get("ro.secure").is_none());
    }

    #[test]
    fn add_only_inserts_when_absent() {
        let mut store = MemoryStore::new();

        assert!(store.add("ro.secure", "1"));
        assert!(!store.add("ro.secure", "0"));
        assert_eq!(store.value("ro.secure"), Some("1"));
    }

    #[test]
    fn read_only_rejects_update() {
        let mut store: MemoryStore = [("ro.debuggable", "1")].into_iter().collect();
        store.mark_read_only("ro.debuggable");

        let handle = store.find("ro.debuggable").expect("present");
        assert!(!store.update(handle, "0"));
        assert_eq!(store.value("ro.debuggable"), Some("1"));
    }

    #[test]
    fn handles_survive_later_inserts() {
        let mut store = MemoryStore::new();
        store.set("b", "1");
        let handle = store.find("b").expect("present");

        store.set("a", "2");
        store.set("c", "3");

        assert_eq!(store.read(handle), "1");
    }

    #[test]
    fn iter_is_name_ordered() {
        let store: MemoryStore = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let names: Vec<_> = store.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }
}
