//! Bidirectional name tables, used both for node names and PO names.

use std::collections::HashMap;
use std::hash::Hash;

/// A bijection between keys (literals or PO ids) and names.
///
/// Insertion never rebinds an existing key or name; callers that want to
/// rename must remove the old binding first. Kept as an explicit two-way
/// structure since both directions are queried by this crate's callers.
#[derive(Debug, Clone, Default)]
pub(crate) struct NameTable<K> {
    key_to_name: HashMap<K, String>,
    name_to_key: HashMap<String, K>,
    /// Insertion order of currently-bound keys, so `iter()` is deterministic
    /// rather than following the `HashMap`'s arbitrary bucket order.
    order: Vec<K>,
}

impl<K: Copy + Eq + Hash> NameTable<K> {
    pub(crate) fn new() -> Self {
        Self {
            key_to_name: HashMap::new(),
            name_to_key: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Binds `key` to `name`.
    ///
    /// # Panics
    ///
    /// Panics if `key` already has a name, or `name` is already bound to a
    /// different key (a [`crate::error::AigError`]-free invariant: this is
    /// a programmer error, see the crate's error handling policy).
    pub(crate) fn insert(&mut self, key: K, name: impl Into<String>) {
        let name = name.into();
        assert!(
            !self.key_to_name.contains_key(&key),
            "name collision: key already has a name"
        );
        assert!(
            !self.name_to_key.contains_key(&name),
            "name collision: name `{}` already bound",
            name
        );
        self.name_to_key.insert(name.clone(), key);
        self.key_to_name.insert(key, name);
        self.order.push(key);
    }

    pub(crate) fn remove_by_key(&mut self, key: K) {
        let name = self
            .key_to_name
            .remove(&key)
            .expect("key has no bound name");
        self.name_to_key.remove(&name);
        self.order.retain(|&k| k != key);
    }

    pub(crate) fn name_of(&self, key: K) -> Option<&str> {
        self.key_to_name.get(&key).map(String::as_str)
    }

    pub(crate) fn has_name(&self, key: K) -> bool {
        self.key_to_name.contains_key(&key)
    }

    pub(crate) fn key_of(&self, name: &str) -> Option<K> {
        self.name_to_key.get(name).copied()
    }

    pub(crate) fn name_exists(&self, name: &str) -> bool {
        self.name_to_key.contains_key(name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (K, &str)> {
        self.order
            .iter()
            .map(move |&k| (k, self.key_to_name[&k].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_both_ways() {
        let mut names: NameTable<u32> = NameTable::new();
        names.insert(3, "a");
        assert_eq!(names.name_of(3), Some("a"));
        assert_eq!(names.key_of("a"), Some(3));
    }

    #[test]
    #[should_panic(expected = "name collision")]
    fn duplicate_name_panics() {
        let mut names: NameTable<u32> = NameTable::new();
        names.insert(1, "a");
        names.insert(2, "a");
    }

    #[test]
    fn remove_then_reinsert() {
        let mut names: NameTable<u32> = NameTable::new();
        names.insert(1, "a");
        names.remove_by_key(1);
        names.insert(1, "a");
        assert_eq!(names.name_of(1), Some("a"));
    }

    #[test]
    fn iter_follows_insertion_order() {
        let mut names: NameTable<u32> = NameTable::new();
        names.insert(5, "e");
        names.insert(1, "a");
        names.insert(3, "c");
        let collected: Vec<(u32, &str)> = names.iter().collect();
        assert_eq!(collected, vec![(5, "e"), (1, "a"), (3, "c")]);

        names.remove_by_key(1);
        names.insert(1, "a2");
        let collected: Vec<(u32, &str)> = names.iter().collect();
        assert_eq!(collected, vec![(5, "e"), (3, "c"), (1, "a2")]);
    }
}
