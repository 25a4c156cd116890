/// Insertion-ordered unique-key toggle set backing multi-select state
/// (chosen genres, favorite movies). Iteration order is insertion order for
/// display stability only; it carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: PartialEq, V> SelectionSet<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Wholesale replacement from a prior-state snapshot (edit mode).
    /// Duplicate keys in the snapshot keep their first occurrence so the
    /// unique-key invariant holds.
    pub fn preload(&mut self, snapshot: impl IntoIterator<Item = (K, V)>) {
        self.entries.clear();
        for (key, value) in snapshot {
            if !self.contains(&key) {
                self.entries.push((key, value));
            }
        }
    }

    /// Removes `key` when present, inserts `(key, value)` otherwise. Total
    /// over all keys; toggling twice restores the original set.
    pub fn toggle(&mut self, key: K, value: V) {
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.entries.remove(index);
            }
            None => self.entries.push((key, value)),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq, V> Default for SelectionSet<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for SelectionSet<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.preload(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_inserts_absent_key() {
        let mut genres = SelectionSet::new();
        genres.toggle("Action".to_string(), 28u64);
        assert!(genres.contains(&"Action".to_string()));
        assert_eq!(genres.get(&"Action".to_string()), Some(&28));
    }

    #[test]
    fn test_toggle_removes_present_key() {
        let mut genres = SelectionSet::new();
        genres.toggle("Action".to_string(), 28u64);
        genres.toggle("Action".to_string(), 28u64);
        assert!(genres.is_empty());
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut genres: SelectionSet<String, u64> =
            [("Action".to_string(), 28), ("Comedy".to_string(), 35)]
                .into_iter()
                .collect();
        let before = genres.clone();

        genres.toggle("Horror".to_string(), 27);
        genres.toggle("Horror".to_string(), 27);
        assert_eq!(genres, before);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut genres = SelectionSet::new();
        genres.toggle("Comedy".to_string(), 35u64);
        genres.toggle("Action".to_string(), 28u64);
        genres.toggle("Horror".to_string(), 27u64);
        genres.toggle("Action".to_string(), 28u64);

        let keys: Vec<&str> = genres.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Comedy", "Horror"]);
    }

    #[test]
    fn test_preload_replaces_existing_entries() {
        let mut genres = SelectionSet::new();
        genres.toggle("Comedy".to_string(), 35u64);

        genres.preload(vec![("Action".to_string(), 28), ("Drama".to_string(), 18)]);
        assert!(!genres.contains(&"Comedy".to_string()));
        assert_eq!(genres.len(), 2);
    }

    #[test]
    fn test_preload_drops_duplicate_keys() {
        let mut genres = SelectionSet::new();
        genres.preload(vec![
            ("Action".to_string(), 28u64),
            ("Action".to_string(), 99),
        ]);
        assert_eq!(genres.len(), 1);
        assert_eq!(genres.get(&"Action".to_string()), Some(&28));
    }
}
