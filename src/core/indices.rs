use hashbrown::HashMap;

/// Field value to `V` mapping that iterates in first-seen key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouped<V> {
    slots: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for Grouped<V> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> Grouped<V> {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, created with `default` the first time the key is seen.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let idx = match self.slots.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.slots.insert(key.to_string(), idx);
                self.entries.push((key.to_string(), default()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.slots.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no key has been seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consumes the mapping into ordered pairs.
    pub fn into_vec(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V> IntoIterator for Grouped<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_keep_first_seen_order() {
        let mut counts: Grouped<usize> = Grouped::new();
        for city in ["Reno", "Austin", "Reno", "Boise", "Austin", "Reno"] {
            *counts.get_or_insert_with(city, || 0) += 1;
        }

        assert_eq!(counts.keys().collect::<Vec<_>>(), vec!["Reno", "Austin", "Boise"]);
        assert_eq!(counts.get("Reno"), Some(&3));
        assert_eq!(counts.get("Dallas"), None);
        assert_eq!(
            counts.into_vec(),
            vec![
                ("Reno".to_string(), 3),
                ("Austin".to_string(), 2),
                ("Boise".to_string(), 1)
            ]
        );
    }
}
