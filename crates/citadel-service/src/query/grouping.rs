//! Stable grouping of rows by key.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Rows partitioned by key.
///
/// Groups appear in the order their key was first seen and each group keeps
/// the input order of its rows. Serializes as a map in that same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<K, V> {
    groups: Vec<(K, Vec<V>)>,
}

impl<K, V> Grouped<K, V> {
    pub fn groups(&self) -> &[(K, Vec<V>)] {
        &self.groups
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(k, _)| k)
    }

    pub fn get(&self, key: &K) -> Option<&[V]>
    where
        K: PartialEq,
    {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_inner(self) -> Vec<(K, Vec<V>)> {
        self.groups
    }
}

impl<K, V> Default for Grouped<K, V> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

/// Partition `rows` by `key` in a single pass.
pub fn group_by<K, V, I, F>(rows: I, key: F) -> Grouped<K, V>
where
    K: PartialEq,
    I: IntoIterator<Item = V>,
    F: Fn(&V) -> K,
{
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();
    for row in rows {
        let k = key(&row);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, bucket)) => bucket.push(row),
            None => groups.push((k, vec![row])),
        }
    }
    Grouped { groups }
}

impl<K: Serialize, V: Serialize> Serialize for Grouped<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, rows) in &self.groups {
            map.serialize_entry(key, rows)?;
        }
        map.end()
    }
}
