use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node as published in the network graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDirectoryEntry {
    pub pub_key: String,
    /// Operator-chosen display name. May be empty.
    #[serde(default)]
    pub alias: String,
    /// Unix seconds of the node announcement this entry came from.
    #[serde(default)]
    pub last_update: u32,
}

impl NodeDirectoryEntry {
    pub fn new(pub_key: impl Into<String>, alias: impl Into<String>) -> Self {
        NodeDirectoryEntry {
            pub_key: pub_key.into(),
            alias: alias.into(),
            last_update: 0,
        }
    }

    /// The alias, unless the operator left it blank.
    pub fn display_alias(&self) -> Option<&str> {
        Some(self.alias.as_str()).filter(|alias| !alias.is_empty())
    }
}

/// Read-only lookup of node aliases by exact identifier.
pub trait NodeLookup {
    /// Alias for `pub_key`, or `None` on a miss or a blank alias.
    fn alias_of(&self, pub_key: &str) -> Option<&str>;
}

/// A plain node list, as returned by the graph query. First match wins.
impl NodeLookup for [NodeDirectoryEntry] {
    fn alias_of(&self, pub_key: &str) -> Option<&str> {
        self.iter()
            .find(|node| node.pub_key == pub_key)
            .and_then(NodeDirectoryEntry::display_alias)
    }
}

impl NodeLookup for Vec<NodeDirectoryEntry> {
    fn alias_of(&self, pub_key: &str) -> Option<&str> {
        self.as_slice().alias_of(pub_key)
    }
}

/// The node directory keyed by pubkey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDirectory {
    pub entries: BTreeMap<String, NodeDirectoryEntry>,
}

impl NodeDirectory {
    /// Merge another directory into this one.
    /// Last-Writer-Wins per node, by `last_update`.
    pub fn merge(&mut self, other: NodeDirectory) {
        for (key, entry) in other.entries {
            match self.entries.get(&key) {
                Some(existing) if existing.last_update >= entry.last_update => {
                    // Keep existing (it's newer or same age)
                }
                _ => {
                    self.entries.insert(key, entry);
                }
            }
        }
    }

    pub fn insert(&mut self, entry: NodeDirectoryEntry) {
        let mut single = NodeDirectory::default();
        single.entries.insert(entry.pub_key.clone(), entry);
        self.merge(single);
    }

    pub fn get(&self, pub_key: &str) -> Option<&NodeDirectoryEntry> {
        self.entries.get(pub_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<NodeDirectoryEntry> for NodeDirectory {
    fn from_iter<I: IntoIterator<Item = NodeDirectoryEntry>>(iter: I) -> Self {
        let mut directory = NodeDirectory::default();
        for entry in iter {
            directory.insert(entry);
        }
        directory
    }
}

impl NodeLookup for NodeDirectory {
    fn alias_of(&self, pub_key: &str) -> Option<&str> {
        self.get(pub_key).and_then(NodeDirectoryEntry::display_alias)
    }
}
