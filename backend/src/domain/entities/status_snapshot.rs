use std::collections::{BTreeMap, BTreeSet};

use crate::domain::value_objects::RootDirectory;

/// Client-relative path -> ids of the clients using that file
pub type NormalizedFileMap = BTreeMap<String, Vec<String>>;

/// Application-level state reported by the AFS server for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub connected_clients: BTreeSet<String>,
    /// Server-absolute path -> clients with the file open
    pub file_to_clients: BTreeMap<String, BTreeSet<String>>,
}

impl StatusSnapshot {
    /// Snapshot used when the status call failed
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn connected_clients(&self) -> Vec<String> {
        self.connected_clients.iter().cloned().collect()
    }

    /// Rekeys the file map by client-relative path.
    ///
    /// Two server paths can land on the same relative path when one of them
    /// sits outside the root; their client sets are merged.
    pub fn normalized_files(&self, root: &RootDirectory) -> NormalizedFileMap {
        let mut merged: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (path, clients) in &self.file_to_clients {
            merged
                .entry(root.relativize(path))
                .or_default()
                .extend(clients.iter().cloned());
        }

        merged
            .into_iter()
            .map(|(path, clients)| (path, clients.into_iter().collect()))
            .collect()
    }
}
