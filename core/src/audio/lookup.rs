//! Category/key to filename table
//!
//! Loaded from a JSON document shaped `{ "<category>": { "<key>": "<file>" } }`.
//! Filenames are relative to the active voice pack directory.

use std::collections::HashMap as StdHashMap;
use std::path::Path;

use hashbrown::HashMap;
use rift_echo_types::{Cue, CueCategory};
use tracing::{info, warn};

use super::error::LookupError;

#[derive(Debug, Clone, Default)]
pub struct CueLookup {
    files: HashMap<CueCategory, HashMap<String, String>>,
}

impl CueLookup {
    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let text = std::fs::read_to_string(path).map_err(|source| LookupError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| LookupError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the table, or fall back to an empty one. Every cue then resolves to nothing.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(lookup) => {
                info!(path = %path.display(), entries = lookup.len(), "Loaded cue table");
                lookup
            }
            Err(err) => {
                warn!(error = %err, "Cue table unavailable; no cues will play");
                Self::default()
            }
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: StdHashMap<String, StdHashMap<String, String>> = serde_json::from_str(text)?;

        let mut lookup = Self::default();
        for (category, entries) in raw {
            let Some(parsed) = CueCategory::parse(&category) else {
                warn!(category, "Ignoring unknown cue category");
                continue;
            };
            for (key, file) in entries {
                lookup.insert(parsed, key, file);
            }
        }
        Ok(lookup)
    }

    /// Empty filenames are treated as absent
    pub fn insert(&mut self, category: CueCategory, key: impl Into<String>, file: impl Into<String>) {
        let file = file.into();
        if file.is_empty() {
            return;
        }
        self.files
            .entry(category)
            .or_default()
            .insert(key.into(), file);
    }

    pub fn resolve(&self, cue: &Cue) -> Option<&str> {
        self.files
            .get(&cue.category)
            .and_then(|keys| keys.get(cue.key.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
