//! Knowledge base loading and case-insensitive lookup.

use crate::models::{CharacterRecord, OrderedMap};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Natural-language trigger, matched case-insensitively at the start of a message.
pub const TRIGGER_PHRASE: &str = "tell me about";

/// Characters dropped from the message before the query: the phrase plus one separator.
pub const TRIGGER_OFFSET: usize = 14;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("lore file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read lore file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("lore file {} is not a mapping of character records: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only character store, indexed by case-folded name.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    index: HashMap<String, CharacterRecord>,
}

impl KnowledgeBase {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let kb = Self::from_json(&raw).map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded {} characters from {}", kb.len(), path.display());
        Ok(kb)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let records: OrderedMap<CharacterRecord> = serde_json::from_str(raw)?;
        Ok(Self::from_records(records.0))
    }

    /// Later entries win when two names fold to the same key.
    pub fn from_records(records: impl IntoIterator<Item = (String, CharacterRecord)>) -> Self {
        let mut index = HashMap::new();
        for (name, record) in records {
            if index.insert(fold(&name), record).is_some() {
                warn!("Duplicate character after case folding, keeping last: {}", name);
            }
        }
        Self { index }
    }

    /// Trims and case-folds `query`. A miss is `None`, not an error.
    pub fn resolve(&self, query: &str) -> Option<&CharacterRecord> {
        let key = fold(query.trim());
        let record = self.index.get(&key);
        debug!(query = %key, found = record.is_some(), "Lore lookup");
        record
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Query text of a trigger message, or `None` if it does not start with the phrase.
pub fn extract_trigger_query(content: &str) -> Option<&str> {
    let head = content.get(..TRIGGER_PHRASE.len())?;
    if !head.eq_ignore_ascii_case(TRIGGER_PHRASE) {
        return None;
    }

    let rest = match content.char_indices().nth(TRIGGER_OFFSET) {
        Some((at, _)) => &content[at..],
        None => "",
    };
    Some(rest.trim())
}
