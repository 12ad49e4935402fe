//! The word catalog: every word module known at startup.
//!
//! Validation happens once, here: ids must be non-empty and unique and every
//! stylesheet must parse. After that the catalog is immutable and hands out
//! shared references.

use crate::model::error::CatalogError;
use crate::model::stylesheet::StyleSheet;
use crate::model::word::{Capabilities, WordModule};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error};

/// Ordered, validated collection of word modules.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    words: Vec<Arc<WordModule>>,
    capabilities: Vec<Capabilities>,
}

impl Catalog {
    /// Validate and freeze a list of word modules.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyId`] for a module with an empty id
    /// - [`CatalogError::DuplicateId`] when two modules share an id
    /// - [`CatalogError::InvalidStylesheet`] when a stylesheet does not parse
    pub fn new(words: Vec<WordModule>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut capabilities = Vec::with_capacity(words.len());

        for (position, word) in words.iter().enumerate() {
            if word.id().is_empty() {
                return Err(CatalogError::EmptyId { position });
            }
            if !seen.insert(word.id().to_string()) {
                return Err(CatalogError::DuplicateId(word.id().to_string()));
            }
            StyleSheet::parse(word.style()).map_err(|source| CatalogError::InvalidStylesheet {
                id: word.id().to_string(),
                source,
            })?;

            let caps = word.capabilities();
            debug!(id = word.id(), capabilities = ?caps, "Word registered");
            capabilities.push(caps);
        }

        Ok(Self {
            words: words.into_iter().map(Arc::new).collect(),
            capabilities,
        })
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the catalog has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in registration order.
    pub fn words(&self) -> &[Arc<WordModule>] {
        &self.words
    }

    /// Word ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.id())
    }

    /// Position of a word id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.words.iter().position(|w| w.id() == id)
    }

    /// Look a word up by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownWord`] (and logs it) when the id is not
    /// registered.
    pub fn find(&self, id: &str) -> Result<&Arc<WordModule>, CatalogError> {
        match self.position(id) {
            Some(index) => Ok(&self.words[index]),
            None => {
                error!(id, "Word not found in catalog");
                Err(CatalogError::UnknownWord(id.to_string()))
            }
        }
    }

    /// Capabilities recorded for a word when the catalog was built.
    pub fn capabilities(&self, id: &str) -> Option<Capabilities> {
        self.position(id).map(|index| self.capabilities[index])
    }
}
