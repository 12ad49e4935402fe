//! Inspector: load a single word in isolation and show what it provides.

use crate::model::{Capabilities, Catalog, CatalogError, WordModule};
use crate::presenter::WordPresenter;
use crate::surface::{Document, NodeKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Element identifiers of the inspector page.
pub mod ids {
    /// Container the inspected word is mounted in.
    pub const TEST_CONTAINER: &str = "test-container";
    /// Word selector.
    pub const WORD_SELECTOR: &str = "word-selector";
    /// Info panel.
    pub const TEST_INFO: &str = "test-info";
}

/// Message shown when loading with nothing selected.
pub const NO_SELECTION_ALERT: &str = "Please select a word";

/// What the loaded word provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordInfo {
    /// Word id.
    pub id: String,
    /// Enter transition duration.
    pub enter: Option<Duration>,
    /// Exit transition duration.
    pub exit: Option<Duration>,
    /// Has an init hook.
    pub init: bool,
    /// Has a cleanup hook.
    pub cleanup: bool,
}

impl WordInfo {
    fn of(word: &WordModule, caps: Capabilities) -> Self {
        Self {
            id: word.id().to_string(),
            enter: word.enter_transition().map(|t| t.duration),
            exit: word.exit_transition().map(|t| t.duration),
            init: caps.init,
            cleanup: caps.cleanup,
        }
    }

    /// Info panel lines.
    pub fn lines(&self) -> Vec<String> {
        let duration = |d: Option<Duration>| match d {
            Some(d) => format!("{}ms", d.as_millis()),
            None => "none".to_string(),
        };
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        vec![
            format!("Loaded word: {}", self.id),
            format!("Enter transition: {}", duration(self.enter)),
            format!("Exit transition: {}", duration(self.exit)),
            format!("Init: {}", yes_no(self.init)),
            format!("Cleanup: {}", yes_no(self.cleanup)),
        ]
    }
}

/// Single-word test bench.
#[derive(Debug)]
pub struct Inspector {
    doc: Document,
    catalog: Catalog,
    presenter: WordPresenter,
    selected: Option<usize>,
    alert: Option<String>,
    info: Option<WordInfo>,
}

impl Inspector {
    /// Inspector with nothing selected.
    pub fn new(catalog: Catalog) -> Self {
        let mut doc = Document::new();
        doc.create_element(ids::WORD_SELECTOR, NodeKind::Container, None);
        let container = doc.create_element(ids::TEST_CONTAINER, NodeKind::Container, None);
        doc.create_element(ids::TEST_INFO, NodeKind::Text, None);
        info!(words = catalog.len(), "Inspector ready");
        Self {
            doc,
            catalog,
            presenter: WordPresenter::new(container),
            selected: None,
            alert: None,
            info: None,
        }
    }

    /// The inspector page.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Presenter holding the inspected word.
    pub fn presenter(&self) -> &WordPresenter {
        &self.presenter
    }

    /// Loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Selector entries: every catalog id, upper-cased.
    pub fn options(&self) -> Vec<String> {
        self.catalog.ids().map(str::to_uppercase).collect()
    }

    /// Index of the selected entry.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the entry for `id`.
    pub fn select(&mut self, id: &str) -> Result<(), CatalogError> {
        match self.catalog.position(id) {
            Some(index) => {
                self.selected = Some(index);
                Ok(())
            }
            None => {
                error!(id, "Word not found");
                Err(CatalogError::UnknownWord(id.to_string()))
            }
        }
    }

    /// Move the selection down, stopping at the last entry.
    pub fn select_next(&mut self) {
        let last = self.catalog.len().checked_sub(1);
        self.selected = match (self.selected, last) {
            (_, None) => None,
            (None, Some(_)) => Some(0),
            (Some(i), Some(last)) => Some((i + 1).min(last)),
        };
    }

    /// Move the selection up, stopping at the first entry.
    pub fn select_prev(&mut self) {
        self.selected = match self.selected {
            None if !self.catalog.is_empty() => Some(0),
            None => None,
            Some(i) => Some(i.saturating_sub(1)),
        };
    }

    /// Pending user-facing message.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Clear the pending message.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Info about the loaded word.
    pub fn info(&self) -> Option<&WordInfo> {
        self.info.as_ref()
    }

    /// Load the selected word. With nothing selected, raises an alert and
    /// changes nothing else.
    pub fn load_selected(&mut self) -> Result<(), CatalogError> {
        let Some(index) = self.selected else {
            self.alert = Some(NO_SELECTION_ALERT.to_string());
            return Ok(());
        };
        let id = match self.catalog.words().get(index) {
            Some(word) => word.id().to_string(),
            None => return Err(CatalogError::UnknownWord(index.to_string())),
        };
        self.load_by_id(&id)
    }

    /// Clean up the loaded word, if any, then load `id`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::UnknownWord`] when the catalog has no such id; the
    /// previously loaded word stays in place.
    pub fn load_by_id(&mut self, id: &str) -> Result<(), CatalogError> {
        let word = Arc::clone(self.catalog.find(id)?);

        if self.presenter.is_mounted() {
            self.presenter.hide(&mut self.doc);
        }
        if let Err(err) = self.presenter.display(&mut self.doc, Arc::clone(&word)) {
            error!(%err, "Inspector display failed");
            return Ok(());
        }

        let caps = self.catalog.capabilities(id).unwrap_or_else(|| word.capabilities());
        let info = WordInfo::of(&word, caps);
        let lines = info.lines().join("\n");
        if let Some(panel) = self.doc.get_element_by_id(ids::TEST_INFO) {
            self.doc.set_label(panel, lines);
        }
        self.info = Some(info);
        self.alert = None;
        info!(id, "Word loaded in inspector");
        Ok(())
    }

    /// Back to the initial state: nothing loaded, nothing selected.
    pub fn reload(&mut self) {
        if self.presenter.is_mounted() {
            self.presenter.hide(&mut self.doc);
        }
        if let Some(panel) = self.doc.get_element_by_id(ids::TEST_INFO) {
            self.doc.set_label(panel, "");
        }
        self.selected = None;
        self.alert = None;
        self.info = None;
        info!("Inspector reloaded");
    }
}
