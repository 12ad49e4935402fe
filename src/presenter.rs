//! Word presenter: mounts exactly one word module at a time.
//!
//! State machine: `Empty --display--> Mounted --hide--> Empty`. Displaying
//! over a mounted word is refused rather than leaking the previous word's
//! stylesheet and skipping its cleanup.

use crate::model::{PresenterError, WordModule};
use crate::surface::element::ElementStyle;
use crate::surface::{Document, NodeId, PresentationSurface};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Presentation surface specialised to one mounted word.
#[derive(Debug)]
pub struct WordPresenter {
    surface: PresentationSurface,
    mounted: Option<Arc<WordModule>>,
}

impl WordPresenter {
    /// Presenter drawing into `container`.
    pub fn new(container: NodeId) -> Self {
        Self {
            surface: PresentationSurface::new(container),
            mounted: None,
        }
    }

    /// Underlying surface.
    pub fn surface(&self) -> &PresentationSurface {
        &self.surface
    }

    /// Container node words are mounted in.
    pub fn container(&self) -> NodeId {
        self.surface.container()
    }

    /// Currently mounted word.
    pub fn mounted(&self) -> Option<&Arc<WordModule>> {
        self.mounted.as_ref()
    }

    /// Whether a word is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Mount `word`: clear the container, mount its markup, inject its
    /// stylesheet, run its `init` hook.
    ///
    /// # Errors
    ///
    /// Returns [`PresenterError::AlreadyMounted`] without touching the page
    /// when a word is already mounted; call [`WordPresenter::hide`] first.
    pub fn display(&mut self, doc: &mut Document, word: Arc<WordModule>) -> Result<(), PresenterError> {
        if let Some(current) = &self.mounted {
            warn!(
                mounted = current.id(),
                requested = word.id(),
                "display() called while a word is mounted"
            );
            return Err(PresenterError::AlreadyMounted {
                mounted: current.id().to_string(),
                requested: word.id().to_string(),
            });
        }

        let container = self.surface.container();
        {
            let node = doc.node_mut(container);
            node.clear_content();
            *node.style_mut() = ElementStyle::default();
            node.set_content(word.render());
        }
        self.surface.inject_style(doc, word.style());
        word.run_init(doc.node_mut(container));

        info!(id = word.id(), "Word displayed");
        self.mounted = Some(word);
        Ok(())
    }

    /// Unmount the current word: run its `cleanup` hook, then clear the
    /// stylesheet and container. Warns and does nothing when empty.
    pub fn hide(&mut self, doc: &mut Document) {
        let Some(word) = self.mounted.take() else {
            warn!("No word to hide");
            return;
        };

        debug!(id = word.id(), "Hiding word");
        word.run_cleanup();
        self.surface.cleanup(doc);
        info!(id = word.id(), "Word hidden");
    }
}
