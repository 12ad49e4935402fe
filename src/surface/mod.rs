//! Presentation surface: the rendering target the game draws into.
//!
//! [`PresentationSurface`] owns one container node of the [`Document`] and at
//! most one injected stylesheet. Fades are fire-and-forget: the completion
//! action is scheduled for when the duration elapses, whether or not anything
//! was on screen to see it.

pub mod document;
pub mod element;

pub use document::{Document, Node, NodeId, NodeKind, StyleHandle};
pub use element::{AnimatedValue, ElementStyle};

use crate::scheduler::Scheduler;
use std::time::Duration;
use tracing::debug;

/// Container plus its stylesheet slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationSurface {
    container: NodeId,
    style: Option<StyleHandle>,
}

impl PresentationSurface {
    /// Surface over an existing container node.
    pub fn new(container: NodeId) -> Self {
        debug!(?container, "Presentation surface created");
        Self {
            container,
            style: None,
        }
    }

    /// The container this surface draws into.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Stylesheet currently injected by this surface.
    pub fn active_style(&self) -> Option<StyleHandle> {
        self.style
    }

    /// Attach `css` to the document, replacing this surface's previous
    /// stylesheet.
    pub fn inject_style(&mut self, doc: &mut Document, css: &str) {
        self.remove_style(doc);
        self.style = Some(doc.append_style(css));
        debug!(container = ?self.container, "Stylesheet injected");
    }

    /// Detach this surface's stylesheet. No-op when none is attached.
    pub fn remove_style(&mut self, doc: &mut Document) {
        if let Some(handle) = self.style.take() {
            doc.remove_style(handle);
            debug!(container = ?self.container, "Stylesheet removed");
        }
    }

    /// Transition the container to fully transparent over `duration`, then
    /// run `on_complete`.
    pub fn fade_out<A, S>(&self, doc: &mut Document, sched: &mut S, duration: Duration, on_complete: A)
    where
        S: Scheduler<A>,
    {
        let now = sched.now();
        let style = doc.node_mut(self.container).style_mut();
        style.set_transition(Some(duration));
        style.set_opacity(0.0, now);
        debug!(container = ?self.container, ?duration, "Fade out started");
        sched.after(duration, on_complete);
    }

    /// Reset the container to transparent, flush, then transition to fully
    /// opaque over `duration` and run `on_complete`.
    pub fn fade_in<A, S>(&self, doc: &mut Document, sched: &mut S, duration: Duration, on_complete: A)
    where
        S: Scheduler<A>,
    {
        let now = sched.now();
        {
            let style = doc.node_mut(self.container).style_mut();
            style.set_transition(None);
            style.set_opacity(0.0, now);
        }
        doc.flush_layout(self.container, now);

        let style = doc.node_mut(self.container).style_mut();
        style.set_transition(Some(duration));
        style.set_opacity(1.0, now);
        debug!(container = ?self.container, ?duration, "Fade in started");
        sched.after(duration, on_complete);
    }

    /// Remove the stylesheet and everything mounted in the container.
    pub fn cleanup(&mut self, doc: &mut Document) {
        self.remove_style(doc);
        doc.node_mut(self.container).clear_content();
        debug!(container = ?self.container, "Surface cleaned up");
    }
}
