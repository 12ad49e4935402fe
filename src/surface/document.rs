//! In-memory page the game renders from.
//!
//! Nodes are looked up by string identifier the way page hooks are looked up
//! by id in markup. Each node carries display/enabled flags, an animated
//! inline style and, for containers, mounted word markup. Stylesheets live in
//! document-wide slots, like `<style>` elements in a page head.

use crate::model::stylesheet::StyleSheet;
use crate::model::word::Markup;
use crate::surface::element::ElementStyle;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::warn;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Handle to an injected stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleHandle(u64);

/// What a node is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Holds other nodes or mounted word markup.
    Container,
    /// Clickable control.
    Button,
    /// Text display.
    Text,
}

/// One element of the page.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    label: String,
    displayed: bool,
    enabled: bool,
    style: ElementStyle,
    content: Option<Markup>,
}

impl Node {
    /// Identifier the node was created with.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parent node, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Button caption or text content.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the caption or text content.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Whether the node itself is displayed (ignores ancestors).
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// Whether the node accepts clicks.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Inline style.
    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    /// Mutable inline style.
    pub fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    /// Mounted markup.
    pub fn content(&self) -> Option<&Markup> {
        self.content.as_ref()
    }

    /// Mount markup, replacing whatever was there.
    pub fn set_content(&mut self, markup: Markup) {
        self.content = Some(markup);
    }

    /// Remove mounted markup.
    pub fn clear_content(&mut self) {
        self.content = None;
    }
}

#[derive(Debug, Clone)]
struct InjectedStyle {
    text: String,
    sheet: Option<StyleSheet>,
}

/// The page: nodes plus stylesheet slots.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    by_id: HashMap<String, NodeId>,
    styles: BTreeMap<StyleHandle, InjectedStyle>,
    next_style: u64,
}

impl Document {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node. Nodes start displayed and enabled.
    ///
    /// A duplicate id still creates the node, but lookups keep returning the
    /// first node with that id.
    pub fn create_element(
        &mut self,
        id: impl Into<String>,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = id.into();
        let node_id = NodeId(self.nodes.len());
        if self.by_id.contains_key(&id) {
            warn!(id = %id, "Duplicate element id; lookups return the first one");
        } else {
            self.by_id.insert(id.clone(), node_id);
        }
        self.nodes.push(Node {
            id,
            kind,
            parent,
            label: String::new(),
            displayed: true,
            enabled: true,
            style: ElementStyle::default(),
            content: None,
        });
        node_id
    }

    /// Look a node up by identifier.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Borrow a node.
    ///
    /// Node ids are only minted by this document, so the index is always valid.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Borrow a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Iterate over every node in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Show or hide a node (CSS `display`).
    pub fn set_displayed(&mut self, id: NodeId, displayed: bool) {
        self.node_mut(id).displayed = displayed;
    }

    /// Enable or disable a control.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        self.node_mut(id).enabled = enabled;
    }

    /// Set a node's caption or text.
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        self.node_mut(id).set_label(label);
    }

    /// Whether the node and all of its ancestors are displayed.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if !node.displayed {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Whether a click on this node should be delivered.
    pub fn is_interactive(&self, id: NodeId) -> bool {
        self.node(id).enabled && self.is_rendered(id)
    }

    /// Opacity of the node composed with its ancestors at `now`.
    pub fn effective_opacity(&self, id: NodeId, now: Duration) -> f32 {
        let mut opacity = 1.0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            opacity *= node.style.opacity_at(now);
            current = node.parent;
        }
        opacity
    }

    /// Commit finished transitions of a node before starting a new one.
    pub fn flush_layout(&mut self, id: NodeId, now: Duration) {
        self.node_mut(id).style.flush(now);
    }

    /// Whether any node is mid-transition at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.nodes.iter().any(|n| n.style.is_animating(now))
    }

    /// Add a stylesheet to the page.
    ///
    /// Text that does not parse is still attached (so removal stays
    /// symmetric) but contributes no rules.
    pub fn append_style(&mut self, text: &str) -> StyleHandle {
        let handle = StyleHandle(self.next_style);
        self.next_style += 1;
        let sheet = match StyleSheet::parse(text) {
            Ok(sheet) => Some(sheet),
            Err(err) => {
                warn!(error = %err, "Stylesheet ignored");
                None
            }
        };
        self.styles.insert(
            handle,
            InjectedStyle {
                text: text.to_string(),
                sheet,
            },
        );
        handle
    }

    /// Detach a stylesheet. Returns whether it was attached.
    pub fn remove_style(&mut self, handle: StyleHandle) -> bool {
        self.styles.remove(&handle).is_some()
    }

    /// Whether a stylesheet is attached.
    pub fn has_style(&self, handle: StyleHandle) -> bool {
        self.styles.contains_key(&handle)
    }

    /// Raw text of an attached stylesheet.
    pub fn style_text(&self, handle: StyleHandle) -> Option<&str> {
        self.styles.get(&handle).map(|s| s.text.as_str())
    }

    /// Number of attached stylesheets.
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Parsed stylesheets in insertion order.
    pub fn stylesheets(&self) -> impl Iterator<Item = &StyleSheet> {
        self.styles.values().filter_map(|s| s.sheet.as_ref())
    }
}
