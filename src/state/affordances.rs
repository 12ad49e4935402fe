//! Page hooks the orchestrator depends on, bound by identifier.
//!
//! The game page is a contract: a handful of nodes with fixed ids. Binding
//! resolves them once. A missing optional control is a warning and that
//! control simply does nothing; a missing required container is an error and
//! the game runs degraded.

use crate::surface::{Document, NodeId, NodeKind};
use tracing::{error, warn};

/// Element identifiers of the game page.
pub mod ids {
    /// Container words are mounted in.
    pub const GAME_CONTAINER: &str = "game-container";
    /// Lobby view.
    pub const LOBBY_VIEW: &str = "lobby-view";
    /// Playing view.
    pub const PLAYING_VIEW: &str = "playing-view";
    /// Lobby control that enters the game.
    pub const ENTER_BUTTON: &str = "enter-btn";
    /// Playing control that returns to the lobby.
    pub const EXIT_BUTTON: &str = "exit-btn";
    /// Playing control that shows the first word.
    pub const START_BUTTON: &str = "start-btn";
    /// Playing control that shows the next word.
    pub const NEXT_BUTTON: &str = "next-btn";
    /// End-of-session overlay.
    pub const END_OVERLAY: &str = "end-overlay";
    /// Word count shown in the overlay.
    pub const WORD_COUNT: &str = "word-count";
    /// Overlay control that restarts the session.
    pub const RESTART_BUTTON: &str = "restart-btn";
    /// Overlay control that returns to the lobby.
    pub const END_EXIT_BUTTON: &str = "end-exit-btn";
}

/// Clickable controls of the game page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Lobby → playing.
    Enter,
    /// Playing → lobby.
    Exit,
    /// First word.
    Start,
    /// Next word.
    Next,
    /// New session from the overlay.
    Restart,
    /// Playing → lobby from the overlay.
    EndExit,
}

/// Resolved page hooks. `None` means the page does not provide that hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affordances {
    /// Word container (required).
    pub game_container: Option<NodeId>,
    /// Lobby view (required).
    pub lobby_view: Option<NodeId>,
    /// Playing view (required).
    pub playing_view: Option<NodeId>,
    /// Enter control.
    pub enter: Option<NodeId>,
    /// Exit control.
    pub exit: Option<NodeId>,
    /// Start control.
    pub start: Option<NodeId>,
    /// Next control.
    pub next: Option<NodeId>,
    /// End-of-session overlay.
    pub end_overlay: Option<NodeId>,
    /// Word count display.
    pub word_count: Option<NodeId>,
    /// Restart control.
    pub restart: Option<NodeId>,
    /// Overlay exit control.
    pub end_exit: Option<NodeId>,
}

impl Affordances {
    /// Resolve every hook, logging what is missing.
    pub fn bind(doc: &Document) -> Self {
        let required = |id: &str| {
            let node = doc.get_element_by_id(id);
            if node.is_none() {
                error!(id, "Required page element not found; game will not be functional");
            }
            node
        };
        let optional = |id: &str| {
            let node = doc.get_element_by_id(id);
            if node.is_none() {
                warn!(id, "Optional page element not found; feature disabled");
            }
            node
        };

        Self {
            game_container: required(ids::GAME_CONTAINER),
            lobby_view: required(ids::LOBBY_VIEW),
            playing_view: required(ids::PLAYING_VIEW),
            enter: optional(ids::ENTER_BUTTON),
            exit: optional(ids::EXIT_BUTTON),
            start: optional(ids::START_BUTTON),
            next: optional(ids::NEXT_BUTTON),
            end_overlay: optional(ids::END_OVERLAY),
            word_count: optional(ids::WORD_COUNT),
            restart: optional(ids::RESTART_BUTTON),
            end_exit: optional(ids::END_EXIT_BUTTON),
        }
    }

    /// Whether the required containers are all present.
    pub fn is_functional(&self) -> bool {
        self.game_container.is_some() && self.lobby_view.is_some() && self.playing_view.is_some()
    }

    /// Node bound to a control.
    pub fn control(&self, control: Control) -> Option<NodeId> {
        match control {
            Control::Enter => self.enter,
            Control::Exit => self.exit,
            Control::Start => self.start,
            Control::Next => self.next,
            Control::Restart => self.restart,
            Control::EndExit => self.end_exit,
        }
    }

    /// Control bound to a node.
    pub fn control_for(&self, node: NodeId) -> Option<Control> {
        [
            Control::Enter,
            Control::Exit,
            Control::Start,
            Control::Next,
            Control::Restart,
            Control::EndExit,
        ]
        .into_iter()
        .find(|c| self.control(*c) == Some(node))
    }
}

/// Build the standard game page.
///
/// Lobby and overlay start in their initial state: lobby shown, playing view
/// and overlay hidden, next control hidden until the session starts.
pub fn build_game_page() -> Document {
    let mut doc = Document::new();

    let lobby = doc.create_element(ids::LOBBY_VIEW, NodeKind::Container, None);
    let enter = doc.create_element(ids::ENTER_BUTTON, NodeKind::Button, Some(lobby));
    doc.set_label(enter, "Enter");

    let playing = doc.create_element(ids::PLAYING_VIEW, NodeKind::Container, None);
    doc.set_displayed(playing, false);
    doc.create_element(ids::GAME_CONTAINER, NodeKind::Container, Some(playing));
    let start = doc.create_element(ids::START_BUTTON, NodeKind::Button, Some(playing));
    doc.set_label(start, "Start");
    let next = doc.create_element(ids::NEXT_BUTTON, NodeKind::Button, Some(playing));
    doc.set_label(next, "Next");
    doc.set_displayed(next, false);
    let exit = doc.create_element(ids::EXIT_BUTTON, NodeKind::Button, Some(playing));
    doc.set_label(exit, "Exit");

    let overlay = doc.create_element(ids::END_OVERLAY, NodeKind::Container, Some(playing));
    doc.set_displayed(overlay, false);
    doc.create_element(ids::WORD_COUNT, NodeKind::Text, Some(overlay));
    let restart = doc.create_element(ids::RESTART_BUTTON, NodeKind::Button, Some(overlay));
    doc.set_label(restart, "Restart");
    let end_exit = doc.create_element(ids::END_EXIT_BUTTON, NodeKind::Button, Some(overlay));
    doc.set_label(end_exit, "Exit");

    doc
}
