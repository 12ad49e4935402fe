//! Game state machines (pure).
//!
//! All transitions run against a virtual clock and are testable without a
//! terminal.

pub mod affordances;
pub mod inspector;
pub mod orchestrator;
pub mod session;

// Re-export for convenience
pub use affordances::{build_game_page, Affordances, Control};
pub use inspector::{Inspector, WordInfo};
pub use orchestrator::{
    NextOutcome, Orchestrator, RejectReason, Step, Timing, TransitionOutcome, DEFAULT_SETTLE_DELAY,
    DEFAULT_TRANSITION_DURATION,
};
pub use session::{Advance, SessionState, View};
