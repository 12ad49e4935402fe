//! Domain model types (pure).
//!
//! Word modules, the catalog they are registered in, the stylesheet format
//! they carry, and the shuffle that orders them for a session.

pub mod catalog;
pub mod error;
pub mod key_action;
pub mod shuffle;
pub mod stylesheet;
pub mod word;

// Re-export for convenience
pub use catalog::Catalog;
pub use error::{AppError, CatalogError, PresenterError, StyleSheetError};
pub use key_action::KeyAction;
pub use shuffle::{shuffle, shuffled};
pub use stylesheet::{Rule, RuleProps, StyleSheet};
pub use word::{Capabilities, Fragment, Markup, Transition, TransitionEffect, WordModule};
