//! Error types for wordplay.
//!
//! Errors are split per concern with `thiserror` and compose into [`AppError`]
//! at the binary boundary.
//!
//! # Error Recovery Strategy
//!
//! Only startup failures are fatal (bad config file, catalog that fails
//! validation, terminal that cannot be set up). Everything that happens while
//! the game runs is local: a missing page hook, hiding an empty presenter, an
//! unknown word id or an empty selection are logged and the operation is
//! skipped. A broken optional feature never takes the rest of the page down.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be prepared or the subscriber was already set.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The built-in word catalog failed validation.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures building or querying the word catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A word module was registered with an empty identifier.
    #[error("Word module at position {position} has an empty id")]
    EmptyId {
        /// Position of the offending module in registration order.
        position: usize,
    },

    /// Two word modules share the same identifier.
    #[error("Duplicate word id '{0}'")]
    DuplicateId(String),

    /// A word module ships a stylesheet that does not parse.
    #[error("Stylesheet for word '{id}' is invalid: {source}")]
    InvalidStylesheet {
        /// Identifier of the word module.
        id: String,
        /// Parse failure.
        #[source]
        source: StyleSheetError,
    },

    /// A lookup asked for a word id the catalog does not contain.
    #[error("Unknown word '{0}'")]
    UnknownWord(String),
}

/// Failures of the word presenter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresenterError {
    /// `display` was called while another word is still mounted.
    ///
    /// The caller must `hide` first; mounting over a live word would leak its
    /// stylesheet and skip its cleanup hook.
    #[error("Cannot display '{requested}': '{mounted}' is still mounted")]
    AlreadyMounted {
        /// Word currently mounted.
        mounted: String,
        /// Word the caller tried to display.
        requested: String,
    },
}

/// Failures parsing a word stylesheet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleSheetError {
    /// Stylesheet text is not valid TOML or has unknown properties.
    #[error("Invalid stylesheet syntax: {0}")]
    Syntax(String),

    /// A color property does not name a terminal color.
    #[error("Invalid color '{value}' in rule '{selector}'")]
    InvalidColor {
        /// Selector of the rule holding the color.
        selector: String,
        /// Rejected color text.
        value: String,
    },
}
