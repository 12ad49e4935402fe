//! Built-in word catalog.
//!
//! Registration order is the order the inspector lists words in; play order
//! is shuffled per session.

mod contraction;
mod elastique;
mod flexible;

use crate::model::{Catalog, CatalogError};

/// Every built-in word, validated.
///
/// # Errors
///
/// Returns a [`CatalogError`] if a built-in word is malformed; that is a bug
/// in this module and is covered by the tests below.
pub fn catalog() -> Result<Catalog, CatalogError> {
    Catalog::new(vec![contraction::word(), flexible::word(), elastique::word()])
}
