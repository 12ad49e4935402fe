//! Wordplay
//!
//! TUI word game: a lobby fades into a playing view that presents stylized
//! word effects from a shuffled playlist, one at a time.
//!
//! Pure core (`model`, `surface`, `scheduler`, `presenter`, `state`) runs
//! against a virtual clock; the impure shell (`view`) drives it from terminal
//! events and wall time.

pub mod config;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod view;
pub mod words;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
