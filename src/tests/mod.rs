//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the whole TUI through the acceptance harness and can
//! reach into crate internals for assertions.
