//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for layout and frame-pacing values so the screens
//! stay consistent with each other.

use std::time::Duration;

/// Height of the status bar in lines.
///
/// Single line at the bottom of every screen for key hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the progress header shown while playing.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of a button row (border + caption).
pub const CONTROL_BAR_HEIGHT: u16 = 3;

/// Blank columns between two buttons in a row.
pub const BUTTON_GAP: u16 = 2;

/// Horizontal padding inside a button, per side.
pub const BUTTON_PADDING: u16 = 2;

/// Width percentage of the end-of-session overlay.
pub const OVERLAY_WIDTH_PERCENT: u16 = 60;

/// Fixed height of the end-of-session overlay.
pub const OVERLAY_HEIGHT: u16 = 9;

/// Width of the word list in the inspector.
pub const SELECTOR_WIDTH: u16 = 24;

/// Height of the inspector info panel.
pub const INFO_PANEL_HEIGHT: u16 = 7;

/// Width percentage of the inspector alert popup.
pub const ALERT_WIDTH_PERCENT: u16 = 50;

/// Opacity below which a node is not drawn at all.
pub const HIDDEN_OPACITY: f32 = 0.05;

/// Opacity below which a node is drawn dimmed.
pub const DIM_OPACITY: f32 = 0.6;

/// Event poll timeout while something is animating (about 60 fps).
pub const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Event poll timeout when nothing moves.
pub const IDLE_POLL: Duration = Duration::from_millis(250);
