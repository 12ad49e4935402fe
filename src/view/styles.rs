//! Shared styles for the game screens.
//!
//! Word colors come from word stylesheets; everything around the word (title,
//! buttons, panels) uses the constants here.

use super::constants::{DIM_OPACITY, HIDDEN_OPACITY};
use crate::model::RuleProps;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

// ===== Chrome =====

/// Muted text for hints and disabled controls.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Panel titles and headings.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Lobby title.
pub const TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Caption of an enabled button.
pub const BUTTON: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Border of an enabled button.
pub const BUTTON_BORDER: Style = Style::new().fg(Color::Yellow);

/// Caption and border of a disabled button.
pub const BUTTON_DISABLED: Style = MUTED_TEXT;

/// Selected row in the inspector word list.
pub const SELECTED_ROW: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

/// Alert popup border and text.
pub const ALERT: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

// ===== Opacity =====

/// Style for something drawn at `opacity`, or `None` when it should not be
/// drawn at all.
///
/// Terminals have no alpha channel: anything nearly transparent is skipped and
/// anything partly faded is dimmed.
pub fn with_opacity(style: Style, opacity: f32) -> Option<Style> {
    if opacity < HIDDEN_OPACITY {
        None
    } else if opacity < DIM_OPACITY {
        Some(style.add_modifier(Modifier::DIM))
    } else {
        Some(style)
    }
}

// ===== Word rules =====

/// Terminal style for resolved stylesheet properties.
///
/// Colors were validated when the stylesheet was parsed; anything that still
/// fails to parse falls back to the terminal default.
pub fn rule_style(props: &RuleProps) -> Style {
    let mut style = Style::default();
    if let Some(fg) = props.fg.as_deref().and_then(|c| Color::from_str(c).ok()) {
        style = style.fg(fg);
    }
    if let Some(bg) = props.bg.as_deref().and_then(|c| Color::from_str(c).ok()) {
        style = style.bg(bg);
    }
    if props.bold == Some(true) {
        style = style.add_modifier(Modifier::BOLD);
    }
    if props.italic == Some(true) {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if props.dim == Some(true) {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}
