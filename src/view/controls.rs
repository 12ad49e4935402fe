//! Button rows and popup geometry shared by the screens.

use super::constants::{BUTTON_GAP, BUTTON_PADDING};
use super::hit::{HitMap, HitTarget};
use super::styles::{with_opacity, BUTTON, BUTTON_BORDER, BUTTON_DISABLED};
use crate::surface::{Document, NodeId};
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Width of the button drawn for `label`, borders included.
pub fn button_width(label: &str) -> u16 {
    let text = u16::try_from(label.width()).unwrap_or(u16::MAX);
    text.saturating_add(2 * BUTTON_PADDING + 2)
}

/// Lay out the rendered buttons among `nodes` as a centered row.
///
/// Nodes that are missing or not rendered take no space.
pub fn button_row(doc: &Document, nodes: &[Option<NodeId>], area: Rect) -> Vec<(NodeId, Rect)> {
    let visible: Vec<NodeId> = nodes
        .iter()
        .flatten()
        .copied()
        .filter(|&node| doc.is_rendered(node))
        .collect();
    if visible.is_empty() {
        return Vec::new();
    }

    let widths: Vec<u16> = visible
        .iter()
        .map(|&node| button_width(doc.node(node).label()))
        .collect();
    let gaps = BUTTON_GAP * u16::try_from(visible.len() - 1).unwrap_or(0);
    let total = widths.iter().fold(gaps, |acc, w| acc.saturating_add(*w));

    let mut x = area.x + area.width.saturating_sub(total) / 2;
    let mut placed = Vec::with_capacity(visible.len());
    for (node, width) in visible.into_iter().zip(widths) {
        let rect = Rect::new(x, area.y, width, area.height).intersection(area);
        placed.push((node, rect));
        x = x.saturating_add(width).saturating_add(BUTTON_GAP);
    }
    placed
}

/// Draw the buttons among `nodes` and register the clickable ones.
pub fn render_buttons(
    frame: &mut Frame,
    doc: &Document,
    nodes: &[Option<NodeId>],
    area: Rect,
    now: Duration,
    hits: &mut HitMap,
) {
    for (node, rect) in button_row(doc, nodes, area) {
        if rect.is_empty() {
            continue;
        }
        let enabled = doc.node(node).is_enabled();
        let opacity = doc.effective_opacity(node, now);
        let (text, border) = if enabled {
            (BUTTON, BUTTON_BORDER)
        } else {
            (BUTTON_DISABLED, BUTTON_DISABLED)
        };
        let (Some(text), Some(border)) = (with_opacity(text, opacity), with_opacity(border, opacity))
        else {
            continue;
        };

        let button = Paragraph::new(doc.node(node).label().to_string())
            .style(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(button, rect);

        if doc.is_interactive(node) {
            hits.push(rect, HitTarget::Node(node));
        }
    }
}

/// Rect of `percent_x` of the width and a fixed `height`, centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = height.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}
