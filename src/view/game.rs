//! Game screen: lobby, playing view and the end-of-session overlay.

use super::constants::{
    CONTROL_BAR_HEIGHT, HEADER_HEIGHT, OVERLAY_HEIGHT, OVERLAY_WIDTH_PERCENT, STATUS_BAR_HEIGHT,
};
use super::controls::{centered_rect, render_buttons};
use super::hit::HitMap;
use super::styles::{with_opacity, MUTED_TEXT, SECTION_HEADER, TITLE};
use super::word::{Hover, WordLayout, WordView};
use crate::model::StyleSheet;
use crate::state::{Affordances, Orchestrator, View};
use crate::surface::{Document, NodeId};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;

/// Lobby heading.
pub const LOBBY_TITLE: &str = "W O R D P L A Y";

/// Lobby tagline.
pub const LOBBY_TAGLINE: &str = "Words that do what they say";

/// Prompt shown above the stage before the first word.
pub const START_PROMPT: &str = "Press Start when you are ready";

/// Render the whole game screen.
pub fn render_game(frame: &mut Frame, orchestrator: &Orchestrator, hover: Hover, hits: &mut HitMap) {
    let [body, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
            .areas(frame.area());

    let doc = orchestrator.document();
    let hooks = orchestrator.affordances();
    let now = orchestrator.now();

    if let Some(lobby) = rendered(doc, hooks.lobby_view) {
        render_lobby(frame, doc, hooks, lobby, body, now, hits);
    }
    if let Some(playing) = rendered(doc, hooks.playing_view) {
        let (played, total) = orchestrator.progress();
        render_playing(frame, doc, hooks, playing, body, now, (played, total), hover, hits);
    }

    render_status(frame, status, status_hint(orchestrator));
}

fn rendered(doc: &Document, node: Option<NodeId>) -> Option<NodeId> {
    node.filter(|&n| doc.is_rendered(n))
}

fn render_lobby(
    frame: &mut Frame,
    doc: &Document,
    hooks: &Affordances,
    lobby: NodeId,
    area: Rect,
    now: Duration,
    hits: &mut HitMap,
) {
    let opacity = doc.effective_opacity(lobby, now);
    let [_, title, _, tagline, _, buttons, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(CONTROL_BAR_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(area);

    if let Some(style) = with_opacity(TITLE, opacity) {
        frame.render_widget(
            Paragraph::new(LOBBY_TITLE).style(style).alignment(Alignment::Center),
            title,
        );
    }
    if let Some(style) = with_opacity(MUTED_TEXT, opacity) {
        frame.render_widget(
            Paragraph::new(LOBBY_TAGLINE).style(style).alignment(Alignment::Center),
            tagline,
        );
    }
    render_buttons(frame, doc, &[hooks.enter], buttons, now, hits);
}

#[allow(clippy::too_many_arguments)]
fn render_playing(
    frame: &mut Frame,
    doc: &Document,
    hooks: &Affordances,
    playing: NodeId,
    area: Rect,
    now: Duration,
    (played, total): (usize, usize),
    hover: Hover,
    hits: &mut HitMap,
) {
    let [header, stage, controls] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(CONTROL_BAR_HEIGHT),
    ])
    .areas(area);

    let opacity = doc.effective_opacity(playing, now);
    if let Some(style) = with_opacity(SECTION_HEADER, opacity) {
        let text = if played == 0 {
            START_PROMPT.to_string()
        } else {
            format!("Word {played} of {total}")
        };
        frame.render_widget(
            Paragraph::new(text).style(style).alignment(Alignment::Center),
            header,
        );
    }

    if let Some(container) = rendered(doc, hooks.game_container) {
        render_stage(frame, doc, container, stage, now, hover, hits);
    }

    render_buttons(
        frame,
        doc,
        &[hooks.start, hooks.next, hooks.exit],
        controls,
        now,
        hits,
    );

    if let Some(overlay) = rendered(doc, hooks.end_overlay) {
        render_overlay(frame, doc, hooks, overlay, area, now, hits);
    }
}

/// Draw whatever word is mounted in `container` and register it for hover.
pub fn render_stage(
    frame: &mut Frame,
    doc: &Document,
    container: NodeId,
    area: Rect,
    now: Duration,
    hover: Hover,
    hits: &mut HitMap,
) {
    let node = doc.node(container);
    let Some(markup) = node.content() else {
        return;
    };
    let sheets: Vec<&StyleSheet> = doc.stylesheets().collect();
    let layout = WordLayout::new(markup, &sheets, hover, node.style().scale_at(now));
    let opacity = doc.effective_opacity(container, now);

    frame.render_widget(WordView::new(&layout, opacity), area);
    hits.set_word(area, layout);
}

fn render_overlay(
    frame: &mut Frame,
    doc: &Document,
    hooks: &Affordances,
    overlay: NodeId,
    area: Rect,
    now: Duration,
    hits: &mut HitMap,
) {
    let opacity = doc.effective_opacity(overlay, now);
    let Some(border) = with_opacity(SECTION_HEADER, opacity) else {
        return;
    };
    let popup = centered_rect(OVERLAY_WIDTH_PERCENT, OVERLAY_HEIGHT, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Session complete ")
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [_, message, _, buttons] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(CONTROL_BAR_HEIGHT),
    ])
    .areas(inner);

    let count = hooks
        .word_count
        .map(|node| doc.node(node).label().to_string())
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::from(format!("Words played: {count}"))).alignment(Alignment::Center),
        message,
    );
    render_buttons(frame, doc, &[hooks.restart, hooks.end_exit], buttons, now, hits);
}

fn status_hint(orchestrator: &Orchestrator) -> &'static str {
    let hooks = orchestrator.affordances();
    let doc = orchestrator.document();
    match orchestrator.view() {
        View::Lobby => "e enter · q quit",
        View::Playing if rendered(doc, hooks.end_overlay).is_some() => {
            "r restart · x exit · q quit"
        }
        View::Playing => "s start · n next · x exit · space hover · q quit",
    }
}

/// One-line muted hint bar.
pub fn render_status(frame: &mut Frame, area: Rect, hint: &str) {
    frame.render_widget(Paragraph::new(hint).style(MUTED_TEXT), area);
}
