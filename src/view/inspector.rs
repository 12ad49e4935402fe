//! Inspector screen: word list, test container and info panel.

use super::constants::{ALERT_WIDTH_PERCENT, INFO_PANEL_HEIGHT, SELECTOR_WIDTH, STATUS_BAR_HEIGHT};
use super::controls::centered_rect;
use super::game::{render_stage, render_status};
use super::hit::{HitMap, HitTarget};
use super::styles::{ALERT, MUTED_TEXT, SECTION_HEADER, SELECTED_ROW};
use super::word::Hover;
use crate::state::inspector::ids;
use crate::state::Inspector;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

const STATUS_HINT: &str = "j/k select · enter load · R reload · space hover · q quit";

/// Render the inspector.
pub fn render_inspector(frame: &mut Frame, inspector: &Inspector, hover: Hover, hits: &mut HitMap) {
    let [body, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
            .areas(frame.area());
    let [selector, right] =
        Layout::horizontal([Constraint::Length(SELECTOR_WIDTH), Constraint::Min(0)]).areas(body);
    let [stage, info] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(INFO_PANEL_HEIGHT)]).areas(right);

    render_selector(frame, inspector, selector, hits);

    let block = Block::default()
        .title(" Test container ")
        .borders(Borders::ALL)
        .border_style(SECTION_HEADER);
    let inner = block.inner(stage);
    frame.render_widget(block, stage);
    render_stage(
        frame,
        inspector.document(),
        inspector.presenter().container(),
        inner,
        Duration::ZERO,
        hover,
        hits,
    );

    render_info(frame, inspector, info);
    render_status(frame, status, STATUS_HINT);

    if let Some(message) = inspector.alert() {
        render_alert(frame, body, message);
    }
}

fn render_selector(frame: &mut Frame, inspector: &Inspector, area: Rect, hits: &mut HitMap) {
    let block = Block::default()
        .title(" Words ")
        .borders(Borders::ALL)
        .border_style(SECTION_HEADER);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selected = inspector.selected();
    for (index, option) in inspector.options().into_iter().enumerate() {
        let Ok(offset) = u16::try_from(index) else {
            break;
        };
        if offset >= inner.height {
            break;
        }
        let row = Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let line = if selected == Some(index) {
            Paragraph::new(format!("> {option}")).style(SELECTED_ROW)
        } else {
            Paragraph::new(format!("  {option}"))
        };
        frame.render_widget(line, row);
        hits.push(row, HitTarget::Option(index));
    }
}

fn render_info(frame: &mut Frame, inspector: &Inspector, area: Rect) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(SECTION_HEADER);

    let doc = inspector.document();
    let text = doc
        .get_element_by_id(ids::TEST_INFO)
        .map(|node| doc.node(node).label())
        .unwrap_or_default();

    let paragraph = if text.is_empty() {
        Paragraph::new("No word loaded").style(MUTED_TEXT)
    } else {
        Paragraph::new(text.lines().map(Line::from).collect::<Vec<_>>())
    };
    frame.render_widget(paragraph.block(block), area);
}

fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(ALERT_WIDTH_PERCENT, 5, area);
    frame.render_widget(Clear, popup);
    let alert = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled("Press Enter to dismiss", MUTED_TEXT),
    ])
    .style(ALERT)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Alert ")
            .borders(Borders::ALL)
            .border_style(ALERT),
    );
    frame.render_widget(alert, popup);
}
