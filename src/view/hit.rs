//! Mouse hit testing against the last rendered frame.
//!
//! Renderers record where clickable things landed; the event loop asks the
//! map what is under the pointer. Later regions sit on top of earlier ones,
//! so overlays registered after the view they cover win.

use super::word::{Hover, WordLayout};
use crate::surface::NodeId;
use ratatui::layout::{Position, Rect};

/// Something a click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A page control (button).
    Node(NodeId),
    /// Row of the inspector word list.
    Option(usize),
}

/// Clickable regions and the hoverable word of one frame.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
    word: Option<(Rect, WordLayout)>,
}

impl HitMap {
    /// Forget the previous frame.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.word = None;
    }

    /// Register a clickable region.
    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if !area.is_empty() {
            self.regions.push((area, target));
        }
    }

    /// Register the word drawn in `area`.
    pub fn set_word(&mut self, area: Rect, layout: WordLayout) {
        self.word = Some((area, layout));
    }

    /// Topmost target under the pointer.
    pub fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    /// Hover state for a pointer at `column`, `row`.
    pub fn hover_at(&self, column: u16, row: u16) -> Hover {
        let Some((area, layout)) = &self.word else {
            return Hover::NONE;
        };
        if !layout.placement(*area).contains(Position::new(column, row)) {
            return Hover::NONE;
        }
        Hover {
            word: true,
            fragment: layout.fragment_at(*area, column, row),
        }
    }

    /// Number of clickable regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether nothing is clickable.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Document, NodeKind};

    #[test]
    fn later_regions_win() {
        let mut doc = Document::new();
        let below = doc.create_element("below", NodeKind::Button, None);
        let above = doc.create_element("above", NodeKind::Button, None);

        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 3), HitTarget::Node(below));
        hits.push(Rect::new(5, 1, 10, 3), HitTarget::Node(above));

        assert_eq!(hits.target_at(1, 1), Some(HitTarget::Node(below)));
        assert_eq!(hits.target_at(6, 1), Some(HitTarget::Node(above)));
        assert_eq!(hits.target_at(30, 1), None);
    }

    #[test]
    fn empty_regions_are_ignored() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(3, 3, 0, 1), HitTarget::Option(0));
        assert!(hits.is_empty());
    }

    #[test]
    fn no_word_means_no_hover() {
        let hits = HitMap::default();
        assert_eq!(hits.hover_at(0, 0), Hover::NONE);
    }

    #[test]
    fn clear_drops_everything() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 1, 1), HitTarget::Option(2));
        hits.set_word(Rect::new(0, 0, 1, 1), WordLayout::default());
        hits.clear();
        assert_eq!(hits.len(), 0);
        assert_eq!(hits.target_at(0, 0), None);
        assert_eq!(hits.hover_at(0, 0), Hover::NONE);
    }
}
