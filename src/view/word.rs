//! Word rendering: resolves stylesheet rules against the mounted markup and
//! lays the letters out on a cell grid.
//!
//! Terminal stand-ins for the typographic effects words use:
//! - `spacing` is the number of blank columns after each letter,
//! - `height` stretches a letter over that many rows, bottom-aligned,
//! - scale adds (or removes) spacing around every letter.

use super::styles::{rule_style, with_opacity};
use crate::model::{Markup, RuleProps, StyleSheet};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
};
use unicode_width::UnicodeWidthChar;

/// Which parts of the word are under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hover {
    /// The word as a whole is hovered.
    pub word: bool,
    /// Index of the hovered fragment.
    pub fragment: Option<usize>,
}

impl Hover {
    /// Nothing hovered.
    pub const NONE: Hover = Hover {
        word: false,
        fragment: None,
    };

    /// Whole word hovered without a specific fragment.
    pub const WORD: Hover = Hover {
        word: true,
        fragment: None,
    };
}

/// One laid-out letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Column offset from the left edge of the word.
    pub x: u16,
    /// The letter.
    pub symbol: char,
    /// Columns the letter occupies.
    pub width: u16,
    /// Rows the letter is stretched over.
    pub height: u16,
    /// Resolved style.
    pub style: Style,
    /// Fragment the letter belongs to.
    pub fragment: usize,
}

/// A word laid out at a given hover state and scale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordLayout {
    glyphs: Vec<Glyph>,
    width: u16,
    height: u16,
}

impl WordLayout {
    /// Lay out `markup` using every attached stylesheet in order.
    pub fn new(markup: &Markup, sheets: &[&StyleSheet], hover: Hover, scale: f32) -> Self {
        let extra = scale_spacing(scale);
        let mut glyphs = Vec::new();
        let mut x: u16 = 0;
        let mut height: u16 = 1;

        for (index, fragment) in markup.fragments().iter().enumerate() {
            let props = resolve(markup, fragment.class.as_deref(), sheets, hover, index);
            let style = rule_style(&props);
            let spacing = (i32::from(props.spacing.unwrap_or(0)) + extra).max(0);
            let spacing = u16::try_from(spacing).unwrap_or(0);
            let glyph_height = props.height.unwrap_or(1).max(1);
            height = height.max(glyph_height);

            for symbol in fragment.text.chars() {
                let width = symbol.width().unwrap_or(0);
                let Ok(width) = u16::try_from(width) else {
                    continue;
                };
                if width == 0 {
                    continue;
                }
                glyphs.push(Glyph {
                    x,
                    symbol,
                    width,
                    height: glyph_height,
                    style,
                    fragment: index,
                });
                x = x.saturating_add(width).saturating_add(spacing);
            }
        }

        // Trailing spacing after the last letter is not part of the word.
        let width = glyphs.last().map_or(0, |g| g.x + g.width);
        Self {
            glyphs,
            width,
            height,
        }
    }

    /// Laid-out letters, left to right.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Total width in columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Total height in rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The word's text as laid out (letters only).
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.symbol).collect()
    }

    /// Where the word lands when centered in `area`.
    pub fn placement(&self, area: Rect) -> Rect {
        let width = self.width.min(area.width);
        let height = self.height.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    /// Fragment under column `column` of the word's placement in `area`.
    pub fn fragment_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        let placed = self.placement(area);
        if !placed.contains(Position::new(column, row)) {
            return None;
        }
        let offset = column - placed.x;
        self.glyphs
            .iter()
            .rev()
            .find(|g| g.x <= offset)
            .map(|g| g.fragment)
    }
}

/// Compose the properties for one fragment.
///
/// Root-class rules come first so fragments inherit them; the fragment's own
/// class follows. Within a rule the base applies, then `parent_hover` while
/// the word is hovered, then `hover` while the rule's own element is.
fn resolve(
    markup: &Markup,
    class: Option<&str>,
    sheets: &[&StyleSheet],
    hover: Hover,
    index: usize,
) -> RuleProps {
    let mut props = RuleProps::default();
    for sheet in sheets {
        for root in markup.classes() {
            if let Some(rule) = sheet.rule(root) {
                props.merge(&rule.base());
                if hover.word {
                    if let Some(variant) = &rule.hover {
                        props.merge(variant);
                    }
                }
            }
        }
        if let Some(rule) = class.and_then(|c| sheet.rule(c)) {
            props.merge(&rule.base());
            if hover.word {
                if let Some(variant) = &rule.parent_hover {
                    props.merge(variant);
                }
            }
            if hover.fragment == Some(index) {
                if let Some(variant) = &rule.hover {
                    props.merge(variant);
                }
            }
        }
    }
    props
}

/// Extra columns after every letter for a scale factor.
fn scale_spacing(scale: f32) -> i32 {
    ((scale - 1.0) * 5.0).round() as i32
}

/// Widget drawing a laid-out word centered in its area.
pub struct WordView<'a> {
    layout: &'a WordLayout,
    opacity: f32,
}

impl<'a> WordView<'a> {
    /// Draw `layout` at `opacity`.
    pub fn new(layout: &'a WordLayout, opacity: f32) -> Self {
        Self { layout, opacity }
    }
}

impl Widget for WordView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let placed = self.layout.placement(area);
        if placed.is_empty() {
            return;
        }
        let baseline = placed.bottom() - 1;

        for glyph in &self.layout.glyphs {
            let Some(style) = with_opacity(glyph.style, self.opacity) else {
                return;
            };
            let x = placed.x + glyph.x;
            if x + glyph.width > placed.right() {
                break;
            }
            let mut symbol = [0u8; 4];
            let symbol = glyph.symbol.encode_utf8(&mut symbol);
            for row in 0..glyph.height.min(placed.height) {
                if let Some(cell) = buf.cell_mut(Position::new(x, baseline - row)) {
                    cell.set_symbol(symbol).set_style(style);
                }
            }
        }
    }
}
