//! Word stylesheets.
//!
//! A stylesheet is TOML text where every table is a class selector:
//!
//! ```toml
//! [word-game]
//! fg = "#e0e0e0"
//! bold = true
//!
//! [con]
//! spacing = 0
//! parent_hover = { spacing = 2 }
//! ```
//!
//! `hover` applies while the element itself is under the pointer,
//! `parent_hover` while the whole word is.

use crate::model::error::StyleSheetError;
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Properties a rule (or one of its hover variants) can set.
///
/// `None` means "not set here", so later rules only override what they name.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleProps {
    /// Foreground color (named or `#rrggbb`).
    #[serde(default)]
    pub fg: Option<String>,
    /// Background color.
    #[serde(default)]
    pub bg: Option<String>,
    /// Bold text.
    #[serde(default)]
    pub bold: Option<bool>,
    /// Italic text.
    #[serde(default)]
    pub italic: Option<bool>,
    /// Dimmed text.
    #[serde(default)]
    pub dim: Option<bool>,
    /// Blank columns inserted between letters.
    #[serde(default)]
    pub spacing: Option<u16>,
    /// Rows each letter is stretched over.
    #[serde(default)]
    pub height: Option<u16>,
}

impl RuleProps {
    /// Overlay every property `other` sets onto `self`.
    pub fn merge(&mut self, other: &RuleProps) {
        if other.fg.is_some() {
            self.fg.clone_from(&other.fg);
        }
        if other.bg.is_some() {
            self.bg.clone_from(&other.bg);
        }
        self.bold = other.bold.or(self.bold);
        self.italic = other.italic.or(self.italic);
        self.dim = other.dim.or(self.dim);
        self.spacing = other.spacing.or(self.spacing);
        self.height = other.height.or(self.height);
    }

    fn colors(&self) -> impl Iterator<Item = &String> {
        self.fg.iter().chain(self.bg.iter())
    }
}

/// A class rule with its optional hover variants.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    /// Foreground color (named or `#rrggbb`).
    #[serde(default)]
    pub fg: Option<String>,
    /// Background color.
    #[serde(default)]
    pub bg: Option<String>,
    /// Bold text.
    #[serde(default)]
    pub bold: Option<bool>,
    /// Italic text.
    #[serde(default)]
    pub italic: Option<bool>,
    /// Dimmed text.
    #[serde(default)]
    pub dim: Option<bool>,
    /// Blank columns inserted between letters.
    #[serde(default)]
    pub spacing: Option<u16>,
    /// Rows each letter is stretched over.
    #[serde(default)]
    pub height: Option<u16>,
    /// Applied while the element itself is hovered.
    #[serde(default)]
    pub hover: Option<RuleProps>,
    /// Applied while the enclosing word is hovered.
    #[serde(default)]
    pub parent_hover: Option<RuleProps>,
}

impl Rule {
    /// The unconditional part of the rule.
    pub fn base(&self) -> RuleProps {
        RuleProps {
            fg: self.fg.clone(),
            bg: self.bg.clone(),
            bold: self.bold,
            italic: self.italic,
            dim: self.dim,
            spacing: self.spacing,
            height: self.height,
        }
    }
}

/// Parsed stylesheet: rules keyed by class name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: BTreeMap<String, Rule>,
}

impl StyleSheet {
    /// Parse stylesheet text.
    ///
    /// # Errors
    ///
    /// Returns [`StyleSheetError::Syntax`] for malformed TOML or unknown
    /// properties and [`StyleSheetError::InvalidColor`] for colors ratatui
    /// cannot name.
    pub fn parse(text: &str) -> Result<Self, StyleSheetError> {
        let rules: BTreeMap<String, Rule> =
            toml::from_str(text).map_err(|e| StyleSheetError::Syntax(e.message().to_string()))?;

        for (selector, rule) in &rules {
            let base = rule.base();
            let variants = [Some(&base), rule.hover.as_ref(), rule.parent_hover.as_ref()];
            for value in variants.into_iter().flatten().flat_map(RuleProps::colors) {
                if Color::from_str(value).is_err() {
                    return Err(StyleSheetError::InvalidColor {
                        selector: selector.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(Self { rules })
    }

    /// Rule for a class, if the sheet defines one.
    pub fn rule(&self, class: &str) -> Option<&Rule> {
        self.rules.get(class)
    }

    /// Class selectors, sorted.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of rules in the sheet.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the sheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
