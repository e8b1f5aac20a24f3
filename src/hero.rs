//! Hero labels for selection widgets
//!
//! Converts between a [`Hero`] and the text shown in the UI.

use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not an ASCII letter or digit
static NON_IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// A playable hero, identified by its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    /// Name as shown in game, e.g. "Li-Ming"
    pub primary_name: String,

    /// Name with punctuation removed, used for asset lookups, e.g. "LiMing"
    pub image_name: String,
}

/// Round-trips heroes through their display label
pub struct HeroConverter;

impl HeroConverter {
    /// Label for a hero; empty when there is none
    pub fn to_label(hero: Option<&Hero>) -> String {
        hero.map(|h| h.primary_name.clone()).unwrap_or_default()
    }

    /// Parse a label back into a hero. Blank or punctuation-only labels yield `None`.
    pub fn from_label(label: &str) -> Option<Hero> {
        let image_name = NON_IDENTIFIER_RE.replace_all(label, "").into_owned();
        if image_name.is_empty() {
            return None;
        }
        Some(Hero {
            primary_name: label.to_string(),
            image_name,
        })
    }
}
