use log::info;
use serde::Serialize;
use web_sys::Element;

use crate::config;

pub const UNKNOWN_GAME: &str = "Unknown Game";

/// Diagnostic record for a click on a game card or its button. Only logged;
/// an analytics sink can pick it up from here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameClick {
    pub game: String,
    pub source: ClickSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickSource {
    Card,
    Button,
}

impl GameClick {
    pub fn new(title: Option<String>, source: ClickSource) -> Self {
        Self {
            game: resolve_title(title),
            source,
        }
    }

    pub fn emit(&self) {
        let payload = serde_json::to_string(self).unwrap_or_default();
        info!("Game clicked: {} {}", self.game, payload);
    }
}

pub fn resolve_title(title: Option<String>) -> String {
    title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_GAME.to_string())
}

/// Title text for a clicked element. Looks inside the element first, then
/// inside the enclosing card for buttons that carry no title of their own.
pub fn title_for(element: &Element) -> Option<String> {
    let own = text_of(element, config::GAME_TITLE);
    if own.is_some() {
        return own;
    }
    element
        .closest(config::GAME_CARD)
        .ok()
        .flatten()
        .filter(|card| card != element)
        .and_then(|card| text_of(&card, config::GAME_TITLE))
}

fn text_of(root: &Element, selector: &str) -> Option<String> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|title| title.text_content())
        .filter(|text| !text.is_empty())
}

pub fn source_of(element: &Element) -> ClickSource {
    if element.matches(config::GAME_CARD).unwrap_or(false) {
        ClickSource::Card
    } else {
        ClickSource::Button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_title_falls_back() {
        assert_eq!(resolve_title(None), "Unknown Game");
        assert_eq!(resolve_title(Some(String::new())), "Unknown Game");
        assert_eq!(resolve_title(Some("Sweet Bonanza".into())), "Sweet Bonanza");
    }

    #[test]
    fn record_serializes_with_source() {
        let click = GameClick::new(Some("Gates of Olympus".into()), ClickSource::Button);
        let json = serde_json::to_value(&click).unwrap();
        assert_eq!(json["game"], "Gates of Olympus");
        assert_eq!(json["source"], "button");
    }
}
