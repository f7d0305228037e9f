use log::{warn, Level};
use serde::Deserialize;
use web_sys::js_sys::{self, Reflect};
use wasm_bindgen::JsValue;

// Selectors and class markers used by the page markup.
pub const FRAGMENT_LINKS: &str = "a[href^=\"#\"]";
pub const LINK_ATTR: &str = "data-link";
pub const LINKED_ELEMENTS: &str = "[data-link]";
pub const HEADER: &str = ".header";
pub const HERO: &str = ".hero";
pub const NAV: &str = ".nav";
pub const NAV_TOGGLE: &str = ".nav-toggle";
pub const NAV_LINKS: &str = "a";
pub const FAQ_ITEM: &str = ".faq-item";
pub const FAQ_QUESTION: &str = ".faq-question";
pub const FAQ_ANSWER: &str = ".faq-answer";
pub const HOVER_BUTTONS: &str = ".btn, .btn-game, .btn-telegram";
pub const GAME_CARD: &str = ".game-card";
pub const GAME_TITLE: &str = ".game-title";
pub const TRACKED_CLICKS: &str = ".game-card, .btn-game";
pub const REVEAL_TARGETS: &[&str] = &[
    ".game-card",
    ".advantage-card",
    ".benefit-item",
    ".step",
    ".faq-item",
    ".review-card",
];

pub const OPEN_CLASS: &str = "open";

/// Header tint, without alpha.
pub const HEADER_RGB: (u8, u8, u8) = (26, 26, 46);

pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
pub const FAQ_TRANSITION: &str = "max-height 0.3s ease";
pub const BODY_TRANSITION: &str = "opacity 0.5s";

/// Name of the optional global object overriding [`Settings`].
pub const SETTINGS_GLOBAL: &str = "PAGE_INTERACTIONS";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Tunables for the page behaviors. Every field has a default, so a partial
/// `PAGE_INTERACTIONS` object only overrides what it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub header_threshold_px: f64,
    pub header_alpha_top: f64,
    pub header_alpha_scrolled: f64,
    pub parallax_rate: f64,
    pub hero_fade_distance_px: f64,
    pub clamp_hero_opacity: bool,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub reveal_offset_px: f64,
    pub hover_scale: f64,
    pub load_fade_delay_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            header_threshold_px: 100.0,
            header_alpha_top: 0.95,
            header_alpha_scrolled: 0.98,
            parallax_rate: 0.5,
            hero_fade_distance_px: 500.0,
            clamp_hero_opacity: true,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            reveal_offset_px: 30.0,
            hover_scale: 1.05,
            load_fade_delay_ms: 100,
        }
    }
}

impl Settings {
    /// Reads overrides from the `PAGE_INTERACTIONS` global, if the page
    /// defines one.
    pub fn from_global() -> Self {
        let value = read_global(SETTINGS_GLOBAL);
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value(value) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Ignoring invalid {}: {}", SETTINGS_GLOBAL, err);
                Self::default()
            }
        }
    }
}

/// Looks up a global binding by name. `window` properties are read directly;
/// top-level `const` declarations are not on `window`, so those go through a
/// global-scope eval. A page whose CSP forbids eval just gets `undefined`.
pub fn read_global(name: &str) -> JsValue {
    if !is_identifier(name) {
        return JsValue::UNDEFINED;
    }
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .unwrap_or(JsValue::UNDEFINED);
    if !value.is_undefined() {
        return value;
    }
    let source = format!(
        "typeof {name} === 'undefined' ? undefined : {name}",
        name = name
    );
    js_sys::eval(&source).unwrap_or(JsValue::UNDEFINED)
}

/// Only plain JS identifiers are ever evaluated.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_behavior() {
        let settings = Settings::default();
        assert_eq!(settings.header_threshold_px, 100.0);
        assert_eq!(settings.header_alpha_top, 0.95);
        assert_eq!(settings.header_alpha_scrolled, 0.98);
        assert_eq!(settings.hero_fade_distance_px, 500.0);
        assert_eq!(settings.reveal_root_margin, "0px 0px -50px 0px");
        assert_eq!(settings.load_fade_delay_ms, 100);
        assert!(settings.clamp_hero_opacity);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"header_threshold_px": 40, "clamp_hero_opacity": false}"#)
                .unwrap();
        assert_eq!(settings.header_threshold_px, 40.0);
        assert!(!settings.clamp_hero_opacity);
        assert_eq!(settings.hover_scale, 1.05);
        assert_eq!(settings.reveal_threshold, 0.1);
    }

    #[test]
    fn only_identifiers_are_looked_up() {
        assert!(is_identifier("LINKS"));
        assert!(is_identifier(SETTINGS_GLOBAL));
        assert!(is_identifier("_cfg$2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("LINKS; alert(1)"));
        assert!(!is_identifier("a.b"));
    }

    #[test]
    fn reveal_targets_cover_faq_items() {
        assert!(REVEAL_TARGETS.contains(&FAQ_ITEM));
        assert!(REVEAL_TARGETS.contains(&GAME_CARD));
    }
}
