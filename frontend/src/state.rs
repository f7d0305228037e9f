use std::collections::HashMap;

use log::warn;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::config;

/// Open/closed state of the mobile navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    open: bool,
}

impl NavState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Exclusive-open accordion. Holds the index of the open entry, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaqState {
    open: Option<usize>,
}

impl FaqState {
    pub fn with_open(open: Option<usize>) -> Self {
        Self { open }
    }

    #[cfg(test)]
    pub fn open_entry(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Close everything, then open `index` unless it was already open, either
    /// as the tracked entry or because the markup marks it open. Returns the
    /// entry left open.
    pub fn activate(&mut self, index: usize, marked_open: bool) -> Option<usize> {
        let was_open = marked_open || self.is_open(index);
        self.open = None;
        if !was_open {
            self.open = Some(index);
        }
        self.open
    }
}

/// Link type to URL mapping supplied by the page as the `LINKS` global.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LinkTable(HashMap<String, String>);

impl LinkTable {
    pub fn from_global() -> Self {
        let value = config::read_global("LINKS");
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        Self::from_js(value)
    }

    pub fn from_js(value: JsValue) -> Self {
        match serde_wasm_bindgen::from_value(value) {
            Ok(table) => table,
            Err(err) => {
                warn!("LINKS is not a string map, ignoring it: {}", err);
                Self::default()
            }
        }
    }

    /// Empty URLs count as absent.
    pub fn resolve(&self, link_type: &str) -> Option<&str> {
        self.0
            .get(link_type)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LinkTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Element id named by an in-page link, e.g. `"#faq"` gives `"faq"`.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_toggles_and_closes() {
        let mut nav = NavState::default();
        assert!(!nav.is_open());
        assert!(nav.toggle());
        assert!(nav.is_open());
        nav.close();
        assert!(!nav.is_open());
        nav.close();
        assert!(!nav.is_open());
        assert!(nav.toggle());
        assert!(!nav.toggle());
    }

    #[test]
    fn opening_another_entry_closes_the_first() {
        let mut faq = FaqState::default();
        assert_eq!(faq.activate(0, false), Some(0));
        assert_eq!(faq.activate(2, false), Some(2));
        assert!(!faq.is_open(0));
        assert!(faq.is_open(2));
    }

    #[test]
    fn clicking_the_open_entry_closes_all() {
        let mut faq = FaqState::default();
        faq.activate(1, false);
        assert_eq!(faq.activate(1, false), None);
        assert_eq!(faq.open_entry(), None);
        assert_eq!(faq.activate(1, false), Some(1));
    }

    #[test]
    fn faq_starts_from_markup_state() {
        let mut faq = FaqState::with_open(Some(3));
        assert!(faq.is_open(3));
        assert_eq!(faq.activate(3, false), None);
    }

    #[test]
    fn any_entry_marked_open_in_markup_closes_on_click() {
        // Items 0 and 2 both arrive open; only the first is tracked.
        let mut faq = FaqState::with_open(Some(0));
        assert_eq!(faq.activate(2, true), None);
        assert_eq!(faq.open_entry(), None);
        assert_eq!(faq.activate(2, false), Some(2));
    }

    #[test]
    fn link_table_resolves_known_types_only() {
        let table: LinkTable = [("telegram", "https://t.me/x"), ("empty", "")]
            .into_iter()
            .collect();
        assert_eq!(table.resolve("telegram"), Some("https://t.me/x"));
        assert_eq!(table.resolve("discord"), None);
        assert_eq!(table.resolve("empty"), None);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(LinkTable::default().is_empty());
    }

    #[test]
    fn link_table_deserializes_from_object() {
        let table: LinkTable = serde_json::from_str(r#"{"telegram": "https://t.me/x"}"#).unwrap();
        assert_eq!(table.resolve("telegram"), Some("https://t.me/x"));
    }

    #[test]
    fn fragment_target_strips_hash() {
        assert_eq!(fragment_target("#games"), Some("games"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target(""), None);
        assert_eq!(fragment_target("https://example.com/#games"), None);
    }
}
