use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::presentation::{ClassChange, MaxHeight, PresentationState};

/// Writes `state` onto the element's inline style and class list.
pub fn apply(element: &HtmlElement, state: &PresentationState) -> Result<(), JsValue> {
    let style = element.style();
    if let Some(opacity) = state.opacity {
        style.set_property("opacity", &opacity.to_string())?;
    }
    if let Some(transform) = state.transform {
        style.set_property("transform", &transform.to_string())?;
    }
    if let Some(background) = &state.background {
        style.set_property("background", background)?;
    }
    match state.max_height {
        Some(MaxHeight::Px(px)) => style.set_property("max-height", &format!("{}px", px))?,
        Some(MaxHeight::Unset) => {
            style.remove_property("max-height")?;
        }
        None => {}
    }
    if let Some(transition) = state.transition {
        style.set_property("transition", transition)?;
    }
    if let Some(cursor) = state.cursor {
        style.set_property("cursor", cursor)?;
    }

    let classes = element.class_list();
    for change in &state.classes {
        match change {
            ClassChange::Add(name) => classes.add_1(name)?,
            ClassChange::Remove(name) => classes.remove_1(name)?,
        }
    }
    Ok(())
}

/// [`apply`], logging instead of failing. A rejected write only costs a
/// visual effect.
pub fn render(element: &HtmlElement, state: &PresentationState) {
    if let Err(err) = apply(element, state) {
        warn!("Failed to apply {:?}: {:?}", state, err);
    }
}

pub fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn select_all(root: &Element, selector: &str) -> Vec<HtmlElement> {
    root.query_selector_all(selector)
        .map(html_elements)
        .unwrap_or_default()
}

pub fn select_in(root: &Element, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    document
        .query_selector_all(selector)
        .map(html_elements)
        .unwrap_or_default()
}

pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}
