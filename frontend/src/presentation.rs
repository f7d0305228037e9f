//! Presentation decisions for the page behaviors.
//!
//! Everything here is a pure function of scroll offset, open state or
//! settings. The DOM adapter in [`crate::dom`] writes the resulting
//! [`PresentationState`] onto an element.

use std::fmt;

use crate::config::{self, Settings};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    TranslateY(f64),
    Scale(f64),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::TranslateY(px) => write!(f, "translateY({}px)", px),
            Transform::Scale(factor) => write!(f, "scale({})", factor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxHeight {
    /// Drops the inline value so the stylesheet decides.
    Unset,
    Px(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassChange {
    Add(&'static str),
    Remove(&'static str),
}

/// Inline style and class writes for one element. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationState {
    pub opacity: Option<f64>,
    pub transform: Option<Transform>,
    pub background: Option<String>,
    pub max_height: Option<MaxHeight>,
    pub transition: Option<&'static str>,
    pub cursor: Option<&'static str>,
    pub classes: Vec<ClassChange>,
}

impl PresentationState {
    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn transform(mut self, value: Transform) -> Self {
        self.transform = Some(value);
        self
    }

    pub fn max_height(mut self, value: MaxHeight) -> Self {
        self.max_height = Some(value);
        self
    }

    pub fn transition(mut self, value: &'static str) -> Self {
        self.transition = Some(value);
        self
    }

    pub fn class(mut self, change: ClassChange) -> Self {
        self.classes.push(change);
        self
    }
}

/// Sharp step at the threshold: the offset equal to the threshold still gets
/// the lighter tint.
pub fn header_background(offset: f64, settings: &Settings) -> PresentationState {
    let alpha = if offset > settings.header_threshold_px {
        settings.header_alpha_scrolled
    } else {
        settings.header_alpha_top
    };
    let (r, g, b) = config::HEADER_RGB;
    PresentationState {
        background: Some(format!("rgba({}, {}, {}, {})", r, g, b, alpha)),
        ..Default::default()
    }
}

pub fn hero_opacity(offset: f64, settings: &Settings) -> f64 {
    let opacity = 1.0 - offset / settings.hero_fade_distance_px;
    if settings.clamp_hero_opacity {
        opacity.clamp(0.0, 1.0)
    } else {
        opacity
    }
}

pub fn hero_parallax(offset: f64, settings: &Settings) -> PresentationState {
    PresentationState::default()
        .transform(Transform::TranslateY(offset * settings.parallax_rate))
        .opacity(hero_opacity(offset, settings))
}

pub fn reveal_hidden(settings: &Settings) -> PresentationState {
    PresentationState::default()
        .opacity(0.0)
        .transform(Transform::TranslateY(settings.reveal_offset_px))
        .transition(config::REVEAL_TRANSITION)
}

/// What an element becomes once it has been seen. Writing it again on later
/// intersections changes nothing.
pub fn reveal_visible() -> PresentationState {
    PresentationState::default()
        .opacity(1.0)
        .transform(Transform::TranslateY(0.0))
}

pub fn hover_enter(settings: &Settings) -> PresentationState {
    PresentationState::default().transform(Transform::Scale(settings.hover_scale))
}

pub fn hover_leave() -> PresentationState {
    PresentationState::default().transform(Transform::Scale(1.0))
}

pub fn open_class(open: bool) -> PresentationState {
    let change = if open {
        ClassChange::Add(config::OPEN_CLASS)
    } else {
        ClassChange::Remove(config::OPEN_CLASS)
    };
    PresentationState::default().class(change)
}

pub fn faq_answer_setup() -> PresentationState {
    PresentationState {
        max_height: Some(MaxHeight::Unset),
        transition: Some(config::FAQ_TRANSITION),
        ..Default::default()
    }
}

pub fn faq_question_setup() -> PresentationState {
    PresentationState {
        cursor: Some("pointer"),
        ..Default::default()
    }
}

/// Answer region of an entry after an accordion click. `content_height` is the
/// answer's natural height and only matters for the open entry.
pub fn faq_answer(open: bool, content_height: i32) -> PresentationState {
    if open {
        PresentationState::default().max_height(MaxHeight::Px(content_height as f64))
    } else {
        PresentationState::default().max_height(MaxHeight::Unset)
    }
}

pub fn body_fade_start() -> PresentationState {
    PresentationState::default()
        .opacity(0.0)
        .transition(config::BODY_TRANSITION)
}

pub fn body_fade_end() -> PresentationState {
    PresentationState::default().opacity(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_a_two_valued_step() {
        let settings = Settings::default();
        let top = Some("rgba(26, 26, 46, 0.95)".to_string());
        let scrolled = Some("rgba(26, 26, 46, 0.98)".to_string());

        assert_eq!(header_background(0.0, &settings).background, top);
        assert_eq!(header_background(100.0, &settings).background, top);
        assert_eq!(header_background(100.5, &settings).background, scrolled);
        assert_eq!(header_background(4000.0, &settings).background, scrolled);
    }

    #[test]
    fn hero_fades_linearly() {
        let settings = Settings::default();
        let state = hero_parallax(250.0, &settings);
        assert_eq!(state.opacity, Some(0.5));
        assert_eq!(state.transform, Some(Transform::TranslateY(125.0)));
        assert_eq!(hero_opacity(0.0, &settings), 1.0);
    }

    #[test]
    fn hero_opacity_clamps_past_fade_distance() {
        let mut settings = Settings::default();
        assert_eq!(hero_opacity(500.0, &settings), 0.0);
        assert_eq!(hero_opacity(750.0, &settings), 0.0);

        settings.clamp_hero_opacity = false;
        assert_eq!(hero_opacity(750.0, &settings), -0.5);
    }

    #[test]
    fn reveal_goes_from_hidden_to_visible() {
        let settings = Settings::default();
        let hidden = reveal_hidden(&settings);
        assert_eq!(hidden.opacity, Some(0.0));
        assert_eq!(hidden.transform.unwrap().to_string(), "translateY(30px)");
        assert_eq!(hidden.transition, Some(config::REVEAL_TRANSITION));

        let visible = reveal_visible();
        assert_eq!(visible.opacity, Some(1.0));
        assert_eq!(visible.transform.unwrap().to_string(), "translateY(0px)");
        assert_eq!(reveal_visible(), visible);
    }

    #[test]
    fn hover_scales_and_restores() {
        let settings = Settings::default();
        assert_eq!(
            hover_enter(&settings).transform.unwrap().to_string(),
            "scale(1.05)"
        );
        assert_eq!(hover_leave().transform.unwrap().to_string(), "scale(1)");
    }

    #[test]
    fn faq_answer_expands_only_when_open() {
        assert_eq!(faq_answer(true, 180).max_height, Some(MaxHeight::Px(180.0)));
        assert_eq!(faq_answer(false, 180).max_height, Some(MaxHeight::Unset));
    }

    #[test]
    fn faq_setup_collapses_answers() {
        let answer = faq_answer_setup();
        assert_eq!(answer.max_height, Some(MaxHeight::Unset));
        assert_eq!(answer.transition, Some("max-height 0.3s ease"));
        assert!(answer.classes.is_empty());

        let question = faq_question_setup();
        assert_eq!(question.cursor, Some("pointer"));
        assert_eq!(question.max_height, None);
    }

    #[test]
    fn body_fades_from_hidden_to_visible() {
        let start = body_fade_start();
        assert_eq!(start.opacity, Some(0.0));
        assert_eq!(start.transition, Some("opacity 0.5s"));

        let end = body_fade_end();
        assert_eq!(end.opacity, Some(1.0));
        assert_eq!(end.transition, None);
    }

    #[test]
    fn open_class_adds_or_removes() {
        assert_eq!(open_class(true).classes, vec![ClassChange::Add("open")]);
        assert_eq!(open_class(false).classes, vec![ClassChange::Remove("open")]);
    }
}
