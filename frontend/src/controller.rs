use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::config::{self, Settings};
use crate::dom;
use crate::events::{EventKind, EventSource, Listener};
use crate::presentation;
use crate::state::{fragment_target, FaqState, LinkTable, NavState};
use crate::tracking::{self, GameClick};

thread_local! {
    static CONTROLLER: RefCell<Option<PageInteractionController>> = RefCell::new(None);
}

/// Reads settings and links from the page, binds everything and keeps the
/// controller alive for the lifetime of the page.
pub fn start() -> Result<(), JsValue> {
    let mut controller = PageInteractionController::new(Settings::from_global(), LinkTable::from_global())?;

    controller.bind_load_fade_in();
    controller.bind_header_shading();
    controller.bind_hero_parallax();

    if controller.document.ready_state() == "loading" {
        debug!("Document still loading, deferring element bindings");
        let ready = controller.document.subscribe(EventKind::DomContentLoaded, |_| {
            CONTROLLER.with(|slot| {
                if let Some(controller) = slot.borrow_mut().as_mut() {
                    controller.attach();
                }
            });
        });
        controller.listeners.extend(ready);
    } else {
        controller.attach();
    }

    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
    Ok(())
}

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

struct FaqEntry {
    item: HtmlElement,
    answer: Option<HtmlElement>,
}

pub struct PageInteractionController {
    window: Window,
    document: Document,
    settings: Rc<Settings>,
    links: LinkTable,
    nav: Rc<RefCell<NavState>>,
    faq: Rc<RefCell<FaqState>>,
    listeners: Vec<Listener>,
    reveal: Option<RevealObserver>,
    attached: bool,
}

impl PageInteractionController {
    pub fn new(settings: Settings, links: LinkTable) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self {
            window,
            document,
            settings: Rc::new(settings),
            links,
            nav: Rc::new(RefCell::new(NavState::default())),
            faq: Rc::new(RefCell::new(FaqState::default())),
            listeners: Vec::new(),
            reveal: None,
            attached: false,
        })
    }

    /// Bindings that query page elements. Runs once the DOM is parsed; later
    /// calls do nothing.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;

        self.apply_link_bindings();
        self.bind_reveal_on_view();
        self.bind_smooth_scroll();
        self.bind_mobile_nav_toggle();
        self.bind_faq_accordion();
        self.bind_button_hover_scale();
        self.bind_click_tracking();
        info!("Page interactions ready ({} listeners)", self.listeners.len());
    }

    pub fn bind_smooth_scroll(&mut self) {
        let anchors: Vec<HtmlElement> = dom::query_all(&self.document, config::FRAGMENT_LINKS)
            .into_iter()
            .filter(|anchor| !anchor.has_attribute(config::LINK_ATTR))
            .collect();

        for anchor in &anchors {
            let document = self.document.clone();
            let link = anchor.clone();
            self.listeners.extend(anchor.subscribe(EventKind::Click, move |event| {
                event.prevent_default();
                let href = link.get_attribute("href").unwrap_or_default();
                let target = fragment_target(&href).and_then(|id| document.get_element_by_id(id));
                if let Some(target) = target {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }));
        }
        debug!("Smooth scrolling bound to {} anchors", anchors.len());
    }

    pub fn bind_header_shading(&mut self) {
        let window = self.window.clone();
        let document = self.document.clone();
        let settings = Rc::clone(&self.settings);
        self.listeners.extend(self.window.subscribe(EventKind::Scroll, move |_| {
            if let Some(header) = dom::query(&document, config::HEADER) {
                let offset = window.scroll_y().unwrap_or(0.0);
                dom::render(&header, &presentation::header_background(offset, &settings));
            }
        }));
    }

    pub fn bind_reveal_on_view(&mut self) {
        let callback = Closure::wrap(Box::new(|entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                if let Ok(element) = entry.target().dyn_into::<HtmlElement>() {
                    dom::render(&element, &presentation::reveal_visible());
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(self.settings.reveal_threshold));
        options.set_root_margin(&self.settings.reveal_root_margin);

        let observer = match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => observer,
            Err(err) => {
                warn!("IntersectionObserver unavailable, skipping reveal: {:?}", err);
                return;
            }
        };

        let elements = dom::query_all(&self.document, &config::REVEAL_TARGETS.join(", "));
        let hidden = presentation::reveal_hidden(&self.settings);
        for element in &elements {
            dom::render(element, &hidden);
            observer.observe(element);
        }
        debug!("Observing {} elements for reveal", elements.len());

        self.reveal = Some(RevealObserver {
            observer,
            _callback: callback,
        });
    }

    pub fn apply_link_bindings(&self) {
        if self.links.is_empty() {
            debug!("No LINKS configured on this page");
        }
        let elements = dom::query_all(&self.document, config::LINKED_ELEMENTS);
        let mut resolved = 0;
        for element in &elements {
            let Some(link_type) = element.get_attribute(config::LINK_ATTR) else {
                continue;
            };
            match self.links.resolve(&link_type) {
                Some(url) => {
                    let _ = element.set_attribute("href", url);
                    resolved += 1;
                }
                None => debug!("No link configured for '{}'", link_type),
            }
        }
        debug!(
            "Resolved {} of {} links ({} configured)",
            resolved,
            elements.len(),
            self.links.len()
        );
    }

    pub fn bind_mobile_nav_toggle(&mut self) {
        let (toggle, nav) = match (
            dom::query(&self.document, config::NAV_TOGGLE),
            dom::query(&self.document, config::NAV),
        ) {
            (Some(toggle), Some(nav)) => (toggle, nav),
            _ => {
                debug!("No mobile navigation on this page");
                return;
            }
        };

        {
            let state = Rc::clone(&self.nav);
            let (toggle_el, nav_el) = (toggle.clone(), nav.clone());
            self.listeners.extend(toggle.subscribe(EventKind::Click, move |_| {
                let open = state.borrow_mut().toggle();
                show_nav(&nav_el, &toggle_el, open);
            }));
        }

        for link in dom::select_all(&nav, config::NAV_LINKS) {
            let state = Rc::clone(&self.nav);
            let (toggle_el, nav_el) = (toggle.clone(), nav.clone());
            self.listeners.extend(link.subscribe(EventKind::Click, move |_| {
                if state.borrow().is_open() {
                    state.borrow_mut().close();
                    show_nav(&nav_el, &toggle_el, false);
                }
            }));
        }
    }

    pub fn bind_faq_accordion(&mut self) {
        let items = dom::query_all(&self.document, config::FAQ_ITEM);
        let entries: Rc<Vec<FaqEntry>> = Rc::new(
            items
                .iter()
                .map(|item| FaqEntry {
                    item: item.clone(),
                    answer: dom::select_in(item, config::FAQ_ANSWER),
                })
                .collect(),
        );

        let initially_open = items
            .iter()
            .position(|item| item.class_list().contains(config::OPEN_CLASS));
        *self.faq.borrow_mut() = FaqState::with_open(initially_open);

        let mut bound = 0;
        for (index, entry) in entries.iter().enumerate() {
            let question = dom::select_in(&entry.item, config::FAQ_QUESTION);
            let (Some(question), Some(answer)) = (question, entry.answer.as_ref()) else {
                continue;
            };
            dom::render(&question, &presentation::faq_question_setup());
            dom::render(answer, &presentation::faq_answer_setup());

            let state = Rc::clone(&self.faq);
            let entries = Rc::clone(&entries);
            self.listeners.extend(question.subscribe(EventKind::Click, move |_| {
                let marked_open = entries[index].item.class_list().contains(config::OPEN_CLASS);
                let open = state.borrow_mut().activate(index, marked_open);
                for (i, entry) in entries.iter().enumerate() {
                    let is_open = open == Some(i);
                    dom::render(&entry.item, &presentation::open_class(is_open));
                    if let Some(answer) = &entry.answer {
                        dom::render(answer, &presentation::faq_answer(is_open, answer.scroll_height()));
                    }
                }
            }));
            bound += 1;
        }
        debug!("FAQ accordion bound to {} of {} items", bound, entries.len());
    }

    pub fn bind_button_hover_scale(&mut self) {
        for button in dom::query_all(&self.document, config::HOVER_BUTTONS) {
            let (el, settings) = (button.clone(), Rc::clone(&self.settings));
            self.listeners.extend(button.subscribe(EventKind::MouseEnter, move |_| {
                dom::render(&el, &presentation::hover_enter(&settings));
            }));
            let el = button.clone();
            self.listeners.extend(button.subscribe(EventKind::MouseLeave, move |_| {
                dom::render(&el, &presentation::hover_leave());
            }));
        }
    }

    pub fn bind_hero_parallax(&mut self) {
        let window = self.window.clone();
        let document = self.document.clone();
        let settings = Rc::clone(&self.settings);
        self.listeners.extend(self.window.subscribe(EventKind::Scroll, move |_| {
            if let Some(hero) = dom::query(&document, config::HERO) {
                let offset = window.scroll_y().unwrap_or(0.0);
                dom::render(&hero, &presentation::hero_parallax(offset, &settings));
            }
        }));
    }

    /// Fades the body in once resources have loaded. The module can start
    /// after `load` already fired, in which case the fade runs right away.
    pub fn bind_load_fade_in(&mut self) {
        let delay = self.settings.load_fade_delay_ms;
        if load_finished(&self.document.ready_state()) {
            debug!("Page already loaded, fading in now");
            fade_in_body(&self.document, delay);
            return;
        }
        let document = self.document.clone();
        self.listeners.extend(self.window.subscribe(EventKind::Load, move |_| {
            fade_in_body(&document, delay);
        }));
    }

    pub fn bind_click_tracking(&mut self) {
        for element in dom::query_all(&self.document, config::TRACKED_CLICKS) {
            let el = element.clone();
            self.listeners.extend(element.subscribe(EventKind::Click, move |_| {
                GameClick::new(tracking::title_for(&el), tracking::source_of(&el)).emit();
            }));
        }
    }
}

fn load_finished(ready_state: &str) -> bool {
    ready_state == "complete"
}

fn fade_in_body(document: &Document, delay: u32) {
    let Some(body) = document.body() else {
        return;
    };
    dom::render(&body, &presentation::body_fade_start());
    Timeout::new(delay, move || {
        dom::render(&body, &presentation::body_fade_end());
    })
    .forget();
}

fn show_nav(nav: &HtmlElement, toggle: &HtmlElement, open: bool) {
    let state = presentation::open_class(open);
    dom::render(nav, &state);
    dom::render(toggle, &state);
}
