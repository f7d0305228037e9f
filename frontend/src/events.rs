use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Scroll,
    MouseEnter,
    MouseLeave,
    Load,
    DomContentLoaded,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Load => "load",
            EventKind::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// Anything events can be subscribed on: the window, the document, elements.
pub trait EventSource {
    fn subscribe<F>(&self, kind: EventKind, handler: F) -> Option<Listener>
    where
        F: FnMut(Event) + 'static;
}

impl<T: AsRef<EventTarget>> EventSource for T {
    fn subscribe<F>(&self, kind: EventKind, handler: F) -> Option<Listener>
    where
        F: FnMut(Event) + 'static,
    {
        let target: &EventTarget = self.as_ref();
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Listener {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

/// A registered handler. Dropping it removes the listener.
pub struct Listener {
    target: EventTarget,
    kind: EventKind,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.kind.as_str(),
            self.callback.as_ref().unchecked_ref(),
        );
    }
}
