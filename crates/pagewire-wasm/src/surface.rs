//! [`DocumentSurface`] over the live browser document.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use pagewire::{
    DocumentSurface, DomEvent, EventHandler, EventKind, ListenTarget, LocalTask, ScrollAlign,
    ScrollMotion, SurfaceError, SurfaceResult, TimerCallback, TimerHandle,
};
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

/// The page the module was loaded into.
///
/// Listeners registered through it live as long as the page; their closures
/// are handed to the browser and never dropped.
#[derive(Debug, Clone)]
pub struct WebSurface {
    window: Window,
    document: Document,
}

impl WebSurface {
    /// Bind to the global `window` and its `document`.
    pub fn from_global() -> SurfaceResult<Self> {
        let window = web_sys::window().ok_or(SurfaceError::Unavailable("window"))?;
        let document = window
            .document()
            .ok_or(SurfaceError::Unavailable("document"))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Best-effort message out of a thrown JS value.
fn js_reason(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn behavior(motion: ScrollMotion) -> ScrollBehavior {
    match motion {
        ScrollMotion::Smooth => ScrollBehavior::Smooth,
        ScrollMotion::Instant => ScrollBehavior::Instant,
    }
}

fn logical_position(align: ScrollAlign) -> ScrollLogicalPosition {
    match align {
        ScrollAlign::Start => ScrollLogicalPosition::Start,
        ScrollAlign::Center => ScrollLogicalPosition::Center,
        ScrollAlign::End => ScrollLogicalPosition::End,
        ScrollAlign::Nearest => ScrollLogicalPosition::Nearest,
    }
}

#[async_trait(?Send)]
impl DocumentSurface for WebSurface {
    type Node = Element;

    fn query_all(&self, selector: &str) -> SurfaceResult<Vec<Element>> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|err| SurfaceError::InvalidSelector {
                selector: selector.to_string(),
                reason: js_reason(&err),
            })?;
        Ok((0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn query(&self, selector: &str) -> SurfaceResult<Option<Element>> {
        self.document
            .query_selector(selector)
            .map_err(|err| SurfaceError::InvalidSelector {
                selector: selector.to_string(),
                reason: js_reason(&err),
            })
    }

    fn query_within(&self, scope: &Element, selector: &str) -> SurfaceResult<Option<Element>> {
        scope
            .query_selector(selector)
            .map_err(|err| SurfaceError::InvalidSelector {
                selector: selector.to_string(),
                reason: js_reason(&err),
            })
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            warn!(class, reason = %js_reason(&err), "classList.add failed");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            warn!(class, reason = %js_reason(&err), "classList.remove failed");
        }
    }

    fn toggle_class(&self, node: &Element, class: &str) -> bool {
        let classes = node.class_list();
        match classes.toggle(class) {
            Ok(present) => present,
            Err(err) => {
                warn!(class, reason = %js_reason(&err), "classList.toggle failed");
                classes.contains(class)
            }
        }
    }

    fn inner_text(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => html.inner_text(),
            None => node.text_content().unwrap_or_default(),
        }
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) -> SurfaceResult<()> {
        let html = node
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| SurfaceError::dom("style", "element has no inline style"))?;
        html.style()
            .set_property(property, value)
            .map_err(|err| SurfaceError::dom("style.setProperty", js_reason(&err)))
    }

    fn create_element(&self, tag: &str) -> SurfaceResult<Element> {
        self.document
            .create_element(tag)
            .map_err(|err| SurfaceError::dom("createElement", js_reason(&err)))
    }

    fn prepend_child(&self, parent: &Element, child: &Element) -> SurfaceResult<()> {
        parent
            .prepend_with_node_1(child)
            .map_err(|err| SurfaceError::dom("prepend", js_reason(&err)))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> SurfaceResult<()> {
        parent
            .append_child(child)
            .map(drop)
            .map_err(|err| SurfaceError::dom("appendChild", js_reason(&err)))
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|html| f64::from(html.offset_top()))
            .unwrap_or_default()
    }

    fn client_height(&self, node: &Element) -> f64 {
        f64::from(node.client_height())
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn scroll_to(&self, top: f64, motion: ScrollMotion) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(behavior(motion));
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_into_view(&self, node: &Element, motion: ScrollMotion, block: ScrollAlign) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(behavior(motion));
        options.set_block(logical_position(block));
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn listen(
        &self,
        target: ListenTarget<Element>,
        kind: EventKind,
        mut handler: EventHandler,
    ) -> SurfaceResult<()> {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let mut outcome = DomEvent::new();
            handler(&mut outcome);
            if outcome.default_prevented() {
                event.prevent_default();
            }
        });

        let event_target: &EventTarget = match &target {
            ListenTarget::Window => self.window.as_ref(),
            ListenTarget::Document => self.document.as_ref(),
            ListenTarget::Node(element) => element.as_ref(),
        };
        event_target
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .map_err(|err| SurfaceError::dom("addEventListener", js_reason(&err)))?;

        // Listeners are never removed; the page owns them from here on.
        closure.forget();
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> SurfaceResult<TimerHandle> {
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let callback = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map(TimerHandle)
            .map_err(|err| SurfaceError::dom("setTimeout", js_reason(&err)))
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0);
    }

    async fn write_clipboard(&self, text: &str) -> SurfaceResult<()> {
        // `navigator.clipboard` is undefined outside secure contexts, so
        // look it up dynamically instead of through the typed binding.
        let navigator = self.window.navigator();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(|_| SurfaceError::Unavailable("navigator.clipboard"))?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(SurfaceError::Unavailable("navigator.clipboard"));
        }

        let write_text: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .ok()
            .and_then(|value| value.dyn_into().ok())
            .ok_or(SurfaceError::Unavailable("navigator.clipboard.writeText"))?;

        let promise: Promise = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(|err| SurfaceError::ClipboardRejected(js_reason(&err)))?
            .dyn_into()
            .map_err(|_| {
                SurfaceError::ClipboardRejected("writeText did not return a promise".to_string())
            })?;

        JsFuture::from(promise)
            .await
            .map(drop)
            .map_err(|err| SurfaceError::ClipboardRejected(js_reason(&err)))
    }

    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
