//! Test utilities for pagewire.
//!
//! [`FakeSurface`] is an in-memory [`DocumentSurface`]: a tree of elements
//! with hand-set layout, a listener registry you can dispatch into, a virtual
//! clock for timers, a scripted clipboard and a `LocalPool` executor for
//! spawned tasks. It is compiled for this crate's own tests and, behind the
//! `test-utils` feature, for integration tests.
//!
//! Dispatching an event or advancing the clock runs spawned tasks until they
//! stall, the way a browser drains microtasks after each callback.
//!
//! The selector engine understands what the controller's default config
//! uses: type, `.class`, `#id`, `[attr]`, `[attr="v"]`, `[attr^="v"]`,
//! compounds of those, and the descendant combinator. Quoted attribute
//! values may not contain whitespace.

use async_trait::async_trait;
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{SurfaceError, SurfaceResult};
use crate::surface::{
    DocumentSurface, DomEvent, EventHandler, EventKind, ListenTarget, LocalTask, ScrollAlign,
    ScrollMotion, TimerCallback, TimerHandle,
};

/// Handle to an element in a [`FakeSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FakeNode(usize);

/// How the fake clipboard answers writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMode {
    #[default]
    Resolve,
    Reject,
}

#[derive(Debug, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    inner_html: String,
    styles: BTreeMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
    offset_top: f64,
    client_height: f64,
}

struct Listener {
    target: ListenTarget<FakeNode>,
    kind: EventKind,
    handler: Rc<RefCell<EventHandler>>,
}

struct Timer {
    handle: TimerHandle,
    due: Duration,
    callback: TimerCallback,
}

/// In-memory document for tests.
pub struct FakeSurface {
    elements: RefCell<Vec<Element>>,
    listeners: RefCell<Vec<Listener>>,
    timers: RefCell<Vec<Timer>>,
    now: Cell<Duration>,
    next_timer: Cell<i32>,
    scroll_y: Cell<f64>,
    viewport_width: Cell<f64>,
    loading: Cell<bool>,
    scroll_calls: RefCell<Vec<(f64, ScrollMotion)>>,
    scroll_into_view_calls: RefCell<Vec<(FakeNode, ScrollMotion, ScrollAlign)>>,
    clipboard_mode: Cell<ClipboardMode>,
    clipboard_writes: RefCell<Vec<String>>,
    clipboard: RefCell<Option<String>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSurface {
    /// An empty document with a `body`, a 1024px wide viewport, scrolled to
    /// the top and finished loading.
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            elements: RefCell::new(vec![Element {
                tag: "body".to_string(),
                ..Element::default()
            }]),
            listeners: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
            now: Cell::new(Duration::ZERO),
            next_timer: Cell::new(1),
            scroll_y: Cell::new(0.0),
            viewport_width: Cell::new(1024.0),
            loading: Cell::new(false),
            scroll_calls: RefCell::new(Vec::new()),
            scroll_into_view_calls: RefCell::new(Vec::new()),
            clipboard_mode: Cell::new(ClipboardMode::Resolve),
            clipboard_writes: RefCell::new(Vec::new()),
            clipboard: RefCell::new(None),
            pool: RefCell::new(pool),
            spawner,
        }
    }

    // ------------------------------------------------------------------
    // Building the document
    // ------------------------------------------------------------------

    pub fn body(&self) -> FakeNode {
        FakeNode(0)
    }

    /// Append a new `tag` element to `parent` and return it.
    pub fn add(&self, parent: FakeNode, tag: &str) -> FakeNode {
        let mut elements = self.elements.borrow_mut();
        let index = elements.len();
        elements.push(Element {
            tag: tag.to_string(),
            parent: Some(parent.0),
            ..Element::default()
        });
        elements[parent.0].children.push(index);
        FakeNode(index)
    }

    pub fn set_attribute(&self, node: FakeNode, name: &str, value: &str) {
        self.elements.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_id(&self, node: FakeNode, id: &str) {
        self.set_attribute(node, "id", id);
    }

    /// Set `offsetTop` and `clientHeight`.
    pub fn set_layout(&self, node: FakeNode, top: f64, height: f64) {
        let mut elements = self.elements.borrow_mut();
        elements[node.0].offset_top = top;
        elements[node.0].client_height = height;
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.viewport_width.set(width);
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    pub fn set_clipboard_mode(&self, mode: ClipboardMode) {
        self.clipboard_mode.set(mode);
    }

    // ------------------------------------------------------------------
    // Driving events and time
    // ------------------------------------------------------------------

    /// Dispatch `kind` to every listener on `target`, then drain spawned
    /// tasks. Listeners added during dispatch are not called.
    pub fn dispatch(&self, target: ListenTarget<FakeNode>, kind: EventKind) -> DomEvent {
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind && l.target == target)
            .map(|l| Rc::clone(&l.handler))
            .collect();

        let mut event = DomEvent::new();
        for handler in handlers {
            (&mut *handler.borrow_mut())(&mut event);
        }
        self.run_until_stalled();
        event
    }

    pub fn click(&self, node: FakeNode) -> DomEvent {
        self.dispatch(ListenTarget::Node(node), EventKind::Click)
    }

    /// Set the scroll position and fire a window scroll event.
    pub fn scroll_window_to(&self, y: f64) {
        self.scroll_y.set(y);
        self.dispatch(ListenTarget::Window, EventKind::Scroll);
    }

    /// Set the viewport width and fire a window resize event.
    pub fn resize(&self, width: f64) {
        self.viewport_width.set(width);
        self.dispatch(ListenTarget::Window, EventKind::Resize);
    }

    /// Finish loading and fire `DOMContentLoaded`.
    pub fn finish_loading(&self) {
        self.loading.set(false);
        self.dispatch(ListenTarget::Document, EventKind::DomContentLoaded);
    }

    /// Move the virtual clock forward, firing due timers in order.
    pub fn advance(&self, by: Duration) {
        let deadline = self.now.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= deadline)
                    .min_by_key(|(_, t)| (t.due, t.handle.0))
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            let Some(timer) = next else {
                break;
            };
            self.now.set(timer.due);
            (timer.callback)();
            self.run_until_stalled();
        }
        self.now.set(deadline);
    }

    /// Run spawned tasks until none can make progress.
    pub fn run_until_stalled(&self) {
        // Already draining further up the stack; that loop will pick up new work.
        if let Ok(mut pool) = self.pool.try_borrow_mut() {
            pool.run_until_stalled();
        }
    }

    // ------------------------------------------------------------------
    // Inspecting state
    // ------------------------------------------------------------------

    pub fn children(&self, node: FakeNode) -> Vec<FakeNode> {
        self.elements.borrow()[node.0]
            .children
            .iter()
            .map(|&i| FakeNode(i))
            .collect()
    }

    pub fn tag(&self, node: FakeNode) -> String {
        self.elements.borrow()[node.0].tag.clone()
    }

    pub fn text(&self, node: FakeNode) -> String {
        self.inner_text(&node)
    }

    pub fn inner_html(&self, node: FakeNode) -> String {
        self.elements.borrow()[node.0].inner_html.clone()
    }

    pub fn style(&self, node: FakeNode, property: &str) -> Option<String> {
        self.elements.borrow()[node.0].styles.get(property).cloned()
    }

    pub fn scroll_calls(&self) -> Vec<(f64, ScrollMotion)> {
        self.scroll_calls.borrow().clone()
    }

    pub fn scroll_into_view_calls(&self) -> Vec<(FakeNode, ScrollMotion, ScrollAlign)> {
        self.scroll_into_view_calls.borrow().clone()
    }

    /// Every text a clipboard write was attempted with.
    pub fn clipboard_writes(&self) -> Vec<String> {
        self.clipboard_writes.borrow().clone()
    }

    /// Contents after the last successful write.
    pub fn clipboard_text(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listeners_for(&self, target: &ListenTarget<FakeNode>, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind && &l.target == target)
            .count()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    // ------------------------------------------------------------------
    // Tree internals
    // ------------------------------------------------------------------

    fn detach(elements: &mut [Element], child: usize) {
        if let Some(parent) = elements[child].parent.take() {
            elements[parent].children.retain(|&c| c != child);
        }
    }

    fn insert(&self, parent: FakeNode, child: FakeNode, at_start: bool) -> SurfaceResult<()> {
        let mut elements = self.elements.borrow_mut();
        if child.0 == 0 || self_or_ancestor(&elements, parent.0, child.0) {
            return Err(SurfaceError::dom(
                "insertBefore",
                "the new child is an ancestor of the parent",
            ));
        }
        Self::detach(&mut elements, child.0);
        elements[child.0].parent = Some(parent.0);
        let children = &mut elements[parent.0].children;
        if at_start {
            children.insert(0, child.0);
        } else {
            children.push(child.0);
        }
        Ok(())
    }

    fn descendants(elements: &[Element], root: usize, out: &mut Vec<usize>) {
        for &child in &elements[root].children {
            out.push(child);
            Self::descendants(elements, child, out);
        }
    }

    fn select(&self, scope: usize, selector: &str) -> SurfaceResult<Vec<FakeNode>> {
        let chain = parse_selector(selector)?;
        let elements = self.elements.borrow();
        let mut candidates = Vec::new();
        Self::descendants(&elements, scope, &mut candidates);
        Ok(candidates
            .into_iter()
            .filter(|&i| matches_chain(&elements, i, &chain))
            .map(FakeNode)
            .collect())
    }
}

fn self_or_ancestor(elements: &[Element], mut node: usize, candidate: usize) -> bool {
    loop {
        if node == candidate {
            return true;
        }
        match elements[node].parent {
            Some(parent) => node = parent,
            None => return false,
        }
    }
}

#[async_trait(?Send)]
impl DocumentSurface for FakeSurface {
    type Node = FakeNode;

    fn query_all(&self, selector: &str) -> SurfaceResult<Vec<FakeNode>> {
        // Include the body itself, as document.querySelectorAll would.
        let chain = parse_selector(selector)?;
        let mut found = Vec::new();
        if matches_chain(&self.elements.borrow(), 0, &chain) {
            found.push(FakeNode(0));
        }
        found.extend(self.select(0, selector)?);
        Ok(found)
    }

    fn query(&self, selector: &str) -> SurfaceResult<Option<FakeNode>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn query_within(&self, scope: &FakeNode, selector: &str) -> SurfaceResult<Option<FakeNode>> {
        Ok(self.select(scope.0, selector)?.into_iter().next())
    }

    fn element_by_id(&self, id: &str) -> Option<FakeNode> {
        let elements = self.elements.borrow();
        let mut all = vec![0];
        Self::descendants(&elements, 0, &mut all);
        all.into_iter()
            .find(|&i| elements[i].attributes.get("id").map(String::as_str) == Some(id))
            .map(FakeNode)
    }

    fn attribute(&self, node: &FakeNode, name: &str) -> Option<String> {
        let elements = self.elements.borrow();
        let element = &elements[node.0];
        if name == "class" {
            return (!element.classes.is_empty()).then(|| element.classes.join(" "));
        }
        element.attributes.get(name).cloned()
    }

    fn has_class(&self, node: &FakeNode, class: &str) -> bool {
        self.elements.borrow()[node.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn add_class(&self, node: &FakeNode, class: &str) {
        let mut elements = self.elements.borrow_mut();
        let classes = &mut elements[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &FakeNode, class: &str) {
        self.elements.borrow_mut()[node.0]
            .classes
            .retain(|c| c != class);
    }

    fn toggle_class(&self, node: &FakeNode, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn inner_text(&self, node: &FakeNode) -> String {
        fn collect(elements: &[Element], index: usize, out: &mut String) {
            out.push_str(&elements[index].text);
            for &child in &elements[index].children {
                collect(elements, child, out);
            }
        }
        let mut out = String::new();
        collect(&self.elements.borrow(), node.0, &mut out);
        out
    }

    fn set_text(&self, node: &FakeNode, text: &str) {
        let mut elements = self.elements.borrow_mut();
        for child in std::mem::take(&mut elements[node.0].children) {
            elements[child].parent = None;
        }
        elements[node.0].text = text.to_string();
        elements[node.0].inner_html = text.to_string();
    }

    fn set_inner_html(&self, node: &FakeNode, html: &str) {
        self.elements.borrow_mut()[node.0].inner_html = html.to_string();
    }

    fn set_style(&self, node: &FakeNode, property: &str, value: &str) -> SurfaceResult<()> {
        self.elements.borrow_mut()[node.0]
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn create_element(&self, tag: &str) -> SurfaceResult<FakeNode> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(SurfaceError::dom("createElement", format!("invalid tag '{}'", tag)));
        }
        let mut elements = self.elements.borrow_mut();
        elements.push(Element {
            tag: tag.to_string(),
            ..Element::default()
        });
        Ok(FakeNode(elements.len() - 1))
    }

    fn prepend_child(&self, parent: &FakeNode, child: &FakeNode) -> SurfaceResult<()> {
        self.insert(*parent, *child, true)
    }

    fn append_child(&self, parent: &FakeNode, child: &FakeNode) -> SurfaceResult<()> {
        self.insert(*parent, *child, false)
    }

    fn offset_top(&self, node: &FakeNode) -> f64 {
        self.elements.borrow()[node.0].offset_top
    }

    fn client_height(&self, node: &FakeNode) -> f64 {
        self.elements.borrow()[node.0].client_height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width.get()
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn scroll_to(&self, top: f64, motion: ScrollMotion) {
        self.scroll_calls.borrow_mut().push((top, motion));
        self.scroll_y.set(top.max(0.0));
    }

    fn scroll_into_view(&self, node: &FakeNode, motion: ScrollMotion, block: ScrollAlign) {
        self.scroll_into_view_calls
            .borrow_mut()
            .push((*node, motion, block));
    }

    fn listen(
        &self,
        target: ListenTarget<FakeNode>,
        kind: EventKind,
        handler: EventHandler,
    ) -> SurfaceResult<()> {
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> SurfaceResult<TimerHandle> {
        let handle = TimerHandle(self.next_timer.get());
        self.next_timer.set(handle.0 + 1);
        self.timers.borrow_mut().push(Timer {
            handle,
            due: self.now.get() + delay,
            callback,
        });
        Ok(handle)
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.timers.borrow_mut().retain(|t| t.handle != handle);
    }

    async fn write_clipboard(&self, text: &str) -> SurfaceResult<()> {
        self.clipboard_writes.borrow_mut().push(text.to_string());
        match self.clipboard_mode.get() {
            ClipboardMode::Resolve => {
                *self.clipboard.borrow_mut() = Some(text.to_string());
                Ok(())
            }
            ClipboardMode::Reject => Err(SurfaceError::ClipboardRejected(
                "NotAllowedError: Write permission denied.".to_string(),
            )),
        }
    }

    fn spawn_local(&self, task: LocalTask) {
        // The pool lives as long as the surface, so spawning cannot fail.
        let _ = self.spawner.spawn_local(task);
    }
}

// ----------------------------------------------------------------------
// Selector engine
// ----------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum AttrTest {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, AttrTest)>,
}

fn invalid(selector: &str, reason: impl Into<String>) -> SurfaceError {
    SurfaceError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.into(),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn parse_attribute(selector: &str, body: &str) -> SurfaceResult<(String, AttrTest)> {
    let (name, test) = if let Some((name, value)) = body.split_once("^=") {
        (name, AttrTest::Prefix(unquote(selector, value)?))
    } else if let Some((name, value)) = body.split_once('=') {
        (name, AttrTest::Equals(unquote(selector, value)?))
    } else {
        (body, AttrTest::Exists)
    };
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(invalid(selector, format!("bad attribute name '{}'", name)));
    }
    Ok((name.to_string(), test))
}

fn unquote(selector: &str, value: &str) -> SurfaceResult<String> {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        Ok(value[1..value.len() - 1].to_string())
    } else if !value.is_empty() && value.chars().all(is_ident_char) {
        Ok(value.to_string())
    } else {
        Err(invalid(selector, format!("bad attribute value '{}'", value)))
    }
}

fn parse_compound(selector: &str, part: &str) -> SurfaceResult<Compound> {
    let mut compound = Compound::default();
    let mut chars = part.chars().peekable();

    if chars.peek() == Some(&'*') {
        chars.next();
    } else {
        let tag = take_ident(&mut chars);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }

    while let Some(c) = chars.next() {
        match c {
            '.' | '#' => {
                let ident = take_ident(&mut chars);
                if ident.is_empty() {
                    return Err(invalid(selector, format!("expected name after '{}'", c)));
                }
                if c == '.' {
                    compound.classes.push(ident);
                } else {
                    compound.id = Some(ident);
                }
            }
            '[' => {
                let mut body = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }
                if !closed {
                    return Err(invalid(selector, "unterminated attribute selector"));
                }
                compound.attributes.push(parse_attribute(selector, &body)?);
            }
            other => {
                return Err(invalid(selector, format!("unsupported character '{}'", other)));
            }
        }
    }

    Ok(compound)
}

fn parse_selector(selector: &str) -> SurfaceResult<Vec<Compound>> {
    let chain = selector
        .split_whitespace()
        .map(|part| parse_compound(selector, part))
        .collect::<SurfaceResult<Vec<_>>>()?;
    if chain.is_empty() {
        return Err(invalid(selector, "empty selector"));
    }
    Ok(chain)
}

fn matches_compound(element: &Element, compound: &Compound) -> bool {
    if let Some(tag) = &compound.tag {
        if !element.tag.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if element.attributes.get("id") != Some(id) {
            return false;
        }
    }
    if !compound
        .classes
        .iter()
        .all(|class| element.classes.contains(class))
    {
        return false;
    }
    compound.attributes.iter().all(|(name, test)| {
        let value = if name == "class" {
            (!element.classes.is_empty()).then(|| element.classes.join(" "))
        } else {
            element.attributes.get(name).cloned()
        };
        match (test, value) {
            (_, None) => false,
            (AttrTest::Exists, Some(_)) => true,
            (AttrTest::Equals(expected), Some(value)) => &value == expected,
            (AttrTest::Prefix(prefix), Some(value)) => value.starts_with(prefix.as_str()),
        }
    })
}

/// Descendant combinators only, so matching ancestors greedily from the
/// right is exact.
fn matches_chain(elements: &[Element], index: usize, chain: &[Compound]) -> bool {
    let Some((last, rest)) = chain.split_last() else {
        return false;
    };
    if !matches_compound(&elements[index], last) {
        return false;
    }

    let mut remaining = rest;
    let mut ancestor = elements[index].parent;
    while let Some((wanted, before)) = remaining.split_last() {
        let Some(current) = ancestor else {
            return false;
        };
        if matches_compound(&elements[current], wanted) {
            remaining = before;
        }
        ancestor = elements[current].parent;
    }
    true
}
