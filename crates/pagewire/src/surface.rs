//! Document surface abstraction.
//!
//! Every behavior talks to the page through [`DocumentSurface`] instead of
//! reaching for globals. The browser binding (`pagewire-wasm`) implements it
//! over `web-sys`; tests use the in-memory
//! [`FakeSurface`](crate::test_utils::FakeSurface).
//!
//! The trait stays close to the DOM: selectors are CSS selectors,
//! nodes are opaque handles, and listeners are boxed closures. Anything that
//! needs judgement (which section is current, whether a toggle exists) lives
//! in the behaviors, not in the surface.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use std::fmt;
use std::time::Duration;

use crate::error::SurfaceResult;

/// A unit of work the surface drives to completion on the local executor.
pub type LocalTask = LocalBoxFuture<'static, ()>;

/// Callback invoked for each dispatched event.
pub type EventHandler = Box<dyn FnMut(&mut DomEvent)>;

/// Callback invoked once when a timer fires.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget<N> {
    /// The global window (scroll, resize)
    Window,
    /// The document itself (DOMContentLoaded)
    Document,
    /// A specific element
    Node(N),
}

/// Events the controller listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    Resize,
    DomContentLoaded,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a handler is allowed to do to the event being dispatched.
///
/// The surface applies the outcome after the handler returns, so handlers
/// stay independent of the host's event type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DomEvent {
    default_prevented: bool,
}

impl DomEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the host's default action (following a link, for instance).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Scroll animation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMotion {
    Smooth,
    Instant,
}

/// Block alignment for [`DocumentSurface::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    Center,
    End,
    Nearest,
}

/// Handle to a pending timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Host document capability.
///
/// Methods that can only fail on a broken host (bad selector, DOM exception)
/// return [`SurfaceResult`]. Layout reads and class mutation are infallible,
/// matching the DOM's own contract for them.
#[async_trait(?Send)]
pub trait DocumentSurface: 'static {
    /// Opaque element handle.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> SurfaceResult<Vec<Self::Node>>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> SurfaceResult<Option<Self::Node>>;

    /// First descendant of `scope` matching `selector`.
    fn query_within(&self, scope: &Self::Node, selector: &str)
    -> SurfaceResult<Option<Self::Node>>;

    /// Element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Flip `class` and return whether it is now present.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Rendered text of the element (`innerText`).
    fn inner_text(&self, node: &Self::Node) -> String;

    fn set_text(&self, node: &Self::Node, text: &str);

    fn set_inner_html(&self, node: &Self::Node, html: &str);

    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> SurfaceResult<()>;

    fn create_element(&self, tag: &str) -> SurfaceResult<Self::Node>;

    /// Insert `child` as the first child of `parent`.
    fn prepend_child(&self, parent: &Self::Node, child: &Self::Node) -> SurfaceResult<()>;

    /// Insert `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> SurfaceResult<()>;

    /// Distance from the document top to the element (`offsetTop`).
    fn offset_top(&self, node: &Self::Node) -> f64;

    fn client_height(&self, node: &Self::Node) -> f64;

    /// Current vertical scroll position of the viewport.
    fn scroll_y(&self) -> f64;

    /// Viewport width (`innerWidth`).
    fn viewport_width(&self) -> f64;

    /// Whether the document is still being parsed (`readyState == "loading"`).
    fn is_loading(&self) -> bool;

    fn scroll_to(&self, top: f64, motion: ScrollMotion);

    /// Scroll `node` into view within its nearest scrollable ancestor.
    fn scroll_into_view(&self, node: &Self::Node, motion: ScrollMotion, block: ScrollAlign);

    fn listen(
        &self,
        target: ListenTarget<Self::Node>,
        kind: EventKind,
        handler: EventHandler,
    ) -> SurfaceResult<()>;

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> SurfaceResult<TimerHandle>;

    /// Cancel a pending timer. Cancelling a fired or unknown timer is a no-op.
    fn clear_timeout(&self, handle: TimerHandle);

    /// Write `text` to the system clipboard.
    async fn write_clipboard(&self, text: &str) -> SurfaceResult<()>;

    /// Run `task` on the host's local executor without blocking the caller.
    fn spawn_local(&self, task: LocalTask);
}
