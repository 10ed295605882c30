//! Browser-specific WASM tests
//!
//! These run in a real document (`wasm-pack test --headless --chrome`). Each
//! test builds its own fixture under a unique container and scopes the
//! selectors to it, so controllers mounted by earlier tests never see it.

use pagewire::{DocumentSurface, PageConfig, PageController};
use pagewire_wasm::{WebSurface, mount, parse_config};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, EventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(id: &str, markup: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_id(id);
    container.set_inner_html(markup);
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn scoped_config(id: &str) -> PageConfig {
    let mut config = PageConfig::default();
    let scope = format!("#{id}");
    let selectors = &mut config.selectors;
    selectors.anchor_links = format!("{scope} a[href^=\"#\"]");
    selectors.sections = format!("{scope} section");
    selectors.nav_links = format!("{scope} nav ul li a");
    selectors.sidebar_links = format!("{scope} .doc-sidebar a");
    selectors.nav = format!("{scope} nav");
    selectors.code_blocks = format!("{scope} pre");
    config
}

fn cancelable_click() -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    Event::new_with_event_init_dict("click", &init).unwrap()
}

fn field(value: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn test_surface_queries_and_classes() {
    fixture("wp-query", r#"<p class="a">one</p><p>two</p>"#);
    let surface = WebSurface::from_global().unwrap();

    let paragraphs = surface.query_all("#wp-query p").unwrap();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(surface.inner_text(&paragraphs[0]), "one");

    assert!(surface.has_class(&paragraphs[0], "a"));
    assert!(surface.toggle_class(&paragraphs[1], "a"));
    assert!(!surface.toggle_class(&paragraphs[1], "a"));

    assert!(surface.query_all("#wp-query p[").is_err());
}

#[wasm_bindgen_test]
fn test_parsed_document_is_not_loading() {
    let surface = WebSurface::from_global().unwrap();
    assert!(!surface.is_loading());
}

#[wasm_bindgen_test]
async fn test_document_ready_resolves_on_parsed_document() {
    let surface = WebSurface::from_global().unwrap();
    pagewire::document_ready(&surface).await.unwrap();
}

#[wasm_bindgen_test]
fn test_copy_buttons_are_attached() {
    let container = fixture(
        "wp-copy",
        "<pre><code>cargo build</code></pre><pre><code>cargo test</code></pre>",
    );
    let surface = Rc::new(WebSurface::from_global().unwrap());
    let mut config = scoped_config("wp-copy");
    config.classes.copy_button = "wp-copy-button".to_string();
    let controller = PageController::new(surface, config).unwrap();

    let summary = controller.mount().unwrap();
    assert_eq!(summary.code_blocks, 2);

    let buttons = container.query_selector_all("pre > button.wp-copy-button").unwrap();
    assert_eq!(buttons.length(), 2);
    let first = buttons.item(0).unwrap();
    assert_eq!(first.text_content().as_deref(), Some("Copy"));

    let pre = container.query_selector("pre").unwrap().unwrap();
    let style = pre.dyn_into::<web_sys::HtmlElement>().unwrap().style();
    assert_eq!(style.get_property_value("position").unwrap(), "relative");
}

#[wasm_bindgen_test]
fn test_anchor_click_is_always_prevented() {
    let container = fixture(
        "wp-anchor",
        r##"<a id="wp-anchor-missing" href="#wp-nowhere">gone</a>"##,
    );
    let surface = Rc::new(WebSurface::from_global().unwrap());
    let controller = PageController::new(surface, scoped_config("wp-anchor")).unwrap();
    assert_eq!(controller.mount().unwrap().anchor_links, 1);

    let link = container.query_selector("a").unwrap().unwrap();
    // dispatchEvent returns false once a listener called preventDefault.
    let not_prevented = link.dispatch_event(&cancelable_click()).unwrap();
    assert!(!not_prevented);
}

#[wasm_bindgen_test]
fn test_sidebar_click_marks_one_link() {
    let container = fixture(
        "wp-sidebar",
        r#"<aside class="doc-sidebar"><a href="/a.html">A</a><a href="/b.html">B</a></aside>"#,
    );
    let surface = Rc::new(WebSurface::from_global().unwrap());
    let controller = PageController::new(surface, scoped_config("wp-sidebar")).unwrap();
    controller.mount().unwrap();

    let links = container.query_selector_all("a").unwrap();
    let second = links.item(1).unwrap().dyn_into::<Element>().unwrap();
    // Stop the navigation so the test page stays put.
    second
        .add_event_listener_with_callback(
            "click",
            Closure::<dyn FnMut(Event)>::new(|event: Event| event.prevent_default())
                .into_js_value()
                .unchecked_ref(),
        )
        .unwrap();
    second.dispatch_event(&cancelable_click()).unwrap();

    assert_eq!(container.query_selector_all("a.active").unwrap().length(), 1);
    assert!(second.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn test_config_object_is_parsed() {
    let raw = js_sys::JSON::parse(r#"{"scroll":{"headerOffset":90},"copy":{"label":"Copiar"}}"#)
        .unwrap();
    let config = parse_config(raw).unwrap();

    assert_eq!(config.scroll.header_offset, 90.0);
    assert_eq!(config.copy.label, "Copiar");
    assert_eq!(config.copy.copied_label, "Copied!");
}

#[wasm_bindgen_test]
async fn test_invalid_config_rejects_with_config_error() {
    let raw = js_sys::JSON::parse(r#"{"scroll":{"mobileBreakpoint":0}}"#).unwrap();

    let err = mount(raw).await.unwrap_err();
    assert_eq!(field(&err, "kind").as_string().as_deref(), Some("configError"));
}

#[wasm_bindgen_test]
async fn test_unknown_config_field_rejects() {
    let raw = js_sys::JSON::parse(r#"{"scrol":{}}"#).unwrap();

    let err = mount(raw).await.unwrap_err();
    assert_eq!(field(&err, "kind").as_string().as_deref(), Some("configError"));
}

/// Config object scoping every document-wide selector under `#{id}`.
fn scoped_config_object(id: &str) -> JsValue {
    let json = format!(
        r#"{{"selectors":{{
            "anchorLinks":"#{id} a[href^='#']",
            "sections":"#{id} section",
            "navLinks":"#{id} nav ul li a",
            "sidebarLinks":"#{id} .doc-sidebar a",
            "nav":"#{id} nav",
            "codeBlocks":"#{id} pre"
        }}}}"#
    );
    js_sys::JSON::parse(&json).unwrap()
}

#[wasm_bindgen_test]
async fn test_rejected_selector_does_not_claim_page() {
    let raw = js_sys::JSON::parse(r#"{"selectors":{"codeBlocks":"pre["}}"#).unwrap();
    let was_mounted = pagewire_wasm::is_mounted();

    let err = mount(raw).await.unwrap_err();
    let kind = field(&err, "kind").as_string();
    // Autostart may have claimed the page already; otherwise the selector
    // is what fails and the page stays unclaimed.
    if !was_mounted {
        assert_eq!(kind.as_deref(), Some("surfaceError"));
        assert!(!pagewire_wasm::is_mounted());
    }
}

#[wasm_bindgen_test]
async fn test_second_mount_rejects() {
    fixture("wp-mount", "<pre><code>ls</code></pre>");

    // With autostart the start hook may already have claimed the page, so
    // only the second call's outcome is certain.
    let _ = mount(scoped_config_object("wp-mount")).await;
    assert!(pagewire_wasm::is_mounted());

    let err = mount(scoped_config_object("wp-mount")).await.unwrap_err();
    assert_eq!(
        field(&err, "kind").as_string().as_deref(),
        Some("alreadyMounted")
    );
}
