//! Mounting: readiness, idempotence and configuration.

mod common;

use common::docs_page;
use pagewire::{
    DocumentSurface, EventKind, ListenTarget, PageConfig, PageController, PageError, SurfaceError,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_mount_waits_for_dom_content_loaded() {
    let page = docs_page(1280.0);
    page.dom.set_loading(true);

    let controller =
        Rc::new(PageController::new(Rc::clone(&page.dom), PageConfig::default()).unwrap());
    let outcome = Rc::new(RefCell::new(None));

    let task_controller = Rc::clone(&controller);
    let task_outcome = Rc::clone(&outcome);
    page.dom.spawn_local(Box::pin(async move {
        let result = task_controller.mount_when_ready().await;
        *task_outcome.borrow_mut() = Some(result.map_err(|e| e.to_string()));
    }));
    page.dom.run_until_stalled();

    assert!(outcome.borrow().is_none());
    assert!(!controller.is_mounted());
    assert_eq!(
        page.dom.listeners_for(&ListenTarget::Document, EventKind::DomContentLoaded),
        1
    );

    page.dom.finish_loading();

    let summary = outcome.borrow_mut().take().unwrap().unwrap();
    assert_eq!(summary.code_blocks, 3);
    assert!(controller.is_mounted());
}

#[test]
fn test_mount_when_ready_on_parsed_document_is_immediate() {
    let page = docs_page(1280.0);
    let controller =
        Rc::new(PageController::new(Rc::clone(&page.dom), PageConfig::default()).unwrap());

    let task_controller = Rc::clone(&controller);
    page.dom.spawn_local(Box::pin(async move {
        task_controller.mount_when_ready().await.unwrap();
    }));
    page.dom.run_until_stalled();

    assert!(controller.is_mounted());
    assert_eq!(
        page.dom.listeners_for(&ListenTarget::Document, EventKind::DomContentLoaded),
        0
    );
}

#[test]
fn test_second_mount_installs_nothing() {
    let page = docs_page(1280.0);
    let controller = PageController::new(Rc::clone(&page.dom), PageConfig::default()).unwrap();

    controller.mount().unwrap();
    let listeners = page.dom.listener_count();

    assert!(matches!(controller.mount(), Err(PageError::AlreadyMounted)));
    assert_eq!(page.dom.listener_count(), listeners);
}

#[test]
fn test_custom_selectors_and_labels() {
    let page = docs_page(1280.0);
    let mut config: PageConfig = serde_json::from_str(
        r#"{
            "selectors": { "sidebarLinks": "aside a" },
            "classes": { "active": "current" },
            "copy": { "label": "Copy code", "copiedLabel": "Done", "resetMs": 500 },
            "scroll": { "headerOffset": 0 }
        }"#,
    )
    .unwrap();
    config.validate().unwrap();

    let controller = PageController::new(Rc::clone(&page.dom), config).unwrap();
    controller.mount().unwrap();

    page.dom.click(page.nav_links[1]);
    assert_eq!(page.dom.scroll_calls().last().map(|c| c.0), Some(500.0));

    page.dom.click(page.sidebar_links[2]);
    assert!(page.dom.has_class(&page.sidebar_links[2], "current"));
    assert!(!page.dom.has_class(&page.sidebar_links[2], "active"));

    let button = page.copy_button(0);
    assert_eq!(page.dom.text(button), "Copy code");
    page.dom.click(button);
    assert_eq!(page.dom.text(button), "Done");
    page.dom.advance(std::time::Duration::from_millis(500));
    assert_eq!(page.dom.text(button), "Copy code");
}

#[test]
fn test_page_without_nav_still_mounts_on_mobile() {
    let page = docs_page(400.0);
    let mut config = PageConfig::default();
    config.selectors.nav = "header".to_string();

    let controller = PageController::new(Rc::clone(&page.dom), config).unwrap();
    let summary = controller.mount().unwrap();

    assert!(!summary.mobile_toggle_created);
    page.dom.resize(300.0);
    assert_eq!(page.toggles(), 0);
}

#[test]
fn test_malformed_selector_leaves_page_untouched() {
    let page = docs_page(1280.0);
    let mut config = PageConfig::default();
    config.selectors.code_blocks = "pre[".to_string();
    config.validate().unwrap();

    let controller = PageController::new(Rc::clone(&page.dom), config).unwrap();
    assert!(matches!(
        controller.mount(),
        Err(PageError::Surface(SurfaceError::InvalidSelector { .. }))
    ));
    assert!(!controller.is_mounted());
    assert_eq!(page.dom.listener_count(), 0);

    page.dom.click(page.nav_links[1]);
    assert!(page.dom.scroll_calls().is_empty());

    // A corrected config mounts cleanly on the same page.
    let retry = PageController::new(Rc::clone(&page.dom), PageConfig::default()).unwrap();
    assert_eq!(retry.mount().unwrap().code_blocks, 3);
    page.dom.click(page.nav_links[1]);
    assert_eq!(page.dom.scroll_calls().len(), 1);
}
