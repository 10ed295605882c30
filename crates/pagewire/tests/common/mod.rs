//! Shared fixture: a documentation page shaped like the real site.

#![allow(dead_code)]

use pagewire::test_utils::{FakeNode, FakeSurface};
use pagewire::{DocumentSurface, MountSummary, PageConfig, PageController};
use std::rc::Rc;

pub struct DocsPage {
    pub dom: Rc<FakeSurface>,
    pub nav: FakeNode,
    pub container: FakeNode,
    pub nav_list: FakeNode,
    /// `nav ul li a`, in order: intro, install, usage
    pub nav_links: Vec<FakeNode>,
    /// intro (0..500), install (500..1300), usage (1300..2000)
    pub sections: Vec<FakeNode>,
    pub sidebar_links: Vec<FakeNode>,
    pub code_blocks: Vec<FakeNode>,
    /// An in-content anchor pointing at a section that doesn't exist
    pub broken_anchor: FakeNode,
}

pub const SECTIONS: [(&str, f64, f64); 3] = [
    ("intro", 0.0, 500.0),
    ("install", 500.0, 800.0),
    ("usage", 1300.0, 700.0),
];

pub fn docs_page(viewport_width: f64) -> DocsPage {
    let dom = Rc::new(FakeSurface::new());
    dom.set_viewport_width(viewport_width);
    let body = dom.body();

    let nav = dom.add(body, "nav");
    let container = dom.add(nav, "div");
    dom.add_class(&container, "container");
    let logo = dom.add(container, "a");
    dom.set_attribute(logo, "href", "/");
    let nav_list = dom.add(container, "ul");
    let nav_links = SECTIONS
        .iter()
        .map(|(id, _, _)| {
            let item = dom.add(nav_list, "li");
            let link = dom.add(item, "a");
            dom.set_attribute(link, "href", &format!("#{}", id));
            link
        })
        .collect();

    let main = dom.add(body, "main");
    let sidebar = dom.add(main, "aside");
    dom.add_class(&sidebar, "doc-sidebar");
    let sidebar_links = ["overview", "config", "faq"]
        .iter()
        .map(|page| {
            let link = dom.add(sidebar, "a");
            dom.set_attribute(link, "href", &format!("/docs/{}.html", page));
            link
        })
        .collect();

    let mut sections = Vec::new();
    let mut code_blocks = Vec::new();
    for (id, top, height) in SECTIONS {
        let section = dom.add(main, "section");
        dom.set_id(section, id);
        dom.set_layout(section, top, height);
        sections.push(section);

        let pre = dom.add(section, "pre");
        let code = dom.add(pre, "code");
        dom.set_text(&code, &format!("run --{}", id));
        code_blocks.push(pre);
    }

    let broken_anchor = dom.add(sections[0], "a");
    dom.set_attribute(broken_anchor, "href", "#changelog");

    DocsPage {
        dom,
        nav,
        container,
        nav_list,
        nav_links,
        sections,
        sidebar_links,
        code_blocks,
        broken_anchor,
    }
}

impl DocsPage {
    pub fn mount(&self) -> MountSummary {
        let controller = PageController::new(Rc::clone(&self.dom), PageConfig::default()).unwrap();
        controller.mount().unwrap()
    }

    pub fn active_nav_links(&self) -> Vec<usize> {
        self.active(&self.nav_links)
    }

    pub fn active_sidebar_links(&self) -> Vec<usize> {
        self.active(&self.sidebar_links)
    }

    fn active(&self, links: &[FakeNode]) -> Vec<usize> {
        links
            .iter()
            .enumerate()
            .filter(|(_, link)| self.dom.has_class(link, "active"))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn copy_button(&self, block: usize) -> FakeNode {
        let pre = self.code_blocks[block];
        self.dom
            .query_within(&pre, ".copy-button")
            .unwrap()
            .expect("copy button attached")
    }

    pub fn toggles(&self) -> usize {
        self.dom.query_all(".mobile-nav-toggle").unwrap().len()
    }
}
