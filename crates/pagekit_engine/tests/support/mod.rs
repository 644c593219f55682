#![allow(dead_code)]

use std::sync::Once;

use pagekit_core::{Capabilities, ElementId, PageConfig};
use pagekit_engine::{Document, Page, Viewport, CLASS_NOTIFICATION};

pub const LANDING: &str = include_str!("../fixtures/landing.html");

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pagekit_logging::initialize_for_tests);
}

pub fn landing_document(capabilities: Capabilities) -> Document {
    let mut document = Document::from_html(LANDING);
    document.set_viewport(Viewport::default());
    document.set_capabilities(capabilities);
    document
}

/// Installed landing page with deferred wiring already done.
pub fn landing_page(capabilities: Capabilities) -> Page {
    init_logging();
    let mut page = Page::install(landing_document(capabilities), PageConfig::default());
    page.advance(1);
    page
}

pub fn by_id(page: &Page, id: &str) -> ElementId {
    page.document()
        .element_by_id(id)
        .unwrap_or_else(|| panic!("#{id} in fixture"))
}

pub fn first(page: &Page, selector: &str) -> ElementId {
    page.document()
        .select_first(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("{selector} in fixture"))
}

pub fn has_class(page: &Page, id: ElementId, class: &str) -> bool {
    page.document().node(id).unwrap().has_class(class)
}

pub fn style(page: &Page, id: ElementId, property: &str) -> Option<String> {
    page.document()
        .node(id)
        .unwrap()
        .style(property)
        .map(ToOwned::to_owned)
}

/// Notification elements currently attached to the body.
pub fn attached_notifications(page: &Page) -> Vec<ElementId> {
    let document = page.document();
    document
        .descendants(document.body())
        .into_iter()
        .filter(|id| document.node(*id).unwrap().has_class(CLASS_NOTIFICATION))
        .collect()
}

pub fn notification_text(page: &Page) -> Option<String> {
    let node = page.notification_element()?;
    let document = page.document();
    document
        .descendants(node)
        .into_iter()
        .map(|id| document.node(id).unwrap())
        .find(|child| child.has_class("notification-message"))
        .map(|child| child.text().to_string())
}

pub fn field_value(page: &Page, name: &str) -> String {
    let form = first(page, ".contact-form");
    let control = page.document().form_control(form, name).unwrap();
    page.document().node(control).unwrap().value().to_string()
}
