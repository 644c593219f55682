mod support;

use pagekit_core::{Capabilities, ElementId};
use pagekit_engine::{DocumentError, CLASS_ACTIVE};
use pretty_assertions::assert_eq;
use support::*;

#[test]
fn toggle_mirrors_state_on_toggle_and_menu() {
    let mut page = landing_page(Capabilities::default());
    let toggle = first(&page, ".nav-toggle");
    let menu = first(&page, ".nav-menu");

    page.click(toggle).unwrap();
    assert!(page.view().nav_open);
    assert!(has_class(&page, toggle, CLASS_ACTIVE));
    assert!(has_class(&page, menu, CLASS_ACTIVE));

    // Clicking a child of the toggle still reaches its handler.
    let bar = first(&page, ".nav-toggle .bar");
    page.click(bar).unwrap();
    assert!(!page.view().nav_open);
    assert!(!has_class(&page, toggle, CLASS_ACTIVE));
    assert!(!has_class(&page, menu, CLASS_ACTIVE));
}

#[test]
fn nav_link_closes_open_menu_and_keeps_closed_menu_closed() {
    let mut page = landing_page(Capabilities::default());
    let toggle = first(&page, ".nav-toggle");
    let blog = by_id(&page, "link-blog");

    page.click(toggle).unwrap();
    page.click(blog).unwrap();
    assert!(!page.view().nav_open);
    assert!(!has_class(&page, toggle, CLASS_ACTIVE));

    page.click(blog).unwrap();
    assert!(!page.view().nav_open);
    // Not an in-page anchor: no scrolling.
    page.advance(500);
    assert_eq!(page.document().scroll_y(), 0.0);
}

#[test]
fn anchor_link_smooth_scrolls_below_the_header() {
    let mut page = landing_page(Capabilities::default());
    let services = by_id(&page, "link-services");

    page.click(services).unwrap();
    // Smooth: nothing moves until frames run.
    assert_eq!(page.document().scroll_y(), 0.0);

    page.advance(200);
    let midway = page.document().scroll_y();
    assert!(midway > 0.0 && midway < 730.0, "midway at {midway}");

    page.advance(400);
    assert_eq!(page.document().scroll_y(), 800.0 - 70.0);
    assert!(page.view().header.emphasized);
    assert!(page.state().header_recomputations() > 0);
}

#[test]
fn anchor_link_jumps_without_smooth_scroll() {
    let mut page = landing_page(Capabilities {
        smooth_scroll: false,
        intersection_observer: true,
    });
    let cta = by_id(&page, "cta");

    page.click(cta).unwrap();
    assert_eq!(page.document().scroll_y(), 1700.0 - 70.0);
    assert!(!page.view().header.emphasized);
    page.advance(16);
    assert!(page.view().header.emphasized);
}

#[test]
fn missing_anchor_target_is_ignored() {
    let mut page = landing_page(Capabilities::default());
    let broken = by_id(&page, "nowhere");
    page.click(broken).unwrap();
    page.advance(1000);
    assert_eq!(page.document().scroll_y(), 0.0);
}

#[test]
fn unknown_element_is_reported() {
    let mut page = landing_page(Capabilities::default());
    assert_eq!(
        page.click(ElementId(100_000)),
        Err(DocumentError::UnknownElement(ElementId(100_000)))
    );
}

#[test]
fn user_scroll_cancels_smooth_scroll() {
    let mut page = landing_page(Capabilities::default());
    page.click(by_id(&page, "link-contact")).unwrap();
    page.advance(100);
    page.scroll_to(20.0);
    page.advance(1000);
    assert_eq!(page.document().scroll_y(), 20.0);
}

#[test]
fn selectors_track_runtime_classes() {
    let mut page = landing_page(Capabilities::default());
    let menu = first(&page, ".nav-menu");
    assert!(page.document().select(".nav-menu.active").unwrap().is_empty());

    page.click(first(&page, ".nav-toggle")).unwrap();
    assert_eq!(page.document().select(".nav-menu.active").unwrap(), vec![menu]);
    assert_eq!(
        page.document().select(".nav-toggle.active, .nav-menu.active").unwrap().len(),
        2
    );
}
