use std::collections::{BTreeMap, BTreeSet};

use pagekit_core::{AppViewModel, ElementId, NotificationId, NotificationView, RippleId, RippleView};

use crate::{Document, DocumentError};

pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_REVEAL_PENDING: &str = "reveal-pending";
pub const CLASS_REVEALED: &str = "revealed";
pub const CLASS_NOTIFICATION: &str = "notification";
pub const CLASS_NOTIFICATION_CLOSE: &str = "notification-close";
pub const CLASS_RIPPLE: &str = "ripple";

/// Static elements the view model is projected onto.
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderTargets {
    pub(crate) header: Option<ElementId>,
    pub(crate) nav_toggle: Option<ElementId>,
    pub(crate) nav_menu: Option<ElementId>,
}

#[derive(Debug, Clone, Copy)]
struct RenderedNotification {
    id: NotificationId,
    node: ElementId,
    close: ElementId,
}

/// Keeps track of the nodes it created so each render only touches what changed.
#[derive(Debug, Default)]
pub(crate) struct Renderer {
    notification: Option<RenderedNotification>,
    ripples: BTreeMap<RippleId, ElementId>,
    revealed: BTreeSet<ElementId>,
}

impl Renderer {
    pub(crate) fn render(
        &mut self,
        document: &mut Document,
        targets: &RenderTargets,
        view: &AppViewModel,
    ) -> Result<(), DocumentError> {
        if let Some(header) = targets.header {
            document.set_style(header, "background", view.header.background())?;
            document.set_style(header, "box-shadow", view.header.box_shadow())?;
        }
        for control in [targets.nav_toggle, targets.nav_menu].into_iter().flatten() {
            document.set_class(control, CLASS_ACTIVE, view.nav_open)?;
        }
        for element in &view.revealed {
            if self.revealed.insert(*element) {
                document.remove_class(*element, CLASS_REVEAL_PENDING)?;
                document.add_class(*element, CLASS_REVEALED)?;
            }
        }
        self.render_notification(document, view.notification.as_ref())?;
        self.render_ripples(document, &view.ripples)
    }

    /// Close button of the attached notification, if any.
    pub(crate) fn close_button(&self) -> Option<(ElementId, NotificationId)> {
        self.notification.map(|rendered| (rendered.close, rendered.id))
    }

    pub(crate) fn notification_node(&self) -> Option<ElementId> {
        self.notification.map(|rendered| rendered.node)
    }

    fn render_notification(
        &mut self,
        document: &mut Document,
        view: Option<&NotificationView>,
    ) -> Result<(), DocumentError> {
        let stale = match (self.notification, view) {
            (Some(rendered), Some(view)) => rendered.id != view.id,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if stale {
            if let Some(rendered) = self.notification.take() {
                document.remove(rendered.node)?;
            }
        }
        let Some(view) = view else {
            return Ok(());
        };
        let rendered = match self.notification {
            Some(rendered) => rendered,
            None => {
                let rendered = build_notification(document, view)?;
                self.notification = Some(rendered);
                rendered
            }
        };
        let transform = if view.on_screen() {
            "translateX(0)"
        } else {
            "translateX(100%)"
        };
        document.set_style(rendered.node, "transform", transform)
    }

    fn render_ripples(
        &mut self,
        document: &mut Document,
        ripples: &[RippleView],
    ) -> Result<(), DocumentError> {
        let live: BTreeSet<RippleId> = ripples.iter().map(|ripple| ripple.id).collect();
        let expired: Vec<RippleId> = self
            .ripples
            .keys()
            .filter(|id| !live.contains(id))
            .copied()
            .collect();
        for id in expired {
            if let Some(node) = self.ripples.remove(&id) {
                document.remove(node)?;
            }
        }
        for ripple in ripples {
            if self.ripples.contains_key(&ripple.id) {
                continue;
            }
            let node = document.create_element("span");
            document.add_class(node, CLASS_RIPPLE)?;
            document.set_style(node, "width", px(ripple.size))?;
            document.set_style(node, "height", px(ripple.size))?;
            document.set_style(node, "left", px(ripple.left))?;
            document.set_style(node, "top", px(ripple.top))?;
            document.set_style(ripple.target, "position", "relative")?;
            document.set_style(ripple.target, "overflow", "hidden")?;
            document.append_child(ripple.target, node)?;
            self.ripples.insert(ripple.id, node);
        }
        Ok(())
    }
}

fn build_notification(
    document: &mut Document,
    view: &NotificationView,
) -> Result<RenderedNotification, DocumentError> {
    let node = document.create_element("div");
    document.add_class(node, CLASS_NOTIFICATION)?;
    document.add_class(node, &format!("notification-{}", view.severity.as_str()))?;
    for (property, value) in [
        ("position", "fixed"),
        ("top", "20px"),
        ("right", "20px"),
        ("background", view.color),
        ("color", "white"),
        ("padding", "1rem 1.5rem"),
        ("border-radius", "8px"),
        ("z-index", "10000"),
        ("transition", "transform 0.3s ease"),
    ] {
        document.set_style(node, property, value)?;
    }

    let message = document.create_element("span");
    document.add_class(message, "notification-message")?;
    document.set_text(message, view.message.clone())?;
    document.append_child(node, message)?;

    let close = document.create_element("button");
    document.add_class(close, CLASS_NOTIFICATION_CLOSE)?;
    document.set_attr(close, "aria-label", "Close notification")?;
    document.set_text(close, "\u{00d7}")?;
    document.append_child(node, close)?;

    document.append_child(document.body(), node)?;
    Ok(RenderedNotification {
        id: view.id,
        node,
        close,
    })
}

fn px(value: f64) -> String {
    format!("{value}px")
}
