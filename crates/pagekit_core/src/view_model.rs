use serde::Serialize;

use crate::{ElementId, NotificationId, NotificationPhase, RippleId, Severity};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppViewModel {
    pub nav_open: bool,
    pub header: HeaderStyle,
    pub notification: Option<NotificationView>,
    pub revealed: Vec<ElementId>,
    pub ripples: Vec<RippleView>,
    pub submitting: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HeaderStyle {
    pub emphasized: bool,
}

impl HeaderStyle {
    pub fn background(&self) -> &'static str {
        if self.emphasized {
            "rgba(255, 255, 255, 0.98)"
        } else {
            "rgba(255, 255, 255, 0.95)"
        }
    }

    pub fn box_shadow(&self) -> &'static str {
        if self.emphasized {
            "0 2px 20px rgba(0, 0, 0, 0.1)"
        } else {
            "none"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub color: &'static str,
    pub phase: NotificationPhase,
}

impl NotificationView {
    /// Off-screen to the right unless it has slid in and not started leaving.
    pub fn on_screen(&self) -> bool {
        self.phase == NotificationPhase::Shown
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RippleView {
    pub id: RippleId,
    pub target: ElementId,
    pub size: f64,
    pub left: f64,
    pub top: f64,
}
