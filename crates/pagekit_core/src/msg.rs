use crate::{
    Capabilities, ContactForm, ElementId, FrameTask, NotificationId, Point, Rect, Severity,
    SubmissionId, SubmissionOutcome, Timer,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Page finished loading; navigation and scroll handling are live.
    Loaded(Capabilities),
    /// Deferred wiring: start watching these elements for reveal.
    ObserveRevealables(Vec<ElementId>),
    /// User activated the mobile navigation toggle.
    NavToggleClicked,
    /// User activated any navigation link.
    NavLinkClicked,
    /// User activated an in-page anchor whose target was measured by the host.
    AnchorNavigate { target_top: f64, header_height: f64 },
    /// Raw scroll event.
    Scrolled,
    /// An animation frame requested through `Effect::RequestFrame` is running.
    FrameRendered { task: FrameTask, scroll_y: f64 },
    TimerFired(Timer),
    /// Any caller asking for a notification.
    Notify { message: String, severity: Severity },
    /// User clicked the notification's close affordance.
    NotificationCloseClicked(NotificationId),
    FormSubmitted(ContactForm),
    SubmissionSettled {
        id: SubmissionId,
        outcome: SubmissionOutcome,
    },
    /// Intersection report for an observed element.
    Intersected {
        element: ElementId,
        ratio: f64,
        is_intersecting: bool,
    },
    /// Pointer press on a ripple-enabled control.
    ControlPressed {
        target: ElementId,
        rect: Rect,
        pointer: Point,
    },
}
