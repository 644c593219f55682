use crate::{ContactForm, ElementId, NotificationId, RippleId, SubmissionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run `task` on the next animation frame.
    RequestFrame(FrameTask),
    /// Deliver `Msg::TimerFired(timer)` after `delay_ms`.
    StartTimer { timer: Timer, delay_ms: u64 },
    ObserveVisibility {
        elements: Vec<ElementId>,
        options: ObserveOptions,
    },
    Unobserve(ElementId),
    ScrollTo { top: f64, behavior: ScrollBehavior },
    /// Hand a validated form to the submitter.
    DeliverSubmission { id: SubmissionId, form: ContactForm },
    ResetForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    HeaderRecompute,
    NotificationSlideIn(NotificationId),
}

/// Every timer the core can start. Timers are never cancelled; the core
/// ignores firings whose subject no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Timer {
    NotificationDismiss(NotificationId),
    NotificationRemove(NotificationId),
    SendLatency(SubmissionId),
    RippleExpire(RippleId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Added to the viewport's bottom edge; negative values shrink it.
    pub root_margin_bottom_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}
