use serde::Serialize;

use crate::{Effect, FrameTask, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Unknown names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Severity::Error => "#ef4444",
            Severity::Success => "#10b981",
            Severity::Info => "#8b5cf6",
        }
    }
}

/// Entering: attached off-screen, waiting for its slide-in frame.
/// Leaving: sliding out, waiting for the exit timer to detach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Notification {
    pub(crate) id: NotificationId,
    pub(crate) message: String,
    pub(crate) severity: Severity,
    pub(crate) phase: NotificationPhase,
}

/// Holds at most one notification; a new one replaces the old without a transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub(crate) fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub(crate) fn notify(
        &mut self,
        message: String,
        severity: Severity,
        dismiss_ms: u64,
    ) -> Vec<Effect> {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        self.current = Some(Notification {
            id,
            message,
            severity,
            phase: NotificationPhase::Entering,
        });
        vec![
            Effect::RequestFrame(FrameTask::NotificationSlideIn(id)),
            Effect::StartTimer {
                timer: Timer::NotificationDismiss(id),
                delay_ms: dismiss_ms,
            },
        ]
    }

    pub(crate) fn slide_in(&mut self, id: NotificationId) -> bool {
        match self.current.as_mut() {
            Some(current) if current.id == id && current.phase == NotificationPhase::Entering => {
                current.phase = NotificationPhase::Shown;
                true
            }
            _ => false,
        }
    }

    /// Shared by the close button and the auto-dismiss timer; only the first one wins.
    pub(crate) fn begin_exit(&mut self, id: NotificationId, exit_ms: u64) -> Vec<Effect> {
        match self.current.as_mut() {
            Some(current) if current.id == id && current.phase != NotificationPhase::Leaving => {
                current.phase = NotificationPhase::Leaving;
                vec![Effect::StartTimer {
                    timer: Timer::NotificationRemove(id),
                    delay_ms: exit_ms,
                }]
            }
            _ => Vec::new(),
        }
    }

    pub(crate) fn remove(&mut self, id: NotificationId) -> bool {
        if self.current.as_ref().is_some_and(|current| current.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
