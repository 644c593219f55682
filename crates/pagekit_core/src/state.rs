use crate::form::FormController;
use crate::notification::NotificationCenter;
use crate::reveal::RevealTracker;
use crate::ripple::RippleController;
use crate::scroll::HeaderScroll;
use crate::view_model::{AppViewModel, HeaderStyle, NotificationView, RippleView};
use crate::{Capabilities, PageConfig};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    config: PageConfig,
    capabilities: Capabilities,
    pub(crate) nav_open: bool,
    pub(crate) header: HeaderScroll,
    pub(crate) notifications: NotificationCenter,
    pub(crate) reveal: RevealTracker,
    pub(crate) form: FormController,
    pub(crate) ripples: RippleController,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PageConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub(crate) fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    /// True while a header recomputation is waiting for its frame.
    pub fn header_frame_pending(&self) -> bool {
        self.header.frame_pending()
    }

    /// Number of header recomputations run so far.
    pub fn header_recomputations(&self) -> u64 {
        self.header.recomputations()
    }

    /// Elements still waiting for their first qualifying intersection.
    pub fn observed_count(&self) -> usize {
        self.reveal.observed_count()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            nav_open: self.nav_open,
            header: HeaderStyle {
                emphasized: self.header.emphasized(),
            },
            notification: self.notifications.current().map(|current| NotificationView {
                id: current.id,
                message: current.message.clone(),
                severity: current.severity,
                color: current.severity.color(),
                phase: current.phase,
            }),
            revealed: self.reveal.revealed().collect(),
            ripples: self
                .ripples
                .active()
                .map(|(id, ripple)| RippleView {
                    id,
                    target: ripple.target,
                    size: ripple.size,
                    left: ripple.offset.x,
                    top: ripple.offset.y,
                })
                .collect(),
            submitting: self.form.busy(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
