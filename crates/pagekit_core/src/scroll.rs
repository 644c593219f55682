use crate::{Effect, FrameTask};

/// Frame-coalesced header recomputation. Leading edge: the first scroll event
/// after a frame schedules the next one, the rest ride along.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct HeaderScroll {
    frame_pending: bool,
    emphasized: bool,
    recomputations: u64,
}

impl HeaderScroll {
    pub(crate) fn on_scroll(&mut self) -> Vec<Effect> {
        if self.frame_pending {
            return Vec::new();
        }
        self.frame_pending = true;
        vec![Effect::RequestFrame(FrameTask::HeaderRecompute)]
    }

    /// Returns true when the header style flipped.
    pub(crate) fn recompute(&mut self, scroll_y: f64, threshold_px: f64) -> bool {
        self.frame_pending = false;
        self.recomputations += 1;
        let emphasized = scroll_y > threshold_px;
        let changed = emphasized != self.emphasized;
        self.emphasized = emphasized;
        changed
    }

    pub(crate) fn emphasized(&self) -> bool {
        self.emphasized
    }

    pub(crate) fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub(crate) fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
