use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Effect, ElementId, Point, Rect, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RippleId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ripple {
    pub(crate) target: ElementId,
    pub(crate) size: f64,
    /// Offset of the ripple's top-left corner inside the control.
    pub(crate) offset: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct RippleController {
    active: BTreeMap<RippleId, Ripple>,
    next_id: u64,
}

impl RippleController {
    /// The ripple is a square as large as the control's longer side, centred
    /// on the pointer.
    pub(crate) fn spawn(
        &mut self,
        target: ElementId,
        rect: Rect,
        pointer: Point,
        duration_ms: u64,
    ) -> Vec<Effect> {
        let size = rect.width.max(rect.height);
        let offset = Point {
            x: pointer.x - rect.left - size / 2.0,
            y: pointer.y - rect.top - size / 2.0,
        };
        self.next_id += 1;
        let id = RippleId(self.next_id);
        self.active.insert(
            id,
            Ripple {
                target,
                size,
                offset,
            },
        );
        vec![Effect::StartTimer {
            timer: Timer::RippleExpire(id),
            delay_ms: duration_ms,
        }]
    }

    pub(crate) fn expire(&mut self, id: RippleId) -> bool {
        self.active.remove(&id).is_some()
    }

    pub(crate) fn active(&self) -> impl Iterator<Item = (RippleId, &Ripple)> + '_ {
        self.active.iter().map(|(id, ripple)| (*id, ripple))
    }
}
