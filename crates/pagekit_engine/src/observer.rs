use std::collections::BTreeMap;

use pagekit_core::{ElementId, ObserveOptions};

use crate::Document;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub ratio: f64,
    /// Touches the margin-adjusted viewport, edges included.
    pub is_intersecting: bool,
}

/// Emulates an intersection observer rooted at the viewport.
///
/// A target is reported when it is first observed and then every time its
/// visible fraction crosses the threshold in either direction.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    options: ObserveOptions,
    /// `None` until the first report, then whether the target was at or above the threshold.
    targets: BTreeMap<ElementId, Option<bool>>,
}

impl VisibilityObserver {
    pub fn new(options: ObserveOptions) -> Self {
        Self {
            options,
            targets: BTreeMap::new(),
        }
    }

    pub fn observe(&mut self, target: ElementId) {
        self.targets.entry(target).or_insert(None);
    }

    pub fn unobserve(&mut self, target: ElementId) {
        self.targets.remove(&target);
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn observed(&self) -> usize {
        self.targets.len()
    }

    /// Runs one observation pass against the document's current scroll position.
    pub fn take_records(&mut self, document: &Document) -> Vec<IntersectionEntry> {
        let mut records = Vec::new();
        for (target, last) in self.targets.iter_mut() {
            let Ok(node) = document.node(*target) else {
                continue;
            };
            if !node.is_attached() {
                continue;
            }
            let ratio = intersection_ratio(document, *target, self.options);
            let is_intersecting = intersects(document, *target, self.options);
            let above = is_intersecting && ratio >= self.options.threshold;
            if *last != Some(above) {
                *last = Some(above);
                records.push(IntersectionEntry {
                    target: *target,
                    ratio,
                    is_intersecting,
                });
            }
        }
        records
    }
}

/// Visible fraction of `target` inside the viewport after applying the root margin.
pub(crate) fn intersection_ratio(
    document: &Document,
    target: ElementId,
    options: ObserveOptions,
) -> f64 {
    let Ok(node) = document.node(target) else {
        return 0.0;
    };
    let rect = node.rect();
    let (view_top, view_bottom) = root_bounds(document, options);
    if view_bottom <= view_top {
        return 0.0;
    }
    if rect.height <= 0.0 {
        return if rect.top >= view_top && rect.top <= view_bottom {
            1.0
        } else {
            0.0
        };
    }
    let visible = (view_bottom.min(rect.bottom()) - view_top.max(rect.top)).max(0.0);
    (visible / rect.height).clamp(0.0, 1.0)
}

/// Whether `target` touches the margin-adjusted viewport; an edge contact counts.
pub(crate) fn intersects(document: &Document, target: ElementId, options: ObserveOptions) -> bool {
    let Ok(node) = document.node(target) else {
        return false;
    };
    let rect = node.rect();
    let (view_top, view_bottom) = root_bounds(document, options);
    view_bottom > view_top && rect.top <= view_bottom && rect.bottom() >= view_top
}

fn root_bounds(document: &Document, options: ObserveOptions) -> (f64, f64) {
    let viewport = document.viewport();
    let top = viewport.scroll_y;
    (top, top + viewport.height + options.root_margin_bottom_px)
}
