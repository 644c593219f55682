use std::collections::BTreeSet;

use crate::{Effect, ElementId, ObserveOptions};

/// One-way reveal latch for every observed element.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct RevealTracker {
    observed: BTreeSet<ElementId>,
    revealed: BTreeSet<ElementId>,
}

impl RevealTracker {
    /// Without an observer nothing is tracked and the elements stay hidden.
    pub(crate) fn observe(
        &mut self,
        elements: Vec<ElementId>,
        options: ObserveOptions,
        observer_available: bool,
    ) -> Vec<Effect> {
        if !observer_available {
            return Vec::new();
        }
        let fresh: Vec<ElementId> = elements
            .into_iter()
            .filter(|element| !self.revealed.contains(element))
            .filter(|element| self.observed.insert(*element))
            .collect();
        if fresh.is_empty() {
            return Vec::new();
        }
        vec![Effect::ObserveVisibility {
            elements: fresh,
            options,
        }]
    }

    /// Returns the unobserve effect when `element` was revealed by this report.
    /// A report only counts while the element actually touches the viewport.
    pub(crate) fn intersected(
        &mut self,
        element: ElementId,
        ratio: f64,
        is_intersecting: bool,
        threshold: f64,
    ) -> Option<Effect> {
        if !is_intersecting || ratio < threshold || !self.observed.remove(&element) {
            return None;
        }
        self.revealed.insert(element);
        Some(Effect::Unobserve(element))
    }

    pub(crate) fn revealed(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.revealed.iter().copied()
    }

    pub(crate) fn observed_count(&self) -> usize {
        self.observed.len()
    }
}
