use std::collections::{BTreeSet, VecDeque};

use pagekit_core::{
    anchor_fragment, update, AppState, AppViewModel, ContactForm, Effect, ElementId, Msg,
    PageConfig, Point, ScrollBehavior, Severity, Throttle, Timer,
};
use pagekit_logging::{page_debug, page_info, page_trace, page_warn};

use crate::event_loop::{Due, EventLoop};
use crate::render::{RenderTargets, Renderer, CLASS_REVEAL_PENDING};
use crate::{Document, DocumentError, SimulatedSubmitter, Submitter, VisibilityObserver};

enum Task {
    Timer(Timer),
    /// Wiring that waits for the first idle point after load.
    DeferredInit,
}

struct ScrollAnimation {
    from: f64,
    to: f64,
    started_ms: u64,
    duration_ms: u64,
}

impl ScrollAnimation {
    /// Eased position at `now_ms` and whether the animation is over.
    fn position(&self, now_ms: u64) -> (f64, bool) {
        if self.duration_ms == 0 {
            return (self.to, true);
        }
        let elapsed = now_ms.saturating_sub(self.started_ms) as f64;
        let t = (elapsed / self.duration_ms as f64).min(1.0);
        let eased = if t < 0.5 {
            2.0 * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
        };
        (self.from + (self.to - self.from) * eased, t >= 1.0)
    }
}

/// Elements with a live click/submit handler.
#[derive(Debug, Default)]
struct Listeners {
    nav_toggle: Option<ElementId>,
    nav_links: BTreeSet<ElementId>,
    anchor_links: BTreeSet<ElementId>,
    contact_form: Option<ElementId>,
    ripple_targets: BTreeSet<ElementId>,
}

/// One installed page: the document, the core state machine driving it and
/// the virtual event loop both run on.
pub struct Page {
    document: Document,
    state: AppState,
    events: EventLoop<Task>,
    submitter: Box<dyn Submitter>,
    observer: Option<VisibilityObserver>,
    listeners: Listeners,
    targets: RenderTargets,
    renderer: Renderer,
    scroll_animation: Option<ScrollAnimation>,
    scroll_log: Throttle,
}

impl Page {
    pub fn install(document: Document, config: PageConfig) -> Self {
        Self::install_with(document, config, Box::new(SimulatedSubmitter))
    }

    /// Wires navigation and scroll handling now; forms, ripples and reveal
    /// observation are wired at the first idle point. Missing markup disables
    /// the matching feature and is logged.
    pub fn install_with(
        document: Document,
        config: PageConfig,
        submitter: Box<dyn Submitter>,
    ) -> Self {
        let selectors = config.selectors.clone();
        let scroll_log = Throttle::new(config.throttle_interval_ms);
        let mut page = Self {
            document,
            state: AppState::with_config(config),
            events: EventLoop::new(),
            submitter,
            observer: None,
            listeners: Listeners::default(),
            targets: RenderTargets::default(),
            renderer: Renderer::default(),
            scroll_animation: None,
            scroll_log,
        };

        page.targets.header = page.resolve_one("header", &selectors.header);
        page.targets.nav_toggle = page.resolve_one("navigation toggle", &selectors.nav_toggle);
        page.targets.nav_menu = page.resolve_one("navigation menu", &selectors.nav_menu);
        if page.targets.nav_menu.is_some() {
            page.listeners.nav_toggle = page.targets.nav_toggle;
        }
        page.listeners.nav_links = page.resolve_all("navigation links", &selectors.nav_links);
        page.listeners.anchor_links = page.resolve_all("anchor links", &selectors.anchor_links);

        let capabilities = page.document.capabilities();
        page.dispatch(Msg::Loaded(capabilities));
        page.render();
        page.events.set_timeout(Task::DeferredInit, 0);
        page_info!(
            "page installed: {} nav links, {} anchors, smooth_scroll={}, observer={}",
            page.listeners.nav_links.len(),
            page.listeners.anchor_links.len(),
            capabilities.smooth_scroll,
            capabilities.intersection_observer
        );
        page
    }

    fn resolve_one(&self, what: &str, selector: &str) -> Option<ElementId> {
        match self.document.select_first(selector) {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                page_warn!("{} ({}) not found; feature disabled", what, selector);
                None
            }
            Err(err) => {
                page_warn!("{}: {}", what, err);
                None
            }
        }
    }

    fn resolve_all(&self, what: &str, selector: &str) -> BTreeSet<ElementId> {
        match self.document.select(selector) {
            Ok(found) => {
                if found.is_empty() {
                    page_warn!("no {} ({}) found", what, selector);
                }
                found.into_iter().collect()
            }
            Err(err) => {
                page_warn!("{}: {}", what, err);
                BTreeSet::new()
            }
        }
    }

    fn wire_deferred(&mut self) {
        let selectors = self.state.config().selectors.clone();
        self.listeners.contact_form = self.resolve_one("contact form", &selectors.contact_form);
        self.listeners.ripple_targets = self.resolve_all("ripple targets", &selectors.ripple_targets);

        let revealables: Vec<ElementId> = self
            .resolve_all("revealable elements", &selectors.revealables)
            .into_iter()
            .collect();
        for element in &revealables {
            if let Err(err) = self.document.add_class(*element, CLASS_REVEAL_PENDING) {
                page_warn!("cannot hide {}: {}", element, err);
            }
        }
        if !self.state.capabilities().intersection_observer && !revealables.is_empty() {
            page_warn!(
                "intersection observation unavailable; {} elements stay unrevealed",
                revealables.len()
            );
        }
        self.dispatch(Msg::ObserveRevealables(revealables));
        page_debug!("deferred wiring done");
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn now_ms(&self) -> u64 {
        self.events.now()
    }

    /// Element currently showing the notification.
    pub fn notification_element(&self) -> Option<ElementId> {
        self.renderer.notification_node()
    }

    pub fn notification_close_button(&self) -> Option<ElementId> {
        self.renderer.close_button().map(|(button, _)| button)
    }

    /// Elements the visibility observer is still watching.
    pub fn observed_count(&self) -> usize {
        self.observer.as_ref().map_or(0, VisibilityObserver::observed)
    }

    pub fn has_pending_work(&self) -> bool {
        self.events.timer_count() > 0 || self.events.frame_scheduled()
    }

    /// Shows a notification on behalf of any caller.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.dispatch(Msg::Notify {
            message: message.into(),
            severity,
        });
    }

    /// Click at the centre of `target`.
    pub fn click(&mut self, target: ElementId) -> Result<(), DocumentError> {
        let rect = self.document.node(target)?.rect();
        self.press_at(
            target,
            Point {
                x: rect.left + rect.width / 2.0,
                y: rect.top + rect.height / 2.0,
            },
        )
    }

    /// Click on `target` at `pointer`; the event reaches every handler on
    /// `target` or its ancestors.
    pub fn press_at(&mut self, target: ElementId, pointer: Point) -> Result<(), DocumentError> {
        self.document.node(target)?;

        if let Some((close, id)) = self.renderer.close_button() {
            if self.document.closest(target, |node| node == close).is_some() {
                self.dispatch(Msg::NotificationCloseClicked(id));
                return Ok(());
            }
        }

        if let Some(control) = self.closest_listener(target, &self.listeners.ripple_targets) {
            let rect = self.document.node(control)?.rect();
            self.dispatch(Msg::ControlPressed {
                target: control,
                rect,
                pointer,
            });
        }

        if let Some(toggle) = self.listeners.nav_toggle {
            if self.document.closest(target, |node| node == toggle).is_some() {
                self.dispatch(Msg::NavToggleClicked);
            }
        }

        if self
            .closest_listener(target, &self.listeners.nav_links)
            .is_some()
        {
            self.dispatch(Msg::NavLinkClicked);
        }

        if let Some(link) = self.closest_listener(target, &self.listeners.anchor_links) {
            self.follow_anchor(link)?;
        }

        if let Some(form) = self.listeners.contact_form {
            let submitter = self
                .document
                .closest(target, |node| self.is_submit_control(node));
            if let Some(control) = submitter {
                if self.document.closest(control, |node| node == form).is_some() {
                    self.submit_form();
                }
            }
        }
        Ok(())
    }

    fn closest_listener(&self, target: ElementId, set: &BTreeSet<ElementId>) -> Option<ElementId> {
        self.document.closest(target, |node| set.contains(&node))
    }

    fn is_submit_control(&self, id: ElementId) -> bool {
        let Ok(node) = self.document.node(id) else {
            return false;
        };
        let kind = node.attr("type");
        match node.tag() {
            "button" => kind.map_or(true, |kind| kind.eq_ignore_ascii_case("submit")),
            "input" => kind.is_some_and(|kind| kind.eq_ignore_ascii_case("submit")),
            _ => false,
        }
    }

    /// Controls whose value is user input; buttons and hidden fields keep theirs.
    fn is_resettable(&self, id: ElementId) -> bool {
        let Ok(node) = self.document.node(id) else {
            return false;
        };
        let kind = node.attr("type").unwrap_or_default();
        !(node.tag() == "input"
            && ["submit", "button", "reset", "hidden", "image"]
                .iter()
                .any(|skipped| kind.eq_ignore_ascii_case(skipped)))
    }

    fn follow_anchor(&mut self, link: ElementId) -> Result<(), DocumentError> {
        let href = self.document.node(link)?.attr("href").unwrap_or_default().to_string();
        let Some(fragment) = anchor_fragment(&href) else {
            page_debug!("anchor {:?} has no fragment target", href);
            return Ok(());
        };
        let Some(target) = self.document.element_by_id(&fragment) else {
            page_warn!("anchor target #{} not found", fragment);
            return Ok(());
        };
        let target_top = self.document.node(target)?.rect().top;
        let header_height = match self.targets.header {
            Some(header) => self.document.node(header)?.rect().height,
            None => 0.0,
        };
        self.dispatch(Msg::AnchorNavigate {
            target_top,
            header_height,
        });
        Ok(())
    }

    /// User scroll; cancels any running smooth scroll.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_animation = None;
        if self.move_scroll(y) {
            self.dispatch(Msg::Scrolled);
        }
    }

    fn move_scroll(&mut self, y: f64) -> bool {
        let before = self.document.scroll_y();
        let applied = self.document.scroll_to(y);
        if applied == before {
            return false;
        }
        if self.scroll_log.ready(self.events.now()) {
            page_trace!("scroll_y={}", applied);
        }
        self.events.request_render();
        true
    }

    fn contact_form_element(&self) -> Result<ElementId, DocumentError> {
        if let Some(form) = self.listeners.contact_form {
            return Ok(form);
        }
        let selector = &self.state.config().selectors.contact_form;
        self.document
            .select_first(selector)?
            .ok_or_else(|| DocumentError::NoMatch(selector.clone()))
    }

    /// Types `value` into the contact form control named `name`.
    pub fn fill(&mut self, name: &str, value: &str) -> Result<(), DocumentError> {
        let form = self.contact_form_element()?;
        let control = self
            .document
            .form_control(form, name)
            .ok_or_else(|| DocumentError::MissingField(name.to_string()))?;
        self.document.set_value(control, value)
    }

    /// Submits the contact form. Before deferred wiring there is no handler
    /// and the submit is dropped.
    pub fn submit_form(&mut self) {
        let Some(form) = self.listeners.contact_form else {
            page_debug!("submit ignored: contact form handler not wired");
            return;
        };
        let field = |name: &str| {
            self.document
                .form_control(form, name)
                .and_then(|id| self.document.node(id).ok())
                .map(|node| node.value().to_string())
                .unwrap_or_default()
        };
        let contact = ContactForm::new(field("name"), field("email"), field("message"));
        self.dispatch(Msg::FormSubmitted(contact));
    }

    fn reset_form(&mut self) {
        let Some(form) = self.listeners.contact_form else {
            return;
        };
        for control in self.document.form_controls(form) {
            if !self.is_resettable(control) {
                continue;
            }
            if let Err(err) = self.document.reset_value(control) {
                page_warn!("cannot reset form control {}: {}", control, err);
            }
        }
    }

    /// Moves the virtual clock forward, running every timer and animation
    /// frame that falls due on the way.
    pub fn advance(&mut self, ms: u64) {
        let until = self.events.now().saturating_add(ms);
        while let Some(due) = self.events.pop_due(until) {
            pagekit_logging::set_virtual_time(self.events.now());
            match due {
                Due::Timer(Task::Timer(timer)) => self.dispatch(Msg::TimerFired(timer)),
                Due::Timer(Task::DeferredInit) => self.wire_deferred(),
                Due::Frame => self.run_frame(),
            }
        }
        self.events.advance_to(until);
        pagekit_logging::set_virtual_time(until);
    }

    /// Rendering step: scroll animation, frame callbacks, then intersection updates.
    fn run_frame(&mut self) {
        if let Some(animation) = self.scroll_animation.as_ref() {
            let (position, finished) = animation.position(self.events.now());
            if finished {
                self.scroll_animation = None;
            } else {
                self.events.request_render();
            }
            if self.move_scroll(position) {
                self.dispatch(Msg::Scrolled);
            }
        }

        for task in self.events.take_frame_tasks() {
            let scroll_y = self.document.scroll_y();
            self.dispatch(Msg::FrameRendered { task, scroll_y });
        }

        let records = match self.observer.as_mut() {
            Some(observer) => observer.take_records(&self.document),
            None => Vec::new(),
        };
        for entry in records {
            self.dispatch(Msg::Intersected {
                element: entry.target,
                ratio: entry.ratio,
                is_intersecting: entry.is_intersecting,
            });
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(follow_up) = self.run_effect(effect) {
                    inbox.push_back(follow_up);
                }
            }
        }
        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn run_effect(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::RequestFrame(task) => {
                self.events.request_frame(task);
                None
            }
            Effect::StartTimer { timer, delay_ms } => {
                self.events.set_timeout(Task::Timer(timer), delay_ms);
                None
            }
            Effect::ObserveVisibility { elements, options } => {
                let observer = self
                    .observer
                    .get_or_insert_with(|| VisibilityObserver::new(options));
                for element in &elements {
                    observer.observe(*element);
                }
                page_debug!("observing {} elements for reveal", elements.len());
                self.events.request_render();
                None
            }
            Effect::Unobserve(element) => {
                if let Some(observer) = self.observer.as_mut() {
                    observer.unobserve(element);
                }
                page_debug!("revealed {}", element);
                None
            }
            Effect::ScrollTo { top, behavior } => match behavior {
                ScrollBehavior::Instant => {
                    self.scroll_animation = None;
                    self.move_scroll(top).then_some(Msg::Scrolled)
                }
                ScrollBehavior::Smooth => {
                    let from = self.document.scroll_y();
                    let to = top.clamp(0.0, self.document.max_scroll());
                    if from != to {
                        self.scroll_animation = Some(ScrollAnimation {
                            from,
                            to,
                            started_ms: self.events.now(),
                            duration_ms: self.state.config().smooth_scroll_ms,
                        });
                        self.events.request_render();
                    }
                    None
                }
            },
            Effect::DeliverSubmission { id, form } => {
                let outcome = self.submitter.submit(&form);
                page_info!("submission {:?} settled: {:?}", id, outcome);
                Some(Msg::SubmissionSettled { id, outcome })
            }
            Effect::ResetForm => {
                self.reset_form();
                None
            }
        }
    }

    fn render(&mut self) {
        let view = self.state.view();
        if let Err(err) = self.renderer.render(&mut self.document, &self.targets, &view) {
            page_warn!("render failed: {}", err);
        }
    }

    /// Disconnects the observer, drops pending timers and frames, and hands
    /// the document back.
    pub fn dispose(mut self) -> Document {
        if let Some(observer) = self.observer.as_mut() {
            observer.disconnect();
        }
        self.events.clear();
        page_info!("page disposed at t={}ms", self.events.now());
        self.document
    }
}
