use crate::{
    scroll_offset_for, AppState, Effect, FrameTask, Msg, ObserveOptions, ScrollBehavior,
    Severity, SubmissionOutcome, Timer, MSG_SENDING, MSG_SENT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Loaded(capabilities) => {
            state.set_capabilities(capabilities);
            Vec::new()
        }
        Msg::ObserveRevealables(elements) => {
            let options = ObserveOptions {
                threshold: state.config().reveal_threshold,
                root_margin_bottom_px: state.config().reveal_root_margin_bottom_px,
            };
            let available = state.capabilities().intersection_observer;
            state.reveal.observe(elements, options, available)
        }
        Msg::NavToggleClicked => {
            state.nav_open = !state.nav_open;
            state.mark_dirty();
            Vec::new()
        }
        Msg::NavLinkClicked => {
            if state.nav_open {
                state.nav_open = false;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AnchorNavigate {
            target_top,
            header_height,
        } => {
            let behavior = if state.capabilities().smooth_scroll {
                ScrollBehavior::Smooth
            } else {
                ScrollBehavior::Instant
            };
            vec![Effect::ScrollTo {
                top: scroll_offset_for(target_top, header_height),
                behavior,
            }]
        }
        Msg::Scrolled => state.header.on_scroll(),
        Msg::FrameRendered { task, scroll_y } => {
            let changed = match task {
                FrameTask::HeaderRecompute => {
                    let threshold = state.config().header_threshold_px;
                    state.header.recompute(scroll_y, threshold)
                }
                FrameTask::NotificationSlideIn(id) => state.notifications.slide_in(id),
            };
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TimerFired(timer) => apply_timer(&mut state, timer),
        Msg::Notify { message, severity } => notify(&mut state, message, severity),
        Msg::NotificationCloseClicked(id) => {
            let exit_ms = state.config().notification_exit_ms;
            let effects = state.notifications.begin_exit(id, exit_ms);
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::FormSubmitted(form) => match state.form.submit(form) {
            Ok(id) => {
                let mut effects = notify(&mut state, MSG_SENDING.to_string(), Severity::Info);
                effects.push(Effect::StartTimer {
                    timer: Timer::SendLatency(id),
                    delay_ms: state.config().send_delay_ms,
                });
                effects
            }
            Err(reason) => notify(&mut state, reason.to_string(), Severity::Error),
        },
        Msg::SubmissionSettled { id, outcome } => {
            if !state.form.settle(id) {
                return (state, Vec::new());
            }
            match outcome {
                SubmissionOutcome::Delivered => {
                    let mut effects = notify(&mut state, MSG_SENT.to_string(), Severity::Success);
                    effects.push(Effect::ResetForm);
                    effects
                }
                SubmissionOutcome::Rejected(reason) => notify(
                    &mut state,
                    format!("Message could not be sent: {reason}"),
                    Severity::Error,
                ),
            }
        }
        Msg::Intersected {
            element,
            ratio,
            is_intersecting,
        } => {
            let threshold = state.config().reveal_threshold;
            match state
                .reveal
                .intersected(element, ratio, is_intersecting, threshold)
            {
                Some(unobserve) => {
                    state.mark_dirty();
                    vec![unobserve]
                }
                None => Vec::new(),
            }
        }
        Msg::ControlPressed {
            target,
            rect,
            pointer,
        } => {
            let duration_ms = state.config().ripple_duration_ms;
            state.mark_dirty();
            state.ripples.spawn(target, rect, pointer, duration_ms)
        }
    };

    (state, effects)
}

fn notify(state: &mut AppState, message: String, severity: Severity) -> Vec<Effect> {
    let dismiss_ms = state.config().notification_dismiss_ms;
    state.mark_dirty();
    state.notifications.notify(message, severity, dismiss_ms)
}

fn apply_timer(state: &mut AppState, timer: Timer) -> Vec<Effect> {
    match timer {
        Timer::NotificationDismiss(id) => {
            let exit_ms = state.config().notification_exit_ms;
            let effects = state.notifications.begin_exit(id, exit_ms);
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Timer::NotificationRemove(id) => {
            if state.notifications.remove(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Timer::SendLatency(id) => match state.form.latency_elapsed(id) {
            Some(form) => vec![Effect::DeliverSubmission { id, form }],
            None => Vec::new(),
        },
        Timer::RippleExpire(id) => {
            if state.ripples.expire(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
    }
}
