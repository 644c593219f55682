use pagekit_core::{
    update, AppState, Capabilities, ContactForm, Effect, ElementId, Msg, Point, Rect,
    ScrollBehavior, Severity, SubmissionId, SubmissionOutcome, Timer, DEFAULT_RIPPLE_DURATION_MS,
    DEFAULT_SEND_DELAY_MS, MSG_FILL_ALL_FIELDS, MSG_INVALID_EMAIL, MSG_SENDING, MSG_SENT,
};

fn loaded(capabilities: Capabilities) -> AppState {
    update(AppState::new(), Msg::Loaded(capabilities)).0
}

#[test]
fn toggle_flips_and_nav_link_forces_closed() {
    let state = loaded(Capabilities::default());
    assert!(!state.view().nav_open);

    let (state, _) = update(state, Msg::NavToggleClicked);
    assert!(state.view().nav_open);
    let (state, _) = update(state, Msg::NavLinkClicked);
    assert!(!state.view().nav_open);

    // Already closed stays closed, and nothing is re-rendered.
    let (mut state, _) = update(state, Msg::NavLinkClicked);
    state.consume_dirty();
    let (mut state, _) = update(state, Msg::NavLinkClicked);
    assert!(!state.view().nav_open);
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::NavToggleClicked);
    let (state, _) = update(state, Msg::NavToggleClicked);
    assert!(!state.view().nav_open);
}

#[test]
fn anchor_navigation_scrolls_below_the_header() {
    let state = loaded(Capabilities::default());
    let (_, effects) = update(
        state,
        Msg::AnchorNavigate {
            target_top: 1200.0,
            header_height: 80.0,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ScrollTo {
            top: 1120.0,
            behavior: ScrollBehavior::Smooth,
        }]
    );
}

#[test]
fn anchor_navigation_jumps_without_smooth_scroll() {
    let state = loaded(Capabilities {
        smooth_scroll: false,
        intersection_observer: true,
    });
    let (_, effects) = update(
        state,
        Msg::AnchorNavigate {
            target_top: 400.0,
            header_height: 64.0,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ScrollTo {
            top: 336.0,
            behavior: ScrollBehavior::Instant,
        }]
    );
}

fn submit(state: AppState, form: ContactForm) -> (AppState, Vec<Effect>) {
    update(state, Msg::FormSubmitted(form))
}

fn shown(state: &AppState) -> (String, Severity) {
    let view = state.view();
    let notification = view.notification.expect("notification");
    (notification.message, notification.severity)
}

fn has_timer(effects: &[Effect], pred: impl Fn(&Timer) -> bool) -> bool {
    effects
        .iter()
        .any(|effect| matches!(effect, Effect::StartTimer { timer, .. } if pred(timer)))
}

#[test]
fn empty_field_reports_error_and_starts_no_send() {
    let (state, effects) = submit(
        AppState::new(),
        ContactForm::new("Ada", "ada@example.com", ""),
    );
    assert_eq!(
        shown(&state),
        (MSG_FILL_ALL_FIELDS.to_string(), Severity::Error)
    );
    assert!(!has_timer(&effects, |t| matches!(t, Timer::SendLatency(_))));
    assert!(!state.view().submitting);

    let (state, _) = submit(state, ContactForm::new("  ", "ada@example.com", "hi"));
    assert_eq!(shown(&state).0, MSG_FILL_ALL_FIELDS);
}

#[test]
fn invalid_email_reports_error() {
    let (state, effects) = submit(
        AppState::new(),
        ContactForm::new("Ada", "ada.example.com", "Hello"),
    );
    assert_eq!(shown(&state), (MSG_INVALID_EMAIL.to_string(), Severity::Error));
    assert!(!has_timer(&effects, |t| matches!(t, Timer::SendLatency(_))));
}

#[test]
fn valid_submission_sends_then_succeeds_and_resets() {
    let form = ContactForm::new("Ada", "ada@example.com", "Hello there");
    let (state, effects) = submit(AppState::new(), form.clone());
    assert_eq!(shown(&state), (MSG_SENDING.to_string(), Severity::Info));
    assert!(state.view().submitting);
    assert!(effects.contains(&Effect::StartTimer {
        timer: Timer::SendLatency(SubmissionId(1)),
        delay_ms: DEFAULT_SEND_DELAY_MS,
    }));

    let (state, effects) = update(state, Msg::TimerFired(Timer::SendLatency(SubmissionId(1))));
    assert_eq!(
        effects,
        vec![Effect::DeliverSubmission {
            id: SubmissionId(1),
            form,
        }]
    );

    let (state, effects) = update(
        state,
        Msg::SubmissionSettled {
            id: SubmissionId(1),
            outcome: SubmissionOutcome::Delivered,
        },
    );
    assert_eq!(shown(&state), (MSG_SENT.to_string(), Severity::Success));
    assert!(effects.contains(&Effect::ResetForm));
    assert!(!state.view().submitting);

    // Duplicate settlement is ignored.
    let (_, effects) = update(
        state,
        Msg::SubmissionSettled {
            id: SubmissionId(1),
            outcome: SubmissionOutcome::Delivered,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn rejected_submission_keeps_the_form() {
    let (state, _) = submit(
        AppState::new(),
        ContactForm::new("Ada", "ada@example.com", "Hello"),
    );
    let (state, _) = update(state, Msg::TimerFired(Timer::SendLatency(SubmissionId(1))));
    let (state, effects) = update(
        state,
        Msg::SubmissionSettled {
            id: SubmissionId(1),
            outcome: SubmissionOutcome::Rejected("server unavailable".to_string()),
        },
    );
    assert_eq!(
        shown(&state),
        (
            "Message could not be sent: server unavailable".to_string(),
            Severity::Error
        )
    );
    assert!(!effects.contains(&Effect::ResetForm));
}

#[test]
fn ripple_is_centred_on_pointer_and_expires() {
    let (state, effects) = update(
        AppState::new(),
        Msg::ControlPressed {
            target: ElementId(7),
            rect: Rect::new(100.0, 200.0, 160.0, 48.0),
            pointer: Point { x: 130.0, y: 220.0 },
        },
    );
    let view = state.view();
    assert_eq!(view.ripples.len(), 1);
    let ripple = &view.ripples[0];
    assert_eq!(ripple.target, ElementId(7));
    assert_eq!(ripple.size, 160.0);
    assert_eq!(ripple.left, -50.0);
    assert_eq!(ripple.top, -60.0);
    assert_eq!(
        effects,
        vec![Effect::StartTimer {
            timer: Timer::RippleExpire(ripple.id),
            delay_ms: DEFAULT_RIPPLE_DURATION_MS,
        }]
    );

    let (state, _) = update(state, Msg::TimerFired(Timer::RippleExpire(ripple.id)));
    assert!(state.view().ripples.is_empty());
}
