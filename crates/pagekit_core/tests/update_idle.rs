use pagekit_core::{
    update, AppState, Msg, NotificationId, RippleId, SubmissionId, SubmissionOutcome, Timer,
};

fn assert_idle(msg: Msg) {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), msg.clone());

    assert_eq!(state, next, "{msg:?} changed the state");
    assert!(effects.is_empty(), "{msg:?} produced {effects:?}");
}

#[test]
fn closing_an_already_closed_menu_is_idle() {
    assert_idle(Msg::NavLinkClicked);
}

#[test]
fn stale_timers_are_idle() {
    assert_idle(Msg::TimerFired(Timer::NotificationDismiss(NotificationId(7))));
    assert_idle(Msg::TimerFired(Timer::NotificationRemove(NotificationId(7))));
    assert_idle(Msg::TimerFired(Timer::SendLatency(SubmissionId(3))));
    assert_idle(Msg::TimerFired(Timer::RippleExpire(RippleId(2))));
}

#[test]
fn reports_for_unknown_subjects_are_idle() {
    assert_idle(Msg::NotificationCloseClicked(NotificationId(1)));
    assert_idle(Msg::SubmissionSettled {
        id: SubmissionId(1),
        outcome: SubmissionOutcome::Delivered,
    });
}
