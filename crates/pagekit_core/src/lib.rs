//! Pagekit core: pure page-interaction state machine and view-model helpers.
mod config;
mod effect;
mod form;
mod msg;
mod nav;
mod notification;
mod reveal;
mod ripple;
mod scroll;
mod state;
mod throttle;
mod types;
mod update;
mod validate;
mod view_model;

pub use config::{
    PageConfig, Selectors, DEFAULT_HEADER_THRESHOLD_PX, DEFAULT_NOTIFICATION_DISMISS_MS,
    DEFAULT_NOTIFICATION_EXIT_MS, DEFAULT_REVEAL_ROOT_MARGIN_BOTTOM_PX, DEFAULT_REVEAL_THRESHOLD,
    DEFAULT_RIPPLE_DURATION_MS, DEFAULT_SEND_DELAY_MS, DEFAULT_SMOOTH_SCROLL_MS,
    DEFAULT_THROTTLE_INTERVAL_MS,
};
pub use effect::{Effect, FrameTask, ObserveOptions, ScrollBehavior, Timer};
pub use form::{
    ContactForm, SubmissionId, SubmissionOutcome, MSG_FILL_ALL_FIELDS, MSG_INVALID_EMAIL,
    MSG_SENDING, MSG_SENT,
};
pub use msg::Msg;
pub use nav::{anchor_fragment, scroll_offset_for};
pub use notification::{NotificationId, NotificationPhase, Severity};
pub use ripple::RippleId;
pub use state::AppState;
pub use throttle::Throttle;
pub use types::{Capabilities, ElementId, Point, Rect};
pub use update::update;
pub use validate::is_valid_email;
pub use view_model::{AppViewModel, HeaderStyle, NotificationView, RippleView};
