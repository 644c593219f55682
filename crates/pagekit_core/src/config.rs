use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTIFICATION_DISMISS_MS: u64 = 5_000;
pub const DEFAULT_NOTIFICATION_EXIT_MS: u64 = 300;
pub const DEFAULT_SEND_DELAY_MS: u64 = 2_000;
pub const DEFAULT_HEADER_THRESHOLD_PX: f64 = 50.0;
/// Roughly one frame at 60fps.
pub const DEFAULT_THROTTLE_INTERVAL_MS: u64 = 16;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_REVEAL_ROOT_MARGIN_BOTTOM_PX: f64 = -50.0;
pub const DEFAULT_RIPPLE_DURATION_MS: u64 = 600;
pub const DEFAULT_SMOOTH_SCROLL_MS: u64 = 400;

/// Timings, thresholds and selectors for one page instance.
///
/// Every field has a default, so a config file only needs to name what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub notification_dismiss_ms: u64,
    pub notification_exit_ms: u64,
    pub send_delay_ms: u64,
    pub header_threshold_px: f64,
    pub throttle_interval_ms: u64,
    pub reveal_threshold: f64,
    pub reveal_root_margin_bottom_px: f64,
    pub ripple_duration_ms: u64,
    pub smooth_scroll_ms: u64,
    pub selectors: Selectors,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            notification_dismiss_ms: DEFAULT_NOTIFICATION_DISMISS_MS,
            notification_exit_ms: DEFAULT_NOTIFICATION_EXIT_MS,
            send_delay_ms: DEFAULT_SEND_DELAY_MS,
            header_threshold_px: DEFAULT_HEADER_THRESHOLD_PX,
            throttle_interval_ms: DEFAULT_THROTTLE_INTERVAL_MS,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_root_margin_bottom_px: DEFAULT_REVEAL_ROOT_MARGIN_BOTTOM_PX,
            ripple_duration_ms: DEFAULT_RIPPLE_DURATION_MS,
            smooth_scroll_ms: DEFAULT_SMOOTH_SCROLL_MS,
            selectors: Selectors::default(),
        }
    }
}

/// CSS selectors the engine resolves against the page markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub nav_toggle: String,
    pub nav_menu: String,
    pub nav_links: String,
    pub header: String,
    pub anchor_links: String,
    pub contact_form: String,
    pub revealables: String,
    pub ripple_targets: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            nav_toggle: ".nav-toggle".to_string(),
            nav_menu: ".nav-menu".to_string(),
            nav_links: ".nav-link".to_string(),
            header: ".header".to_string(),
            anchor_links: r##"a[href^="#"]"##.to_string(),
            contact_form: ".contact-form".to_string(),
            revealables: ".service-card, .feature-card, .testimonial-card".to_string(),
            ripple_targets: ".btn".to_string(),
        }
    }
}
