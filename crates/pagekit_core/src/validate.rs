use std::sync::OnceLock;

use regex::Regex;

static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();

/// Shape check only: `local@domain.tld`, no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(email)
}
