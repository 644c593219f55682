use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::is_valid_email;

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_SENDING: &str = "Sending message...";
pub const MSG_SENT: &str = "Message sent successfully! We'll get back to you soon.";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Whitespace-only input counts as empty.
    pub fn has_empty_field(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SubmissionId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Delivered,
    Rejected(String),
}

/// Submissions move waiting (latency timer running) -> in flight (with the
/// submitter) -> settled.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct FormController {
    waiting: BTreeMap<SubmissionId, ContactForm>,
    in_flight: BTreeSet<SubmissionId>,
    next_id: u64,
}

impl FormController {
    /// Validates `form`; on success it is parked until the latency timer fires.
    pub(crate) fn submit(&mut self, form: ContactForm) -> Result<SubmissionId, &'static str> {
        if form.has_empty_field() {
            return Err(MSG_FILL_ALL_FIELDS);
        }
        if !is_valid_email(&form.email) {
            return Err(MSG_INVALID_EMAIL);
        }
        self.next_id += 1;
        let id = SubmissionId(self.next_id);
        self.waiting.insert(id, form);
        Ok(id)
    }

    pub(crate) fn latency_elapsed(&mut self, id: SubmissionId) -> Option<ContactForm> {
        let form = self.waiting.remove(&id)?;
        self.in_flight.insert(id);
        Some(form)
    }

    pub(crate) fn settle(&mut self, id: SubmissionId) -> bool {
        self.in_flight.remove(&id)
    }

    pub(crate) fn busy(&self) -> bool {
        !self.waiting.is_empty() || !self.in_flight.is_empty()
    }
}
