use pagekit_core::{ContactForm, SubmissionOutcome};

/// Delivers a validated contact form once the send latency has elapsed.
pub trait Submitter {
    fn submit(&mut self, form: &ContactForm) -> SubmissionOutcome;
}

/// Accepts every submission without contacting anything.
#[derive(Debug, Default)]
pub struct SimulatedSubmitter;

impl Submitter for SimulatedSubmitter {
    fn submit(&mut self, _form: &ContactForm) -> SubmissionOutcome {
        SubmissionOutcome::Delivered
    }
}
