use pagekit_core::Capabilities;
use pagekit_engine::DocumentError;
use serde::Deserialize;
use thiserror::Error;

const DEMO_SCENARIO: &str = include_str!("../../assets/demo.ron");

/// One user or host action in a scripted visit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) enum Step {
    /// User scroll to an absolute offset.
    Scroll(f64),
    /// Click at the centre of the first element matching the selector.
    Click(String),
    PressAt(String, f64, f64),
    /// Contact form control name and the text typed into it.
    Fill(String, String),
    Submit,
    /// Message and severity name (`info`, `success` or `error`).
    Notify(String, String),
    CloseNotification,
    Advance(u64),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Scenario {
    pub(crate) capabilities: Capabilities,
    pub(crate) steps: Vec<Step>,
}

impl Scenario {
    pub(crate) fn demo() -> Result<Self, ScenarioError> {
        Self::parse("built-in demo", DEMO_SCENARIO)
    }

    pub(crate) fn parse(origin: &str, text: &str) -> Result<Self, ScenarioError> {
        ron::from_str(text).map_err(|source| ScenarioError::Parse {
            origin: origin.to_string(),
            source,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    #[error("cannot read scenario {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scenario {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("step {index}: no element matches {selector:?}")]
    NoTarget { index: usize, selector: String },
    #[error("step {index}: {source}")]
    Document {
        index: usize,
        #[source]
        source: DocumentError,
    },
}
