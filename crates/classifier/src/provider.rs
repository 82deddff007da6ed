use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// One label with its probability, in the order the model emitted it.
/// Scores are not required to sum to 1 across a result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self { label: label.into(), score }
    }
}

/// Error type for classifier operations.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
    #[error("rate limited")]
    RateLimited,
    #[error("request failed: {0}")]
    RequestFailed(String),
}

/// Trait for emotion-scoring backends.
///
/// The pipeline treats the scorer as an opaque oracle: `classify` returns the
/// full per-label distribution (lowercased labels, emission order preserved)
/// or an error, and callers degrade to keyword-only resolution on failure.
pub trait ScoreOracle: Send + Sync {
    fn name(&self) -> &str;

    fn classify(
        &self,
        text: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<LabelScore>, ClassifierError>> + Send + '_>>;
}

/// Trait for source→English translation backends.
///
/// Translation is best-effort: implementations must return the input text
/// unchanged on any internal failure rather than fail the pipeline.
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    fn translate(&self, text: &str) -> Pin<Box<dyn Future<Output = String> + Send + '_>>;
}

/// Mock oracle for testing — returns a fixed score distribution.
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    pub scores: Vec<LabelScore>,
    /// When set, every call fails with `Unavailable` carrying this message.
    pub fail_with: Option<String>,
}

impl MockOracle {
    pub fn new(scores: Vec<LabelScore>) -> Self {
        Self { scores, fail_with: None }
    }

    /// Create a mock that always fails, for degradation tests.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { scores: vec![], fail_with: Some(reason.into()) }
    }
}

impl ScoreOracle for MockOracle {
    fn name(&self) -> &str {
        "mock"
    }

    fn classify(
        &self,
        _text: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<LabelScore>, ClassifierError>> + Send + '_>> {
        let scores = self.scores.clone();
        let fail = self.fail_with.clone();
        Box::pin(async move {
            match fail {
                Some(reason) => Err(ClassifierError::Unavailable(reason)),
                None => Ok(scores),
            }
        })
    }
}

/// Mock translator — echoes the input, optionally substituting a fixed output.
#[derive(Debug, Clone, Default)]
pub struct MockTranslator {
    pub output: Option<String>,
}

impl MockTranslator {
    pub fn passthrough() -> Self {
        Self { output: None }
    }

    pub fn fixed(output: impl Into<String>) -> Self {
        Self { output: Some(output.into()) }
    }
}

impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    fn translate(&self, text: &str) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
        let out = self.output.clone().unwrap_or_else(|| text.to_owned());
        Box::pin(async move { out })
    }
}
