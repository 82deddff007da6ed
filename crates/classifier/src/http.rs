//! HTTP-based classifier and translator backends.
//!
//! Talks to a hosted-inference API (`POST {base}/models/{model}`) that wraps
//! text-classification and translation pipelines behind bearer auth.

use crate::provider::{ClassifierError, LabelScore, ScoreOracle, Translator};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Classification response: one inner list of label/score pairs per input.
#[derive(Deserialize)]
struct RawLabelScore {
    label: String,
    score: f64,
}

#[derive(Deserialize)]
struct TranslationItem {
    translation_text: String,
}

fn check_error(status: reqwest::StatusCode, body: String) -> ClassifierError {
    if status.as_u16() == 429 {
        ClassifierError::RateLimited
    } else {
        ClassifierError::RequestFailed(format!("{status}: {body}"))
    }
}

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

/// Emotion classifier backed by a hosted text-classification model.
pub struct HttpClassifier {
    model: String,
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpClassifier {
    /// Build from model name + API key + optional base URL override.
    pub fn new(model: String, api_key: String, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            model,
            client: build_client(),
            base_url: base.trim_end_matches('/').to_owned(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    async fn post_inference(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(check_error(status, text));
        }

        // The pipeline wraps results per input: [[{label, score}, ...]].
        let batches: Vec<Vec<RawLabelScore>> = resp
            .json()
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        let scores = batches
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|r| LabelScore::new(r.label.to_lowercase(), r.score))
            .collect();
        Ok(scores)
    }
}

impl ScoreOracle for HttpClassifier {
    fn name(&self) -> &str {
        &self.model
    }

    fn classify(
        &self,
        text: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<LabelScore>, ClassifierError>> + Send + '_>> {
        let text = text.to_owned();
        Box::pin(async move { self.post_inference(&text).await })
    }
}

/// Source→English translator backed by a hosted translation model.
///
/// Failures never propagate: `translate` logs and returns the input text.
pub struct HttpTranslator {
    model: String,
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTranslator {
    pub fn new(model: String, api_key: String, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            model,
            client: build_client(),
            base_url: base.trim_end_matches('/').to_owned(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    async fn post_translation(&self, text: &str) -> Result<String, ClassifierError> {
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(check_error(status, body));
        }

        let items: Vec<TranslationItem> = resp
            .json()
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        items
            .into_iter()
            .next()
            .map(|i| i.translation_text)
            .ok_or_else(|| ClassifierError::RequestFailed("empty translation response".into()))
    }
}

impl Translator for HttpTranslator {
    fn name(&self) -> &str {
        &self.model
    }

    fn translate(&self, text: &str) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
        let text = text.to_owned();
        Box::pin(async move {
            match self.post_translation(&text).await {
                Ok(out) => out,
                Err(e) => {
                    tracing::warn!(model = %self.model, error = %e, "translation failed, using original text");
                    text
                }
            }
        })
    }
}

/// Build a classifier from environment variables.
/// Reads `MENTA_HF_MODEL`, `MENTA_HF_API_KEY`, optionally `MENTA_HF_BASE_URL`.
/// Returns `None` if model or key is not set.
pub fn classifier_from_env() -> Option<HttpClassifier> {
    let model = std::env::var("MENTA_HF_MODEL").ok()?;
    let api_key = std::env::var("MENTA_HF_API_KEY").ok()?;
    let base_url = std::env::var("MENTA_HF_BASE_URL").ok();
    Some(HttpClassifier::new(model, api_key, base_url))
}

/// Build a translator from environment variables.
/// Reads `MENTA_TRANSLATION_MODEL`, `MENTA_HF_API_KEY`, optionally `MENTA_HF_BASE_URL`.
/// Returns `None` if model or key is not set.
pub fn translator_from_env() -> Option<HttpTranslator> {
    let model = std::env::var("MENTA_TRANSLATION_MODEL").ok()?;
    let api_key = std::env::var("MENTA_HF_API_KEY").ok()?;
    let base_url = std::env::var("MENTA_HF_BASE_URL").ok();
    Some(HttpTranslator::new(model, api_key, base_url))
}
