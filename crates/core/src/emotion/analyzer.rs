//! Pipeline orchestration for one analysis request.
//!
//! Translation and classification are best-effort external calls; their
//! failure degrades resolution instead of failing the request. Crisis
//! detection always runs against the raw text.

use super::{crisis, resolve};
use crate::config::MentaCfg;
use crate::types::{Analysis, EmotionScores};
use chrono::Utc;
use menta_classifier::provider::{ScoreOracle, Translator};
use std::sync::Arc;
use uuid::Uuid;

pub struct EmotionAnalyzer {
    oracle: Option<Arc<dyn ScoreOracle>>,
    translator: Option<Arc<dyn Translator>>,
    threshold: f64,
    margin: f64,
    bias_floor: f64,
}

impl EmotionAnalyzer {
    pub fn new(
        cfg: &MentaCfg,
        oracle: Option<Arc<dyn ScoreOracle>>,
        translator: Option<Arc<dyn Translator>>,
    ) -> Self {
        Self {
            oracle,
            translator: if cfg.use_translation { translator } else { None },
            threshold: cfg.uncertainty_threshold,
            margin: cfg.uncertainty_margin,
            bias_floor: cfg.keyword_bias_floor,
        }
    }

    /// Analyze one message. Always produces a label (possibly "uncertain")
    /// even under total oracle unavailability.
    pub async fn analyze(&self, text: &str) -> Analysis {
        let crisis = crisis::detect_crisis(text);

        let model_input = match &self.translator {
            Some(translator) => translator.translate(text).await,
            None => text.to_owned(),
        };

        let scores = match &self.oracle {
            Some(oracle) => match oracle.classify(&model_input).await {
                Ok(label_scores) => EmotionScores::from(label_scores),
                Err(e) => {
                    tracing::warn!(error = %e, "score oracle unavailable, degrading to keyword resolution");
                    EmotionScores::new()
                }
            },
            None => EmotionScores::new(),
        };

        let resolved = resolve::resolve(text, scores, self.threshold, self.margin, self.bias_floor);
        if crisis.flagged {
            tracing::warn!(label = %resolved.label, "crisis language detected");
        }

        Analysis {
            id: Uuid::new_v4(),
            resolved,
            crisis,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menta_classifier::provider::{LabelScore, MockOracle, MockTranslator};

    fn analyzer(oracle: MockOracle, translator: Option<MockTranslator>) -> EmotionAnalyzer {
        EmotionAnalyzer::new(
            &MentaCfg::default(),
            Some(Arc::new(oracle)),
            translator.map(|t| Arc::new(t) as Arc<dyn Translator>),
        )
    }

    #[tokio::test]
    async fn confident_oracle_result_is_reported() {
        let oracle = MockOracle::new(vec![
            LabelScore::new("joy", 0.92),
            LabelScore::new("sadness", 0.03),
        ]);
        let analysis = analyzer(oracle, None).analyze("what a great day").await;
        assert_eq!(analysis.resolved.label, "joy");
        assert!(!analysis.resolved.uncertain);
        assert!(!analysis.crisis.flagged);
    }

    #[tokio::test]
    async fn oracle_failure_degrades_to_keyword() {
        let oracle = MockOracle::unavailable("model cold");
        let analysis = analyzer(oracle, None).analyze("çok mutluyum").await;
        assert_eq!(analysis.resolved.label, "joy");
        assert!(!analysis.resolved.uncertain);
    }

    #[tokio::test]
    async fn oracle_failure_without_keyword_is_uncertain_not_error() {
        let oracle = MockOracle::unavailable("model cold");
        let analysis = analyzer(oracle, None).analyze("garip bir gün").await;
        assert_eq!(analysis.resolved.label, "uncertain");
        assert!(analysis.resolved.uncertain);
    }

    #[tokio::test]
    async fn crisis_flag_is_independent_of_label() {
        let oracle = MockOracle::new(vec![LabelScore::new("joy", 0.9)]);
        let analysis = analyzer(oracle, None)
            .analyze("çok mutluyum ama yaşamak istemiyorum")
            .await;
        // Keyword-driven, non-uncertain label AND a crisis flag, simultaneously.
        assert_eq!(analysis.resolved.label, "joy");
        assert!(analysis.crisis.flagged);
        assert!(analysis.crisis.reason.is_some());
    }

    #[tokio::test]
    async fn translation_feeds_the_oracle_but_not_keyword_matching() {
        // Translator output has no Turkish keyword; matching still sees the
        // raw text.
        let oracle = MockOracle::new(vec![LabelScore::new("sadness", 0.9)]);
        let translator = MockTranslator::fixed("I am very sad");
        let analysis = analyzer(oracle, Some(translator)).analyze("çok üzgünüm").await;
        assert_eq!(analysis.resolved.label, "sadness");
        assert_eq!(analysis.resolved.scores.get("sadness"), Some(0.95));
    }

    #[tokio::test]
    async fn translation_disabled_by_config() {
        let cfg = MentaCfg { use_translation: false, ..MentaCfg::default() };
        let analyzer = EmotionAnalyzer::new(
            &cfg,
            Some(Arc::new(MockOracle::new(vec![LabelScore::new("joy", 0.9)]))),
            Some(Arc::new(MockTranslator::fixed("should not be used"))),
        );
        let analysis = analyzer.analyze("great").await;
        assert_eq!(analysis.resolved.label, "joy");
    }
}
