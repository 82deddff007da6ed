//! End-to-end tests for the analysis pipeline without a database:
//! message → crisis detection + keyword matching + scoring → resolution →
//! suggestion lookup.

use std::sync::Arc;

use menta_classifier::provider::{LabelScore, MockOracle, MockTranslator, Translator};
use menta_core::config::MentaCfg;
use menta_core::emotion::analyzer::EmotionAnalyzer;
use menta_core::suggestion::resolver::SuggestionResolver;
use menta_core::suggestion::seed;
use menta_core::suggestion::store::{MemorySuggestionStore, SuggestionStore};
use menta_core::types::UNCERTAIN_LABEL;

fn analyzer_with(oracle: MockOracle) -> EmotionAnalyzer {
    EmotionAnalyzer::new(&MentaCfg::default(), Some(Arc::new(oracle)), None)
}

/// Full happy path: Turkish message with a keyword, disagreeing oracle,
/// seeded store — the keyword wins and a seeded variant comes back.
#[tokio::test]
async fn message_to_label_and_suggestion() {
    let oracle = MockOracle::new(vec![
        LabelScore::new("sadness", 0.7),
        LabelScore::new("joy", 0.2),
    ]);
    let analyzer = analyzer_with(oracle);

    let store = Arc::new(MemorySuggestionStore::new());
    seed::seed(store.as_ref(), true, false).await.expect("seeding succeeds");
    let suggestions = SuggestionResolver::new(Some(store.clone()));

    let analysis = analyzer.analyze("bugün çok mutluyum").await;
    assert_eq!(analysis.resolved.label, "joy");
    assert!(!analysis.resolved.uncertain);
    assert!(!analysis.crisis.flagged);
    // Post-bias scores stay consistent with the chosen label.
    assert_eq!(analysis.resolved.scores.get("joy"), Some(0.95));

    let suggestion = suggestions.suggestion_for(&analysis.resolved.label).await;
    let seeded = store.fetch("joy").await.unwrap().expect("joy seeded");
    assert!(seeded.suggestion_texts.contains(&suggestion));
}

/// A crisis message with a non-crisis keyword yields both signals at once.
#[tokio::test]
async fn crisis_and_label_are_siblings() {
    let oracle = MockOracle::new(vec![LabelScore::new("joy", 0.9)]);
    let analysis = analyzer_with(oracle)
        .analyze("çok mutluyum ama kendime zarar vermek istiyorum")
        .await;

    assert!(analysis.crisis.flagged);
    assert_eq!(analysis.resolved.label, "joy");
    assert_ne!(analysis.resolved.label, UNCERTAIN_LABEL);
}

/// Low-confidence oracle output without a keyword resolves to uncertain and
/// still produces a suggestion (the "uncertain" catalog entry).
#[tokio::test]
async fn uncertain_message_still_gets_a_suggestion() {
    let oracle = MockOracle::new(vec![
        LabelScore::new("fear", 0.35),
        LabelScore::new("anger", 0.33),
    ]);
    let analysis = analyzer_with(oracle).analyze("bilmiyorum işte").await;
    assert_eq!(analysis.resolved.label, UNCERTAIN_LABEL);
    assert!(analysis.resolved.uncertain);

    let store = Arc::new(MemorySuggestionStore::new());
    seed::seed(store.as_ref(), true, false).await.expect("seeding succeeds");
    let suggestions = SuggestionResolver::new(Some(store.clone()));
    let text = suggestions.suggestion_for(&analysis.resolved.label).await;
    let record = store.fetch("uncertain").await.unwrap().expect("uncertain seeded");
    assert!(record.suggestion_texts.contains(&text));
}

/// Oracle and storage both gone: the pipeline still answers with a label and
/// a generic suggestion, never an error.
#[tokio::test]
async fn total_unavailability_degrades_gracefully() {
    let analyzer = analyzer_with(MockOracle::unavailable("offline"));
    let suggestions = SuggestionResolver::new(None);

    let analysis = analyzer.analyze("hiçbir şey hissetmiyorum sanki").await;
    assert_eq!(analysis.resolved.label, UNCERTAIN_LABEL);

    let text = suggestions.suggestion_for(&analysis.resolved.label).await;
    assert!(!text.is_empty());
}

/// The translator output feeds the oracle while keyword matching stays on the
/// raw Turkish text.
#[tokio::test]
async fn translated_pipeline_keeps_raw_keywords() {
    let oracle = MockOracle::new(vec![LabelScore::new("sadness", 0.85)]);
    let translator: Arc<dyn Translator> = Arc::new(MockTranslator::fixed("I feel very sad"));
    let analyzer = EmotionAnalyzer::new(
        &MentaCfg::default(),
        Some(Arc::new(oracle)),
        Some(translator),
    );

    let analysis = analyzer.analyze("çok üzgünüm bugün").await;
    assert_eq!(analysis.resolved.label, "sadness");
    assert_eq!(analysis.resolved.scores.get("sadness"), Some(0.95));
}
