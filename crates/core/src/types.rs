use chrono::{DateTime, Utc};
use menta_classifier::provider::LabelScore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The label reported when no trustworthy classification exists.
pub const UNCERTAIN_LABEL: &str = "uncertain";

/// Per-label probabilities in the order the scoring model emitted them.
///
/// Emission order is significant: argmax ties break on the first maximal
/// entry encountered, so this is Vec-backed rather than a hash map. Keys need
/// not sum to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores(Vec<(String, f64)>);

impl EmotionScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| *v)
    }

    /// Raise `label`'s score to at least `floor`. No-op for unknown labels.
    pub fn set_floor(&mut self, label: &str, floor: f64) {
        if let Some((_, v)) = self.0.iter_mut().find(|(l, _)| l == label) {
            *v = v.max(floor);
        }
    }

    /// First maximal entry in emission order.
    pub fn top(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (label, value) in &self.0 {
            match best {
                Some((_, b)) if *value <= b => {}
                _ => best = Some((label.as_str(), *value)),
            }
        }
        best
    }

    /// Highest and second-highest values; missing entries count as 0.
    pub fn top_two_values(&self) -> (f64, f64) {
        let mut values: Vec<f64> = self.0.iter().map(|(_, v)| *v).collect();
        values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let top = values.first().copied().unwrap_or(0.0);
        let second = values.get(1).copied().unwrap_or(0.0);
        (top, second)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, v)| (l.as_str(), *v))
    }
}

impl From<Vec<LabelScore>> for EmotionScores {
    fn from(scores: Vec<LabelScore>) -> Self {
        Self(
            scores
                .into_iter()
                .map(|s| (s.label.to_lowercase(), s.score))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, f64); N]> for EmotionScores {
    fn from(pairs: [(&str, f64); N]) -> Self {
        Self(pairs.into_iter().map(|(l, v)| (l.to_owned(), v)).collect())
    }
}

/// Outcome of label resolution for one message.
/// Invariant: `uncertain == true` implies `label == UNCERTAIN_LABEL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEmotion {
    pub label: String,
    pub scores: EmotionScores,
    pub uncertain: bool,
}

/// Crisis-language signal. Independent of the emotion label: a message can be
/// simultaneously uncertain and crisis-flagged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrisisSignal {
    pub flagged: bool,
    pub reason: Option<String>,
}

/// Everything one analysis request produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: Uuid,
    pub resolved: ResolvedEmotion,
    pub crisis: CrisisSignal,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_breaks_ties_on_emission_order() {
        let scores = EmotionScores::from([("joy", 0.4), ("sadness", 0.4), ("anger", 0.1)]);
        assert_eq!(scores.top(), Some(("joy", 0.4)));
    }

    #[test]
    fn set_floor_only_raises() {
        let mut scores = EmotionScores::from([("joy", 0.97), ("fear", 0.2)]);
        scores.set_floor("joy", 0.95);
        scores.set_floor("fear", 0.95);
        scores.set_floor("missing", 0.95);
        assert_eq!(scores.get("joy"), Some(0.97));
        assert_eq!(scores.get("fear"), Some(0.95));
        assert_eq!(scores.get("missing"), None);
    }

    #[test]
    fn top_two_with_single_entry() {
        let scores = EmotionScores::from([("joy", 0.8)]);
        assert_eq!(scores.top_two_values(), (0.8, 0.0));
    }

    #[test]
    fn labels_lowercased_from_model_output() {
        let scores = EmotionScores::from(vec![
            LabelScore::new("Joy", 0.9),
            LabelScore::new("SADNESS", 0.1),
        ]);
        assert_eq!(scores.get("joy"), Some(0.9));
        assert_eq!(scores.get("sadness"), Some(0.1));
    }
}
