//! Label resolution: fuses the keyword signal, the score distribution, and
//! the uncertainty test into one final label. Pure decision table, no state.

use super::lexicon::keyword_label;
use crate::types::{EmotionScores, ResolvedEmotion, UNCERTAIN_LABEL};

pub const DEFAULT_UNCERTAINTY_THRESHOLD: f64 = 0.6;
pub const DEFAULT_UNCERTAINTY_MARGIN: f64 = 0.1;
pub const DEFAULT_KEYWORD_BIAS_FLOOR: f64 = 0.95;

/// True when the distribution is not trustworthy enough to report as-is:
/// empty, top below the confidence floor, or top and runner-up closer than
/// the separation margin.
pub fn is_uncertain(scores: &EmotionScores, threshold: f64, margin: f64) -> bool {
    if scores.is_empty() {
        return true;
    }
    let (top, second) = scores.top_two_values();
    top < threshold || (top - second) < margin
}

/// Resolve one message to a final label.
///
/// The keyword signal wins over argmax when present. When the keyword label
/// is also a scored key, its score is floored to `bias_floor` before anything
/// downstream reads the distribution, so stored scores stay consistent with
/// the chosen label. Empty scores mean the oracle was unavailable: resolution
/// is keyword-only and reports uncertain only when the keyword is also absent.
pub fn resolve(
    raw_text: &str,
    mut scores: EmotionScores,
    threshold: f64,
    margin: f64,
    bias_floor: f64,
) -> ResolvedEmotion {
    let kw = keyword_label(raw_text);
    if let Some(kw) = kw {
        if scores.get(kw).is_some() {
            scores.set_floor(kw, bias_floor);
        }
    }

    if scores.is_empty() {
        return match kw {
            Some(label) => ResolvedEmotion {
                label: label.to_owned(),
                scores,
                uncertain: false,
            },
            None => ResolvedEmotion {
                label: UNCERTAIN_LABEL.to_owned(),
                scores,
                uncertain: true,
            },
        };
    }

    if is_uncertain(&scores, threshold, margin) {
        return ResolvedEmotion {
            label: UNCERTAIN_LABEL.to_owned(),
            scores,
            uncertain: true,
        };
    }

    let label = match kw {
        Some(k) => k.to_owned(),
        None => scores
            .top()
            .map(|(l, _)| l.to_owned())
            .unwrap_or_else(|| UNCERTAIN_LABEL.to_owned()),
    };
    ResolvedEmotion { label, scores, uncertain: false }
}

/// `resolve` with the default thresholds.
pub fn resolve_default(raw_text: &str, scores: EmotionScores) -> ResolvedEmotion {
    resolve(
        raw_text,
        scores,
        DEFAULT_UNCERTAINTY_THRESHOLD,
        DEFAULT_UNCERTAINTY_MARGIN,
        DEFAULT_KEYWORD_BIAS_FLOOR,
    )
}
