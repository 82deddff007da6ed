//! Crisis-language detection and emergency resources.
//!
//! Runs over the raw lowercased text, unconditionally and independently of
//! label resolution — a crisis flag is never gated by or merged into the
//! emotion label. Patterns are deliberately conservative; expand with care.

use crate::types::CrisisSignal;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

const CRISIS_REASON: &str = "Kriz ifadesi tespit edildi";

static CRISIS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"intihar|kendimi\s*öldür",
        r"ya[sş]amak\s*istemiyorum",
        r"kendime\s*zarar|bıçaklayacağım|atlayacağım",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// First matching pattern wins and supplies the fixed reason string.
pub fn detect_crisis(text: &str) -> CrisisSignal {
    let t = text.to_lowercase();
    for pattern in CRISIS_PATTERNS.iter() {
        if pattern.is_match(&t) {
            return CrisisSignal {
                flagged: true,
                reason: Some(CRISIS_REASON.to_owned()),
            };
        }
    }
    CrisisSignal::default()
}

/// One emergency support contact shown alongside a crisis flag.
#[derive(Debug, Clone, Serialize)]
pub struct CrisisResource {
    pub title: &'static str,
    pub description: &'static str,
    pub phone: &'static str,
    pub url: Option<&'static str>,
}

const RESOURCES: [CrisisResource; 3] = [
    CrisisResource {
        title: "Acil Yardım",
        description: "Acil bir durumdaysanız 112'yi arayın.",
        phone: "112",
        url: None,
    },
    CrisisResource {
        title: "ALO 183",
        description: "Sosyal destek hattı ve psikososyal destek için.",
        phone: "183",
        url: Some("https://www.aile.gov.tr/alo183/"),
    },
    CrisisResource {
        title: "Yeşilay Danışmanlık Merkezi (YEDAM)",
        description: "Bağımlılık ve psikolojik destek danışma hattı.",
        phone: "115",
        url: Some("https://yedam.org.tr/"),
    },
];

/// Basic Turkish resources; callers should localize further by region.
pub fn crisis_resources() -> &'static [CrisisResource] {
    &RESOURCES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_suicidal_language() {
        let signal = detect_crisis("Yaşamak istemiyorum artık");
        assert!(signal.flagged);
        assert_eq!(signal.reason.as_deref(), Some(CRISIS_REASON));
    }

    #[test]
    fn flags_self_harm_language() {
        assert!(detect_crisis("kendime zarar vereceğim").flagged);
        assert!(detect_crisis("Intihar etmeyi düşünüyorum").flagged);
    }

    #[test]
    fn neutral_text_is_not_flagged() {
        let signal = detect_crisis("bugün biraz yorgunum ama iyiyim");
        assert!(!signal.flagged);
        assert!(signal.reason.is_none());
    }

    #[test]
    fn detection_is_independent_of_keywords() {
        // Crisis language plus a joy keyword still flags.
        assert!(detect_crisis("çok mutluyum ama yaşamak istemiyorum").flagged);
    }

    #[test]
    fn resources_are_available() {
        let resources = crisis_resources();
        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0].phone, "112");
    }
}
