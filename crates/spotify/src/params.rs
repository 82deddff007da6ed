//! Label-to-query mapping for the recommendation provider.
//!
//! A canonical emotion label (after a Turkish synonym fold) selects a fixed
//! audio-feature profile and a default genre seed; caller overrides layer on
//! top. The same fold also drives the keyword-search fallback query.

/// Safe genre seeds tried in order when the preferred seed is unavailable,
/// and swept one by one in the last recommendation fallback stage.
pub const COMMON_GENRES: [&str; 5] = ["pop", "rock", "dance", "chill", "acoustic"];

/// Turkish spellings accepted where a canonical label is expected.
const TR_SYNONYMS: &[(&str, &str)] = &[
    ("mutlu", "joy"),
    ("mutluluk", "joy"),
    ("üzgün", "sadness"),
    ("uzgun", "sadness"),
    ("üzüntü", "sadness"),
    ("kızgın", "anger"),
    ("kizgin", "anger"),
    ("öfke", "anger"),
    ("korku", "fear"),
    ("iğrenme", "disgust"),
    ("igrenme", "disgust"),
    ("şaşkınlık", "surprise"),
    ("saskinlik", "surprise"),
    ("nötr", "neutral"),
    ("notr", "neutral"),
];

/// Fold a raw label (possibly Turkish) onto the canonical English vocabulary.
/// Unknown input passes through trimmed and lowercased.
pub fn fold_label(label: &str) -> String {
    let l = label.trim().to_lowercase();
    TR_SYNONYMS
        .iter()
        .find(|(tr, _)| *tr == l)
        .map(|(_, canon)| (*canon).to_owned())
        .unwrap_or(l)
}

/// Audio-feature targets and default genre seed for one label.
#[derive(Debug, Clone, Copy)]
pub struct AudioProfile {
    pub seed_genre: &'static str,
    pub target_valence: Option<f64>,
    pub target_energy: Option<f64>,
    pub min_energy: Option<f64>,
    pub max_energy: Option<f64>,
}

const DEFAULT_PROFILE: AudioProfile = AudioProfile {
    seed_genre: "pop",
    target_valence: Some(0.6),
    target_energy: None,
    min_energy: None,
    max_energy: None,
};

/// Mapping heuristics per canonical label; unknown labels get the default.
pub fn profile_for(label: &str) -> AudioProfile {
    match label {
        "joy" => AudioProfile {
            seed_genre: "pop",
            target_valence: Some(0.9),
            target_energy: None,
            min_energy: Some(0.5),
            max_energy: None,
        },
        "sadness" => AudioProfile {
            seed_genre: "acoustic",
            target_valence: Some(0.2),
            target_energy: None,
            min_energy: None,
            max_energy: Some(0.5),
        },
        "anger" => AudioProfile {
            seed_genre: "rock",
            target_valence: Some(0.3),
            target_energy: Some(0.8),
            min_energy: None,
            max_energy: None,
        },
        "fear" => AudioProfile {
            seed_genre: "ambient",
            target_valence: Some(0.3),
            target_energy: None,
            min_energy: None,
            max_energy: Some(0.6),
        },
        "disgust" => AudioProfile {
            seed_genre: "alt-rock",
            target_valence: Some(0.4),
            target_energy: None,
            min_energy: None,
            max_energy: None,
        },
        "surprise" => AudioProfile {
            seed_genre: "dance",
            target_valence: Some(0.7),
            target_energy: None,
            min_energy: None,
            max_energy: None,
        },
        "neutral" => AudioProfile {
            seed_genre: "chill",
            target_valence: Some(0.5),
            target_energy: None,
            min_energy: None,
            max_energy: None,
        },
        _ => DEFAULT_PROFILE,
    }
}

/// Free-text query for the keyword-search fallback endpoint.
pub fn search_query_for(label: &str) -> &'static str {
    match label {
        "joy" => "happy upbeat",
        "sadness" => "sad calm acoustic",
        "anger" => "rock energetic",
        "fear" => "ambient relaxing",
        "disgust" => "melancholy alternative",
        "surprise" => "energetic surprise",
        "neutral" => "chill focus",
        _ => "mood",
    }
}

/// The outbound parameter set for one recommendation call.
/// Immutable once constructed; the fallback stages derive reduced variants.
#[derive(Debug, Clone)]
pub struct RecommendationQuery {
    pub limit: u32,
    pub seed_genres: String,
    pub market: Option<String>,
    pub seed_artists: Option<String>,
    pub seed_tracks: Option<String>,
    pub target_valence: Option<f64>,
    pub target_energy: Option<f64>,
    pub min_energy: Option<f64>,
    pub max_energy: Option<f64>,
}

impl RecommendationQuery {
    /// Stage 1: the full parameter bundle.
    pub fn full_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("limit".to_owned(), self.limit.to_string()),
            ("seed_genres".to_owned(), self.seed_genres.clone()),
        ];
        if let Some(a) = &self.seed_artists {
            pairs.push(("seed_artists".to_owned(), a.clone()));
        }
        if let Some(t) = &self.seed_tracks {
            pairs.push(("seed_tracks".to_owned(), t.clone()));
        }
        push_feature(&mut pairs, "target_valence", self.target_valence);
        push_feature(&mut pairs, "target_energy", self.target_energy);
        push_feature(&mut pairs, "min_energy", self.min_energy);
        push_feature(&mut pairs, "max_energy", self.max_energy);
        if let Some(m) = &self.market {
            pairs.push(("market".to_owned(), m.clone()));
        }
        pairs
    }

    /// Stage 2: required seeds + limit, keeping market if present.
    pub fn seed_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.bare_pairs();
        if let Some(m) = &self.market {
            pairs.push(("market".to_owned(), m.clone()));
        }
        pairs
    }

    /// Stage 3: seeds + limit only.
    pub fn bare_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("limit".to_owned(), self.limit.to_string()),
            ("seed_genres".to_owned(), self.seed_genres.clone()),
        ]
    }
}

fn push_feature(pairs: &mut Vec<(String, String)>, key: &str, value: Option<f64>) {
    if let Some(v) = value {
        pairs.push((key.to_owned(), v.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_turkish_spellings() {
        assert_eq!(fold_label("Mutlu"), "joy");
        assert_eq!(fold_label("üzgün"), "sadness");
        assert_eq!(fold_label("  KORKU  "), "fear");
    }

    #[test]
    fn unknown_label_passes_through_lowercased() {
        assert_eq!(fold_label("Serenity"), "serenity");
    }

    #[test]
    fn joy_profile_targets_high_valence() {
        let p = profile_for("joy");
        assert_eq!(p.seed_genre, "pop");
        assert_eq!(p.target_valence, Some(0.9));
        assert_eq!(p.min_energy, Some(0.5));
    }

    #[test]
    fn unknown_label_gets_default_profile() {
        let p = profile_for("nostalgia");
        assert_eq!(p.seed_genre, "pop");
        assert_eq!(p.target_valence, Some(0.6));
    }

    #[test]
    fn unknown_label_search_query_is_mood() {
        assert_eq!(search_query_for("zzz-unknown"), "mood");
    }

    #[test]
    fn query_stage_reduction() {
        let q = RecommendationQuery {
            limit: 10,
            seed_genres: "acoustic".into(),
            market: Some("TR".into()),
            seed_artists: Some("a1,a2".into()),
            seed_tracks: None,
            target_valence: Some(0.2),
            target_energy: None,
            min_energy: None,
            max_energy: Some(0.5),
        };

        let full = q.full_pairs();
        assert!(full.iter().any(|(k, v)| k == "target_valence" && v == "0.2"));
        assert!(full.iter().any(|(k, v)| k == "seed_artists" && v == "a1,a2"));
        assert!(full.iter().any(|(k, _)| k == "market"));

        let seeds = q.seed_pairs();
        assert_eq!(seeds.len(), 3);
        assert!(seeds.iter().any(|(k, _)| k == "market"));
        assert!(!seeds.iter().any(|(k, _)| k == "target_valence"));

        let bare = q.bare_pairs();
        assert_eq!(bare.len(), 2);
        assert!(!bare.iter().any(|(k, _)| k == "market"));
    }
}
