//! Static emotion lexicon and alias table.
//!
//! Declaration order of `EMOTION_KEYWORDS` is significant: the first label
//! whose keyword matches wins, with no longest-match refinement.

use super::normalize::{normalize, strip_diacritics};

/// Canonical label → Turkish surface keywords. Immutable for the process
/// lifetime; used only for matching.
pub const EMOTION_KEYWORDS: &[(&str, &[&str])] = &[
    ("anger", &[
        "sinirliyim", "sinirli", "kızgınım", "kizginim", "kızgın",
        "öfkeliyim", "ofkeliyim", "öfke", "ofke",
    ]),
    ("sadness", &[
        "üzgünüm", "uzgunum", "üzgün", "uzgun", "hüzünlü", "huzunlu",
        "mutsuz", "moralim bozuk", "ağlıyorum", "agliyorum",
    ]),
    ("joy", &[
        "mutluyum", "mutlu", "harika hissediyorum", "seviniyorum",
        "neşeliyim", "neseliyim", "iyi hissediyorum",
    ]),
    ("fear", &[
        "korkuyorum", "korku", "endişeliyim", "endiseliyim",
        "kaygılıyım", "kaygiliyim", "anksiyete", "panik",
    ]),
    ("surprise", &[
        "şaşırdım", "sasirdim", "şaşkınım", "saskinim", "beklenmedik", "beklemedim",
    ]),
    ("love", &["seviyorum", "aşığım", "asigim", "aşk", "ask", "sevgi"]),
    ("neutral", &["nötr", "notr", "fark etmiyor", "normal"]),
    ("anxiety", &["kaygılıyım", "kaygı", "kaygiliyim", "anksiyete", "panik"]),
    ("disgust", &["tiksindim", "tiksinti", "iğrenç", "igrenc"]),
    ("admiration", &["hayranım", "hayranlik", "takdir ediyorum"]),
    ("curiosity", &["merak ediyorum", "meraklıyım", "merakliyim"]),
];

/// Arbitrary label spelling → canonical label. Lookup misses map to the
/// trimmed/lowercased input, so `normalize_label` is total.
pub const ALIASES: &[(&str, &str)] = &[
    // English common
    ("angry", "anger"),
    ("sad", "sadness"),
    ("happy", "joy"),
    ("joyful", "joy"),
    ("happiness", "joy"),
    ("rage", "anger"),
    ("mad", "anger"),
    ("furious", "anger"),
    ("afraid", "fear"),
    ("scared", "fear"),
    ("worry", "anxiety"),
    ("worried", "anxiety"),
    ("panic attack", "panic"),
    ("calm", "serenity"),
    ("relaxed", "serenity"),
    ("tense", "stress"),
    ("overwhelmed", "overwhelm"),
    ("burned out", "burnout"),
    ("disappointed", "disappointment"),
    ("grieving", "grief"),
    ("hopeless", "despair"),
    ("blue", "melancholy"),
    ("annoyed", "annoyance"),
    ("homesick", "homesickness"),
    // Turkish common
    ("mutlu", "joy"),
    ("mutluluk", "joy"),
    ("sevinç", "joy"),
    ("üzgün", "sadness"),
    ("üzüntü", "sadness"),
    ("keder", "sadness"),
    ("öfkeli", "anger"),
    ("öfke", "anger"),
    ("sinir", "anger"),
    ("korku", "fear"),
    ("korkmuş", "fear"),
    ("kaygı", "anxiety"),
    ("kaygili", "anxiety"),
    ("anksiyete", "anxiety"),
    ("endişe", "anxiety"),
    ("şaşkınlık", "surprise"),
    ("sevgi", "love"),
    ("aşk", "love"),
    ("nötr", "neutral"),
    ("iyimser", "optimism"),
    ("iyimserlik", "optimism"),
    ("minnettarlık", "gratitude"),
    ("şükür", "gratitude"),
    ("umut", "hope"),
    ("umutlu", "hope"),
    ("heyecan", "excitement"),
    ("coşku", "excitement"),
    ("huzur", "serenity"),
    ("iğrenme", "disgust"),
    ("tiksinti", "disgust"),
    ("utanç", "shame"),
    ("suçluluk", "guilt"),
    ("kıskançlık", "jealousy"),
    ("yalnızlık", "loneliness"),
    ("stres", "stress"),
    ("stresli", "stress"),
    ("sıkılmış", "boredom"),
    ("sıkıntı", "boredom"),
    ("merak", "curiosity"),
    ("pişmanlık", "regret"),
    ("kafa karışıklığı", "confusion"),
    ("kararsızlık", "confusion"),
    ("tükenmişlik", "burnout"),
    ("yas", "grief"),
    ("umutsuz", "despair"),
    ("panik", "panic"),
    // Slang / variants
    ("cok mutluyum", "joy"),
    ("coook uzgunum", "sadness"),
    ("yikildim", "sadness"),
    ("kahroldum", "sadness"),
    ("bayagi sinirliyim", "anger"),
    ("sinirim tepemde", "anger"),
    ("kafam karisik", "confusion"),
];

/// Scan the lexicon for the first label with a keyword occurring in the
/// normalized text. Returns `None` when nothing matches.
pub fn keyword_label(raw_text: &str) -> Option<&'static str> {
    let t = normalize(raw_text);
    for (label, words) in EMOTION_KEYWORDS {
        for word in *words {
            let stripped = strip_diacritics(word);
            if t.contains(stripped.as_str()) {
                return Some(label);
            }
        }
    }
    None
}

/// Canonicalize an arbitrary label spelling. Total: unknown input comes back
/// trimmed and lowercased.
pub fn normalize_label(raw: &str) -> String {
    let l = raw.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == l)
        .map(|(_, canonical)| (*canonical).to_owned())
        .unwrap_or(l)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_plain_keyword() {
        assert_eq!(keyword_label("bugün çok mutluyum"), Some("joy"));
        assert_eq!(keyword_label("moralim bozuk"), Some("sadness"));
    }

    #[test]
    fn matches_despite_diacritics_and_repeats() {
        assert_eq!(keyword_label("ÇOOOK mutluyum"), Some("joy"));
        assert_eq!(keyword_label("uzgunuuuum"), Some("sadness"));
    }

    #[test]
    fn declaration_order_breaks_overlaps() {
        // "panik" appears under both fear and anxiety; fear is declared first.
        assert_eq!(keyword_label("panik halindeyim"), Some("fear"));
    }

    #[test]
    fn no_keyword_yields_none() {
        assert_eq!(keyword_label("bugün hava güzeldi"), None);
    }

    #[test]
    fn alias_lookup_canonicalizes() {
        assert_eq!(normalize_label("Angry"), "anger");
        assert_eq!(normalize_label("  ÜZGÜN "), "sadness");
        assert_eq!(normalize_label("yikildim"), "sadness");
    }

    #[test]
    fn unknown_label_is_identity() {
        assert_eq!(normalize_label("Zzz-Unknown"), "zzz-unknown");
    }
}
