use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;

/// All menta pipeline parameters. Loaded from the `menta_config` table at
/// startup; first boot writes defaults, subsequent boots read existing values.
/// Provider credentials are NOT held here — the service crates read them from
/// the environment so secrets never land in the database or the logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentaCfg {
    // scoring model
    pub classifier_model: String,
    pub use_translation: bool,
    pub translation_model: String,

    // label resolution
    pub uncertainty_threshold: f64,
    pub uncertainty_margin: f64,
    pub keyword_bias_floor: f64,

    // recommendations
    pub default_market: String,
    pub default_limit: u32,
    pub token_early_refresh_secs: i64,
    pub genre_ttl_secs: i64,
}

impl Default for MentaCfg {
    fn default() -> Self {
        Self {
            classifier_model: "j-hartmann/emotion-english-distilroberta-base".to_owned(),
            use_translation: true,
            translation_model: "Helsinki-NLP/opus-mt-tr-en".to_owned(),
            uncertainty_threshold: 0.6,
            uncertainty_margin: 0.1,
            keyword_bias_floor: 0.95,
            default_market: "TR".to_owned(),
            default_limit: 10,
            token_early_refresh_secs: 60,
            genre_ttl_secs: 6 * 3600,
        }
    }
}

impl MentaCfg {
    /// Load config from the `menta_config` table. If the table is empty, seed
    /// it with defaults.
    pub async fn load(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM menta_config")
                .fetch_all(pool)
                .await?;

        if rows.is_empty() {
            let cfg = Self::default();
            cfg.seed(pool).await?;
            return Ok(cfg);
        }

        let map: HashMap<String, String> = rows.into_iter().collect();
        Ok(Self::from_map(&map))
    }

    /// Write all default values into the `menta_config` table.
    async fn seed(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        let entries = self.to_entries();
        for (key, value, desc) in &entries {
            sqlx::query(
                "INSERT INTO menta_config (key, value, description) VALUES ($1, $2, $3) \
                 ON CONFLICT (key) DO NOTHING",
            )
            .bind(key)
            .bind(value)
            .bind(desc)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    pub fn from_map(m: &HashMap<String, String>) -> Self {
        let d = Self::default();
        Self {
            classifier_model: m
                .get("classifier_model")
                .cloned()
                .unwrap_or(d.classifier_model),
            use_translation: get_or(m, "use_translation", d.use_translation),
            translation_model: m
                .get("translation_model")
                .cloned()
                .unwrap_or(d.translation_model),
            uncertainty_threshold: get_or(m, "uncertainty_threshold", d.uncertainty_threshold),
            uncertainty_margin: get_or(m, "uncertainty_margin", d.uncertainty_margin),
            keyword_bias_floor: get_or(m, "keyword_bias_floor", d.keyword_bias_floor),
            default_market: m.get("default_market").cloned().unwrap_or(d.default_market),
            default_limit: get_or(m, "default_limit", d.default_limit),
            token_early_refresh_secs: get_or(m, "token_early_refresh_secs", d.token_early_refresh_secs),
            genre_ttl_secs: get_or(m, "genre_ttl_secs", d.genre_ttl_secs),
        }
    }

    fn to_entries(&self) -> Vec<(&str, String, &str)> {
        vec![
            ("classifier_model", self.classifier_model.clone(), "Emotion scoring model identifier"),
            ("use_translation", self.use_translation.to_string(), "Translate input before classification"),
            ("translation_model", self.translation_model.clone(), "Source-to-English translation model"),
            ("uncertainty_threshold", self.uncertainty_threshold.to_string(), "Minimum top probability to trust a label"),
            ("uncertainty_margin", self.uncertainty_margin.to_string(), "Minimum top-vs-second separation"),
            ("keyword_bias_floor", self.keyword_bias_floor.to_string(), "Score floor applied to a keyword-matched label"),
            ("default_market", self.default_market.clone(), "Recommendation market when the caller gives none"),
            ("default_limit", self.default_limit.to_string(), "Recommendation result count default"),
            ("token_early_refresh_secs", self.token_early_refresh_secs.to_string(), "Provider token early-expiry window seconds"),
            ("genre_ttl_secs", self.genre_ttl_secs.to_string(), "Genre seed cache TTL seconds"),
        ]
    }
}

fn get_or<T: std::str::FromStr>(map: &HashMap<String, String>, key: &str, default: T) -> T {
    map.get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_map_parses_overrides() {
        let map = HashMap::from([
            ("uncertainty_threshold".to_owned(), "0.7".to_owned()),
            ("use_translation".to_owned(), "false".to_owned()),
            ("default_market".to_owned(), "DE".to_owned()),
        ]);
        let cfg = MentaCfg::from_map(&map);
        assert_eq!(cfg.uncertainty_threshold, 0.7);
        assert!(!cfg.use_translation);
        assert_eq!(cfg.default_market, "DE");
        // untouched keys keep defaults
        assert_eq!(cfg.default_limit, 10);
    }

    #[test]
    fn unparsable_value_falls_back_to_default() {
        let map = HashMap::from([("default_limit".to_owned(), "plenty".to_owned())]);
        let cfg = MentaCfg::from_map(&map);
        assert_eq!(cfg.default_limit, 10);
    }
}
