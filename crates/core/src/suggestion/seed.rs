//! Idempotent seeding of the suggestion store from the static catalog.

use super::catalog;
use super::store::{StoreError, SuggestionRecord, SuggestionStore, UpsertOutcome};
use crate::emotion::lexicon::{ALIASES, normalize_label};
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct SeedStats {
    pub inserted: u64,
    pub updated: u64,
}

/// Seed every catalog emotion. In append mode existing variants are kept and
/// unioned with the catalog; otherwise the catalog replaces them. With
/// `include_aliases`, alias spellings are seeded as well (they canonicalize
/// onto their target record).
pub async fn seed(
    store: &dyn SuggestionStore,
    append: bool,
    include_aliases: bool,
) -> Result<SeedStats, StoreError> {
    let mut stats = SeedStats::default();

    for (emotion, texts) in catalog::SUGGESTIONS {
        upsert_one(store, emotion, texts, append, &mut stats).await?;
    }

    if include_aliases {
        for (alias, target) in ALIASES {
            if let Some((_, texts)) = catalog::SUGGESTIONS.iter().find(|(e, _)| e == target) {
                upsert_one(store, alias, texts, append, &mut stats).await?;
            }
        }
    }

    Ok(stats)
}

async fn upsert_one(
    store: &dyn SuggestionStore,
    emotion: &str,
    texts: &[&str],
    append: bool,
    stats: &mut SeedStats,
) -> Result<(), StoreError> {
    let emotion = normalize_label(emotion);
    let record = SuggestionRecord::with_variants(
        emotion.clone(),
        texts.iter().map(|s| (*s).to_owned()).collect(),
        catalog::category_for(&emotion),
    );
    match store.upsert(record, append).await? {
        UpsertOutcome::Inserted => stats.inserted += 1,
        UpsertOutcome::Updated => stats.updated += 1,
    }
    Ok(())
}
