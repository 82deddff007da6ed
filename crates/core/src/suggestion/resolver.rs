//! Tiered suggestion lookup: stored variants → stored single text → static
//! fallback table → generic fallback. No tier ever errors; storage
//! unavailability is treated as "record not found".

use super::catalog;
use super::store::SuggestionStore;
use crate::emotion::lexicon::normalize_label;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

pub struct SuggestionResolver {
    store: Option<Arc<dyn SuggestionStore>>,
    /// Injected random source so scenario tests can fix the seed.
    rng: Mutex<StdRng>,
}

impl SuggestionResolver {
    pub fn new(store: Option<Arc<dyn SuggestionStore>>) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(store: Option<Arc<dyn SuggestionStore>>, seed: u64) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Return a suggestion text for a raw or canonical emotion label.
    /// Repeated calls for the same label may differ when variants exist.
    pub async fn suggestion_for(&self, label: &str) -> String {
        let emotion = normalize_label(label);

        if let Some(store) = &self.store {
            match store.fetch(&emotion).await {
                Ok(Some(record)) => {
                    if !record.suggestion_texts.is_empty() {
                        let idx = self
                            .rng
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .gen_range(0..record.suggestion_texts.len());
                        return record.suggestion_texts[idx].clone();
                    }
                    if let Some(single) = record
                        .suggestion_text
                        .as_deref()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                    {
                        return single.to_owned();
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(emotion = %emotion, error = %e, "suggestion lookup failed, using fallback");
                }
            }
        }

        catalog::fallback_for(&emotion)
            .map(str::to_owned)
            .unwrap_or_else(|| catalog::GENERIC_FALLBACK.to_owned())
    }
}
