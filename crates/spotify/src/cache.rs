//! Injected caches for provider tokens and genre seeds.
//!
//! Both caches are process-wide singletons from the caller's point of view but
//! are plain owned objects here, passed into the client together with a
//! `Clock` so tests can drive expiry deterministically. Refreshes are
//! single-flight: the slot lock is held across the upstream call, so
//! concurrent callers wait for one refresh instead of issuing duplicates.

use crate::api::SpotifyApi;
use crate::error::SpotifyError;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

/// Time source for cache expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: std::sync::Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Bearer-token cache: empty at startup, populated on first need, overwritten
/// on refresh. Entries expire `early_refresh` ahead of the provider-reported
/// lifetime.
#[derive(Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a valid bearer token, performing a client-credentials exchange
    /// when the cached one is absent or expired.
    pub async fn bearer(
        &self,
        api: &dyn SpotifyApi,
        clock: &dyn Clock,
        early_refresh: Duration,
    ) -> Result<String, SpotifyError> {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref() {
            if clock.now() < cached.expires_at {
                return Ok(cached.token.clone());
            }
        }

        let grant = api.exchange_token().await?;
        let expires_at = clock.now() + Duration::seconds(grant.expires_in) - early_refresh;
        tracing::debug!(expires_at = %expires_at, "refreshed provider access token");
        let token = grant.access_token.clone();
        *slot = Some(CachedToken { token: grant.access_token, expires_at });
        Ok(token)
    }
}

#[derive(Debug, Clone)]
struct CachedSeeds {
    seeds: Vec<String>,
    expires_at: DateTime<Utc>,
}

/// Allowed-genre-seed cache, independent of the token cache.
///
/// A failed fetch is not cached and yields an empty list: genre validation is
/// a non-critical check and must never block a recommendation request.
pub struct GenreSeedCache {
    slot: Mutex<Option<CachedSeeds>>,
    ttl: Duration,
}

impl GenreSeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self { slot: Mutex::new(None), ttl }
    }

    pub async fn seeds(
        &self,
        api: &dyn SpotifyApi,
        token: &str,
        clock: &dyn Clock,
    ) -> Vec<String> {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref() {
            if clock.now() < cached.expires_at {
                return cached.seeds.clone();
            }
        }

        match api.available_genres(token).await {
            Ok(seeds) => {
                *slot = Some(CachedSeeds {
                    seeds: seeds.clone(),
                    expires_at: clock.now() + self.ttl,
                });
                seeds
            }
            Err(e) => {
                tracing::warn!(error = %e, "genre seed fetch failed, skipping validation");
                vec![]
            }
        }
    }
}
