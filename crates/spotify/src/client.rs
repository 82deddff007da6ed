//! The recommendation client: auth, parameter mapping, genre validation, and
//! the cascading fallback chain.
//!
//! One logical call walks four stages of reduced recommendation queries and
//! finally a keyword search. A stage advances only on an upstream rejection or
//! transport failure; an empty-but-valid result jumps straight to the search
//! fallback. `Configuration` (missing credentials) aborts immediately.

use crate::api::SpotifyApi;
use crate::cache::{Clock, GenreSeedCache, SystemClock, TokenCache};
use crate::error::SpotifyError;
use crate::params::{self, COMMON_GENRES, RecommendationQuery};
use crate::track::{self, Track};
use chrono::Duration;
use std::sync::Arc;

const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 50;
const MAX_SEARCH_LIMIT: u32 = 20;

/// Tunables injected by the caller; defaults match the provider contract.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub default_market: Option<String>,
    /// Tokens are considered expired this many seconds early.
    pub token_early_refresh_secs: i64,
    pub genre_ttl_secs: i64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            default_market: None,
            token_early_refresh_secs: 60,
            genre_ttl_secs: 6 * 3600,
        }
    }
}

/// One recommendation request as callers express it.
#[derive(Debug, Clone, Default)]
pub struct RecommendRequest {
    pub emotion: String,
    pub limit: u32,
    pub market: Option<String>,
    /// Overrides the profile's genre seed.
    pub genre_override: Option<String>,
    /// Comma-separated artist IDs.
    pub seed_artists: Option<String>,
    /// Comma-separated track IDs.
    pub seed_tracks: Option<String>,
}

impl RecommendRequest {
    pub fn for_emotion(emotion: impl Into<String>, limit: u32) -> Self {
        Self { emotion: emotion.into(), limit, ..Self::default() }
    }
}

pub struct RecommendationClient {
    api: Arc<dyn SpotifyApi>,
    clock: Arc<dyn Clock>,
    tokens: TokenCache,
    genres: GenreSeedCache,
    default_market: Option<String>,
    token_early_refresh: Duration,
}

impl RecommendationClient {
    pub fn new(api: Arc<dyn SpotifyApi>, clock: Arc<dyn Clock>, opts: ClientOptions) -> Self {
        Self {
            api,
            clock,
            tokens: TokenCache::new(),
            genres: GenreSeedCache::new(Duration::seconds(opts.genre_ttl_secs)),
            default_market: opts.default_market,
            token_early_refresh: Duration::seconds(opts.token_early_refresh_secs),
        }
    }

    pub fn with_defaults(api: Arc<dyn SpotifyApi>) -> Self {
        Self::new(api, Arc::new(SystemClock), ClientOptions::default())
    }

    /// Resolve an emotion label to a ranked track list.
    ///
    /// Never fails for provider-side errors reachable by fallback; the only
    /// surfaced errors are missing credentials and a fully exhausted chain
    /// whose final search attempt itself failed.
    pub async fn recommend(&self, req: &RecommendRequest) -> Result<Vec<Track>, SpotifyError> {
        let token = self
            .tokens
            .bearer(self.api.as_ref(), self.clock.as_ref(), self.token_early_refresh)
            .await?;

        let label = params::fold_label(&req.emotion);
        let query = self.build_query(req, &label, &token).await;

        let mut last_status: Option<SpotifyError> = None;
        for (stage, pairs) in self.attempts(&query) {
            match self.api.recommendations(&token, pairs).await {
                Ok(raw) if raw.is_empty() => {
                    tracing::debug!(stage, emotion = %label, "empty recommendation result, falling back to search");
                    break;
                }
                Ok(raw) => return Ok(track::project(raw)),
                Err(e) if e.is_fallback() => {
                    tracing::warn!(stage, emotion = %label, error = %e, "recommendation attempt failed");
                    last_status = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        if let Some(e) = &last_status {
            tracing::debug!(emotion = %label, last_error = %e, "recommendation chain exhausted, trying search");
        }

        let search_query = params::search_query_for(&label);
        let limit = req.limit.clamp(MIN_LIMIT, MAX_SEARCH_LIMIT);
        self.api
            .search_tracks(&token, search_query, limit)
            .await
            .map(track::project)
    }

    async fn build_query(
        &self,
        req: &RecommendRequest,
        label: &str,
        token: &str,
    ) -> RecommendationQuery {
        let profile = params::profile_for(label);
        let mut query = RecommendationQuery {
            limit: req.limit.clamp(MIN_LIMIT, MAX_LIMIT),
            seed_genres: req
                .genre_override
                .clone()
                .unwrap_or_else(|| profile.seed_genre.to_owned()),
            market: req.market.clone().or_else(|| self.default_market.clone()),
            seed_artists: req.seed_artists.clone(),
            seed_tracks: req.seed_tracks.clone(),
            target_valence: profile.target_valence,
            target_energy: profile.target_energy,
            min_energy: profile.min_energy,
            max_energy: profile.max_energy,
        };

        // Validate the seed against the provider's live capability list; an
        // unavailable list means the check is skipped entirely.
        let seeds = self
            .genres
            .seeds(self.api.as_ref(), token, self.clock.as_ref())
            .await;
        if !seeds.is_empty() && !seeds.iter().any(|s| s == &query.seed_genres) {
            if let Some(safe) = COMMON_GENRES.iter().find(|g| seeds.iter().any(|s| s == *g)) {
                tracing::debug!(requested = %query.seed_genres, substituted = %safe, "genre seed not available");
                query.seed_genres = (*safe).to_owned();
            }
        }
        query
    }

    /// The ordered fallback stages: full bundle, seeds+market, seeds only,
    /// then one attempt per common genre.
    fn attempts(&self, query: &RecommendationQuery) -> Vec<(&'static str, Vec<(String, String)>)> {
        let mut attempts = vec![
            ("full", query.full_pairs()),
            ("seeds", query.seed_pairs()),
            ("bare", query.bare_pairs()),
        ];
        for genre in COMMON_GENRES {
            attempts.push((
                "genre-sweep",
                vec![
                    ("limit".to_owned(), query.limit.to_string()),
                    ("seed_genres".to_owned(), genre.to_owned()),
                ],
            ));
        }
        attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use crate::cache::ManualClock;
    use chrono::DateTime;
    use std::sync::atomic::Ordering;

    fn client(api: Arc<MockApi>) -> RecommendationClient {
        let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).expect("ts"));
        RecommendationClient::new(api, Arc::new(clock), ClientOptions::default())
    }

    fn upstream(status: u16) -> SpotifyError {
        SpotifyError::Upstream { status }
    }

    #[tokio::test]
    async fn first_attempt_success_returns_tracks() {
        let api = Arc::new(MockApi::new());
        api.push_recommendations(Ok(vec![MockApi::track("t1", "Song")]));
        let c = client(api.clone());

        let tracks = c
            .recommend(&RecommendRequest::for_emotion("joy", 10))
            .await
            .unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "t1");
        assert_eq!(api.rec_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejection_advances_to_reduced_query() {
        let api = Arc::new(MockApi::new());
        api.push_recommendations(Err(upstream(400)));
        api.push_recommendations(Ok(vec![MockApi::track("t2", "Fallback Song")]));
        let c = client(api.clone());

        let tracks = c
            .recommend(&RecommendRequest::for_emotion("sadness", 10))
            .await
            .unwrap();
        assert_eq!(tracks[0].id, "t2");
        assert_eq!(api.rec_calls.load(Ordering::SeqCst), 2);

        // Second attempt used the reduced seeds+limit(+market) form.
        let queries = api.rec_queries.lock().unwrap();
        assert!(queries[0].iter().any(|(k, _)| k == "target_valence"));
        assert!(!queries[1].iter().any(|(k, _)| k == "target_valence"));
    }

    #[tokio::test]
    async fn exhausted_chain_with_empty_search_returns_empty() {
        let api = Arc::new(MockApi::new());
        // Stages 1-3 plus five genre sweeps all rejected.
        for _ in 0..8 {
            api.push_recommendations(Err(upstream(404)));
        }
        // Search script left empty: default Ok(vec![]).
        let c = client(api.clone());

        let tracks = c
            .recommend(&RecommendRequest::for_emotion("anger", 10))
            .await
            .unwrap();
        assert!(tracks.is_empty());
        assert_eq!(api.rec_calls.load(Ordering::SeqCst), 8);
        assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_result_jumps_to_search_without_more_attempts() {
        let api = Arc::new(MockApi::new());
        api.push_recommendations(Ok(vec![]));
        api.push_search(Ok(vec![MockApi::track("s1", "Searched")]));
        let c = client(api.clone());

        let tracks = c
            .recommend(&RecommendRequest::for_emotion("neutral", 5))
            .await
            .unwrap();
        assert_eq!(tracks[0].id, "s1");
        assert_eq!(api.rec_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_failure_on_search_is_surfaced_distinctly() {
        let api = Arc::new(MockApi::new());
        for _ in 0..8 {
            api.push_recommendations(Err(upstream(500)));
        }
        api.push_search(Err(SpotifyError::Transport("connection reset".into())));
        let c = client(api.clone());

        let err = c
            .recommend(&RecommendRequest::for_emotion("fear", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, SpotifyError::Transport(_)));
    }

    #[tokio::test]
    async fn configuration_error_aborts_immediately() {
        let api = Arc::new(MockApi::new());
        api.push_token(Err(SpotifyError::Configuration));
        let c = client(api.clone());

        let err = c
            .recommend(&RecommendRequest::for_emotion("joy", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, SpotifyError::Configuration));
        assert_eq!(api.rec_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn one_exchange_even_with_cold_genre_cache() {
        let api = Arc::new(MockApi::new());
        api.push_genres(Ok(vec!["pop".into()]));
        api.push_recommendations(Ok(vec![MockApi::track("t", "x")]));
        let c = client(api.clone());

        c.recommend(&RecommendRequest::for_emotion("joy", 10))
            .await
            .unwrap();
        // Both caches were cold; the genre fetch reuses the freshly exchanged
        // token instead of triggering a second exchange.
        assert_eq!(api.token_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.genre_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unavailable_genre_is_substituted_with_safe_seed() {
        let api = Arc::new(MockApi::new());
        // "ambient" (fear's default) is not in the live list, "pop" is.
        api.push_genres(Ok(vec!["pop".into(), "rock".into()]));
        api.push_recommendations(Ok(vec![MockApi::track("t", "x")]));
        let c = client(api.clone());

        c.recommend(&RecommendRequest::for_emotion("fear", 10))
            .await
            .unwrap();
        let queries = api.rec_queries.lock().unwrap();
        let seed = queries[0]
            .iter()
            .find(|(k, _)| k == "seed_genres")
            .map(|(_, v)| v.as_str());
        assert_eq!(seed, Some("pop"));
    }

    #[tokio::test]
    async fn genre_validation_failure_keeps_requested_seed() {
        let api = Arc::new(MockApi::new());
        api.push_genres(Err(upstream(404)));
        api.push_recommendations(Ok(vec![MockApi::track("t", "x")]));
        let c = client(api.clone());

        c.recommend(&RecommendRequest::for_emotion("fear", 10))
            .await
            .unwrap();
        let queries = api.rec_queries.lock().unwrap();
        let seed = queries[0]
            .iter()
            .find(|(k, _)| k == "seed_genres")
            .map(|(_, v)| v.as_str());
        assert_eq!(seed, Some("ambient"));
    }

    #[tokio::test]
    async fn limit_is_clamped_to_provider_bounds() {
        let api = Arc::new(MockApi::new());
        api.push_recommendations(Ok(vec![MockApi::track("t", "x")]));
        let c = client(api.clone());

        c.recommend(&RecommendRequest::for_emotion("joy", 500))
            .await
            .unwrap();
        let queries = api.rec_queries.lock().unwrap();
        let limit = queries[0]
            .iter()
            .find(|(k, _)| k == "limit")
            .map(|(_, v)| v.as_str());
        assert_eq!(limit, Some("50"));
    }

    #[tokio::test]
    async fn caller_overrides_replace_profile_seed() {
        let api = Arc::new(MockApi::new());
        api.push_recommendations(Ok(vec![MockApi::track("t", "x")]));
        let c = client(api.clone());

        let req = RecommendRequest {
            emotion: "joy".into(),
            limit: 10,
            genre_override: Some("jazz".into()),
            seed_artists: Some("a9".into()),
            ..RecommendRequest::default()
        };
        c.recommend(&req).await.unwrap();

        let queries = api.rec_queries.lock().unwrap();
        assert!(queries[0].iter().any(|(k, v)| k == "seed_genres" && v == "jazz"));
        assert!(queries[0].iter().any(|(k, v)| k == "seed_artists" && v == "a9"));
    }
}
