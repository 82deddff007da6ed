//! Provider endpoints behind a trait so the client and its fallback chain can
//! be exercised against programmable fakes.

use crate::error::SpotifyError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const API_URL: &str = "https://api.spotify.com";
const METADATA_TIMEOUT_SECS: u64 = 15;
const RECOMMEND_TIMEOUT_SECS: u64 = 20;

/// A granted client-credentials token with its provider-reported lifetime.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: i64,
}

// ── provider wire types ──

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

/// One track record as the provider returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub album: Option<RawAlbum>,
}

#[derive(Deserialize)]
struct TokenEnvelope {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Deserialize)]
struct GenresEnvelope {
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Deserialize)]
struct RecommendationsEnvelope {
    #[serde(default)]
    tracks: Vec<RawTrack>,
}

#[derive(Deserialize, Default)]
struct SearchTracks {
    #[serde(default)]
    items: Vec<RawTrack>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    tracks: SearchTracks,
}

/// The four provider endpoints the recommendation client depends on.
pub trait SpotifyApi: Send + Sync {
    /// Client-credentials token exchange.
    fn exchange_token(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<TokenGrant, SpotifyError>> + Send + '_>>;

    /// Current list of allowed genre seeds.
    fn available_genres(
        &self,
        token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, SpotifyError>> + Send + '_>>;

    /// Recommendation endpoint with an arbitrary parameter set.
    fn recommendations(
        &self,
        token: &str,
        query: Vec<(String, String)>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawTrack>, SpotifyError>> + Send + '_>>;

    /// Free-text track search.
    fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawTrack>, SpotifyError>> + Send + '_>>;
}

/// Live HTTP implementation over reqwest.
pub struct HttpApi {
    client: reqwest::Client,
    credentials: Option<(String, String)>,
    accounts_url: String,
    api_url: String,
}

impl HttpApi {
    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(METADATA_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            credentials: client_id.zip(client_secret),
            accounts_url: ACCOUNTS_URL.to_owned(),
            api_url: API_URL.to_owned(),
        }
    }

    /// Reads `MENTA_SPOTIFY_CLIENT_ID` and `MENTA_SPOTIFY_CLIENT_SECRET`.
    /// Missing credentials still build a client; the auth stage reports
    /// `Configuration` when it is first needed.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("MENTA_SPOTIFY_CLIENT_ID").ok(),
            std::env::var("MENTA_SPOTIFY_CLIENT_SECRET").ok(),
        )
    }

    /// Point both endpoints at a test server.
    pub fn with_base_urls(mut self, accounts_url: String, api_url: String) -> Self {
        self.accounts_url = accounts_url.trim_end_matches('/').to_owned();
        self.api_url = api_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, SpotifyError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(SpotifyError::Upstream { status: status.as_u16() });
    }
    resp.json::<T>()
        .await
        .map_err(|e| SpotifyError::Transport(e.to_string()))
}

fn transport(e: reqwest::Error) -> SpotifyError {
    SpotifyError::Transport(e.to_string())
}

impl SpotifyApi for HttpApi {
    fn exchange_token(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<TokenGrant, SpotifyError>> + Send + '_>> {
        Box::pin(async move {
            let (id, secret) = self
                .credentials
                .as_ref()
                .ok_or(SpotifyError::Configuration)?;
            let basic = BASE64.encode(format!("{id}:{secret}"));

            let resp = self
                .client
                .post(format!("{}/api/token", self.accounts_url))
                .header("Authorization", format!("Basic {basic}"))
                .form(&[("grant_type", "client_credentials")])
                .send()
                .await
                .map_err(transport)?;

            let envelope: TokenEnvelope = read_json(resp).await?;
            let access_token = envelope
                .access_token
                .ok_or_else(|| SpotifyError::Transport("auth response missing access_token".into()))?;
            Ok(TokenGrant {
                access_token,
                expires_in: envelope.expires_in.unwrap_or(3600),
            })
        })
    }

    fn available_genres(
        &self,
        token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, SpotifyError>> + Send + '_>> {
        let token = token.to_owned();
        Box::pin(async move {
            let resp = self
                .client
                .get(format!(
                    "{}/v1/recommendations/available-genre-seeds",
                    self.api_url
                ))
                .bearer_auth(&token)
                .send()
                .await
                .map_err(transport)?;
            let envelope: GenresEnvelope = read_json(resp).await?;
            Ok(envelope.genres)
        })
    }

    fn recommendations(
        &self,
        token: &str,
        query: Vec<(String, String)>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawTrack>, SpotifyError>> + Send + '_>> {
        let token = token.to_owned();
        Box::pin(async move {
            let resp = self
                .client
                .get(format!("{}/v1/recommendations", self.api_url))
                .bearer_auth(&token)
                .query(&query)
                .timeout(Duration::from_secs(RECOMMEND_TIMEOUT_SECS))
                .send()
                .await
                .map_err(transport)?;
            let envelope: RecommendationsEnvelope = read_json(resp).await?;
            Ok(envelope.tracks)
        })
    }

    fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawTrack>, SpotifyError>> + Send + '_>> {
        let token = token.to_owned();
        let query = query.to_owned();
        Box::pin(async move {
            let limit = limit.to_string();
            let resp = self
                .client
                .get(format!("{}/v1/search", self.api_url))
                .bearer_auth(&token)
                .query(&[
                    ("q", query.as_str()),
                    ("type", "track"),
                    ("limit", limit.as_str()),
                ])
                .send()
                .await
                .map_err(transport)?;
            let envelope: SearchEnvelope = read_json(resp).await?;
            Ok(envelope.tracks.items)
        })
    }
}

/// Programmable fake for tests — scripted per-endpoint outcomes plus call
/// counters and captured queries. An exhausted script falls back to benign
/// defaults (a fresh token, empty lists).
#[derive(Default)]
pub struct MockApi {
    pub token_script: std::sync::Mutex<std::collections::VecDeque<Result<TokenGrant, SpotifyError>>>,
    pub genre_script: std::sync::Mutex<std::collections::VecDeque<Result<Vec<String>, SpotifyError>>>,
    pub rec_script: std::sync::Mutex<std::collections::VecDeque<Result<Vec<RawTrack>, SpotifyError>>>,
    pub search_script: std::sync::Mutex<std::collections::VecDeque<Result<Vec<RawTrack>, SpotifyError>>>,
    pub token_calls: std::sync::atomic::AtomicU32,
    pub genre_calls: std::sync::atomic::AtomicU32,
    pub rec_calls: std::sync::atomic::AtomicU32,
    pub search_calls: std::sync::atomic::AtomicU32,
    pub rec_queries: std::sync::Mutex<Vec<Vec<(String, String)>>>,
    pub search_queries: std::sync::Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_token(&self, outcome: Result<TokenGrant, SpotifyError>) {
        self.token_script.lock().unwrap().push_back(outcome);
    }

    pub fn push_genres(&self, outcome: Result<Vec<String>, SpotifyError>) {
        self.genre_script.lock().unwrap().push_back(outcome);
    }

    pub fn push_recommendations(&self, outcome: Result<Vec<RawTrack>, SpotifyError>) {
        self.rec_script.lock().unwrap().push_back(outcome);
    }

    pub fn push_search(&self, outcome: Result<Vec<RawTrack>, SpotifyError>) {
        self.search_script.lock().unwrap().push_back(outcome);
    }

    /// A minimal raw track for scripting responses.
    pub fn track(id: &str, name: &str) -> RawTrack {
        RawTrack {
            id: id.to_owned(),
            name: name.to_owned(),
            ..RawTrack::default()
        }
    }
}

impl SpotifyApi for MockApi {
    fn exchange_token(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<TokenGrant, SpotifyError>> + Send + '_>> {
        self.token_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let outcome = self.token_script.lock().unwrap().pop_front().unwrap_or(Ok(TokenGrant {
            access_token: "mock-token".to_owned(),
            expires_in: 3600,
        }));
        Box::pin(async move { outcome })
    }

    fn available_genres(
        &self,
        _token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, SpotifyError>> + Send + '_>> {
        self.genre_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let outcome = self
            .genre_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(vec![]));
        Box::pin(async move { outcome })
    }

    fn recommendations(
        &self,
        _token: &str,
        query: Vec<(String, String)>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawTrack>, SpotifyError>> + Send + '_>> {
        self.rec_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.rec_queries.lock().unwrap().push(query);
        let outcome = self
            .rec_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(vec![]));
        Box::pin(async move { outcome })
    }

    fn search_tracks(
        &self,
        _token: &str,
        query: &str,
        _limit: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawTrack>, SpotifyError>> + Send + '_>> {
        self.search_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.search_queries.lock().unwrap().push(query.to_owned());
        let outcome = self
            .search_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(vec![]));
        Box::pin(async move { outcome })
    }
}
