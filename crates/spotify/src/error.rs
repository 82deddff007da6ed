/// Error type for recommendation-provider operations.
///
/// The fallback chain advances on `Upstream` and `Transport`; `Configuration`
/// aborts immediately and is never retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpotifyError {
    /// Client credentials are not configured.
    #[error("spotify credentials missing: set MENTA_SPOTIFY_CLIENT_ID and MENTA_SPOTIFY_CLIENT_SECRET")]
    Configuration,
    /// The provider answered with a non-success status code.
    #[error("spotify rejected the request (status {status})")]
    Upstream { status: u16 },
    /// The request never produced a usable answer: connect, timeout, or
    /// decode failure.
    #[error("spotify transport failure: {0}")]
    Transport(String),
}

impl SpotifyError {
    /// True when the next fallback stage should be attempted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_never_falls_back() {
        assert!(!SpotifyError::Configuration.is_fallback());
        assert!(SpotifyError::Upstream { status: 400 }.is_fallback());
        assert!(SpotifyError::Transport("timeout".into()).is_fallback());
    }
}
