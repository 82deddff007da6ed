pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod params;
pub mod track;

pub use client::{ClientOptions, RecommendRequest, RecommendationClient};
pub use error::SpotifyError;
pub use track::Track;
