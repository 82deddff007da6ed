use crate::api::RawTrack;
use serde::{Deserialize, Serialize};

/// A provider track projected to the shape callers consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Comma-joined display names of the performing artists.
    pub artists: String,
    pub external_url: Option<String>,
    pub preview_url: Option<String>,
    pub album: Option<String>,
    pub image: Option<String>,
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        let artists = raw
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let album_name = raw.album.as_ref().map(|a| a.name.clone());
        // First image in the provider's returned ordering wins.
        let image = raw
            .album
            .into_iter()
            .flat_map(|a| a.images)
            .map(|i| i.url)
            .find(|u| !u.is_empty());
        Self {
            id: raw.id,
            name: raw.name,
            artists,
            external_url: raw.external_urls.get("spotify").cloned(),
            preview_url: raw.preview_url,
            album: album_name,
            image,
        }
    }
}

pub fn project(raw: Vec<RawTrack>) -> Vec<Track> {
    raw.into_iter().map(Track::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RawAlbum, RawArtist, RawImage};
    use std::collections::HashMap;

    #[test]
    fn projects_full_record() {
        let raw = RawTrack {
            id: "t1".into(),
            name: "Ağlama Anne".into(),
            artists: vec![
                RawArtist { name: "Seksendört".into() },
                RawArtist { name: String::new() },
                RawArtist { name: "Tuğba".into() },
            ],
            external_urls: HashMap::from([(
                "spotify".to_owned(),
                "https://open.spotify.com/track/t1".to_owned(),
            )]),
            preview_url: Some("https://p.scdn.co/t1".into()),
            album: Some(RawAlbum {
                name: "Sessiz Film".into(),
                images: vec![
                    RawImage { url: String::new() },
                    RawImage { url: "https://i.scdn.co/cover".into() },
                ],
            }),
        };

        let track = Track::from(raw);
        assert_eq!(track.artists, "Seksendört, Tuğba");
        assert_eq!(track.external_url.as_deref(), Some("https://open.spotify.com/track/t1"));
        assert_eq!(track.album.as_deref(), Some("Sessiz Film"));
        // Empty image URLs are skipped in favor of the first usable one.
        assert_eq!(track.image.as_deref(), Some("https://i.scdn.co/cover"));
    }

    #[test]
    fn projects_sparse_record() {
        let track = Track::from(RawTrack {
            id: "t2".into(),
            name: "Untitled".into(),
            ..RawTrack::default()
        });
        assert_eq!(track.artists, "");
        assert!(track.external_url.is_none());
        assert!(track.album.is_none());
        assert!(track.image.is_none());
    }
}
