//! Spotify Web API client.
//!
//! Only the handful of player and library endpoints the deck needs.  Token
//! acquisition is not handled here: the client is handed a bearer token.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::protocol::Command;
use crate::service::PlaybackService;
use crate::snapshot::{PlaybackSnapshot, RepeatMode};

/// Artwork narrower than this looks blurry on the art tile.
const ART_MIN_WIDTH: u32 = 100;
/// Artwork wider than this is wasted bandwidth for the art tile.
const ART_MAX_WIDTH: u32 = 350;

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrentlyPlaying {
    is_playing: bool,
    progress_ms: Option<u64>,
    item: Option<Item>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Item {
    id: Option<String>,
    name: Option<String>,
    artists: Vec<Artist>,
    album: Option<Album>,
    duration_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Artist {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Album {
    name: Option<String>,
    images: Vec<Image>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Image {
    url: Option<String>,
    width: Option<u32>,
}

/// Pick the artwork closest to the art tile size, falling back to the first.
fn pick_art_url(images: &[Image]) -> String {
    images
        .iter()
        .find(|img| {
            img.width
                .is_some_and(|w| (ART_MIN_WIDTH..=ART_MAX_WIDTH).contains(&w))
        })
        .or_else(|| images.first())
        .and_then(|img| img.url.clone())
        .unwrap_or_default()
}

/// Build a snapshot from a `currently-playing` body.
///
/// Missing or null fields default (empty strings, zero, false).  A body that
/// does not parse at all is treated as "no playing item".
pub fn parse_now_playing(body: &[u8]) -> PlaybackSnapshot {
    let wire: CurrentlyPlaying = match serde_json::from_slice(body) {
        Ok(w) => w,
        Err(e) => {
            warn!("currently-playing: unparseable body ({}), treating as idle", e);
            CurrentlyPlaying::default()
        }
    };

    let mut snapshot = PlaybackSnapshot {
        is_playing: wire.is_playing,
        progress_ms: wire.progress_ms.unwrap_or(0),
        ..Default::default()
    };

    if let Some(item) = wire.item {
        snapshot.title = item.name.unwrap_or_default();
        snapshot.track_id = item.id.unwrap_or_default();
        snapshot.artist = match item.artists.first() {
            Some(artist) => artist.name.clone().unwrap_or_default(),
            None => "Unknown".to_string(),
        };
        if let Some(album) = item.album {
            snapshot.art_url = pick_art_url(&album.images);
            snapshot.album = album.name.unwrap_or_default();
        }
        snapshot.duration_ms = item.duration_ms.unwrap_or(0);
    }

    snapshot
}

/// Read the first element of a `tracks/contains` body.  A body without one
/// is a transport failure; the status line was already a success.
pub fn parse_contains(body: &[u8]) -> Result<bool, ServiceError> {
    serde_json::from_slice::<Vec<bool>>(body)
        .ok()
        .and_then(|flags| flags.first().copied())
        .ok_or_else(|| ServiceError::Transport("unexpected contains body".into()))
}

// ── Client ────────────────────────────────────────────────────────────────────

pub struct SpotifyClient {
    http: Client,
    api_base: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.resolved_token(),
        })
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
    }

    /// Send and map any non-2xx status to `ServiceError::Status`.
    async fn execute(&self, req: RequestBuilder) -> Result<Response, ServiceError> {
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        Ok(response)
    }

    /// Bodiless write; the player endpoints reject a PUT without a length.
    async fn write(&self, method: Method, path: &str) -> Result<(), ServiceError> {
        let req = self
            .request(method, path)
            .header(header::CONTENT_LENGTH, 0);
        self.execute(req).await.map(|_| ())
    }

    pub async fn currently_playing(&self) -> Result<PlaybackSnapshot, ServiceError> {
        let response = self
            .execute(self.request(Method::GET, "/me/player/currently-playing"))
            .await?;
        // 204 means nothing is active; the poll keeps its previous view.
        if response.status() != StatusCode::OK {
            return Err(ServiceError::Status(response.status().as_u16()));
        }
        let body = response.bytes().await?;
        Ok(parse_now_playing(&body))
    }

    pub async fn contains_track(&self, track_id: &str) -> Result<bool, ServiceError> {
        let path = format!("/me/tracks/contains?ids={}", track_id);
        let response = self.execute(self.request(Method::GET, &path)).await?;
        let body = response.bytes().await?;
        parse_contains(&body)
    }

    pub async fn play(&self) -> Result<(), ServiceError> {
        self.write(Method::PUT, "/me/player/play").await
    }

    pub async fn pause(&self) -> Result<(), ServiceError> {
        self.write(Method::PUT, "/me/player/pause").await
    }

    pub async fn next(&self) -> Result<(), ServiceError> {
        self.write(Method::POST, "/me/player/next").await
    }

    pub async fn previous(&self) -> Result<(), ServiceError> {
        self.write(Method::POST, "/me/player/previous").await
    }

    pub async fn set_shuffle(&self, state: bool) -> Result<(), ServiceError> {
        let path = format!("/me/player/shuffle?state={}", state);
        self.write(Method::PUT, &path).await
    }

    pub async fn set_repeat(&self, mode: RepeatMode) -> Result<(), ServiceError> {
        let path = format!("/me/player/repeat?state={}", mode.as_str());
        self.write(Method::PUT, &path).await
    }

    pub async fn save_track(&self, track_id: &str) -> Result<(), ServiceError> {
        let path = format!("/me/tracks?ids={}", track_id);
        self.write(Method::PUT, &path).await
    }

    pub async fn remove_track(&self, track_id: &str) -> Result<(), ServiceError> {
        let path = format!("/me/tracks?ids={}", track_id);
        self.write(Method::DELETE, &path).await
    }
}

#[async_trait]
impl PlaybackService for SpotifyClient {
    async fn fetch_snapshot(&self) -> Result<PlaybackSnapshot, ServiceError> {
        self.currently_playing().await
    }

    async fn check_liked(&self, track_id: &str) -> Result<bool, ServiceError> {
        self.contains_track(track_id).await
    }

    async fn send(&self, command: &Command) -> Result<(), ServiceError> {
        debug!("spotify: {}", command.label());
        match command {
            Command::Play => self.play().await,
            Command::Pause => self.pause().await,
            Command::Next => self.next().await,
            Command::Previous => self.previous().await,
            Command::Like { track_id } => self.save_track(track_id).await,
            Command::Unlike { track_id } => self.remove_track(track_id).await,
            Command::SetShuffle { state } => self.set_shuffle(*state).await,
            Command::SetRepeat { mode } => self.set_repeat(*mode).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_parse_full_item() {
        let snapshot = parse_now_playing(&body(json!({
            "is_playing": true,
            "progress_ms": 42_000,
            "item": {
                "id": "4uLU6hMCjMI75M1A2tKUQC",
                "name": "Never Gonna Give You Up",
                "duration_ms": 213_573,
                "artists": [{ "name": "Rick Astley" }, { "name": "Someone Else" }],
                "album": {
                    "name": "Whenever You Need Somebody",
                    "images": [
                        { "url": "https://i.scdn.co/640", "width": 640 },
                        { "url": "https://i.scdn.co/300", "width": 300 },
                        { "url": "https://i.scdn.co/64", "width": 64 }
                    ]
                }
            }
        })));

        assert_eq!(snapshot.title, "Never Gonna Give You Up");
        assert_eq!(snapshot.artist, "Rick Astley");
        assert_eq!(snapshot.album, "Whenever You Need Somebody");
        assert_eq!(snapshot.art_url, "https://i.scdn.co/300");
        assert_eq!(snapshot.track_id, "4uLU6hMCjMI75M1A2tKUQC");
        assert!(snapshot.is_playing);
        assert_eq!(snapshot.progress_ms, 42_000);
        assert_eq!(snapshot.duration_ms, 213_573);
    }

    #[test]
    fn test_art_falls_back_to_first_image() {
        let snapshot = parse_now_playing(&body(json!({
            "item": {
                "id": "t",
                "album": { "images": [
                    { "url": "https://big", "width": 1000 },
                    { "url": "https://tiny", "width": 32 }
                ] }
            }
        })));
        assert_eq!(snapshot.art_url, "https://big");
    }

    #[test]
    fn test_missing_item_is_idle() {
        let snapshot = parse_now_playing(&body(json!({
            "is_playing": false,
            "progress_ms": null,
            "item": null
        })));
        assert_eq!(snapshot, PlaybackSnapshot::default());
    }

    #[test]
    fn test_empty_artists_reads_unknown() {
        let snapshot = parse_now_playing(&body(json!({
            "item": { "id": "t", "name": "Untitled", "artists": [] }
        })));
        assert_eq!(snapshot.artist, "Unknown");
        assert_eq!(snapshot.art_url, "");
        assert_eq!(snapshot.duration_ms, 0);
    }

    #[test]
    fn test_garbage_body_is_idle() {
        assert_eq!(parse_now_playing(b"<html>oops</html>"), PlaybackSnapshot::default());
    }

    #[test]
    fn test_parse_contains() {
        assert_eq!(parse_contains(b"[true]"), Ok(true));
        assert_eq!(parse_contains(b"[false, true]"), Ok(false));
    }

    #[test]
    fn test_unusable_contains_body_is_not_a_status() {
        for body in [&b"[]"[..], b"{\"error\":1}", b""] {
            let err = parse_contains(body).unwrap_err();
            assert_eq!(err.status_code(), None);
            assert_eq!(err, ServiceError::Transport("unexpected contains body".into()));
        }
    }
}
