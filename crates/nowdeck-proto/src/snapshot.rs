use serde::{Deserialize, Serialize};

/// One poll's view of the remote player.  Superseded wholesale by the next
/// successful poll; never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Empty when the item carries no artwork.
    pub art_url: String,
    /// Identity of the playing item.  Empty when nothing is playing.
    pub track_id: String,
    pub is_playing: bool,
    pub progress_ms: u64,
    pub duration_ms: u64,
}

/// `progress / duration` clamped to `0.0..=1.0`.  A zero duration yields 0.
pub fn progress_fraction(progress_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (progress_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

/// Whether the tracked item is in the user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LikeStatus {
    /// Not yet checked for the current identity (or the check failed).
    #[default]
    Unknown,
    Liked,
    NotLiked,
}

impl LikeStatus {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            LikeStatus::Liked
        } else {
            LikeStatus::NotLiked
        }
    }

    pub fn is_liked(self) -> bool {
        self == LikeStatus::Liked
    }
}

/// Remote repeat setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    Context,
    Track,
}

impl RepeatMode {
    /// Wire name used by the remote service.
    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::Context => "context",
            RepeatMode::Track => "track",
        }
    }

    /// Cycle order: off → context → track → off.
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Context,
            RepeatMode::Context => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_guards_zero_duration() {
        assert_eq!(progress_fraction(5_000, 0), 0.0);
        assert_eq!(progress_fraction(0, 0), 0.0);
    }

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(progress_fraction(50_000, 200_000), 0.25);
        assert_eq!(progress_fraction(250_000, 200_000), 1.0);
    }

    #[test]
    fn repeat_cycles_through_all_modes() {
        let mut mode = RepeatMode::Off;
        let mut seen = Vec::new();
        for _ in 0..3 {
            mode = mode.next();
            seen.push(mode.as_str());
        }
        assert_eq!(seen, ["context", "track", "off"]);
    }
}
