//! Reconciliation engine — sole owner of the canonical playback state.
//!
//! Two entry points mutate state: [`Engine::apply_snapshot`] for poll
//! results and [`Engine::apply_edit`] for local, user-driven edits (plus
//! [`Engine::apply_like_check`] for the background like check).  Each returns
//! the minimal [`ChangeSet`] and advances the last-rendered [`Projection`] to
//! match, so the caller renders exactly once per mutation.

use nowdeck_proto::error::ServiceError;
use nowdeck_proto::snapshot::{LikeStatus, PlaybackSnapshot, RepeatMode};
use tracing::debug;

use crate::change::{ChangeSet, Projection};
use crate::intent::IntentState;
use crate::like::LikeTracker;

/// Local edits, applied before the remote has confirmed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Optimistic play/pause.
    Playing(bool),
    /// Optimistic like/unlike of `track_id`.
    Like { track_id: String, status: LikeStatus },
    /// The like/unlike command for `track_id` came back.
    LikeSettled {
        track_id: String,
        prior: LikeStatus,
        accepted: bool,
    },
    /// Shuffle accepted by the remote.
    Shuffle(bool),
    /// Repeat mode accepted by the remote.
    Repeat(RepeatMode),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CanonicalState {
    track_id: String,
    like: LikeTracker,
    playing: IntentState<bool>,
    progress_ms: u64,
    shuffle: bool,
    repeat: RepeatMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Engine {
    state: CanonicalState,
    rendered: Projection,
    /// Set by the first successful poll, which paints every region.
    painted: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    /// Displayed play state: the outstanding intent if any, else the remote's.
    pub fn is_playing(&self) -> bool {
        *self.state.playing.intended()
    }

    pub fn playback_intent(&self) -> &IntentState<bool> {
        &self.state.playing
    }

    pub fn track_id(&self) -> &str {
        &self.state.track_id
    }

    pub fn like_status(&self) -> LikeStatus {
        self.state.like.status()
    }

    pub fn shuffle(&self) -> bool {
        self.state.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.state.repeat
    }

    pub fn progress_ms(&self) -> u64 {
        self.state.progress_ms
    }

    pub fn projection(&self) -> &Projection {
        &self.rendered
    }

    /// Identity awaiting a like check, if any.
    pub fn pending_like_check(&self) -> Option<&str> {
        self.state
            .like
            .is_check_pending()
            .then_some(self.state.track_id.as_str())
    }

    // ── Poll results ─────────────────────────────────────────────────────────

    /// Fold a poll result into the canonical state.
    ///
    /// A failure is handed straight back without touching anything, so the
    /// display keeps its last-known-good content and any outstanding edit.
    pub fn apply_snapshot(
        &mut self,
        result: Result<PlaybackSnapshot, ServiceError>,
    ) -> Result<ChangeSet, ServiceError> {
        let snapshot = result?;
        let first_paint = !self.painted;

        // An empty URL never replaces the art on screen.
        let art = !snapshot.art_url.is_empty() && snapshot.art_url != self.rendered.art_url;
        let text =
            snapshot.title != self.rendered.title || snapshot.artist != self.rendered.artist;

        if snapshot.track_id != self.state.track_id {
            debug!(
                "engine: identity {:?} -> {:?}",
                self.state.track_id, snapshot.track_id
            );
            self.state.track_id = snapshot.track_id.clone();
            self.state.like.reset(!snapshot.track_id.is_empty());
        }

        self.state.playing.on_poll(snapshot.is_playing);
        self.state.progress_ms = snapshot.progress_ms;

        if art {
            self.rendered.art_url = snapshot.art_url.clone();
        }
        if text || first_paint {
            self.rendered.title = snapshot.title.clone();
            self.rendered.artist = snapshot.artist.clone();
            self.rendered.album = snapshot.album.clone();
        }
        self.rendered.progress_ms = snapshot.progress_ms;
        self.rendered.duration_ms = snapshot.duration_ms;

        let mut changes = ChangeSet {
            art,
            text,
            progress: true,
            ..ChangeSet::default()
        };
        changes |= self.commit_indicators();

        if first_paint {
            self.painted = true;
            changes = ChangeSet::all();
        }
        Ok(changes)
    }

    /// Fold in a background like check for `track_id`.
    ///
    /// A result for an identity that is no longer current is dropped.  A
    /// failure leaves the check pending so the next pass retries it.
    pub fn apply_like_check(
        &mut self,
        track_id: &str,
        result: Result<bool, ServiceError>,
    ) -> Result<ChangeSet, ServiceError> {
        let liked = result?;
        if track_id != self.state.track_id {
            debug!("engine: dropping like check for stale identity {:?}", track_id);
            return Ok(ChangeSet::default());
        }
        self.state.like.on_checked(liked);
        Ok(self.commit_indicators())
    }

    // ── Local edits ──────────────────────────────────────────────────────────

    pub fn apply_edit(&mut self, edit: Edit) -> ChangeSet {
        match edit {
            Edit::Playing(intended) => {
                self.state.playing.set_intent(intended);
            }
            Edit::Like { track_id, status } => {
                if !self.is_current(&track_id) {
                    return ChangeSet::default();
                }
                self.state.like.apply_toggle(status);
            }
            Edit::LikeSettled {
                track_id,
                prior,
                accepted,
            } => {
                if !self.is_current(&track_id) {
                    return ChangeSet::default();
                }
                self.state.like.settle_toggle(prior, accepted);
            }
            Edit::Shuffle(state) => {
                self.state.shuffle = state;
            }
            Edit::Repeat(mode) => {
                self.state.repeat = mode;
            }
        }
        self.commit_indicators()
    }

    fn is_current(&self, track_id: &str) -> bool {
        !track_id.is_empty() && track_id == self.state.track_id
    }

    /// Bring the controls and like indicator of the projection up to date.
    fn commit_indicators(&mut self) -> ChangeSet {
        let mut changes = ChangeSet::default();

        let playing = self.is_playing();
        if playing != self.rendered.is_playing
            || self.state.shuffle != self.rendered.shuffle
            || self.state.repeat != self.rendered.repeat
        {
            self.rendered.is_playing = playing;
            self.rendered.shuffle = self.state.shuffle;
            self.rendered.repeat = self.state.repeat;
            changes.controls = true;
        }

        let like = self.state.like.status();
        if like != self.rendered.like {
            self.rendered.like = like;
            changes.like = true;
        }

        changes
    }
}
