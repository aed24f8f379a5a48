//! Contract of the remote playback service.
//!
//! Every call runs to completion before the caller considers its next event;
//! socket timeouts are the implementation's concern.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::protocol::Command;
use crate::snapshot::PlaybackSnapshot;

#[async_trait]
pub trait PlaybackService: Send + Sync {
    /// Current player state.  One call per poll cycle.
    async fn fetch_snapshot(&self) -> Result<PlaybackSnapshot, ServiceError>;

    /// Whether `track_id` is in the user's library.
    async fn check_liked(&self, track_id: &str) -> Result<bool, ServiceError>;

    /// Issue one transport command.  No retry at this layer.
    async fn send(&self, command: &Command) -> Result<(), ServiceError>;
}
