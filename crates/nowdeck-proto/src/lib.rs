//! Shared vocabulary for the now-playing deck: playback data model, the
//! command set understood by the remote service, input events, configuration
//! and the Spotify Web API collaborator.

pub mod config;
pub mod error;
pub mod platform;
pub mod protocol;
pub mod service;
pub mod snapshot;
pub mod spotify;
