//! Playback state reconciliation for the now-playing deck.
//!
//! [`engine::Engine`] owns the single canonical view of the remote player.
//! [`controller::Controller`] drives it: one poll pass or one input event at a
//! time, each applied and rendered before the next is considered.

pub mod change;
pub mod controller;
pub mod engine;
pub mod intent;
pub mod like;
pub mod router;
