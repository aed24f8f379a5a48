//! Controller — single-owner event loop around the engine.
//!
//! Owns the [`Engine`], the remote service and the render surface.  Poll
//! ticks and input events are handled one at a time on the same task: each
//! handler mutates the engine, renders the resulting change-set, and only
//! then is the next event considered.  Remote calls are awaited to
//! completion; nothing is cancelled.

use std::time::Duration;

use nowdeck_proto::error::ServiceError;
use nowdeck_proto::protocol::{Command, InputEvent, ZoneCommand};
use nowdeck_proto::service::PlaybackService;
use nowdeck_proto::snapshot::LikeStatus;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::change::{self, ChangeSet, RenderSurface};
use crate::engine::{Edit, Engine};
use crate::router::InputRouter;

/// Inputs into the controller loop besides the poll timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEvent {
    /// A press from the touch surface or a button.
    Input(InputEvent),
    ToggleShuffle,
    CycleRepeat,
    /// The surface lost its contents (e.g. resized) and must be redrawn as is.
    Repaint,
    Shutdown,
}

pub struct Controller<S, R> {
    engine: Engine,
    router: InputRouter,
    service: S,
    surface: R,
}

impl<S: PlaybackService, R: RenderSurface> Controller<S, R> {
    pub fn new(service: S, surface: R, router: InputRouter) -> Self {
        Self {
            engine: Engine::new(),
            router,
            service,
            surface,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn into_surface(self) -> R {
        self.surface
    }

    pub fn show_status(&mut self, message: &str) {
        self.surface.show_status(message);
    }

    /// Run until `Shutdown` or until every sender is dropped.
    ///
    /// The first poll fires immediately.  A play/pause press restarts the
    /// poll timer so the first poll after the edit is a full interval away.
    pub async fn run(mut self, mut events: mpsc::Receiver<DeckEvent>, interval: Duration) -> Self {
        info!("controller: starting, poll every {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are logged inside; the loop always continues.
                    let _ = self.poll().await;
                }

                evt = events.recv() => match evt {
                    None => {
                        info!("controller: event channel closed, shutting down");
                        break;
                    }
                    Some(DeckEvent::Shutdown) => {
                        info!("controller: shutdown requested");
                        break;
                    }
                    Some(DeckEvent::Input(input)) => {
                        if self.handle_input(input).await == Some(ZoneCommand::TogglePlayPause) {
                            ticker.reset();
                        }
                    }
                    Some(DeckEvent::ToggleShuffle) => {
                        self.toggle_shuffle().await;
                    }
                    Some(DeckEvent::CycleRepeat) => {
                        self.cycle_repeat().await;
                    }
                    Some(DeckEvent::Repaint) => {
                        debug!("controller: repaint");
                        self.surface.repaint();
                    }
                },
            }
        }

        self
    }

    // ── Poll pass ─────────────────────────────────────────────────────────────

    /// One reconciliation pass: fetch, reconcile, run any pending like check,
    /// then render the combined change-set once.
    pub async fn poll(&mut self) -> Result<ChangeSet, ServiceError> {
        let result = self.service.fetch_snapshot().await;
        let mut changes = match self.engine.apply_snapshot(result) {
            Ok(changes) => changes,
            Err(e) => {
                if e.status_code() == Some(204) {
                    debug!("poll: nothing playing (keeping last state)");
                } else {
                    warn!("poll: {} (keeping last state)", e);
                }
                return Err(e);
            }
        };

        if let Some(track_id) = self.engine.pending_like_check().map(str::to_owned) {
            let result = self.service.check_liked(&track_id).await;
            match self.engine.apply_like_check(&track_id, result) {
                Ok(like_changes) => changes |= like_changes,
                Err(e) => warn!("like check for {}: {} (retrying next pass)", track_id, e),
            }
        }

        self.render(changes);
        Ok(changes)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Route one press and act on it.  Returns the command it resolved to.
    pub async fn handle_input(&mut self, event: InputEvent) -> Option<ZoneCommand> {
        let Some(command) = self.router.route(event) else {
            debug!("input: {:?} outside every zone", event);
            return None;
        };
        debug!("input: {:?} -> {:?}", event, command);

        match command {
            // No local prediction for skips: the next poll says where we landed.
            ZoneCommand::Previous => {
                self.issue(Command::Previous).await;
            }
            ZoneCommand::Next => {
                self.issue(Command::Next).await;
            }
            ZoneCommand::TogglePlayPause => self.toggle_playback().await,
            ZoneCommand::ToggleLike => self.toggle_like().await,
        }
        Some(command)
    }

    async fn toggle_playback(&mut self) {
        let intended = !self.engine.is_playing();
        let changes = self.engine.apply_edit(Edit::Playing(intended));
        self.render(changes);

        // A rejected command is not rolled back; the poll timeout corrects it.
        let command = if intended { Command::Play } else { Command::Pause };
        self.issue(command).await;
    }

    async fn toggle_like(&mut self) {
        let track_id = self.engine.track_id().to_string();
        if track_id.is_empty() {
            debug!("like: nothing playing");
            return;
        }

        let prior = self.engine.like_status();
        let target = if prior.is_liked() {
            LikeStatus::NotLiked
        } else {
            LikeStatus::Liked
        };
        let changes = self.engine.apply_edit(Edit::Like {
            track_id: track_id.clone(),
            status: target,
        });
        self.render(changes);

        let command = if target.is_liked() {
            Command::Like {
                track_id: track_id.clone(),
            }
        } else {
            Command::Unlike {
                track_id: track_id.clone(),
            }
        };
        let accepted = self.issue(command).await;

        let changes = self.engine.apply_edit(Edit::LikeSettled {
            track_id,
            prior,
            accepted,
        });
        self.render(changes);
    }

    /// Flip shuffle.  The flag changes only once the remote accepts it.
    pub async fn toggle_shuffle(&mut self) -> bool {
        let target = !self.engine.shuffle();
        if !self.issue(Command::SetShuffle { state: target }).await {
            return false;
        }
        let changes = self.engine.apply_edit(Edit::Shuffle(target));
        self.render(changes);
        true
    }

    /// Advance repeat (off → context → track).  Changes only once accepted.
    pub async fn cycle_repeat(&mut self) -> bool {
        let target = self.engine.repeat().next();
        if !self.issue(Command::SetRepeat { mode: target }).await {
            return false;
        }
        let changes = self.engine.apply_edit(Edit::Repeat(target));
        self.render(changes);
        true
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Send one command; failures are logged and reported, never retried.
    async fn issue(&self, command: Command) -> bool {
        match self.service.send(&command).await {
            Ok(()) => {
                debug!("command {}: ok", command.label());
                true
            }
            Err(e) => {
                warn!("command {}: {}", command.label(), e);
                false
            }
        }
    }

    fn render(&mut self, changes: ChangeSet) {
        change::dispatch(&mut self.surface, changes, self.engine.projection());
    }
}
