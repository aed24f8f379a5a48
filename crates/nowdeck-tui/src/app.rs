//! App — terminal front end for the deck.
//!
//! Architecture:
//! - A blocking reader task turns crossterm events into `DeckEvent`s and
//!   feeds them to the controller over a `tokio::mpsc` channel.
//! - The controller loop owns the engine, the Spotify client and the
//!   terminal surface, and handles poll ticks and input one at a time.
//! - When the loop exits the surface is handed back for teardown.

use std::io;
use std::time::Duration;

use nowdeck_core::controller::{Controller, DeckEvent};
use nowdeck_core::router::InputRouter;
use nowdeck_proto::config::{Config, ACCESS_TOKEN_ENV};
use nowdeck_proto::protocol::ZoneCommand;
use nowdeck_proto::spotify::SpotifyClient;
use ratatui::crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::input::{InputTranslator, KeyMap};
use crate::surface::TerminalSurface;

/// How often the reader wakes to notice the controller has gone.
const INPUT_POLL: Duration = Duration::from_millis(250);

pub struct App {
    config: Config,
    client: SpotifyClient,
}

impl App {
    pub fn new(config: Config, client: SpotifyClient) -> Self {
        Self { config, client }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        // Reject a bad layout before touching the terminal.
        let router = InputRouter::new(&self.config.layout, &self.config.buttons)?;
        let keys = KeyMap {
            device: router.surface_size(),
            like_tap: router.center_of(ZoneCommand::ToggleLike),
        };

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        let size = terminal.size()?;
        debug!("run(): terminal created, size={:?}", size);

        let mut surface = TerminalSurface::new(terminal, keys.device);
        let has_token = self.client.has_token();
        if !has_token {
            warn!("no access token configured");
            surface.show_error(&format!(
                "No access token.\nSet {} or service.access_token in {}",
                ACCESS_TOKEN_ENV,
                Config::config_path().display()
            ));
        }
        let mut controller = Controller::new(self.client, surface, router);
        if has_token {
            controller.show_status("Connecting…");
        }

        let (tx, rx) = mpsc::channel::<DeckEvent>(64);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let mut translator = InputTranslator::new(keys, Rect::new(0, 0, size.width, size.height));
        tokio::task::spawn_blocking(move || loop {
            if tx.is_closed() {
                break;
            }
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(_) => break,
            }
            match event::read() {
                Ok(ev) => {
                    let Some(deck_event) = translator.translate(&ev) else {
                        continue;
                    };
                    if tx.blocking_send(deck_event).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        info!("nowdeck started");
        let controller = controller.run(rx, self.config.poll.interval()).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        let mut surface = controller.into_surface();
        let terminal = surface.terminal_mut();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }
}
