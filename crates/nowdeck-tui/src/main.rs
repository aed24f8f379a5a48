mod app;
mod input;
mod layout;
mod surface;
mod theme;
mod widgets;

use anyhow::Context;
use nowdeck_proto::config::Config;
use nowdeck_proto::platform;
use nowdeck_proto::spotify::SpotifyClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;

    let log_path = platform::log_path();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("nowdeck log: {}", log_path.display());

    tracing::info!("nowdeck starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("config: {:#} (using defaults)", e);
            Config::default()
        }
    };

    // ── Spotify client ───────────────────────────────────────────────────────
    let client = SpotifyClient::new(&config.service)?;

    // ── Run deck ─────────────────────────────────────────────────────────────
    let app = app::App::new(config, client);
    if let Err(e) = app.run().await {
        tracing::error!("nowdeck exited with error: {:#}", e);
        return Err(e);
    }

    tracing::info!("nowdeck stopped");
    Ok(())
}
