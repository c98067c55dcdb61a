//! TTime: ambient clock dashboard.
//!
//! Tokio binary that:
//! 1. Loads configuration and persisted settings
//! 2. Builds the weather, news, and market feeds (live or mock, cached)
//! 3. Refreshes all feeds on an interval and prints a text snapshot
//! 4. Recomputes the ambient gradient from time, temperature, and season

mod config;
mod dashboard;
mod mock;
mod services;

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, Utc};
use clap::Parser;
use tracing::{error, info, warn};

use common::config::AppConfig;
use common::Settings;

use crate::dashboard::{render_in_zone, Dashboard, Snapshot};
use crate::services::Services;

/// Ambient clock dashboard
#[derive(Parser)]
#[command(name = "ttime", about = "Ambient clock with weather, news, and markets")]
struct Cli {
    /// Refresh once, print the dashboard, then exit.
    #[arg(long)]
    once: bool,

    /// Print the current ambient gradient frame as JSON, then exit.
    #[arg(long)]
    palette: bool,

    /// Settings file to load and save.
    #[arg(long, default_value = "ttime-settings.json")]
    settings: PathBuf,

    /// Restore default settings and save them.
    #[arg(long)]
    reset_settings: bool,

    /// Print the current settings as JSON, then exit.
    #[arg(long)]
    export_settings: bool,
}

fn default_log_filter(cfg: Option<&AppConfig>) -> String {
    let client_level = match cfg {
        Some(c) if c.debug_api_requests => "debug",
        _ => "info",
    };
    format!(
        "ttime=info,feed_cache={lvl},openweather_client={lvl},newsapi_client={lvl},market_client={lvl}",
        lvl = client_level
    )
}

fn print_snapshot(snapshot: &Snapshot, settings: &Settings) {
    println!("{}", render_in_zone(snapshot, settings, Utc::now()));
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let loaded = config::load_config();

    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(loaded.as_ref().ok()).into()),
        )
        .with_target(true)
        .init();

    let cfg = match loaded {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // ── Settings ────────────────────────────────────────────────────
    let mut settings = match Settings::load(&cli.settings) {
        Ok(s) => s,
        Err(e) => {
            warn!("Could not load settings, using defaults: {}", e);
            Settings::default()
        }
    };

    if cli.reset_settings {
        settings.reset();
        if let Err(e) = settings.save(&cli.settings) {
            error!("Failed to save settings: {}", e);
            std::process::exit(1);
        }
        info!("Settings reset to defaults at {}", cli.settings.display());
    }

    if cli.export_settings {
        match settings.export_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to export settings: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // ── Feeds ───────────────────────────────────────────────────────
    info!("TTime starting up");
    for line in cfg.status_lines() {
        info!("{}", line);
    }

    let services = match Services::from_config(&cfg) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to build feeds: {}", e);
            std::process::exit(1);
        }
    };
    let mut dashboard = Dashboard::new(services, settings);

    if cli.palette {
        let _ = dashboard.refresh().await;
        let frame = dashboard.frame(&Local::now());
        match serde_json::to_string_pretty(&frame) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to encode ambient frame: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if cli.once {
        let snapshot = dashboard.refresh().await;
        print_snapshot(&snapshot, dashboard.settings());
        return;
    }

    // ── Refresh loop ────────────────────────────────────────────────
    info!("TTime is running. Press Ctrl+C to stop.");
    let mut interval = tokio::time::interval(Duration::from_secs(cfg.refresh_interval_secs));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            _ = interval.tick() => {
                let snapshot = dashboard.refresh().await;
                print_snapshot(&snapshot, dashboard.settings());
                let frame = dashboard.frame(&Local::now());
                info!(
                    "Ambient: top-left={} center={} bottom-right={} temp={:?}",
                    frame.palette[0].to_hex(),
                    frame.palette[4].to_hex(),
                    frame.palette[8].to_hex(),
                    dashboard.last_temperature()
                );
            }
        }
    }
}
