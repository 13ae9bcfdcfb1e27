mod config;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::EnvFilter;

use groupwatch_core::dispatch::Dispatcher;
use groupwatch_core::poller::Poller;
use groupwatch_core::provider::{Provider, ProviderPush, ProviderStore};
use groupwatch_core::watcher::ChangeWatcher;

use crate::config::Config;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "groupwatchd")]
#[command(about = "Watch group members' schedules and push availability notifications")]
struct Cli {
    /// Config file (defaults to ~/.config/groupwatch/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let class_tz = config.class_tz()?;
    let poll_secs = config.poll_interval_secs;

    let store = Arc::new(ProviderStore::new(Provider::new(
        &config.store.provider,
        config.store.json_map(),
    )));
    let gateway = Arc::new(ProviderPush::new(Provider::new(
        &config.push.provider,
        config.push.json_map(),
    )));

    let dispatcher = Dispatcher::new(store.clone(), gateway);
    let poller = Poller::new(
        store.clone(),
        dispatcher.clone(),
        class_tz,
        chrono::Duration::seconds(poll_secs as i64),
    );
    let watcher = Arc::new(ChangeWatcher::new(store, dispatcher));

    info!(
        store = %config.store.provider,
        push = %config.push.provider,
        interval_secs = poll_secs,
        timezone = %class_tz,
        "starting groupwatchd"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(poll_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            poller.tick(Utc::now()).await;
        }
    });

    let app = routes::router().with_state(AppState { watcher });
    let addr = SocketAddr::from(([127, 0, 0, 1], config.listen_port));
    info!(%addr, "change-trigger endpoint listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
