mod action;
mod app;
mod app_state;
mod component;
mod components;
mod tasks;
mod theme;
mod widgets;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bordo_core::backend::BackendClient;
use bordo_core::config::Config;
use bordo_core::scheduler::Scheduler;
use bordo_core::state::Dashboard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = bordo_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("tui.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

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
    eprintln!("bordo log: {}", log_path.display());

    tracing::info!("bordo starting…");

    let config = Config::load().unwrap_or_default();
    tracing::info!(
        "backend: {} (simulate={})",
        config.backend.base_url,
        config.backend.simulate
    );

    let client = BackendClient::new(&config.backend.base_url);
    let dashboard = Arc::new(Dashboard::new(&config));
    let scheduler = Arc::new(Scheduler::new());
    let backend_up = Arc::new(AtomicBool::new(config.backend.simulate));

    // One startup probe, log-only; the motor poll decides liveness from here.
    if !config.backend.simulate {
        let probe = client.clone();
        tokio::spawn(async move {
            match probe.status().await {
                Ok(status) => tracing::info!("backend status: {status}"),
                Err(e) => tracing::warn!("backend unreachable at startup: {e}"),
            }
        });
    }

    tasks::start(
        &scheduler,
        Arc::clone(&dashboard),
        client.clone(),
        Arc::clone(&backend_up),
        &config,
    );

    let initial = dashboard.snapshot().await;
    let app = app::App::new(
        Arc::clone(&dashboard),
        Arc::clone(&scheduler),
        client,
        backend_up,
        initial,
        config.backend.simulate,
    );
    app.run().await?;

    tracing::info!("bordo exiting");
    Ok(())
}
