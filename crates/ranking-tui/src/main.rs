// Product ranking terminal client entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the API client
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use ranking_core::config::{self, LoggingConfig};
use ranking_core::ApiClient;
use ranking_tui::{app, tui};
use tokio::sync::mpsc;
use tracing::{error, info};

const LOG_FILE: &str = "ranking.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    let log_dir = config.logging.log_dir();
    init_tracing(&config.logging, &log_dir)?;
    info!("Product ranking client starting up");
    if config::api_url_override().is_some() {
        info!(
            "API base URL overridden from {}: {}",
            config::API_URL_ENV,
            config.api.base_url
        );
    }
    info!(
        "Config loaded: api={}, timeout={}s, logs in {}",
        config.api.base_url,
        config.api.timeout_secs,
        log_dir.display()
    );

    // 3. API client
    let client = ApiClient::from_config(&config.api).context("failed to build API client")?;
    let api_label = client.base_url().to_string();

    // 4. Channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. App logic task
    let app_state = app::AppState::new(Arc::new(client));
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. TUI (blocks until the user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx, config.ui.clone(), api_label).await {
        error!("TUI error: {:#}", e);
    }

    // 7. Cleanup: wait for the app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Product ranking client shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
///
/// `RUST_LOG` takes precedence over the configured filter.
fn init_tracing(logging: &LoggingConfig, log_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join(LOG_FILE))
        .context("failed to create log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
