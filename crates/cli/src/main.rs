use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubecheck_core::{
    load_config, load_config_or_default, validate_config, Extractor, Orchestrator,
    OrchestratorConfig, YtDlpExtractor,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file used when `TUBECHECK_CONFIG` is not set
const DEFAULT_CONFIG_PATH: &str = "tubecheck.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    info!("tubecheck {} starting", VERSION);
    info!("Current time: {}", chrono::Local::now());

    // An explicitly named config file must exist; the default one is optional
    let config = match std::env::var("TUBECHECK_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => load_config_or_default(&PathBuf::from(DEFAULT_CONFIG_PATH))
            .context("Failed to load configuration")?,
    };

    validate_config(&config).context("Configuration validation failed")?;

    let extractor: Arc<dyn Extractor> = Arc::new(YtDlpExtractor::new(config.extractor.clone()));
    info!("Using extractor: {}", extractor.name());

    let orchestrator = Orchestrator::initialize(OrchestratorConfig::from(&config), extractor)
        .context("Failed to create download workspace")?;

    orchestrator.run(shutdown_signal()).await;

    info!("tubecheck finished");
    Ok(())
}

/// Wait for an interrupt (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
