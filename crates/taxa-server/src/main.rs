//! Taxa HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use taxa::{Categorizer, Config, MiniLmConfig, MiniLmEmbedder, Taxonomy};
use taxa_server::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    println!(
        r#"
████████╗ █████╗ ██╗  ██╗ █████╗
╚══██╔══╝██╔══██╗╚██╗██╔╝██╔══██╗
   ██║   ███████║ ╚███╔╝ ███████║
   ██║   ██╔══██║ ██╔██╗ ██╔══██║
   ██║   ██║  ██║██╔╝ ██╗██║  ██║
   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝

        EMBED. SCORE. SELECT.
                        AGPL-3.0
"#
    );

    // Handled before the server runtime exists; the probe spins up its own
    // small current-thread runtime.
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve())
}

async fn serve() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Taxa starting"
    );

    let taxonomy = match &config.taxonomy_path {
        Some(path) => {
            let taxonomy = Taxonomy::from_json_file(path)?;
            tracing::info!(path = %path.display(), labels = taxonomy.len(), "Loaded taxonomy file");
            taxonomy
        }
        None => Taxonomy::builtin(),
    };

    let minilm_config = if let Some(path) = &config.model_path {
        MiniLmConfig::new(path.clone())
    } else {
        tracing::warn!("No TAXA_MODEL_PATH configured, running embedder in stub mode");
        MiniLmConfig::stub()
    };
    let embedder = MiniLmEmbedder::load(minilm_config)?;

    let categorizer = Arc::new(Categorizer::new(
        embedder,
        taxonomy,
        config.selection.clone(),
    )?);

    // Pre-warm the reference cache so the first request doesn't pay for it.
    // A warm-up failure is not fatal; requests retry on demand.
    if let Err(e) = categorizer.warm_references().await {
        tracing::warn!("Failed to warm reference vectors: {}. Will retry per request.", e);
    } else {
        tracing::info!("Category reference vectors warm");
    }

    let state = HandlerState::new(categorizer);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Taxa shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("TAXA_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
