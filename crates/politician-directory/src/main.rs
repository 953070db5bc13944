mod config;
mod error;
mod http;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal::ctrl_c;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, ServeMode};
use http::AppState;
use server::PoliticianDirectoryServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stderr only: stdout carries MCP JSON-RPC in mcp mode
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting politician-directory");

    let config = Arc::new(Config::from_env()?);
    info!(
        csv_path = %config.csv_path().display(),
        mode = ?config.mode,
        "configuration loaded"
    );
    if !config.csv_path().exists() {
        warn!(
            csv_path = %config.csv_path().display(),
            "politicians CSV not found, queries will fail until it exists"
        );
    }

    match config.mode {
        ServeMode::Http => serve_http(config).await,
        ServeMode::Mcp => serve_mcp(config).await,
    }
}

async fn serve_http(config: Arc<Config>) -> anyhow::Result<()> {
    let addr = config.http_listen_addr.clone();
    let app = http::router(AppState { config });

    let listener = TcpListener::bind(&addr).await?;
    info!(listen_addr = %addr, route = http::POLITICIANS_ROUTE, "HTTP server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shut down");
    Ok(())
}

async fn serve_mcp(config: Arc<Config>) -> anyhow::Result<()> {
    let server = PoliticianDirectoryServer::new(Arc::clone(&config));

    let Some(addr) = config.mcp_tcp_listen_addr.as_deref() else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
        return Ok(());
    };

    let listener = TcpListener::bind(addr).await?;
    info!(listen_addr = %addr, "MCP server ready, serving on TCP");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = &mut shutdown => break,
        };
        let server = server.clone();
        tokio::spawn(async move {
            info!(peer = %peer, "MCP client connected");
            match serve_mcp_client(server, stream).await {
                Ok(()) => info!(peer = %peer, "MCP client disconnected"),
                Err(e) => tracing::error!(peer = %peer, error = %e, "MCP session failed"),
            }
        });
    }

    info!("MCP server shut down");
    Ok(())
}

async fn serve_mcp_client(
    server: PoliticianDirectoryServer,
    stream: TcpStream,
) -> anyhow::Result<()> {
    let service = server.serve(stream).await?;
    service.waiting().await?;
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
