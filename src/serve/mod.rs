use anyhow::Result;
use clap::Args;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::*;

use crate::config::{Config, ConfigArgs};

mod error;
mod handlers;
mod route;
mod state;

pub use error::ApiError;
pub use route::create_router;
pub use state::AppState;

#[derive(Debug, Args)]
pub struct Command {
    /// Port to listen on, overrides PORT.
    #[arg(short, long)]
    port: Option<u16>,
    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
pub async fn execute_command(cmd: &Command) -> Result<()> {
    let config = Config::from_env()?
        .with_args(&cmd.config)
        .with_port(cmd.port);

    config.ensure_data_dir()?;

    info!(upstream = %config.upstream_url, data = %config.data_dir.display(), "serving");

    let app_state = Arc::new(AppState::from_config(&config)?);
    let app = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on {}", addr);

    axum::Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
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
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests;
