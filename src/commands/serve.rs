//! Serve command handler: run the gallery web server.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use cookbook_core::FileConfig;
use cookbook_core::web::{AppState, Library, SessionStore, serve};
use tracing::info;

use super::build_source;
use crate::cli::{ServeArgs, SourceArgs};

pub async fn run_serve_command(
    args: &ServeArgs,
    source: &SourceArgs,
    config: FileConfig,
) -> Result<()> {
    let bind = match args.bind {
        Some(bind) => bind,
        None => config
            .server
            .bind
            .parse::<IpAddr>()
            .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?,
    };
    let port = args.port.unwrap_or(config.server.port);
    let address = SocketAddr::new(bind, port);

    let source = build_source(source, &config)?;
    info!(
        source = %source.describe(),
        cache_ttl_secs = config.server.cache_ttl_secs,
        "Preparing cookbook server"
    );

    let library = Library::new(source, config.fields.clone(), config.server.cache_ttl());
    let sessions = SessionStore::new(config.server.session_idle())
        .with_max_sessions(config.server.max_sessions);
    let state = Arc::new(AppState::new(library, sessions, config.page));

    serve(state, address)
        .await
        .with_context(|| format!("Server on {address} failed"))
}
