mod error;
mod handlers;
mod models;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::config::LocalConfig;

pub use error::ApiError;
pub use models::{AccountDataPayload, ProjectionRequest, ProjectionResponse, ReservePayload};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<LocalConfig>,
}

impl AppState {
    pub fn new(config: Arc<LocalConfig>) -> Self {
        Self { config }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/projection/:action", post(handlers::project_position))
        .with_state(state)
}

pub async fn start_server(local_config: Arc<LocalConfig>) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", local_config.port).parse()?;
    info!("Starting projection server on {}", addr);

    axum::Server::bind(&addr)
        .serve(router(AppState::new(local_config)).into_make_service())
        .await?;
    Ok(())
}
