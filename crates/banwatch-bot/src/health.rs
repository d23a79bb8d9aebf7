//! `GET /` liveness endpoint for the hosting platform.
//!
//! Replies `Bot <tag> is working` once the gateway has reported ready and
//! `Bot None is working` before that. Every other path is a 404.

use axum::{extract::State, routing::get, Router};
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use tokio::sync::RwLock;

const NOT_CONNECTED: &str = "None";

/// Bot tag shared between the `ready` event and the HTTP handler.
#[derive(Clone, Default)]
pub struct HealthState {
    bot_name: Arc<RwLock<Option<String>>>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_bot_name(&self, name: String) {
        *self.bot_name.write().await = Some(name);
    }

    async fn status_line(&self) -> String {
        let name = self.bot_name.read().await;
        format!("Bot {} is working", name.as_deref().unwrap_or(NOT_CONNECTED))
    }
}

impl TypeMapKey for HealthState {
    type Value = HealthState;
}

async fn root_handler(State(state): State<HealthState>) -> String {
    state.status_line().await
}

pub fn create_health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .with_state(state)
}

/// Serve the router on `0.0.0.0:<port>` until the process exits.
pub async fn start_health_server(state: HealthState, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Health check server listening on {}", addr);
    axum::serve(listener, create_health_router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt as _;

    async fn get(state: HealthState, uri: &str) -> (StatusCode, String) {
        let response = create_health_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_before_ready() {
        let (status, body) = get(HealthState::new(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Bot None is working");
    }

    #[tokio::test]
    async fn test_root_after_ready() {
        let state = HealthState::new();
        state.set_bot_name("banwatch#0001".to_string()).await;
        let (status, body) = get(state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Bot banwatch#0001 is working");
    }

    #[tokio::test]
    async fn test_later_ready_replaces_name() {
        let state = HealthState::new();
        state.set_bot_name("old#0001".to_string()).await;
        state.set_bot_name("new#0002".to_string()).await;
        let (_, body) = get(state, "/").await;
        assert_eq!(body, "Bot new#0002 is working");
    }

    #[tokio::test]
    async fn test_only_root_is_served() {
        for uri in ["/health", "/live", "/admin"] {
            let (status, _) = get(HealthState::new(), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }
}
