//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Decode received events and echo them back in the configured mode
//! - Bind server to listener and stop on the shutdown signal

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::codec::{self, CodecResult, STRUCTURED_CONTENT_TYPE};
use crate::config::{GatewayConfig, ReplyMode};
use crate::event::Event;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub max_body_size: usize,
    pub reply_mode: ReplyMode,
}

/// HTTP server receiving events.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let state = AppState {
            max_body_size: config.limits.max_body_size,
            reply_mode: config.reply.mode,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", post(receive_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            reply_mode = ?self.config.reply.mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Decode one event and reply with it.
async fn receive_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (event, mode) = match codec::from_http_request(request, state.max_body_size).await {
        Ok(decoded) => decoded,
        Err(e) if e.is_body_too_large() => {
            tracing::warn!(request_id = %request_id, limit = state.max_body_size, "Event body too large");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Event body too large").into_response();
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected event");
            return (StatusCode::BAD_REQUEST, format!("Invalid event: {}", e)).into_response();
        }
    };

    tracing::info!(
        request_id = %request_id,
        mode = %mode,
        id = event.id().unwrap_or("-"),
        event_type = event.ty().unwrap_or("-"),
        source = event.source().unwrap_or("-"),
        extensions = event.extensions.len(),
        "Received event"
    );

    match reply(&event, state.reply_mode) {
        Ok(response) => {
            tracing::debug!(request_id = %request_id, reply_mode = ?state.reply_mode, "Replying");
            response
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to encode reply");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode event").into_response()
        }
    }
}

fn reply(event: &Event, mode: ReplyMode) -> CodecResult<Response> {
    match mode {
        ReplyMode::Binary => {
            let mut headers = HeaderMap::new();
            event.to_http_headers(&mut headers);
            Ok((StatusCode::OK, headers, event.payload()?).into_response())
        }
        ReplyMode::Structured => {
            let body = event.marshal()?;
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, HeaderValue::from_static(STRUCTURED_CONTENT_TYPE))],
                body,
            )
                .into_response())
        }
        ReplyMode::None => Ok(StatusCode::ACCEPTED.into_response()),
    }
}

async fn health_handler() -> &'static str {
    "ok"
}
