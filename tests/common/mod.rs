//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use cloudevents_http::config::{GatewayConfig, ReplyMode};
use cloudevents_http::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// Start a gateway on an ephemeral port. Dropping the returned `Shutdown`
/// stops it.
pub async fn start_gateway(mode: ReplyMode) -> (SocketAddr, Shutdown) {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.reply.mode = mode;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// HTTP client that never reuses connections between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
