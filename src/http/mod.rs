//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → codec::from_http_request (structured or binary)
//!     → Event logged
//!     → reply encoded per reply.mode (binary headers, structured JSON, or 202)
//!     → Send to client
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
