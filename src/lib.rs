//! Structured-event envelopes over HTTP.
//!
//! Decodes structured-mode (`application/cloudevents+json`) and binary-mode
//! (`ce-*` headers + raw body) requests into one normalized [`Event`], and
//! encodes events back into binary-mode headers or a structured JSON document.

pub mod codec;
pub mod config;
pub mod event;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use codec::{decode, from_http_request, CodecError, Mode};
pub use config::GatewayConfig;
pub use event::{Attribute, Event};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
