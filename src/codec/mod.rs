//! Event wire codec.
//!
//! # Data Flow
//! ```text
//! Inbound:
//!     HTTP request (headers + body)
//!     → decoder.rs (Content-Type picks structured or binary)
//!     → (Event, Mode)
//!
//! Outbound:
//!     Event
//!     → encoder.rs (ce-* headers + Content-Type, binary mode only)
//!     → marshal.rs (structured JSON document, or raw payload bytes)
//! ```
//!
//! # Design Decisions
//! - Attribute names resolve through `event::Attribute` on every path
//! - Field-level decode failures degrade to absent values; only body reads
//!   and envelope syntax errors are reported
//! - Extension values are plain strings in both directions

pub mod decoder;
pub mod encoder;
pub mod marshal;
pub mod types;

pub use decoder::{decode, from_http_request};
pub use encoder::add_header;
pub use types::{CodecError, CodecResult, Mode, STRUCTURED_CONTENT_TYPE};
