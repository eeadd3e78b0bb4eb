//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! codec (trace: content type, members, headers written)
//! http  (info: received events; debug: replies; warn: rejected requests)
//!     → tracing macros
//!     → logging.rs subscriber (stderr)
//! ```

pub mod logging;
