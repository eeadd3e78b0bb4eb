//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Apply CLI overrides → Validate → Init logging → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → trigger → server stops accepting → in-flight requests drain → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
