//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem once at startup
//! - Map the numeric diagnostic verbosity onto tracing levels
//! - Write to stderr, timestamped unless verbosity is 0
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Verbosity is a config value, never mutated after startup
//! - RUST_LOG or an explicit filter directive overrides the verbosity mapping

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::fmt::{time::ChronoLocal, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Highest meaningful verbosity; codec tracing appears here.
pub const MAX_VERBOSITY: u8 = 3;

/// `YYYY/MM/DD hh:mm:ss:` prefix.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S:";

/// Maximum level shown for a verbosity.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Build the filter for a configuration, honoring `RUST_LOG`.
pub fn filter_for(config: &ObservabilityConfig) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    resolve_filter(env.as_deref(), config)
}

/// Filter precedence: environment directive, then `log_filter`, then verbosity.
/// Unparsable directives fall through to the next source.
pub fn resolve_filter(env: Option<&str>, config: &ObservabilityConfig) -> EnvFilter {
    let directives = env.into_iter().chain(config.log_filter.as_deref());
    for directive in directives {
        if let Ok(filter) = EnvFilter::try_new(directive) {
            return filter;
        }
    }
    EnvFilter::default().add_directive(level_for_verbosity(config.verbosity).into())
}

/// Format layer for verbosity 0: the message alone, no timestamp, level or target.
pub fn bare_layer<S, W>(writer: W) -> tracing_subscriber::fmt::Layer<S, DefaultFields, Format<Full, ()>, W>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .without_time()
        .with_level(false)
        .with_target(false)
}

/// Install the global subscriber.
pub fn init(config: &ObservabilityConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    if config.verbosity == 0 {
        tracing_subscriber::registry()
            .with(filter_for(config))
            .with(bare_layer(std::io::stderr))
            .try_init()
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));
        tracing_subscriber::registry()
            .with(filter_for(config))
            .with(layer)
            .try_init()
    }
}
