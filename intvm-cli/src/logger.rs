//! Log setup for the CLI: `LEVEL message` lines on stderr.
//!
//! Library crates only emit `tracing` events; installing the subscriber is
//! the binary's job.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

/// Pick the level from the global flags. `--trace` wins over `--verbose`.
pub fn level(verbose: bool, trace: bool) -> LevelFilter {
    if trace {
        LevelFilter::TRACE
    } else if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Install the global subscriber. No timestamps, no targets, no colour.
pub fn init(filter: LevelFilter) {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).init();
}
