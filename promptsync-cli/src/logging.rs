//! Logging setup for the CLI

use tracing::Level;

/// Level selected by the global verbosity flags. `quiet` wins over the others.
pub fn log_level(verbose: bool, debug: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::WARN
    }
}

/// Install the stderr subscriber. Stdout stays reserved for command output.
pub fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let level = log_level(verbose, debug, quiet);
    let filter = EnvFilter::new(format!("notify=warn,{level}"));

    let _ = registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
