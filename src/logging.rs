//! Logging setup.
//!
//! Installs a global tracing subscriber writing to stderr. Verbosity comes
//! from the launcher's `-v` count rather than the environment.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INSTALLED: OnceLock<()> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter {directive:?}: {source}")]
    Filter {
        directive: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing_subscriber::util::TryInitError),
}

/// Initialize tracing. Subsequent calls are no-ops.
pub fn init(verbosity: u8) -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let directive = filter_directive(verbosity);
    let filter = EnvFilter::builder()
        .parse(&directive)
        .map_err(|source| LoggingError::Filter {
            directive: directive.clone(),
            source,
        })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;
    let _ = INSTALLED.set(());

    tracing::debug!("Logging initialized at {directive}");
    Ok(())
}

fn filter_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Keep HTTP internals quiet unless explicitly asked for everything.
    if verbosity >= 3 {
        level.to_string()
    } else {
        format!("warn,voxcheck={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(filter_directive(0), "warn,voxcheck=warn");
        assert_eq!(filter_directive(1), "warn,voxcheck=info");
        assert_eq!(filter_directive(2), "warn,voxcheck=debug");
        assert_eq!(filter_directive(5), "trace");
    }

    #[test]
    fn directives_parse() {
        for v in 0..4 {
            assert!(EnvFilter::builder().parse(filter_directive(v)).is_ok());
        }
    }
}
