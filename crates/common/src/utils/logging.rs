use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "warn,client=info,service=info";

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize tracing subscriber with sensible defaults and stderr writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `warn,client=info,service=info`
/// - Writes to stderr; stdout carries command output
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(filter_or(DEFAULT_DIRECTIVES))
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, defaults to the same directives as
///   [`init_logging_default`]
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(filter_or(DEFAULT_DIRECTIVES))
        .with_target(false)
        .json()
        .with_writer(io::stderr)
        .try_init();
}

/// Verbose variant used by `--verbose`: debug for the workspace crates.
pub fn init_logging_verbose() {
    let _ = fmt()
        .with_env_filter(filter_or("info,client=debug,service=debug,configs=debug"))
        .with_target(true)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging_default();
        init_logging_json();
        init_logging_verbose();
        tracing::info!("still logging");
    }
}
