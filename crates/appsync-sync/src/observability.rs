// Tracing initialization driven by the logging section of the config.
use appsync_config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. `RUST_LOG` wins over the configured
/// level. Returns false when a subscriber was already installed.
pub fn init_tracing(logging: &LoggingConfig) -> bool {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_a_no_op() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
        };
        init_tracing(&logging);
        assert!(!init_tracing(&LoggingConfig::default()));
    }
}
