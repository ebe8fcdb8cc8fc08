use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Search tuning values are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Search validation
    if config.search.batch_concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "search.batch_concurrency must be at least 1".to_string(),
        ));
    }
    if config.search.adapter_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "search.adapter_timeout_secs must be at least 1".to_string(),
        ));
    }

    Ok(())
}
