use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Bridge service URL and retry budget are usable
/// - Rasterizer DPI is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.bridge.service_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "bridge.service_url cannot be empty".to_string(),
        ));
    }

    if config.bridge.retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "bridge.retry.max_attempts cannot be 0".to_string(),
        ));
    }

    if config.bridge.min_valid_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "bridge.min_valid_bytes cannot be 0".to_string(),
        ));
    }

    if config.rasterizer.dpi == 0 {
        return Err(ConfigError::ValidationError(
            "rasterizer.dpi cannot be 0".to_string(),
        ));
    }

    Ok(())
}
