use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Listing timeout is not 0
/// - Listing source URL, when set, is an absolute http(s) URL
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.listing.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "listing.timeout_secs cannot be 0".to_string(),
        ));
    }

    if let Some(source_url) = &config.listing.source_url {
        let parsed = reqwest::Url::parse(source_url).map_err(|e| {
            ConfigError::ValidationError(format!("listing.source_url is invalid: {}", e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "listing.source_url must be http or https, got {}",
                parsed.scheme()
            )));
        }
    }

    Ok(())
}
