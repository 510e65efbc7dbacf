use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_target_config(&config.target)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.num_threads < 1 || config.num_threads > 256 {
        return Err(ConfigError::Validation(format!(
            "num-threads must be between 1 and 256, got {}",
            config.num_threads
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1".to_string(),
        ));
    }

    if config.num_seeds < 1 {
        return Err(ConfigError::Validation(
            "num-seeds must be >= 1".to_string(),
        ));
    }

    if config.min_interval_secs < 0.0 {
        return Err(ConfigError::Validation(
            "min-interval-secs must be >= 0".to_string(),
        ));
    }

    if config.max_wait_secs < config.min_interval_secs {
        return Err(ConfigError::Validation(
            "max-wait-secs must be >= min-interval-secs".to_string(),
        ));
    }

    if config.retry_budget < 1 {
        return Err(ConfigError::Validation(
            "retry-budget must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.string.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent string cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.seed_file.is_empty() {
        return Err(ConfigError::Validation(
            "seed-file cannot be empty".to_string(),
        ));
    }

    if config.log_dir.is_empty() {
        return Err(ConfigError::Validation(
            "log-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the target TLD suffix
fn validate_target_config(
    config: &crate::config::types::TargetConfig,
) -> Result<(), ConfigError> {
    if !config.tld_suffix.starts_with('.') {
        return Err(ConfigError::Validation(format!(
            "tld-suffix must start with '.', got '{}'",
            config.tld_suffix
        )));
    }
    Ok(())
}
