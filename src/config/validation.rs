use crate::config::types::CrawlConfig;
use crate::ConfigError;
use url::Url;

/// Validates the crawl configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.start_url).map_err(|e| ConfigError::InvalidSeed {
        url: config.start_url.clone(),
        reason: e.to_string(),
    })?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::InvalidSeed {
            url: config.start_url.clone(),
            reason: format!("unsupported scheme '{}'", seed.scheme()),
        });
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::InvalidSeed {
            url: config.start_url.clone(),
            reason: "no host component".to_string(),
        });
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_concurrent < 1 || config.max_concurrent > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent must be between 1 and 100, got {}",
            config.max_concurrent
        )));
    }

    Ok(())
}
