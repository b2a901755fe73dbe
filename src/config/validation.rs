use crate::config::types::{FetcherConfig, QueryOptions};
use crate::ConfigError;
use url::Url;

/// Validates the fetcher configuration
pub fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    let url = Url::parse(&config.search_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "search_url '{}' must use HTTP or HTTPS",
            config.search_url
        )));
    }

    // Query parameters are appended as `&name=value`
    if !config.search_url.contains('?') {
        return Err(ConfigError::InvalidUrl(format!(
            "search_url '{}' must end in a query string",
            config.search_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the query options
///
/// Ranges are deliberately not checked here: a malformed range is logged and
/// dropped when the URL is built.
pub fn validate_query_options(options: &QueryOptions) -> Result<(), ConfigError> {
    if options.distance == 0 {
        return Err(ConfigError::Validation(
            "distance must be >= 1".to_string(),
        ));
    }

    if options.number == Some(0) {
        return Err(ConfigError::Validation(
            "number of results must be >= 1".to_string(),
        ));
    }

    for (name, value) in [
        ("make", &options.make),
        ("model", &options.model),
        ("model_group", &options.model_group),
    ] {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}
