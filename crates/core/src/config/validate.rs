use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Probe and download URL lists are not empty
/// - Every URL is http(s)
/// - Extractor timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    check_urls("probe.urls", &config.probe.urls)?;
    check_urls("download.urls", &config.download.urls)?;

    if config.extractor.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "extractor.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

fn check_urls(field: &str, urls: &[String]) -> Result<(), ConfigError> {
    if urls.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }

    for url in urls {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::ValidationError(format!(
                "{} contains a non-http URL: {}",
                field, url
            )));
        }
    }

    Ok(())
}
