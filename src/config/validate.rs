//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api(config)?;
    validate_annotation(config)?;
    Ok(())
}

/// Validate recognition API settings.
fn validate_api(config: &Config) -> Result<()> {
    let api = &config.api;

    if reqwest::Url::parse(&api.endpoint).is_err() {
        return Err(Error::ConfigValidation {
            message: format!("api.endpoint is not a valid URL: '{}'", api.endpoint),
        });
    }

    if api.country.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "api.country must not be empty".to_string(),
        });
    }

    if api.timeout_secs == Some(0) {
        return Err(Error::ConfigValidation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validate annotation settings.
fn validate_annotation(config: &Config) -> Result<()> {
    let annotation = &config.annotation;

    if annotation.stroke_width == 0 {
        return Err(Error::ConfigValidation {
            message: "annotation.stroke_width must be at least 1".to_string(),
        });
    }

    if !annotation.font_size.is_finite() || annotation.font_size <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "annotation.font_size must be positive, got {}",
                annotation.font_size
            ),
        });
    }

    Ok(())
}

/// Pick the API credential: explicit value first (flag or `API_KEY`), then
/// the config file. Blank values count as missing.
pub fn resolve_api_key(explicit: Option<&str>, config: &Config) -> Result<String> {
    let non_blank = |key: &&str| !key.trim().is_empty();
    explicit
        .filter(non_blank)
        .or_else(|| config.api.secret_key.as_deref().filter(non_blank))
        .map(|key| key.trim().to_string())
        .ok_or(Error::MissingApiKey)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.api.endpoint = "not a url".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_country() {
        let mut config = Config::default();
        config.api.country = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_stroke() {
        let mut config = Config::default();
        config.annotation.stroke_width = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_non_positive_font_size() {
        let mut config = Config::default();
        config.annotation.font_size = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_resolve_api_key_prefers_explicit() {
        let mut config = Config::default();
        config.api.secret_key = Some("from-file".to_string());
        assert_eq!(
            resolve_api_key(Some("from-flag"), &config).unwrap(),
            "from-flag"
        );
    }

    #[test]
    fn test_resolve_api_key_falls_back_to_config() {
        let mut config = Config::default();
        config.api.secret_key = Some("from-file".to_string());
        assert_eq!(resolve_api_key(None, &config).unwrap(), "from-file");
    }

    #[test]
    fn test_resolve_api_key_missing_fails() {
        let config = Config::default();
        assert!(matches!(
            resolve_api_key(None, &config),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn test_resolve_api_key_blank_is_missing() {
        let config = Config::default();
        assert!(matches!(
            resolve_api_key(Some("   "), &config),
            Err(Error::MissingApiKey)
        ));
    }
}
