//! HTTP client for the OpenALPR cloud recognition endpoint.

use crate::config::ApiConfig;
use crate::constants::api;
use crate::error::{Error, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error};

/// Anything that can turn image bytes into a recognition response.
///
/// `Ok(None)` means the service gave no usable answer; callers treat it as
/// zero detections.
pub trait Recognizer {
    /// Submit encoded image bytes.
    fn recognize_bytes(&self, image: Vec<u8>, file_name: &str) -> Result<Option<Value>>;

    /// Read an image file and submit its bytes.
    fn recognize(&self, image_path: &Path) -> Result<Option<Value>> {
        let bytes = std::fs::read(image_path).map_err(|e| Error::ImageRead {
            path: image_path.to_path_buf(),
            source: e,
        })?;
        let file_name = image_path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
        self.recognize_bytes(bytes, &file_name)
    }
}

/// Blocking recognition client.
///
/// Wraps an async `reqwest` client and a single-threaded runtime; each call
/// blocks until the response arrives.
pub struct RecognitionClient {
    client: Client,
    url: Url,
    runtime: Runtime,
}

impl RecognitionClient {
    /// Build a client for the configured endpoint.
    ///
    /// Fails with [`Error::MissingApiKey`] when `api_key` is blank.
    pub fn new(config: &ApiConfig, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let url = request_url(config, api_key)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::HttpClient { source: e })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Internal {
                message: format!("Failed to create async runtime: {e}"),
            })?;

        Ok(Self {
            client,
            url,
            runtime,
        })
    }

    async fn post(&self, image: Vec<u8>, file_name: &str) -> reqwest::Result<(StatusCode, String)> {
        let part = Part::bytes(image).file_name(file_name.to_string());
        let form = Form::new().part(api::IMAGE_FIELD, part);

        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

impl Recognizer for RecognitionClient {
    fn recognize_bytes(&self, image: Vec<u8>, file_name: &str) -> Result<Option<Value>> {
        debug!(
            "Submitting {} ({} bytes) to {}",
            file_name,
            image.len(),
            endpoint_for_display(&self.url)
        );

        let (status, body) = match self.runtime.block_on(self.post(image, file_name)) {
            Ok(reply) => reply,
            Err(e) => {
                // Never print the URL itself; it carries the secret key
                error!("Recognition request failed: {}", e.without_url());
                return Ok(None);
            }
        };

        if status != StatusCode::OK {
            error!("Error: {} - {}", status.as_u16(), body);
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| Error::ResponseDecode { source: e })
    }
}

/// Endpoint URL with the fixed query parameters and credential attached.
fn request_url(config: &ApiConfig, api_key: &str) -> Result<Url> {
    Url::parse_with_params(
        &config.endpoint,
        &[
            ("tasks", api::TASKS),
            ("recognize_vehicle", api::RECOGNIZE_VEHICLE),
            ("country", config.country.as_str()),
            ("secret_key", api_key),
        ],
    )
    .map_err(|e| Error::InvalidEndpoint {
        url: config.endpoint.clone(),
        source: Box::new(e),
    })
}

fn endpoint_for_display(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_carries_fixed_parameters() {
        let url = request_url(&ApiConfig::default(), "sk_123").unwrap();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.path(), "/v1/recognize");
        assert!(query.contains(&("tasks".to_string(), "plate".to_string())));
        assert!(query.contains(&("recognize_vehicle".to_string(), "0".to_string())));
        assert!(query.contains(&("country".to_string(), "us".to_string())));
        assert!(query.contains(&("secret_key".to_string(), "sk_123".to_string())));
    }

    #[test]
    fn test_endpoint_for_display_hides_query() {
        let url = request_url(&ApiConfig::default(), "sk_123").unwrap();
        let shown = endpoint_for_display(&url);
        assert!(!shown.contains("sk_123"));
        assert!(shown.ends_with("/v1/recognize"));
    }

    #[test]
    fn test_blank_key_fails_fast() {
        let result = RecognitionClient::new(&ApiConfig::default(), "");
        assert!(matches!(result, Err(Error::MissingApiKey)));
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = ApiConfig {
            endpoint: "::not-a-url".to_string(),
            ..ApiConfig::default()
        };
        let result = RecognitionClient::new(&config, "sk_123");
        assert!(matches!(result, Err(Error::InvalidEndpoint { .. })));
    }
}
