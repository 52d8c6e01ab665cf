//! Transport seam for the conversion service.

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::config::BridgeConfig;
use super::error::BridgeError;

/// One upload of a source document, returning the raw response body.
///
/// The transport performs exactly one external call per invocation; retry
/// and locking live in [`OfficeToPdfBridge`](super::OfficeToPdfBridge).
#[async_trait]
pub trait BridgeTransport: Send + Sync {
    /// Uploads `document` and returns the response body bytes.
    async fn upload(&self, document: &Path) -> Result<Vec<u8>, BridgeError>;
}

/// HTTP multipart transport to the configured conversion service.
pub struct HttpBridgeTransport {
    client: Client,
    endpoint: String,
}

impl HttpBridgeTransport {
    /// Creates a transport for the given bridge configuration.
    pub fn new(config: &BridgeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        let endpoint = format!("{}/convert", config.service_url.trim_end_matches('/'));
        Self { client, endpoint }
    }
}

#[async_trait]
impl BridgeTransport for HttpBridgeTransport {
    async fn upload(&self, document: &Path) -> Result<Vec<u8>, BridgeError> {
        if !document.exists() {
            return Err(BridgeError::InputNotFound {
                path: document.to_path_buf(),
            });
        }

        let bytes = tokio::fs::read(document).await?;
        let file_name = document
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());

        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name));

        debug!(document = %document.display(), endpoint = %self.endpoint, "uploading document");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BridgeError::unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BridgeError::unreachable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BridgeError::unreachable(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_normalization() {
        let config = BridgeConfig::new("http://converter:3000/");
        let transport = HttpBridgeTransport::new(&config);
        assert_eq!(transport.endpoint, "http://converter:3000/convert");
    }

    #[tokio::test]
    async fn test_missing_document_is_reported() {
        let transport = HttpBridgeTransport::new(&BridgeConfig::default());
        let result = transport.upload(Path::new("/nonexistent/report.docx")).await;
        assert!(matches!(result, Err(BridgeError::InputNotFound { .. })));
    }
}
