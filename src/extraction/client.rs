// src/extraction/client.rs
//! Client for the third-party company/executive extraction service.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{error, info, warn};

use super::{fallback::fallback_output, ExtractionEnvelope, ExtractionOutput};

pub struct ExtractionClient {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl ExtractionClient {
    /// Create a new client. The bearer token is a server-side-only secret;
    /// when it is absent every request resolves to the fallback payload.
    pub fn new(endpoint: String, api_token: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_token,
        })
    }

    /// Extract company and decision-maker info for a job posting.
    ///
    /// Never fails: missing credentials, a non-success status, or any
    /// transport/decode error all degrade to the hardcoded fallback
    /// payload. No retry, no backoff.
    pub async fn extract(&self, job_url: &str) -> ExtractionOutput {
        let token = match &self.api_token {
            Some(token) => token,
            None => {
                warn!("Extraction API token not configured, using fallback payload");
                return fallback_output(job_url);
            }
        };

        match self.call_service(job_url, token).await {
            Ok(output) => output,
            Err(e) => {
                error!("Extraction service call failed: {}, using fallback", e);
                fallback_output(job_url)
            }
        }
    }

    async fn call_service(&self, job_url: &str, token: &str) -> Result<ExtractionOutput> {
        let payload = json!({ "jobPostUrl": job_url });

        info!("Calling extraction service: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .context("Extraction request failed")?;

        let status = response.status();
        if status.is_success() {
            let envelope: ExtractionEnvelope = response
                .json()
                .await
                .context("Failed to parse extraction response")?;
            Ok(envelope.output)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!(
                "Extraction service returned status {}: {}",
                status,
                error_text
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_serves_fallback_without_network() {
        let client = ExtractionClient::new("http://127.0.0.1:1/unreachable".to_string(), None, 1)
            .unwrap();
        let output = client.extract("https://example.com/jobs/1").await;
        assert_eq!(
            output.job_post_url.as_deref(),
            Some("https://example.com/jobs/1")
        );
        assert!(output.job_details.is_some());
    }
}
