use crate::domain::model::InquiryPayload;
use crate::domain::ports::{InquirySink, SubmissionReceipt};
use crate::utils::error::{EstimatorError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// POSTs inquiries as JSON to the "create inquiry" endpoint.
pub struct HttpInquirySink {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl HttpInquirySink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn with_headers(mut self, headers: &HashMap<String, String>) -> Result<Self> {
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                EstimatorError::InvalidConfigValueError {
                    field: "inquiry.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                EstimatorError::InvalidConfigValueError {
                    field: format!("inquiry.headers.{}", name),
                    value: "<redacted>".to_string(),
                    reason: e.to_string(),
                }
            })?;
            self.headers.insert(header_name, header_value);
        }
        Ok(self)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InquirySink for HttpInquirySink {
    async fn submit(&self, payload: &InquiryPayload) -> Result<SubmissionReceipt> {
        tracing::debug!("Posting inquiry to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Inquiry endpoint response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EstimatorError::SubmissionRejected {
                status: status.as_u16(),
                body,
            });
        }

        // The body is optional; some endpoints answer 204.
        let body = response.text().await?;
        let reference = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| {
                json.get("id")
                    .or_else(|| json.get("reference"))
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
            });

        Ok(SubmissionReceipt {
            status: status.as_u16(),
            reference,
        })
    }
}
