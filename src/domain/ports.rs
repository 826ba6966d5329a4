use crate::domain::model::InquiryPayload;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where a completed inquiry goes. The HTTP endpoint in production, an
/// in-memory collector in tests.
#[async_trait]
pub trait InquirySink: Send + Sync {
    async fn submit(&self, payload: &InquiryPayload) -> Result<SubmissionReceipt>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub status: u16,
    /// Identifier echoed back by the endpoint, when it sends one.
    pub reference: Option<String>,
}
