pub mod breakdown;
pub mod estimate;
pub mod inquiry;
pub mod price;

pub use crate::domain::catalog::{PriceCatalog, ServicePrice};
pub use crate::domain::model::{BreakdownLine, EstimateRequest, EstimateResult, InquiryPayload};
pub use crate::domain::ports::{InquirySink, SubmissionReceipt};
pub use crate::utils::error::Result;
