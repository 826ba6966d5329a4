pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpInquirySink;
pub use config::EstimatorConfig;
pub use crate::core::breakdown::compute_breakdown;
pub use crate::core::estimate::compute_estimate;
pub use crate::core::inquiry::{InquiryFlow, InquiryForm, Notification, WizardStep};
pub use domain::catalog::{PriceCatalog, ServicePrice};
pub use domain::model::{BreakdownLine, EstimateRequest, EstimateResult};
pub use utils::error::{EstimatorError, Result};
