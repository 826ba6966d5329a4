use crate::core::breakdown::compute_breakdown;
use crate::core::estimate::compute_estimate;
use crate::domain::catalog::PriceCatalog;
use crate::domain::model::{EstimateRequest, InquiryPayload};
use crate::domain::ports::{InquirySink, SubmissionReceipt};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_email, validate_required};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Project,
    Features,
    Timeline,
    Contact,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Project,
        WizardStep::Features,
        WizardStep::Timeline,
        WizardStep::Contact,
    ];

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Project => Some(WizardStep::Features),
            WizardStep::Features => Some(WizardStep::Timeline),
            WizardStep::Timeline => Some(WizardStep::Contact),
            WizardStep::Contact => None,
        }
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Project => None,
            WizardStep::Features => Some(WizardStep::Project),
            WizardStep::Timeline => Some(WizardStep::Features),
            WizardStep::Contact => Some(WizardStep::Timeline),
        }
    }
}

/// Everything the hire-page wizard collects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub project_description: String,
    pub request: EstimateRequest,
}

impl InquiryForm {
    pub fn new(request: EstimateRequest) -> Self {
        Self {
            request,
            ..Default::default()
        }
    }

    /// Required-field checks for one step; the first failing field wins.
    pub fn validate_step(&self, step: WizardStep) -> Result<()> {
        match step {
            WizardStep::Project => {
                validate_required("project_type", &self.request.project_type)?;
                validate_required("project_description", &self.project_description)
            }
            WizardStep::Features => Ok(()),
            WizardStep::Timeline => validate_required("timeline", &self.request.timeline),
            WizardStep::Contact => {
                validate_required("name", &self.name)?;
                validate_email("email", &self.email)
            }
        }
    }

    pub fn validate_all(&self) -> Result<()> {
        WizardStep::ALL
            .iter()
            .try_for_each(|step| self.validate_step(*step))
    }

    /// The chosen project type must be a catalog key, otherwise the inquiry
    /// would go out with the pending `{0, 0}` estimate.
    pub fn validate_project_type(&self, catalog: &PriceCatalog) -> Result<()> {
        if catalog.base_package(&self.request.project_type).is_none() {
            return Err(EstimatorError::ValidationError {
                field: "project_type".to_string(),
                message: format!(
                    "Please choose one of the listed project types ({})",
                    catalog
                        .base_packages
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Attach the estimate and breakdown computed from the form's selections.
    pub fn to_payload(&self, catalog: &PriceCatalog) -> InquiryPayload {
        InquiryPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: non_blank(&self.company),
            phone: non_blank(&self.phone),
            project_description: self.project_description.trim().to_string(),
            request: self.request.clone(),
            estimate: compute_estimate(catalog, &self.request),
            breakdown: compute_breakdown(catalog, &self.request),
            submitted_at: Utc::now(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Transient message shown after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success {
        message: String,
        reference: Option<String>,
    },
    Error {
        message: String,
    },
}

impl Notification {
    pub fn is_success(&self) -> bool {
        matches!(self, Notification::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Success { message, .. } | Notification::Error { message } => message,
        }
    }
}

pub struct InquiryFlow<'a, S: InquirySink> {
    catalog: &'a PriceCatalog,
    sink: S,
}

impl<'a, S: InquirySink> InquiryFlow<'a, S> {
    pub fn new(catalog: &'a PriceCatalog, sink: S) -> Self {
        Self { catalog, sink }
    }

    /// Validate, price and send the inquiry once.
    ///
    /// Validation failures are returned as errors so the wizard can jump back
    /// to the offending step. Delivery failures become an error notification;
    /// nothing is retried.
    pub async fn submit(&self, form: &InquiryForm) -> Result<Notification> {
        form.validate_all()?;
        form.validate_project_type(self.catalog)?;

        let payload = form.to_payload(self.catalog);
        tracing::info!(
            project_type = %payload.request.project_type,
            min = payload.estimate.min,
            max = payload.estimate.max,
            lines = payload.breakdown.len(),
            "submitting inquiry"
        );

        match self.sink.submit(&payload).await {
            Ok(SubmissionReceipt { reference, status }) => {
                tracing::info!(status, ?reference, "inquiry accepted");
                Ok(Notification::Success {
                    message: "Thanks! Your inquiry has been sent, I'll be in touch soon."
                        .to_string(),
                    reference,
                })
            }
            Err(e) => {
                tracing::warn!(
                    "inquiry submission failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                Ok(Notification::Error {
                    message: e.user_friendly_message(),
                })
            }
        }
    }
}
