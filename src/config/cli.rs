use crate::core::inquiry::InquiryForm;
use crate::domain::catalog::NORMAL_TIMELINE;
use crate::domain::model::EstimateRequest;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hire-estimator")]
#[command(about = "Price a website project and optionally send it as an inquiry")]
pub struct CliConfig {
    /// TOML file with the inquiry endpoint and price catalog
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "")]
    pub project_type: String,

    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub services: Vec<String>,

    #[arg(long, default_value = NORMAL_TIMELINE)]
    pub timeline: String,

    #[arg(long, help = "Include ongoing maintenance")]
    pub maintenance: bool,

    #[arg(long, default_value = "standard")]
    pub maintenance_level: String,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, help = "Send the inquiry instead of only printing the estimate")]
    pub submit: bool,

    /// Overrides `inquiry.endpoint` from the config file
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, help = "Print the estimate and breakdown as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn to_request(&self) -> EstimateRequest {
        let mut request = EstimateRequest::new(self.project_type.trim())
            .with_features(self.features.iter().map(|f| f.trim()).filter(|f| !f.is_empty()))
            .with_services(self.services.iter().map(|s| s.trim()).filter(|s| !s.is_empty()))
            .with_timeline(self.timeline.trim());
        if self.maintenance {
            request = request.with_maintenance(self.maintenance_level.trim());
        }
        request
    }

    pub fn to_form(&self) -> InquiryForm {
        InquiryForm {
            name: self.name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            phone: self.phone.clone(),
            project_description: self.description.clone(),
            request: self.to_request(),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            validate_url("--endpoint", endpoint)?;
        }
        if self.submit && self.json {
            return Err(EstimatorError::ConfigError {
                message: "--json prints the estimate only and cannot be combined with --submit"
                    .to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_args() {
        let config = CliConfig::parse_from([
            "hire-estimator",
            "--project-type",
            "ecommerce",
            "--features",
            "seo, blog,seo",
            "--services",
            "maintenance",
            "--timeline",
            "rush",
            "--maintenance",
        ]);

        let request = config.to_request();
        assert_eq!(request.project_type, "ecommerce");
        assert_eq!(request.selected_features, vec!["seo", "blog"]);
        assert_eq!(request.selected_additional_services, vec!["maintenance"]);
        assert_eq!(request.timeline, "rush");
        assert!(request.needs_maintenance);
        assert_eq!(request.maintenance_level, "standard");
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["hire-estimator"]);
        let request = config.to_request();
        assert!(!request.has_project_type());
        assert_eq!(request.timeline, "normal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_endpoint_override() {
        let config = CliConfig::parse_from(["hire-estimator", "--endpoint", "localhost"]);
        assert!(config.validate().is_err());
    }
}
