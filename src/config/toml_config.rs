use crate::domain::catalog::{PriceCatalog, ServicePrice, NORMAL_TIMELINE};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// Ceiling for any single catalog amount, in pounds.
pub const MAX_CATALOG_PRICE: u64 = 100_000_000;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub inquiry: Option<InquiryConfig>,
    /// Built-in catalog when the section is absent.
    #[serde(default)]
    pub catalog: PriceCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            inquiry: None,
            catalog: PriceCatalog::default(),
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replace `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn inquiry_endpoint(&self) -> Option<&str> {
        self.inquiry.as_ref().map(|i| i.endpoint.as_str())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(inquiry) = &self.inquiry {
            validate_url("inquiry.endpoint", &inquiry.endpoint)?;
            if let Some(timeout) = inquiry.timeout_seconds {
                validate_positive_number("inquiry.timeout_seconds", timeout, 1)?;
            }
        }
        self.catalog.validate()
    }
}

impl Validate for EstimatorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl Validate for PriceCatalog {
    fn validate(&self) -> Result<()> {
        if self.base_packages.is_empty() {
            return Err(EstimatorError::MissingConfigError {
                field: "catalog.base_packages".to_string(),
            });
        }

        for (key, package) in &self.base_packages {
            validate_price(&format!("catalog.base_packages.{}.max", key), package.max)?;
            if package.min > package.max {
                return Err(EstimatorError::InvalidConfigValueError {
                    field: format!("catalog.base_packages.{}", key),
                    value: format!("{}-{}", package.min, package.max),
                    reason: "min must not exceed max".to_string(),
                });
            }
        }

        for (key, feature) in &self.features {
            validate_price(&format!("catalog.features.{}.price", key), feature.price)?;
        }

        for (key, service) in &self.additional_services {
            let field = format!("catalog.additional_services.{}.price", key);
            match service.price {
                ServicePrice::Flat(amount) => validate_price(&field, amount)?,
                ServicePrice::Range { max, .. } => validate_price(&field, max)?,
                ServicePrice::Recurring { min, max } => {
                    validate_price(&field, max.unwrap_or(min))?
                }
                ServicePrice::Percentage(pct) => validate_range(&field, pct, 0, 1000)?,
                ServicePrice::Maintenance => {}
            }
        }

        for (key, fee) in &self.maintenance_pricing {
            validate_price(&format!("catalog.maintenance_pricing.{}", key), *fee)?;
        }

        // The breakdown hides the normal timeline, so it must not change the total.
        match self.timeline_multipliers.get(NORMAL_TIMELINE) {
            Some(m) if (*m - 1.0).abs() < f64::EPSILON => {}
            Some(m) => {
                return Err(EstimatorError::InvalidConfigValueError {
                    field: format!("catalog.timeline_multipliers.{}", NORMAL_TIMELINE),
                    value: m.to_string(),
                    reason: "the normal timeline must have multiplier 1.0".to_string(),
                })
            }
            None => {
                return Err(EstimatorError::MissingConfigError {
                    field: format!("catalog.timeline_multipliers.{}", NORMAL_TIMELINE),
                })
            }
        }

        for (key, multiplier) in &self.timeline_multipliers {
            validate_range(
                &format!("catalog.timeline_multipliers.{}", key),
                *multiplier,
                0.01,
                10.0,
            )?;
        }

        for key in self.maintenance_pricing.keys() {
            if !self.base_packages.contains_key(key) {
                tracing::warn!("maintenance price for unknown project type '{}'", key);
            }
        }

        Ok(())
    }
}

fn validate_price(field: &str, amount: u64) -> Result<()> {
    validate_range(field, amount, 0, MAX_CATALOG_PRICE)
}
