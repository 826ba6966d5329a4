use crate::domain::catalog::NORMAL_TIMELINE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The visitor's current selections. Lives for one form session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    #[serde(default)]
    pub project_type: String,
    /// Selection order, not catalog order.
    #[serde(default)]
    pub selected_features: Vec<String>,
    #[serde(default)]
    pub selected_additional_services: Vec<String>,
    #[serde(default = "default_timeline")]
    pub timeline: String,
    #[serde(default)]
    pub needs_maintenance: bool,
    #[serde(default)]
    pub maintenance_level: String,
}

fn default_timeline() -> String {
    NORMAL_TIMELINE.to_string()
}

impl Default for EstimateRequest {
    fn default() -> Self {
        Self {
            project_type: String::new(),
            selected_features: Vec::new(),
            selected_additional_services: Vec::new(),
            timeline: default_timeline(),
            needs_maintenance: false,
            maintenance_level: String::new(),
        }
    }
}

impl EstimateRequest {
    pub fn new(project_type: impl Into<String>) -> Self {
        Self {
            project_type: project_type.into(),
            ..Default::default()
        }
    }

    pub fn with_features<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            insert_unique(&mut self.selected_features, key.into());
        }
        self
    }

    pub fn with_services<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            insert_unique(&mut self.selected_additional_services, key.into());
        }
        self
    }

    pub fn with_timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = timeline.into();
        self
    }

    pub fn with_maintenance(mut self, level: impl Into<String>) -> Self {
        self.needs_maintenance = true;
        self.maintenance_level = level.into();
        self
    }

    /// Checkbox behaviour: adds the key at the end, or removes it if present.
    /// Returns whether the feature is selected afterwards.
    pub fn toggle_feature(&mut self, key: &str) -> bool {
        toggle(&mut self.selected_features, key)
    }

    pub fn toggle_service(&mut self, key: &str) -> bool {
        toggle(&mut self.selected_additional_services, key)
    }

    pub fn has_project_type(&self) -> bool {
        !self.project_type.trim().is_empty()
    }
}

fn insert_unique(keys: &mut Vec<String>, key: String) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

fn toggle(keys: &mut Vec<String>, key: &str) -> bool {
    if let Some(pos) = keys.iter().position(|k| k == key) {
        keys.remove(pos);
        false
    } else {
        keys.push(key.to_string());
        true
    }
}

/// Whole-pound price range. `{0, 0}` means no category has been chosen yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub min: u64,
    pub max: u64,
}

impl EstimateResult {
    pub const PENDING: EstimateResult = EstimateResult { min: 0, max: 0 };

    pub fn is_pending(&self) -> bool {
        *self == Self::PENDING
    }
}

impl std::fmt::Display for EstimateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "£{} - £{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub item: String,
    pub price: String,
    /// False for lines that are shown but not part of the estimate total
    /// (percentages, monthly fees, unknown keys).
    #[serde(default)]
    pub included_in_total: bool,
}

/// Body sent to the inquiry endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub project_description: String,
    #[serde(flatten)]
    pub request: EstimateRequest,
    pub estimate: EstimateResult,
    pub breakdown: Vec<BreakdownLine>,
    pub submitted_at: DateTime<Utc>,
}
